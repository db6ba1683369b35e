use crate::error::SimResult;
use crate::render::{PresentationFrame, Presenter};

/// No-op presenter used by tests and headless sessions.
///
/// It still validates frame content so tests catch invalid geometry before a
/// real surface is attached.
#[derive(Debug, Default)]
pub struct NullPresenter {
    pub frames_presented: usize,
    pub last_marker_count: usize,
    pub last_guide_line_count: usize,
    pub last_frame: Option<PresentationFrame>,
}

impl Presenter for NullPresenter {
    fn present(&mut self, frame: &PresentationFrame) -> SimResult<()> {
        frame.validate()?;
        self.frames_presented += 1;
        self.last_marker_count = frame.markers.len();
        self.last_guide_line_count = frame.guide_lines.len();
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
