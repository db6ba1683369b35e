use tracing::{debug, trace};

use crate::core::{ViewPoint, view_to_image};
use crate::error::{SimError, SimResult};
use crate::quiz::{AnnotationKind, Feedback};
use crate::render::Presenter;

use super::MicroscopeSession;

impl<P: Presenter> MicroscopeSession<P> {
    /// Turns annotation placement on or off. Returns the new mode.
    pub fn toggle_annotation_placement(&mut self) -> bool {
        let placing = self.interaction.toggle_annotation_placement();
        trace!(placing, "toggled annotation placement");
        placing
    }

    /// Adds a custom quiz point where the user clicked the viewfinder.
    ///
    /// Returns `Ok(None)` when placement mode is off, the question is empty or
    /// the slide has run out of ids, and [`SimError::ImageNotReady`] until the
    /// current image load has resolved.
    /// Placement mode stays on so several points can be added in a row.
    pub fn place_annotation(
        &mut self,
        pointer: ViewPoint,
        question: &str,
        correct_answer: Option<String>,
    ) -> SimResult<Option<u32>> {
        if !self.interaction.is_placing_annotation() {
            return Ok(None);
        }
        let image = self.image_dimensions().ok_or(SimError::ImageNotReady)?;
        let question = question.trim();
        if question.is_empty() {
            return Ok(None);
        }

        let optics = &self.state.optics;
        let point = view_to_image(pointer, image, optics.zoom(), optics.pan())?;
        let id = self.state.annotations.add(
            point.x_percent,
            point.y_percent,
            question,
            correct_answer,
            AnnotationKind::Custom,
        );
        debug!(?id, x = point.x_percent, y = point.y_percent, "placed annotation");
        Ok(id)
    }

    /// Stores the answer text as the user types.
    pub fn set_draft_answer(&mut self, annotation_id: u32, text: impl Into<String>) -> bool {
        self.state.annotations.set_draft_answer(annotation_id, text)
    }

    /// Grades an answer. Unknown ids return `None`.
    pub fn submit_answer(&mut self, annotation_id: u32, answer: &str) -> Option<Feedback> {
        self.state.annotations.submit(annotation_id, answer)
    }
}
