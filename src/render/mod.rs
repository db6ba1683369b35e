mod frame;
mod null_presenter;
mod primitives;

pub use frame::{PresentationFrame, QuizEntry, SlideDisplay, StageTransform};
pub use null_presenter::NullPresenter;
pub use primitives::{Color, LinePrimitive, MarkerPrimitive};

use crate::error::SimResult;

/// Contract implemented by any presentation surface.
///
/// Surfaces receive a fully materialized, deterministic `PresentationFrame`
/// so drawing code stays isolated from optics, quiz and tutorial logic.
pub trait Presenter {
    fn present(&mut self, frame: &PresentationFrame) -> SimResult<()>;
}
