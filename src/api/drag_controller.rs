use tracing::trace;

use crate::core::ViewPoint;
use crate::error::SimResult;
use crate::interaction::DragTarget;
use crate::render::Presenter;
use crate::tutorial::ActionEvent;

use super::MicroscopeSession;

impl<P: Presenter> MicroscopeSession<P> {
    /// Pointer down on the stage or on one of the control wheels.
    ///
    /// Returns `Ok(false)` when the drag is not started (stage drag while
    /// placing annotations).
    pub fn begin_drag(&mut self, target: DragTarget, pointer: ViewPoint) -> SimResult<bool> {
        let started = self
            .interaction
            .begin_drag(target, pointer, &self.state.optics)?;
        trace!(?target, started, "begin drag");
        Ok(started)
    }

    /// Pointer move during a drag. Control drags are reported to the tutorial.
    pub fn update_drag(&mut self, pointer: ViewPoint) -> bool {
        let Some(target) = self.interaction.update_drag(
            pointer,
            &mut self.state.optics,
            self.config.control_sensitivity,
        ) else {
            return false;
        };
        if let DragTarget::Control(control) = target {
            self.report_action(&ActionEvent::drag(control.selector(), control.field()));
        }
        true
    }

    pub fn end_drag(&mut self) -> Option<DragTarget> {
        let target = self.interaction.end_drag();
        trace!(?target, "end drag");
        target
    }
}
