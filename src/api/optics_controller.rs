use tracing::{debug, trace};

use crate::core::{Objective, OpticalField};
use crate::interaction::controls::{CONTRAST_SLIDER, FIELD_DIAPHRAGM_SLIDER, objective_button};
use crate::render::Presenter;
use crate::tutorial::ActionEvent;

use super::MicroscopeSession;

impl<P: Presenter> MicroscopeSession<P> {
    /// Swaps the objective lens. Fine focus is reset, coarse focus kept.
    pub fn select_objective(&mut self, objective: Objective) {
        self.state.optics.set_objective(objective);
        debug!(zoom = objective.magnification(), "selected objective");
        self.report_action(&ActionEvent::click(objective_button(objective)));
    }

    /// Contrast slider input. Returns whether the value was applied.
    pub fn set_contrast(&mut self, value: f64) -> bool {
        self.apply_slider(OpticalField::Contrast, CONTRAST_SLIDER, value)
    }

    /// Field diaphragm slider input, as openness in `[0, 1]`.
    pub fn set_field_diaphragm(&mut self, openness: f64) -> bool {
        self.apply_slider(
            OpticalField::FieldDiaphragmOpenness,
            FIELD_DIAPHRAGM_SLIDER,
            openness,
        )
    }

    /// Direct assignment of any optical field, clamped to its range.
    pub fn set_optical_field(&mut self, field: OpticalField, value: f64) -> bool {
        let applied = self.state.optics.set_field(field, value);
        trace!(?field, value, applied, "set optical field");
        applied
    }

    /// Moves the stage back to the origin.
    pub fn reset_position(&mut self) {
        self.state.optics.reset_pan();
        trace!("reset stage position");
    }

    /// Shows or hides the scanning guide grid. Returns the new visibility.
    pub fn toggle_scanning_guide(&mut self) -> bool {
        let visible = self.state.toggle_scanning_guide();
        trace!(visible, "toggled scanning guide");
        visible
    }

    fn apply_slider(&mut self, field: OpticalField, source: &str, value: f64) -> bool {
        if !self.set_optical_field(field, value) {
            return false;
        }
        let applied = self.state.optics.field(field);
        self.report_action(&ActionEvent::input(source, applied));
        true
    }
}
