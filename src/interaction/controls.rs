//! Selectors of the host elements the core refers to, and the draggable
//! instrument controls.

use serde::{Deserialize, Serialize};

use crate::core::{Objective, OpticalField};

pub const VIEWFINDER: &str = ".viewfinder";
pub const QUIZ_AREA: &str = "#quizArea";
pub const CONTRAST_SLIDER: &str = "#contrastControl";
pub const FIELD_DIAPHRAGM_SLIDER: &str = "#fieldDiaphragm";

#[must_use]
pub fn objective_button(objective: Objective) -> String {
    format!(".objective-btn[data-zoom='{}']", objective.magnification())
}

/// Wheels and knobs adjusted by vertical dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    CoarseFocus,
    FineFocus,
    Illumination,
}

impl ControlKind {
    #[must_use]
    pub fn selector(self) -> &'static str {
        match self {
            Self::CoarseFocus => "#coarseFocusWheel",
            Self::FineFocus => "#fineFocusWheel",
            Self::Illumination => "#illuminationKnob",
        }
    }

    #[must_use]
    pub fn field(self) -> OpticalField {
        match self {
            Self::CoarseFocus => OpticalField::CoarseFocus,
            Self::FineFocus => OpticalField::FineFocus,
            Self::Illumination => OpticalField::Brightness,
        }
    }
}

/// Value change per pixel of vertical pointer travel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSensitivity {
    pub coarse_focus: f64,
    pub fine_focus: f64,
    pub illumination: f64,
}

impl Default for ControlSensitivity {
    fn default() -> Self {
        Self {
            coarse_focus: 0.05,
            fine_focus: 0.015,
            illumination: 0.005,
        }
    }
}

impl ControlSensitivity {
    #[must_use]
    pub fn for_control(self, control: ControlKind) -> f64 {
        match control {
            ControlKind::CoarseFocus => self.coarse_focus,
            ControlKind::FineFocus => self.fine_focus,
            ControlKind::Illumination => self.illumination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn objective_button_selector_uses_plain_magnification() {
        assert_eq!(
            objective_button(Objective::Low),
            ".objective-btn[data-zoom='1']"
        );
        assert_eq!(
            objective_button(Objective::OilImmersion),
            ".objective-btn[data-zoom='10']"
        );
    }
}
