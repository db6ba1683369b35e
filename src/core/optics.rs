use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

pub const COARSE_FOCUS_RANGE: (f64, f64) = (0.0, 10.0);
pub const FINE_FOCUS_RANGE: (f64, f64) = (-2.0, 2.0);
pub const BRIGHTNESS_RANGE: (f64, f64) = (0.3, 1.7);
pub const FIELD_DIAPHRAGM_RANGE: (f64, f64) = (0.0, 1.0);

/// Vignette shadow size in pixels when the field diaphragm is fully closed.
const MAX_VIGNETTE_SIZE_PX: f64 = 500.0;
const MAX_VIGNETTE_OPACITY: f64 = 0.8;
const KNOB_SWEEP_START_DEG: f64 = -135.0;
const KNOB_SWEEP_DEG: f64 = 270.0;

/// Selectable objective lens. The magnification doubles as the image scale
/// factor applied in the viewfinder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    Low,
    Medium,
    High,
    OilImmersion,
}

impl Objective {
    pub const ALL: [Objective; 4] = [
        Objective::Low,
        Objective::Medium,
        Objective::High,
        Objective::OilImmersion,
    ];

    #[must_use]
    pub fn magnification(self) -> f64 {
        match self {
            Self::Low => 1.0,
            Self::Medium => 2.0,
            Self::High => 4.0,
            Self::OilImmersion => 10.0,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low (10x)",
            Self::Medium => "Medium (20x)",
            Self::High => "High (40x)",
            Self::OilImmersion => "Oil (100x)",
        }
    }

    /// Snaps a zoom factor to the closest objective.
    ///
    /// Returns `None` for non-finite or non-positive input.
    #[must_use]
    pub fn nearest(zoom: f64) -> Option<Self> {
        if !zoom.is_finite() || zoom <= 0.0 {
            return None;
        }
        Self::ALL
            .into_iter()
            .min_by_key(|objective| OrderedFloat((objective.magnification() - zoom).abs()))
    }
}

/// Addressable optical-state fields, used by setters, tutorial triggers and
/// drag controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpticalField {
    Zoom,
    CoarseFocus,
    FineFocus,
    Brightness,
    Contrast,
    FieldDiaphragmOpenness,
    PanX,
    PanY,
}

impl OpticalField {
    /// Inclusive clamp range applied on assignment.
    #[must_use]
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Self::Zoom => (
                Objective::Low.magnification(),
                Objective::OilImmersion.magnification(),
            ),
            Self::CoarseFocus => COARSE_FOCUS_RANGE,
            Self::FineFocus => FINE_FOCUS_RANGE,
            Self::Brightness => BRIGHTNESS_RANGE,
            Self::Contrast => (0.0, f64::INFINITY),
            Self::FieldDiaphragmOpenness => FIELD_DIAPHRAGM_RANGE,
            Self::PanX | Self::PanY => (f64::NEG_INFINITY, f64::INFINITY),
        }
    }
}

/// Optional per-field overrides applied on top of model defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialOptics {
    pub zoom: Option<f64>,
    pub coarse_focus: Option<f64>,
    pub fine_focus: Option<f64>,
    pub brightness: Option<f64>,
    pub contrast: Option<f64>,
    pub field_diaphragm_openness: Option<f64>,
    pub pan_x: Option<f64>,
    pub pan_y: Option<f64>,
}

/// Visual parameters derived from optics for one presentation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualParameters {
    pub blur_radius: f64,
    pub brightness: f64,
    pub contrast: f64,
    pub vignette_size: f64,
    pub vignette_opacity: f64,
}

/// Rounded values for the instrument read-out panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpticalReadouts {
    pub zoom: f64,
    /// Blur radius rounded to one decimal.
    pub blur: f64,
    pub brightness_percent: i64,
    pub contrast_percent: i64,
    pub field_diaphragm_percent: i64,
    pub stage_x: i64,
    pub stage_y: i64,
    pub illumination_knob_degrees: f64,
}

/// Simulated optics. Bounded fields are clamped whenever they are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpticalState {
    zoom: f64,
    coarse_focus: f64,
    fine_focus: f64,
    brightness: f64,
    contrast: f64,
    field_diaphragm_openness: f64,
    pan_x: f64,
    pan_y: f64,
}

impl Default for OpticalState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            coarse_focus: 2.0,
            fine_focus: 0.0,
            brightness: 1.0,
            contrast: 1.0,
            field_diaphragm_openness: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

impl OpticalState {
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    #[must_use]
    pub fn objective(&self) -> Objective {
        Objective::nearest(self.zoom).unwrap_or(Objective::Low)
    }

    #[must_use]
    pub fn coarse_focus(&self) -> f64 {
        self.coarse_focus
    }

    #[must_use]
    pub fn fine_focus(&self) -> f64 {
        self.fine_focus
    }

    #[must_use]
    pub fn brightness(&self) -> f64 {
        self.brightness
    }

    #[must_use]
    pub fn contrast(&self) -> f64 {
        self.contrast
    }

    #[must_use]
    pub fn field_diaphragm_openness(&self) -> f64 {
        self.field_diaphragm_openness
    }

    #[must_use]
    pub fn pan(&self) -> (f64, f64) {
        (self.pan_x, self.pan_y)
    }

    #[must_use]
    pub fn field(&self, field: OpticalField) -> f64 {
        match field {
            OpticalField::Zoom => self.zoom,
            OpticalField::CoarseFocus => self.coarse_focus,
            OpticalField::FineFocus => self.fine_focus,
            OpticalField::Brightness => self.brightness,
            OpticalField::Contrast => self.contrast,
            OpticalField::FieldDiaphragmOpenness => self.field_diaphragm_openness,
            OpticalField::PanX => self.pan_x,
            OpticalField::PanY => self.pan_y,
        }
    }

    /// Assigns one field, clamping to its bounds.
    ///
    /// NaN (and infinities on fields without a finite bound) are rejected and
    /// the previous value is kept. Returns whether the assignment was applied.
    /// Assigning zoom snaps to the nearest objective and resets fine focus.
    pub fn set_field(&mut self, field: OpticalField, value: f64) -> bool {
        let slot = match field {
            OpticalField::Zoom => {
                let Some(objective) = Objective::nearest(value) else {
                    return false;
                };
                self.set_objective(objective);
                return true;
            }
            OpticalField::CoarseFocus => &mut self.coarse_focus,
            OpticalField::FineFocus => &mut self.fine_focus,
            OpticalField::Brightness => &mut self.brightness,
            OpticalField::Contrast => &mut self.contrast,
            OpticalField::FieldDiaphragmOpenness => &mut self.field_diaphragm_openness,
            OpticalField::PanX => &mut self.pan_x,
            OpticalField::PanY => &mut self.pan_y,
        };
        match clamp_to_field(field, value) {
            Some(value) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Swaps the objective. Fine focus does not carry over between lenses.
    pub fn set_objective(&mut self, objective: Objective) {
        self.zoom = objective.magnification();
        self.fine_focus = 0.0;
    }

    pub fn set_pan(&mut self, pan_x: f64, pan_y: f64) -> bool {
        if !pan_x.is_finite() || !pan_y.is_finite() {
            return false;
        }
        self.pan_x = pan_x;
        self.pan_y = pan_y;
        true
    }

    pub fn reset_pan(&mut self) {
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }

    /// Resets to defaults, then applies every explicitly provided override.
    ///
    /// A missing coarse focus lands on the ideal focus for the chosen objective.
    pub fn reset_to(&mut self, initial: InitialOptics) {
        let mut next = Self::default();
        if let Some(objective) = initial.zoom.and_then(Objective::nearest) {
            next.zoom = objective.magnification();
        }
        next.coarse_focus = ideal_coarse_focus(next.zoom);

        let overrides = [
            (OpticalField::CoarseFocus, initial.coarse_focus),
            (OpticalField::FineFocus, initial.fine_focus),
            (OpticalField::Brightness, initial.brightness),
            (OpticalField::Contrast, initial.contrast),
            (
                OpticalField::FieldDiaphragmOpenness,
                initial.field_diaphragm_openness,
            ),
            (OpticalField::PanX, initial.pan_x),
            (OpticalField::PanY, initial.pan_y),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                next.set_field(field, value);
            }
        }
        *self = next;
    }

    /// Re-applies every bound, replacing values that cannot be clamped with
    /// their defaults. Used on state that bypassed the setters (deserialization).
    pub fn sanitize(&mut self) {
        let defaults = Self::default();
        self.zoom = Objective::nearest(self.zoom)
            .map_or(defaults.zoom, Objective::magnification);
        for field in [
            OpticalField::CoarseFocus,
            OpticalField::FineFocus,
            OpticalField::Brightness,
            OpticalField::Contrast,
            OpticalField::FieldDiaphragmOpenness,
            OpticalField::PanX,
            OpticalField::PanY,
        ] {
            let current = self.field(field);
            if !self.set_field(field, current) {
                self.set_field(field, defaults.field(field));
            }
        }
    }

    #[must_use]
    pub fn derive_visual_parameters(&self) -> VisualParameters {
        let focus_difference = (self.coarse_focus - ideal_coarse_focus(self.zoom)).abs();
        let blur_radius =
            ((focus_difference + (self.fine_focus * 0.5).abs()) / (self.zoom + 0.5)).max(0.0);
        let closed = 1.0 - self.field_diaphragm_openness;

        VisualParameters {
            blur_radius,
            brightness: self.brightness,
            contrast: self.contrast,
            vignette_size: (MAX_VIGNETTE_SIZE_PX * closed).max(0.0),
            vignette_opacity: MAX_VIGNETTE_OPACITY * closed,
        }
    }

    #[must_use]
    pub fn readouts(&self) -> OpticalReadouts {
        let visual = self.derive_visual_parameters();
        let (min, max) = BRIGHTNESS_RANGE;
        let knob_ratio = ((self.brightness - min) / (max - min)).clamp(0.0, 1.0);

        OpticalReadouts {
            zoom: self.zoom,
            blur: (visual.blur_radius * 10.0).round() / 10.0,
            brightness_percent: (self.brightness * 100.0).round() as i64,
            contrast_percent: (self.contrast * 100.0).round() as i64,
            field_diaphragm_percent: (self.field_diaphragm_openness * 100.0).round() as i64,
            stage_x: self.pan_x.round() as i64,
            stage_y: self.pan_y.round() as i64,
            illumination_knob_degrees: KNOB_SWEEP_START_DEG + knob_ratio * KNOB_SWEEP_DEG,
        }
    }
}

/// Coarse focus position at which the given zoom is perfectly sharp.
#[must_use]
pub fn ideal_coarse_focus(zoom: f64) -> f64 {
    zoom * 2.0
}

fn clamp_to_field(field: OpticalField, value: f64) -> Option<f64> {
    if value.is_nan() {
        return None;
    }
    let (min, max) = field.bounds();
    let clamped = value.clamp(min, max);
    clamped.is_finite().then_some(clamped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_objective_snaps_to_closest_magnification() {
        assert_eq!(Objective::nearest(3.2), Some(Objective::High));
        assert_eq!(Objective::nearest(0.1), Some(Objective::Low));
        assert_eq!(Objective::nearest(f64::NAN), None);
        assert_eq!(Objective::nearest(-1.0), None);
    }

    #[test]
    fn sanitize_repairs_out_of_range_values() {
        let mut state: OpticalState = serde_json::from_str(
            r#"{"zoom":3.5,"coarse_focus":42.0,"fine_focus":-9.0,"brightness":0.0,"contrast":-1.0}"#,
        )
        .expect("parse optics");
        state.sanitize();

        assert_eq!(state.zoom(), 4.0);
        assert_eq!(state.coarse_focus(), 10.0);
        assert_eq!(state.fine_focus(), -2.0);
        assert_eq!(state.brightness(), 0.3);
        assert_eq!(state.contrast(), 0.0);
        assert_eq!(state.field_diaphragm_openness(), 1.0);
    }

    #[test]
    fn reset_to_defaults_coarse_focus_to_ideal_for_zoom() {
        let mut state = OpticalState::default();
        state.reset_to(InitialOptics {
            zoom: Some(4.0),
            ..InitialOptics::default()
        });
        assert_eq!(state.coarse_focus(), 8.0);
        assert_eq!(state.derive_visual_parameters().blur_radius, 0.0);
    }
}
