use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{SimError, SimResult};
use crate::interaction::ControlSensitivity;
use crate::persistence::DEFAULT_STORAGE_KEY;

/// Upper bound for `scanning_guide_divisions`; each division adds two guide
/// lines to every frame.
pub const MAX_SCANNING_GUIDE_DIVISIONS: u32 = 64;

/// Public session bootstrap configuration.
///
/// This type is serializable so host applications can persist/load simulator
/// setup without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub viewport: Viewport,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default = "default_placeholder_image_ref")]
    pub placeholder_image_ref: String,
    #[serde(default)]
    pub control_sensitivity: ControlSensitivity,
    #[serde(default = "default_scanning_guide_divisions")]
    pub scanning_guide_divisions: u32,
}

impl SessionConfig {
    /// Creates a config with default storage, placeholder and control tuning.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            storage_key: default_storage_key(),
            placeholder_image_ref: default_placeholder_image_ref(),
            control_sensitivity: ControlSensitivity::default(),
            scanning_guide_divisions: default_scanning_guide_divisions(),
        }
    }

    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    #[must_use]
    pub fn with_placeholder_image_ref(mut self, reference: impl Into<String>) -> Self {
        self.placeholder_image_ref = reference.into();
        self
    }

    /// Sets value change per dragged pixel for the focus wheels and knob.
    #[must_use]
    pub fn with_control_sensitivity(mut self, sensitivity: ControlSensitivity) -> Self {
        self.control_sensitivity = sensitivity;
        self
    }

    /// Sets the number of cells per axis of the scanning guide grid.
    #[must_use]
    pub fn with_scanning_guide_divisions(mut self, divisions: u32) -> Self {
        self.scanning_guide_divisions = divisions;
        self
    }

    pub fn validate(&self) -> SimResult<()> {
        self.viewport.validate()?;
        if self.storage_key.is_empty() {
            return Err(SimError::InvalidConfig(
                "storage_key must not be empty".to_owned(),
            ));
        }
        if self.placeholder_image_ref.is_empty() {
            return Err(SimError::InvalidConfig(
                "placeholder_image_ref must not be empty".to_owned(),
            ));
        }
        let sensitivity = self.control_sensitivity;
        for (value, name) in [
            (sensitivity.coarse_focus, "coarse_focus"),
            (sensitivity.fine_focus, "fine_focus"),
            (sensitivity.illumination, "illumination"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimError::InvalidConfig(format!(
                    "control sensitivity `{name}` must be finite and > 0"
                )));
            }
        }
        if !(2..=MAX_SCANNING_GUIDE_DIVISIONS).contains(&self.scanning_guide_divisions) {
            return Err(SimError::InvalidConfig(format!(
                "scanning_guide_divisions must be within 2..={MAX_SCANNING_GUIDE_DIVISIONS}"
            )));
        }
        Ok(())
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> SimResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SimError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> SimResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| SimError::InvalidConfig(format!("failed to parse config: {e}")))
    }
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_owned()
}

fn default_placeholder_image_ref() -> String {
    "images/placeholder-slide.jpg".to_owned()
}

fn default_scanning_guide_divisions() -> u32 {
    5
}
