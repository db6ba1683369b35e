use serde::{Deserialize, Serialize};

use crate::core::OpticalState;
use crate::quiz::AnnotationRegistry;
use crate::tutorial::TutorialRun;

/// Which slide image the session refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSelection {
    Placeholder,
    Scenario(String),
    Custom(String),
}

/// Everything that is saved and restored. Owned by the caller; every core
/// operation takes it explicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    pub active_scenario_id: Option<String>,
    pub custom_image_name: Option<String>,
    pub optics: OpticalState,
    pub annotations: AnnotationRegistry,
    pub tutorial_run: TutorialRun,
    pub scanning_guide_visible: bool,
}

impl SessionState {
    #[must_use]
    pub fn image_selection(&self) -> ImageSelection {
        match (&self.active_scenario_id, &self.custom_image_name) {
            (Some(id), _) => ImageSelection::Scenario(id.clone()),
            (None, Some(name)) => ImageSelection::Custom(name.clone()),
            (None, None) => ImageSelection::Placeholder,
        }
    }

    /// Switches to a user-supplied image: scenario cleared, quiz emptied,
    /// optics back to defaults.
    pub fn select_custom_image(&mut self, name: impl Into<String>) {
        self.active_scenario_id = None;
        self.custom_image_name = Some(name.into());
        self.annotations.clear();
        self.optics = OpticalState::default();
    }

    /// Switches to the placeholder slide with an empty quiz and default optics.
    pub fn select_placeholder(&mut self) {
        self.active_scenario_id = None;
        self.custom_image_name = None;
        self.annotations.clear();
        self.optics = OpticalState::default();
    }

    pub fn toggle_scanning_guide(&mut self) -> bool {
        self.scanning_guide_visible = !self.scanning_guide_visible;
        self.scanning_guide_visible
    }
}
