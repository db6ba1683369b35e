use serde::{Deserialize, Serialize};

use crate::core::{OpticalReadouts, Viewport, VisualParameters};
use crate::error::SimResult;
use crate::quiz::Feedback;
use crate::render::{LinePrimitive, MarkerPrimitive};
use crate::tutorial::TutorialView;

/// Image translate/scale applied to the slide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageTransform {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

/// What the surface should show as the slide image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlideDisplay {
    Placeholder,
    Loading { reference: String },
    Image { reference: String },
}

/// One quiz row shown next to the viewfinder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizEntry {
    pub annotation_id: u32,
    pub prompt: String,
    pub user_answer: String,
    pub feedback: Feedback,
}

/// Backend-agnostic scene for one presentation pass. The core pushes it and
/// never reads anything back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationFrame {
    pub viewport: Viewport,
    pub slide: SlideDisplay,
    pub visual: VisualParameters,
    pub transform: StageTransform,
    pub readouts: OpticalReadouts,
    pub markers: Vec<MarkerPrimitive>,
    pub quiz: Vec<QuizEntry>,
    pub guide_lines: Vec<LinePrimitive>,
    pub tutorial: Option<TutorialView>,
    pub placing_annotation: bool,
    pub status: Option<String>,
}

impl PresentationFrame {
    pub fn validate(&self) -> SimResult<()> {
        self.viewport.validate()?;
        for marker in &self.markers {
            marker.validate()?;
        }
        for line in &self.guide_lines {
            line.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn highlight_target(&self) -> Option<&str> {
        self.tutorial
            .as_ref()
            .and_then(|view| view.highlight_target.as_deref())
    }
}
