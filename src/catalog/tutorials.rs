use indexmap::IndexMap;

use crate::core::{Objective, OpticalField};
use crate::error::{SimError, SimResult};
use crate::interaction::controls::{self, ControlKind};
use crate::tutorial::{StepTrigger, Tutorial, TutorialStep};

/// Read-only tutorial registry, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TutorialCatalog {
    tutorials: IndexMap<String, Tutorial>,
}

impl TutorialCatalog {
    #[must_use]
    pub fn builtin() -> Self {
        let mut catalog = Self::default();
        for tutorial in [basic_microscopy(), basic_identification()] {
            catalog.tutorials.insert(tutorial.id.clone(), tutorial);
        }
        catalog
    }

    /// Adds a tutorial with a unique, non-empty id.
    pub fn register(&mut self, tutorial: Tutorial) -> SimResult<()> {
        if tutorial.id.is_empty() {
            return Err(SimError::InvalidData(
                "tutorial id must not be empty".to_owned(),
            ));
        }
        if self.tutorials.contains_key(&tutorial.id) {
            return Err(SimError::InvalidData(format!(
                "tutorial with id `{}` is already registered",
                tutorial.id
            )));
        }
        self.tutorials.insert(tutorial.id.clone(), tutorial);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Tutorial> {
        self.tutorials.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tutorial> {
        self.tutorials.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tutorials.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tutorials.is_empty()
    }
}

fn basic_microscopy() -> Tutorial {
    let low_objective = controls::objective_button(Objective::Low);
    Tutorial::new(
        "basic_microscopy_tutorial",
        "Basic Microscope Operation",
        vec![
            TutorialStep::new("Welcome! Let's select an objective. Click 'Low (10x)'.")
                .with_highlight(low_objective.clone())
                .with_trigger(StepTrigger::click(low_objective)),
            TutorialStep::new(
                "Good. Now use the large Coarse Focus wheel (drag up/down) to bring the image into approximate focus.",
            )
            .with_highlight(ControlKind::CoarseFocus.selector())
            .with_trigger(StepTrigger::drag(OpticalField::CoarseFocus)),
            TutorialStep::new("Excellent. Use the smaller Fine Focus wheel for a sharp image.")
                .with_highlight(ControlKind::FineFocus.selector())
                .with_trigger(StepTrigger::drag(OpticalField::FineFocus)),
            TutorialStep::new("Adjust the Illumination knob if the image is too dark/bright.")
                .with_highlight(ControlKind::Illumination.selector())
                .with_trigger(StepTrigger::drag(OpticalField::Brightness)),
            TutorialStep::new(
                "To move around the slide, click and drag the image in the circular view.",
            )
            .with_highlight(controls::VIEWFINDER),
            TutorialStep::new("Tutorial complete!"),
        ],
    )
}

fn basic_identification() -> Tutorial {
    Tutorial::new(
        "basic_identification_tutorial",
        "Cell Identification (Normal Blood)",
        vec![
            TutorialStep::new("Pan to annotation point 0 (red circle). What cell is it?")
                .with_highlight(controls::QUIZ_AREA)
                .focusing_annotation(0),
            TutorialStep::new("Now find point 1. What are these?").focusing_annotation(1),
            TutorialStep::new("Continue identifying other points."),
        ],
    )
}
