use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::catalog::TutorialCatalog;
use crate::core::{ImageDimensions, OpticalState, Viewport, centering_pan};
use crate::quiz::AnnotationRegistry;

use super::{ActionEvent, StepTrigger, TriggerKind, Tutorial};

pub const TUTORIAL_COMPLETED_MESSAGE: &str = "Tutorial completed!";
pub const TUTORIAL_ENDED_MESSAGE: &str = "Tutorial ended.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepDirection {
    Back,
    Forward,
}

/// Stage information needed to re-centre on an annotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageContext {
    pub image: Option<ImageDimensions>,
    pub viewport: Viewport,
    pub zoom: f64,
}

/// Side effects of entering a step, applied by the caller.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepEffects {
    pub highlight_target: Option<String>,
    pub recenter_pan: Option<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TutorialTransition {
    /// Inactive run, unknown tutorial, or stepping back from the first step.
    Ignored,
    /// Forward navigation is held until the current step's trigger fires.
    Blocked,
    Moved { index: usize, effects: StepEffects },
    Completed { message: String },
}

/// Read-only view of the running step for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorialView {
    pub tutorial_id: String,
    pub tutorial_name: String,
    /// 1-based step number.
    pub step_number: usize,
    pub step_count: usize,
    pub text: String,
    pub highlight_target: Option<String>,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

/// Progress through one tutorial. Completion flags belong to the run, not to
/// the catalog, so restarting or ending a run never touches shared data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorialRun {
    tutorial_id: Option<String>,
    /// `None` before the first step is entered.
    step_index: Option<usize>,
    is_active: bool,
    completed: SmallVec<[bool; 8]>,
}

impl TutorialRun {
    #[must_use]
    pub fn tutorial_id(&self) -> Option<&str> {
        self.tutorial_id.as_deref()
    }

    #[must_use]
    pub fn step_index(&self) -> Option<usize> {
        self.step_index
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    #[must_use]
    pub fn is_step_completed(&self, index: usize) -> bool {
        self.completed.get(index).copied().unwrap_or(false)
    }

    /// Starts `tutorial_id` and enters its first step. Unknown ids are ignored.
    pub fn start(
        &mut self,
        catalog: &TutorialCatalog,
        tutorial_id: &str,
        annotations: &AnnotationRegistry,
        stage: StageContext,
    ) -> TutorialTransition {
        let Some(tutorial) = catalog.get(tutorial_id) else {
            debug!(tutorial_id, "ignoring start of unknown tutorial");
            return TutorialTransition::Ignored;
        };
        debug!(tutorial_id, steps = tutorial.steps.len(), "starting tutorial");
        *self = Self {
            tutorial_id: Some(tutorial.id.clone()),
            step_index: None,
            is_active: true,
            completed: SmallVec::from_elem(false, tutorial.steps.len()),
        };
        self.advance(catalog, StepDirection::Forward, annotations, stage)
    }

    /// Moves one step. Advancing past the last step completes the run.
    pub fn advance(
        &mut self,
        catalog: &TutorialCatalog,
        direction: StepDirection,
        annotations: &AnnotationRegistry,
        stage: StageContext,
    ) -> TutorialTransition {
        let Some(tutorial) = self.active_tutorial(catalog) else {
            return TutorialTransition::Ignored;
        };

        let next_index = match (direction, self.step_index) {
            (StepDirection::Back, Some(index)) if index > 0 => index - 1,
            (StepDirection::Back, _) => return TutorialTransition::Ignored,
            (StepDirection::Forward, None) => 0,
            (StepDirection::Forward, Some(index)) => {
                if self.is_gated(tutorial, index) {
                    trace!(index, "forward navigation blocked by pending trigger");
                    return TutorialTransition::Blocked;
                }
                index + 1
            }
        };

        if next_index >= tutorial.steps.len() {
            self.end();
            return TutorialTransition::Completed {
                message: TUTORIAL_COMPLETED_MESSAGE.to_owned(),
            };
        }

        self.step_index = Some(next_index);
        let step = &tutorial.steps[next_index];
        let recenter_pan = step
            .focus_annotation_id
            .and_then(|id| annotations.find(id))
            .zip(stage.image.filter(|image| image.is_valid()))
            .map(|(annotation, image)| {
                centering_pan(annotation.position(), image, stage.zoom, stage.viewport)
            });
        debug!(
            tutorial_id = %tutorial.id,
            index = next_index,
            recentered = recenter_pan.is_some(),
            "entered tutorial step"
        );

        TutorialTransition::Moved {
            index: next_index,
            effects: StepEffects {
                highlight_target: self.visible_highlight(tutorial, next_index),
                recenter_pan,
            },
        }
    }

    /// Matches a user action against the current step's trigger.
    ///
    /// Drag triggers accept any drag on the control bound to the step's
    /// optics field; the value is only checked when the step declares a
    /// condition. Returns `true` when the step became completed.
    pub fn report_action(
        &mut self,
        catalog: &TutorialCatalog,
        event: &ActionEvent,
        optics: &OpticalState,
    ) -> bool {
        let Some(tutorial) = self.active_tutorial(catalog) else {
            return false;
        };
        let Some(index) = self.step_index else {
            return false;
        };
        if self.is_step_completed(index) {
            return false;
        }
        let Some(step) = tutorial.step(index) else {
            return false;
        };
        let Some(trigger) = step.trigger.as_ref() else {
            return false;
        };
        if !trigger_matches(trigger, event) {
            return false;
        }

        if let Some(condition) = step.condition {
            let value = match trigger.kind {
                TriggerKind::Drag => trigger
                    .state_key
                    .map(|field| optics.field(field))
                    .or(event.value),
                TriggerKind::Click | TriggerKind::Input => event.value,
            };
            if !value.is_some_and(|value| condition.evaluate(value)) {
                trace!(index, ?value, "tutorial step condition not met");
                return false;
            }
        }

        if let Some(flag) = self.completed.get_mut(index) {
            *flag = true;
        }
        debug!(tutorial_id = %tutorial.id, index, "tutorial step completed");
        true
    }

    /// Stops the run and drops its completion flags.
    pub fn end(&mut self) {
        if self.is_active {
            debug!(tutorial_id = ?self.tutorial_id, "ending tutorial");
        }
        *self = Self::default();
    }

    #[must_use]
    pub fn view(&self, catalog: &TutorialCatalog) -> Option<TutorialView> {
        let tutorial = self.active_tutorial(catalog)?;
        let index = self.step_index?;
        let step = tutorial.step(index)?;
        Some(TutorialView {
            tutorial_id: tutorial.id.clone(),
            tutorial_name: tutorial.name.clone(),
            step_number: index + 1,
            step_count: tutorial.steps.len(),
            text: format!("Step {}: {}", index + 1, step.text),
            highlight_target: self.visible_highlight(tutorial, index),
            can_go_back: index > 0,
            can_go_forward: !self.is_gated(tutorial, index),
        })
    }

    /// Brings a deserialized run in line with the catalog. Runs that point at
    /// unknown tutorials or steps are reset.
    pub fn reconcile(&mut self, catalog: &TutorialCatalog) {
        let step_count = self
            .tutorial_id
            .as_deref()
            .and_then(|id| catalog.get(id))
            .map(|tutorial| tutorial.steps.len());
        match (self.is_active, step_count, self.step_index) {
            (true, Some(count), Some(index)) if index < count => {
                self.completed.resize(count, false);
            }
            _ => {
                if self.is_active {
                    debug!(tutorial_id = ?self.tutorial_id, "resetting unrecoverable tutorial run");
                }
                *self = Self::default();
            }
        }
    }

    fn active_tutorial<'a>(&self, catalog: &'a TutorialCatalog) -> Option<&'a Tutorial> {
        if !self.is_active {
            return None;
        }
        catalog.get(self.tutorial_id.as_deref()?)
    }

    fn is_gated(&self, tutorial: &Tutorial, index: usize) -> bool {
        tutorial
            .step(index)
            .is_some_and(|step| step.is_gated() && !self.is_step_completed(index))
    }

    fn visible_highlight(&self, tutorial: &Tutorial, index: usize) -> Option<String> {
        if self.is_step_completed(index) {
            return None;
        }
        tutorial.step(index)?.highlight_target.clone()
    }
}

fn trigger_matches(trigger: &StepTrigger, event: &ActionEvent) -> bool {
    if trigger.kind != event.kind {
        return false;
    }
    let target_matches = trigger
        .target
        .as_deref()
        .is_none_or(|target| target == event.source);
    match trigger.kind {
        TriggerKind::Drag => {
            target_matches
                && trigger
                    .state_key
                    .is_none_or(|field| event.state_key == Some(field))
        }
        TriggerKind::Click | TriggerKind::Input => target_matches,
    }
}
