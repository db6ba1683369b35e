use serde::{Deserialize, Serialize};

use crate::core::OpticalField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    Click,
    Drag,
    Input,
}

/// User action a step waits for before forward navigation unlocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepTrigger {
    pub kind: TriggerKind,
    /// Selector of the external element the action must come from.
    pub target: Option<String>,
    /// Optics field driven by the control, for drag triggers.
    pub state_key: Option<OpticalField>,
}

impl StepTrigger {
    #[must_use]
    pub fn click(target: impl Into<String>) -> Self {
        Self {
            kind: TriggerKind::Click,
            target: Some(target.into()),
            state_key: None,
        }
    }

    #[must_use]
    pub fn input(target: impl Into<String>) -> Self {
        Self {
            kind: TriggerKind::Input,
            target: Some(target.into()),
            state_key: None,
        }
    }

    #[must_use]
    pub fn drag(state_key: OpticalField) -> Self {
        Self {
            kind: TriggerKind::Drag,
            target: None,
            state_key: Some(state_key),
        }
    }
}

/// Predicate over the value produced by the triggering action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepCondition {
    AtLeast(f64),
    AtMost(f64),
    Between { min: f64, max: f64 },
}

impl StepCondition {
    #[must_use]
    pub fn evaluate(self, value: f64) -> bool {
        if value.is_nan() {
            return false;
        }
        match self {
            Self::AtLeast(min) => value >= min,
            Self::AtMost(max) => value <= max,
            Self::Between { min, max } => value >= min && value <= max,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorialStep {
    pub text: String,
    pub highlight_target: Option<String>,
    pub trigger: Option<StepTrigger>,
    pub condition: Option<StepCondition>,
    /// Annotation the stage is re-centred on when the step is entered.
    pub focus_annotation_id: Option<u32>,
}

impl TutorialStep {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlight_target: None,
            trigger: None,
            condition: None,
            focus_annotation_id: None,
        }
    }

    #[must_use]
    pub fn with_highlight(mut self, target: impl Into<String>) -> Self {
        self.highlight_target = Some(target.into());
        self
    }

    #[must_use]
    pub fn with_trigger(mut self, trigger: StepTrigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    #[must_use]
    pub fn with_condition(mut self, condition: StepCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    #[must_use]
    pub fn focusing_annotation(mut self, annotation_id: u32) -> Self {
        self.focus_annotation_id = Some(annotation_id);
        self
    }

    /// Steps with a trigger hold forward navigation until completed.
    #[must_use]
    pub fn is_gated(&self) -> bool {
        self.trigger.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tutorial {
    pub id: String,
    pub name: String,
    pub steps: Vec<TutorialStep>,
}

impl Tutorial {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, steps: Vec<TutorialStep>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            steps,
        }
    }

    #[must_use]
    pub fn step(&self, index: usize) -> Option<&TutorialStep> {
        self.steps.get(index)
    }
}

/// A user action reported by the host while a tutorial runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEvent {
    /// Selector of the element the action came from.
    pub source: String,
    pub kind: TriggerKind,
    /// Optics field changed by the action, when it came from a drag control.
    pub state_key: Option<OpticalField>,
    /// Value carried by the action, e.g. a slider position.
    pub value: Option<f64>,
}

impl ActionEvent {
    #[must_use]
    pub fn click(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            kind: TriggerKind::Click,
            state_key: None,
            value: None,
        }
    }

    #[must_use]
    pub fn input(source: impl Into<String>, value: f64) -> Self {
        Self {
            source: source.into(),
            kind: TriggerKind::Input,
            state_key: None,
            value: Some(value),
        }
    }

    #[must_use]
    pub fn drag(source: impl Into<String>, state_key: OpticalField) -> Self {
        Self {
            source: source.into(),
            kind: TriggerKind::Drag,
            state_key: Some(state_key),
            value: None,
        }
    }
}
