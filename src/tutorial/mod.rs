//! Guided tutorials: immutable step definitions and the per-run state machine.

mod run;
mod step;

pub use run::{
    StageContext, StepDirection, StepEffects, TUTORIAL_COMPLETED_MESSAGE, TUTORIAL_ENDED_MESSAGE,
    TutorialRun, TutorialTransition, TutorialView,
};
pub use step::{
    ActionEvent, StepCondition, StepTrigger, TriggerKind, Tutorial, TutorialStep,
};
