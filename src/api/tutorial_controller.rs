use tracing::debug;

use crate::render::Presenter;
use crate::tutorial::{ActionEvent, StepDirection, TUTORIAL_ENDED_MESSAGE, TutorialTransition};

use super::MicroscopeSession;

impl<P: Presenter> MicroscopeSession<P> {
    /// Starts a tutorial from its first step. Unknown ids are ignored.
    pub fn start_tutorial(&mut self, tutorial_id: &str) -> TutorialTransition {
        let stage = self.stage_context();
        let transition = self.state.tutorial_run.start(
            &self.tutorials,
            tutorial_id,
            &self.state.annotations,
            stage,
        );
        self.apply_tutorial_transition(&transition);
        transition
    }

    pub fn next_tutorial_step(&mut self) -> TutorialTransition {
        self.advance_tutorial(StepDirection::Forward)
    }

    pub fn previous_tutorial_step(&mut self) -> TutorialTransition {
        self.advance_tutorial(StepDirection::Back)
    }

    /// Stops the running tutorial. Returns `false` when none was running.
    pub fn end_tutorial(&mut self) -> bool {
        if !self.state.tutorial_run.is_active() {
            return false;
        }
        self.state.tutorial_run.end();
        self.set_status(TUTORIAL_ENDED_MESSAGE);
        true
    }

    /// Feeds a user action to the running tutorial. Returns whether it
    /// completed the current step.
    pub fn report_action(&mut self, event: &ActionEvent) -> bool {
        self.state
            .tutorial_run
            .report_action(&self.tutorials, event, &self.state.optics)
    }

    fn advance_tutorial(&mut self, direction: StepDirection) -> TutorialTransition {
        let stage = self.stage_context();
        let transition = self.state.tutorial_run.advance(
            &self.tutorials,
            direction,
            &self.state.annotations,
            stage,
        );
        self.apply_tutorial_transition(&transition);
        transition
    }

    fn apply_tutorial_transition(&mut self, transition: &TutorialTransition) {
        match transition {
            TutorialTransition::Moved { index, effects } => {
                if let Some((pan_x, pan_y)) = effects.recenter_pan {
                    self.state.optics.set_pan(pan_x, pan_y);
                    debug!(index, pan_x, pan_y, "recentered stage for tutorial step");
                }
            }
            TutorialTransition::Completed { message } => self.set_status(message.clone()),
            TutorialTransition::Ignored | TutorialTransition::Blocked => {}
        }
    }
}
