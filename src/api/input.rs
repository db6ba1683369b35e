use serde::{Deserialize, Serialize};

use crate::core::{Objective, ViewPoint};
use crate::error::SimResult;
use crate::interaction::DragTarget;
use crate::render::Presenter;
use crate::tutorial::TutorialTransition;

use super::{ImageLoadTicket, MicroscopeSession};

/// User input events forwarded by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UserInput {
    BeginDrag {
        target: DragTarget,
        pointer: ViewPoint,
    },
    UpdateDrag {
        pointer: ViewPoint,
    },
    EndDrag,
    SelectObjective(Objective),
    SetContrast(f64),
    SetFieldDiaphragm(f64),
    /// Click on the viewfinder while placing annotations, with the question
    /// and optional answer the user typed.
    CanvasClick {
        pointer: ViewPoint,
        question: String,
        correct_answer: Option<String>,
    },
    DraftAnswer {
        annotation_id: u32,
        text: String,
    },
    SubmitAnswer {
        annotation_id: u32,
        answer: String,
    },
    ToggleAnnotationPlacement,
    ToggleScanningGuide,
    ResetPosition,
    SelectScenario(Option<String>),
    UploadImage {
        name: String,
        media_type: String,
    },
    StartTutorial(String),
    NextTutorialStep,
    PreviousTutorialStep,
    EndTutorial,
    SaveProgress,
    LoadProgress,
    ClearProgress,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputOutcome {
    Handled,
    /// The event had no effect (unknown id, blocked step, no drag open).
    Ignored,
    /// The host has to acquire an image and report back via `image_loaded`.
    ImageRequested(ImageLoadTicket),
}

impl InputOutcome {
    fn from_applied(applied: bool) -> Self {
        if applied { Self::Handled } else { Self::Ignored }
    }

    fn from_transition(transition: &TutorialTransition) -> Self {
        match transition {
            TutorialTransition::Ignored | TutorialTransition::Blocked => Self::Ignored,
            TutorialTransition::Moved { .. } | TutorialTransition::Completed { .. } => {
                Self::Handled
            }
        }
    }
}

impl<P: Presenter> MicroscopeSession<P> {
    /// Applies one input event and presents the resulting frame.
    ///
    /// The frame is presented even when the event fails, so status messages
    /// reach the surface.
    pub fn handle_input(&mut self, input: UserInput) -> SimResult<InputOutcome> {
        let outcome = self.dispatch_input(input);
        self.render()?;
        outcome
    }

    fn dispatch_input(&mut self, input: UserInput) -> SimResult<InputOutcome> {
        let outcome = match input {
            UserInput::BeginDrag { target, pointer } => {
                InputOutcome::from_applied(self.begin_drag(target, pointer)?)
            }
            UserInput::UpdateDrag { pointer } => {
                InputOutcome::from_applied(self.update_drag(pointer))
            }
            UserInput::EndDrag => InputOutcome::from_applied(self.end_drag().is_some()),
            UserInput::SelectObjective(objective) => {
                self.select_objective(objective);
                InputOutcome::Handled
            }
            UserInput::SetContrast(value) => InputOutcome::from_applied(self.set_contrast(value)),
            UserInput::SetFieldDiaphragm(value) => {
                InputOutcome::from_applied(self.set_field_diaphragm(value))
            }
            UserInput::CanvasClick {
                pointer,
                question,
                correct_answer,
            } => InputOutcome::from_applied(
                self.place_annotation(pointer, &question, correct_answer)?
                    .is_some(),
            ),
            UserInput::DraftAnswer {
                annotation_id,
                text,
            } => InputOutcome::from_applied(self.set_draft_answer(annotation_id, text)),
            UserInput::SubmitAnswer {
                annotation_id,
                answer,
            } => InputOutcome::from_applied(
                self.submit_answer(annotation_id, &answer).is_some(),
            ),
            UserInput::ToggleAnnotationPlacement => {
                self.toggle_annotation_placement();
                InputOutcome::Handled
            }
            UserInput::ToggleScanningGuide => {
                self.toggle_scanning_guide();
                InputOutcome::Handled
            }
            UserInput::ResetPosition => {
                self.reset_position();
                InputOutcome::Handled
            }
            UserInput::SelectScenario(scenario_id) => {
                InputOutcome::ImageRequested(self.select_scenario(scenario_id.as_deref()))
            }
            UserInput::UploadImage { name, media_type } => {
                InputOutcome::ImageRequested(self.begin_custom_image(&name, &media_type)?)
            }
            UserInput::StartTutorial(tutorial_id) => {
                InputOutcome::from_transition(&self.start_tutorial(&tutorial_id))
            }
            UserInput::NextTutorialStep => {
                InputOutcome::from_transition(&self.next_tutorial_step())
            }
            UserInput::PreviousTutorialStep => {
                InputOutcome::from_transition(&self.previous_tutorial_step())
            }
            UserInput::EndTutorial => InputOutcome::from_applied(self.end_tutorial()),
            UserInput::SaveProgress => {
                self.save_progress()?;
                InputOutcome::Handled
            }
            UserInput::LoadProgress => match self.load_progress()? {
                Some(ticket) => InputOutcome::ImageRequested(ticket),
                None => InputOutcome::Ignored,
            },
            UserInput::ClearProgress => InputOutcome::ImageRequested(self.clear_progress()?),
        };
        Ok(outcome)
    }
}
