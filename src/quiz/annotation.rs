use serde::{Deserialize, Serialize};

use crate::core::ImagePoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationKind {
    Identification,
    Description,
    DiagnosisHint,
    Custom,
}

/// Grading outcome of the last submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    #[default]
    Unanswered,
    Correct,
    Incorrect,
    /// Answer recorded for a free-form question with no expected answer.
    Submitted,
}

impl Feedback {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Unanswered => "",
            Self::Correct => "Correct",
            Self::Incorrect => "Incorrect",
            Self::Submitted => "Submitted",
        }
    }
}

/// A quiz point anchored to the slide image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: u32,
    pub x_percent: f64,
    pub y_percent: f64,
    pub question: String,
    #[serde(default)]
    pub correct_answer: Option<String>,
    #[serde(default = "default_kind")]
    pub kind: AnnotationKind,
    #[serde(default)]
    pub user_answer: String,
    #[serde(default)]
    pub feedback: Feedback,
}

fn default_kind() -> AnnotationKind {
    AnnotationKind::Custom
}

impl Annotation {
    #[must_use]
    pub fn position(&self) -> ImagePoint {
        ImagePoint::new(self.x_percent, self.y_percent)
    }

    /// Whether answers are compared against an expected value.
    #[must_use]
    pub fn is_graded(&self) -> bool {
        self.correct_answer
            .as_deref()
            .is_some_and(|answer| !answer.is_empty())
    }

    pub(crate) fn grade(&mut self, answer: &str) -> Feedback {
        self.user_answer = answer.trim().to_owned();
        self.feedback = match self.correct_answer.as_deref() {
            Some(expected) if !expected.is_empty() => {
                if self.user_answer.to_lowercase() == expected.to_lowercase() {
                    Feedback::Correct
                } else {
                    Feedback::Incorrect
                }
            }
            _ => Feedback::Submitted,
        };
        self.feedback
    }
}

/// Catalog form of an annotation. The id may be left for the registry to
/// assign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationTemplate {
    #[serde(default)]
    pub id: Option<u32>,
    pub x_percent: f64,
    pub y_percent: f64,
    pub question: String,
    #[serde(default)]
    pub correct_answer: Option<String>,
    pub kind: AnnotationKind,
}

impl AnnotationTemplate {
    #[must_use]
    pub fn new(
        id: u32,
        x_percent: f64,
        y_percent: f64,
        question: impl Into<String>,
        correct_answer: impl Into<String>,
        kind: AnnotationKind,
    ) -> Self {
        Self {
            id: Some(id),
            x_percent,
            y_percent,
            question: question.into(),
            correct_answer: Some(correct_answer.into()),
            kind,
        }
    }

    pub(crate) fn instantiate(&self, id: u32) -> Annotation {
        Annotation {
            id,
            x_percent: self.x_percent,
            y_percent: self.y_percent,
            question: self.question.clone(),
            correct_answer: self.correct_answer.clone(),
            kind: self.kind,
            user_answer: String::new(),
            feedback: Feedback::Unanswered,
        }
    }
}
