use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{Annotation, AnnotationKind, AnnotationTemplate, Feedback};

/// Ordered quiz points for the current slide.
///
/// Ids are unique within the registry; the counter restarts whenever the
/// whole set is replaced. Once `u32::MAX` has been handed out the counter is
/// exhausted and [`AnnotationRegistry::add`] refuses new points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Annotation>", into = "Vec<Annotation>")]
pub struct AnnotationRegistry {
    annotations: Vec<Annotation>,
    next_id: Option<u32>,
}

impl Default for AnnotationRegistry {
    fn default() -> Self {
        Self {
            annotations: Vec::new(),
            next_id: Some(0),
        }
    }
}

impl From<Vec<Annotation>> for AnnotationRegistry {
    fn from(annotations: Vec<Annotation>) -> Self {
        let mut registry = Self::default();
        registry.replace_all(annotations);
        registry
    }
}

impl From<AnnotationRegistry> for Vec<Annotation> {
    fn from(registry: AnnotationRegistry) -> Self {
        registry.annotations
    }
}

/// Id following the highest of `ids`; `None` when `u32::MAX` is among them.
fn counter_after(ids: impl Iterator<Item = u32>) -> Option<u32> {
    ids.max().map_or(Some(0), |max| max.checked_add(1))
}

impl AnnotationRegistry {
    /// Replaces every annotation. Duplicate ids are re-numbered past the
    /// current maximum, or into the lowest unused id once the counter is
    /// exhausted, so ids stay pairwise distinct.
    pub fn replace_all(&mut self, annotations: Vec<Annotation>) {
        let mut next_id = counter_after(annotations.iter().map(|annotation| annotation.id));
        let mut taken: HashSet<u32> = annotations.iter().map(|annotation| annotation.id).collect();
        let mut free_cursor = 0u32;
        let mut seen = HashSet::with_capacity(annotations.len());
        let mut accepted = Vec::with_capacity(annotations.len());
        for mut annotation in annotations {
            if !seen.insert(annotation.id) {
                let id = match next_id {
                    Some(id) => {
                        next_id = id.checked_add(1);
                        id
                    }
                    None => {
                        // Fewer annotations than ids, so a gap always exists.
                        while taken.contains(&free_cursor) {
                            free_cursor += 1;
                        }
                        free_cursor
                    }
                };
                debug!(
                    duplicate_id = annotation.id,
                    id, "renumbering duplicate annotation id"
                );
                annotation.id = id;
                taken.insert(id);
                seen.insert(id);
            }
            accepted.push(annotation);
        }

        self.annotations = accepted;
        self.next_id = next_id;
    }

    /// Replaces every annotation from catalog templates. Templates without an
    /// id are numbered after the highest explicit one.
    pub fn replace_from_templates(&mut self, templates: &[AnnotationTemplate]) {
        let mut next_id = counter_after(templates.iter().filter_map(|template| template.id));
        let annotations = templates
            .iter()
            .map(|template| {
                let id = template.id.unwrap_or_else(|| match next_id {
                    Some(id) => {
                        next_id = id.checked_add(1);
                        id
                    }
                    // Collides with the explicit `u32::MAX`; `replace_all`
                    // moves one of them into a free id.
                    None => u32::MAX,
                });
                template.instantiate(id)
            })
            .collect();
        self.replace_all(annotations);
    }

    pub fn clear(&mut self) {
        self.annotations.clear();
        self.next_id = Some(0);
    }

    /// Appends a quiz point and returns its id.
    ///
    /// Coordinates are clamped to the image. NaN coordinates or an exhausted
    /// id counter add nothing.
    pub fn add(
        &mut self,
        x_percent: f64,
        y_percent: f64,
        question: impl Into<String>,
        correct_answer: Option<String>,
        kind: AnnotationKind,
    ) -> Option<u32> {
        if x_percent.is_nan() || y_percent.is_nan() {
            return None;
        }
        let Some(id) = self.next_id else {
            debug!(count = self.annotations.len(), "annotation ids exhausted");
            return None;
        };
        self.next_id = id.checked_add(1);
        self.annotations.push(Annotation {
            id,
            x_percent: x_percent.clamp(0.0, 100.0),
            y_percent: y_percent.clamp(0.0, 100.0),
            question: question.into(),
            correct_answer: correct_answer.filter(|answer| !answer.trim().is_empty()),
            kind,
            user_answer: String::new(),
            feedback: Feedback::Unanswered,
        });
        trace!(id, count = self.annotations.len(), "added annotation");
        Some(id)
    }

    /// Stores the in-progress answer text without grading it.
    pub fn set_draft_answer(&mut self, id: u32, text: impl Into<String>) -> bool {
        match self.find_mut(id) {
            Some(annotation) => {
                annotation.user_answer = text.into();
                true
            }
            None => false,
        }
    }

    /// Grades an answer. Unknown ids are ignored.
    pub fn submit(&mut self, id: u32, answer: &str) -> Option<Feedback> {
        let annotation = self.find_mut(id)?;
        let feedback = annotation.grade(answer);
        debug!(id, ?feedback, "graded annotation answer");
        Some(feedback)
    }

    #[must_use]
    pub fn find(&self, id: u32) -> Option<&Annotation> {
        self.annotations.iter().find(|annotation| annotation.id == id)
    }

    fn find_mut(&mut self, id: u32) -> Option<&mut Annotation> {
        self.annotations
            .iter_mut()
            .find(|annotation| annotation.id == id)
    }

    /// All annotations in insertion order.
    #[must_use]
    pub fn all(&self) -> &[Annotation] {
        &self.annotations
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Id the next [`AnnotationRegistry::add`] will use, if any remain.
    #[must_use]
    pub fn next_id(&self) -> Option<u32> {
        self.next_id
    }
}
