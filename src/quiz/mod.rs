//! Quiz points placed on the slide image and answer grading.

mod annotation;
mod registry;

pub use annotation::{Annotation, AnnotationKind, AnnotationTemplate, Feedback};
pub use registry::AnnotationRegistry;
