//! Annotation Classifier
//!
//! Answers "is this annotation an import marker?" and "is it an export
//! marker?" per annotation-type handle, memoized for one population run.

pub mod domain;
pub mod infrastructure;

pub use domain::ExportClassification;
pub use infrastructure::{AnnotationClassifier, ClassifierStats};
