mod classifier;

pub use classifier::{AnnotationClassifier, ClassifierStats};
