//! Marker Registry
//!
//! The growing sets of annotation type names that count as export-like or
//! import-like for one module. Seeded with the framework's root markers,
//! extended by references and by local subclass discovery.

pub mod domain;

pub use domain::{MarkerKind, MarkerRegistry, ROOT_EXPORT_MARKERS, ROOT_IMPORT_MARKERS};
