mod registry;

pub use registry::{MarkerKind, MarkerRegistry, ROOT_EXPORT_MARKERS, ROOT_IMPORT_MARKERS};
