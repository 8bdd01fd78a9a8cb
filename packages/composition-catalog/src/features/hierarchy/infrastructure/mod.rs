mod walker;

pub use walker::{TypeHierarchyWalker, WalkStats};
