//! Type-Hierarchy Walker
//!
//! Discovers locally declared subclasses of known marker types by following
//! base-type chains, so those subclasses classify correctly when they show up
//! as annotation types later in the scan.

pub mod infrastructure;

pub use infrastructure::{TypeHierarchyWalker, WalkStats};
