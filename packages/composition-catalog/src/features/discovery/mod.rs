//! Multi-module discovery
//!
//! Populates modules on demand and serves them to each other as reference
//! resolvers. Each module is populated at most once per [`Discovery`], no
//! matter how many dependents ask for it or how concurrently they ask.

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::{DiscoveryReport, ModuleFailure, ModuleOutcome};
pub use infrastructure::{Discovery, ImageDirectorySource, InMemoryModuleSource};
pub use ports::ModuleSource;
