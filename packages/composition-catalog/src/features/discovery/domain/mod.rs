mod outcome;
mod report;

pub use outcome::{ModuleFailure, ModuleOutcome};
pub use report::DiscoveryReport;
