//! Catalog domain models

mod module_catalog;
mod records;
mod state;

pub use module_catalog::{CatalogDiagnostic, ModuleCatalog};
pub use records::{MemberHandle, MemberKind, MemberRecord, TypeRecord};
pub use state::PopulationState;
