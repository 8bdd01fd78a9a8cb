//! Composition catalog
//!
//! Drives the scan of one module and owns the records it produces.
//!
//! ```text
//! application/    CatalogBuilder (populate state machine)
//!    ↓
//! ports/          ModuleResolver (async, cross-module registries)
//!    ↓
//! infrastructure/ EntityCache, StaticResolver
//!    ↓
//! domain/         ModuleCatalog, TypeRecord, MemberRecord, PopulationState
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{build_catalog, CatalogBuilder};
pub use domain::{
    CatalogDiagnostic, MemberHandle, MemberKind, MemberRecord, ModuleCatalog, PopulationState,
    TypeRecord,
};
pub use infrastructure::{EntityCache, StaticResolver};
pub use ports::{ModuleResolver, NoReferences};
