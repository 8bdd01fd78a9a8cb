//! Module metadata access
//!
//! The binary decoder lives outside this crate. Everything the catalog needs
//! from it goes through the [`MetadataReader`] port; [`ModuleImage`] is an
//! in-memory implementation of that port for fixtures and tests.
//!
//! ```text
//! ports/          MetadataReader trait
//!    ↑
//! domain/         TypeDefinition, PropertyDefinition, CustomAttribute, AttachmentTarget
//!    ↑
//! infrastructure/ ModuleImage (serde tables), ModuleImageBuilder
//! ```

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::{
    AttachmentTarget, CustomAttribute, FieldDefinition, MethodDefinition, PropertyAccessors,
    PropertyDefinition, TypeDefinition,
};
pub use infrastructure::{ModuleImage, ModuleImageBuilder};
pub use ports::MetadataReader;
