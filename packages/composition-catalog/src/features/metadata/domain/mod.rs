//! Decoded metadata rows, as the catalog sees them

mod definitions;

pub use definitions::{
    AttachmentTarget, CustomAttribute, FieldDefinition, MethodDefinition, PropertyAccessors,
    PropertyDefinition, TypeDefinition,
};
