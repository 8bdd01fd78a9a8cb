//! Metadata decoder port
//!
//! Read-only view over an already-loaded module. All calls are synchronous;
//! the only suspension points of a population are reference resolutions.

use crate::features::metadata::domain::{
    CustomAttribute, FieldDefinition, MethodDefinition, PropertyDefinition, TypeDefinition,
};
use crate::shared::models::{
    AttributeHandle, FieldHandle, MethodHandle, PropertyHandle, Result, Token, TypeDefHandle,
    TypeHandle,
};

pub trait MetadataReader: Send + Sync {
    /// Fully-qualified name of the module itself
    fn module_full_name(&self) -> Result<String>;

    /// Full names of every module this one references (may contain duplicates)
    fn referenced_module_names(&self) -> Result<Vec<String>>;

    fn type_definitions(&self) -> Result<Vec<TypeDefHandle>>;

    fn custom_attributes(&self) -> Result<Vec<AttributeHandle>>;

    fn type_definition(&self, handle: TypeDefHandle) -> Result<TypeDefinition>;

    /// `Namespace.Name` of a local definition or a cross-module reference
    fn type_full_name(&self, handle: TypeHandle) -> Result<String>;

    fn type_token(&self, handle: TypeDefHandle) -> Result<Token> {
        Ok(handle.token())
    }

    fn field_definition(&self, handle: FieldHandle) -> Result<FieldDefinition>;

    fn method_definition(&self, handle: MethodHandle) -> Result<MethodDefinition>;

    fn property_definition(&self, handle: PropertyHandle) -> Result<PropertyDefinition>;

    fn custom_attribute(&self, handle: AttributeHandle) -> Result<CustomAttribute>;
}
