use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::models::{
    AttributeHandle, FieldHandle, MethodHandle, ParameterHandle, PropertyHandle, Token,
    TypeDefHandle, TypeHandle,
};

/// A type declared in the module being scanned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefinition {
    pub handle: TypeDefHandle,
    pub full_name: String,
    /// `None` for `System.Object`, interfaces and `<Module>`
    pub base_type: Option<TypeHandle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDefinition {
    pub handle: FieldHandle,
    pub declaring_type: Option<TypeDefHandle>,
    pub token: Token,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodDefinition {
    pub handle: MethodHandle,
    pub declaring_type: Option<TypeDefHandle>,
    pub token: Token,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyAccessors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub getter: Option<MethodHandle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setter: Option<MethodHandle>,
}

impl PropertyAccessors {
    /// Getter if present, else setter
    pub fn primary(&self) -> Option<MethodHandle> {
        self.getter.or(self.setter)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDefinition {
    pub handle: PropertyHandle,
    pub accessors: PropertyAccessors,
    pub token: Token,
}

/// What an annotation is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "row", rename_all = "snake_case")]
pub enum AttachmentTarget {
    TypeDefinition(TypeDefHandle),
    Field(FieldHandle),
    Property(PropertyHandle),
    Method(MethodHandle),
    Parameter(ParameterHandle),
    /// Any other parent kind (assembly, module, event, generic parameter, ...)
    Other(Token),
}

impl AttachmentTarget {
    pub fn kind_name(&self) -> &'static str {
        match self {
            AttachmentTarget::TypeDefinition(_) => "type_definition",
            AttachmentTarget::Field(_) => "field",
            AttachmentTarget::Property(_) => "property",
            AttachmentTarget::Method(_) => "method",
            AttachmentTarget::Parameter(_) => "parameter",
            AttachmentTarget::Other(_) => "other",
        }
    }

    pub fn token(&self) -> Token {
        match self {
            AttachmentTarget::TypeDefinition(handle) => handle.token(),
            AttachmentTarget::Field(handle) => handle.token(),
            AttachmentTarget::Property(handle) => handle.token(),
            AttachmentTarget::Method(handle) => handle.token(),
            AttachmentTarget::Parameter(handle) => handle.token(),
            AttachmentTarget::Other(token) => *token,
        }
    }
}

impl fmt::Display for AttachmentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind_name(), self.token())
    }
}

/// One row of the CustomAttribute table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomAttribute {
    pub handle: AttributeHandle,
    /// Type of the annotation (the constructor's declaring type)
    pub attribute_type: TypeHandle,
    pub parent: AttachmentTarget,
}
