use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::models::{FieldHandle, MethodHandle, PropertyHandle, Token, TypeDefHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Field,
    Property,
    Method,
}

impl MemberKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberKind::Field => "field",
            MemberKind::Property => "property",
            MemberKind::Method => "method",
        }
    }
}

/// Handle into one of the three member tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "row", rename_all = "lowercase")]
pub enum MemberHandle {
    Field(FieldHandle),
    Property(PropertyHandle),
    Method(MethodHandle),
}

impl MemberHandle {
    pub fn kind(&self) -> MemberKind {
        match self {
            MemberHandle::Field(_) => MemberKind::Field,
            MemberHandle::Property(_) => MemberKind::Property,
            MemberHandle::Method(_) => MemberKind::Method,
        }
    }

    pub fn token(&self) -> Token {
        match self {
            MemberHandle::Field(handle) => handle.token(),
            MemberHandle::Property(handle) => handle.token(),
            MemberHandle::Method(handle) => handle.token(),
        }
    }
}

impl fmt::Display for MemberHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind().as_str(), self.token())
    }
}

/// A field, property or method that is exported or imported at least once
///
/// The declaring type is fixed when the record is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub handle: MemberHandle,
    pub token: Token,
    pub declaring_type: TypeDefHandle,
}

impl MemberRecord {
    pub fn new(handle: MemberHandle, token: Token, declaring_type: TypeDefHandle) -> Self {
        Self {
            handle,
            token,
            declaring_type,
        }
    }

    pub fn kind(&self) -> MemberKind {
        self.handle.kind()
    }
}

/// A composition-relevant type definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRecord {
    handle: TypeDefHandle,
    is_exported: bool,
    metadata_token: Token,
    exported_members: Vec<MemberRecord>,
    imported_members: Vec<MemberRecord>,
}

impl TypeRecord {
    pub fn new(handle: TypeDefHandle, metadata_token: Token) -> Self {
        Self {
            handle,
            is_exported: false,
            metadata_token,
            exported_members: Vec::new(),
            imported_members: Vec::new(),
        }
    }

    pub fn handle(&self) -> TypeDefHandle {
        self.handle
    }

    pub fn is_exported(&self) -> bool {
        self.is_exported
    }

    pub fn metadata_token(&self) -> Token {
        self.metadata_token
    }

    pub fn exported_members(&self) -> &[MemberRecord] {
        &self.exported_members
    }

    pub fn imported_members(&self) -> &[MemberRecord] {
        &self.imported_members
    }

    pub(crate) fn mark_exported(&mut self) {
        self.is_exported = true;
    }

    pub(crate) fn add_exported_member(&mut self, member: MemberRecord) {
        self.exported_members.push(member);
    }

    pub(crate) fn add_imported_member(&mut self, member: MemberRecord) {
        self.imported_members.push(member);
    }
}
