//! Metadata handles and tokens
//!
//! Handles are 1-based row numbers into one metadata table. A handle is only
//! unique inside its own table, so every table gets its own newtype.
//! Tokens pack the table id into the high byte (`table << 24 | row`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// ECMA-335 table ids used by the catalog
pub mod table {
    pub const TYPE_REF: u8 = 0x01;
    pub const TYPE_DEF: u8 = 0x02;
    pub const FIELD: u8 = 0x04;
    pub const METHOD_DEF: u8 = 0x06;
    pub const PARAM: u8 = 0x08;
    pub const CUSTOM_ATTRIBUTE: u8 = 0x0C;
    pub const PROPERTY: u8 = 0x17;
}

/// Opaque metadata token, used for display and debugging only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(pub u32);

impl Token {
    pub fn new(table: u8, row: u32) -> Self {
        Token(((table as u32) << 24) | (row & 0x00FF_FFFF))
    }

    pub fn table(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn row(&self) -> u32 {
        self.0 & 0x00FF_FFFF
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

macro_rules! row_handle {
    ($(#[$meta:meta])* $name:ident, $table:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            pub fn row(&self) -> u32 {
                self.0
            }

            pub fn token(&self) -> Token {
                Token::new($table, self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.token())
            }
        }
    };
}

row_handle!(
    /// Row in the TypeDef table
    TypeDefHandle,
    table::TYPE_DEF
);
row_handle!(
    /// Row in the TypeRef table
    TypeRefHandle,
    table::TYPE_REF
);
row_handle!(
    /// Row in the Field table
    FieldHandle,
    table::FIELD
);
row_handle!(
    /// Row in the MethodDef table
    MethodHandle,
    table::METHOD_DEF
);
row_handle!(
    /// Row in the Property table
    PropertyHandle,
    table::PROPERTY
);
row_handle!(
    /// Row in the Param table
    ParameterHandle,
    table::PARAM
);
row_handle!(
    /// Row in the CustomAttribute table
    AttributeHandle,
    table::CUSTOM_ATTRIBUTE
);

/// A type either defined in this module or referenced from another one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "row", rename_all = "snake_case")]
pub enum TypeHandle {
    Definition(TypeDefHandle),
    Reference(TypeRefHandle),
}

impl TypeHandle {
    pub fn as_definition(&self) -> Option<TypeDefHandle> {
        match self {
            TypeHandle::Definition(handle) => Some(*handle),
            TypeHandle::Reference(_) => None,
        }
    }

    pub fn token(&self) -> Token {
        match self {
            TypeHandle::Definition(handle) => handle.token(),
            TypeHandle::Reference(handle) => handle.token(),
        }
    }
}

impl From<TypeDefHandle> for TypeHandle {
    fn from(handle: TypeDefHandle) -> Self {
        TypeHandle::Definition(handle)
    }
}

impl From<TypeRefHandle> for TypeHandle {
    fn from(handle: TypeRefHandle) -> Self {
        TypeHandle::Reference(handle)
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}
