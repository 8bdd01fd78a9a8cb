//! Shared models

mod error;
mod handle;

pub use error::{CatalogError, ErrorKind, Result};
pub use handle::{
    table, AttributeHandle, FieldHandle, MethodHandle, ParameterHandle, PropertyHandle, Token,
    TypeDefHandle, TypeHandle, TypeRefHandle,
};
