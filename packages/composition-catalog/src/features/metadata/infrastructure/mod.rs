//! In-memory metadata adapter

mod image_builder;
mod module_image;

pub use image_builder::ModuleImageBuilder;
pub use module_image::{
    CustomAttributeRow, FieldRow, MethodRow, ModuleImage, ParameterRow, PropertyRow, TypeDefRow,
    TypeRefRow,
};
