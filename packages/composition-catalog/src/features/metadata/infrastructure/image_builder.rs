//! Fluent construction of [`ModuleImage`] fixtures

use super::module_image::{
    CustomAttributeRow, FieldRow, MethodRow, ModuleImage, ParameterRow, PropertyRow, TypeDefRow,
    TypeRefRow,
};
use crate::features::metadata::domain::{AttachmentTarget, PropertyAccessors};
use crate::shared::models::{
    AttributeHandle, FieldHandle, MethodHandle, ParameterHandle, PropertyHandle, TypeDefHandle,
    TypeHandle, TypeRefHandle,
};

/// Builds a module image table by table, handing back the handle of every row
///
/// ```rust
/// use composition_catalog::features::metadata::ModuleImageBuilder;
///
/// let mut builder = ModuleImageBuilder::new("Contoso.Parts");
/// let export = builder.type_ref("System.ComponentModel.Composition.ExportAttribute");
/// let foo = builder.type_def("Contoso.Foo", None);
/// let bar = builder.field(foo, "Bar");
/// builder.annotate_field(export.into(), bar);
/// let image = builder.build();
/// assert_eq!(image.fields.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ModuleImageBuilder {
    image: ModuleImage,
}

fn split_full_name(full_name: &str) -> (String, String) {
    match full_name.rsplit_once('.') {
        Some((namespace, name)) => (namespace.to_string(), name.to_string()),
        None => (String::new(), full_name.to_string()),
    }
}

impl ModuleImageBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            image: ModuleImage::new(name),
        }
    }

    pub fn reference(&mut self, module_name: impl Into<String>) -> &mut Self {
        self.image.references.push(module_name.into());
        self
    }

    pub fn type_ref(&mut self, full_name: &str) -> TypeRefHandle {
        let (namespace, name) = split_full_name(full_name);
        self.image.type_refs.push(TypeRefRow {
            namespace,
            name,
            resolution_scope: None,
        });
        TypeRefHandle(self.image.type_refs.len() as u32)
    }

    pub fn type_def(&mut self, full_name: &str, base: Option<TypeHandle>) -> TypeDefHandle {
        let (namespace, name) = split_full_name(full_name);
        self.image.type_defs.push(TypeDefRow {
            namespace,
            name,
            base,
        });
        TypeDefHandle(self.image.type_defs.len() as u32)
    }

    /// Rewrites the base of an existing definition, for forward or cyclic chains
    pub fn set_base(&mut self, handle: TypeDefHandle, base: Option<TypeHandle>) -> &mut Self {
        if let Some(row) = self.image.type_defs.get_mut(handle.row() as usize - 1) {
            row.base = base;
        }
        self
    }

    pub fn field(&mut self, declaring_type: TypeDefHandle, name: &str) -> FieldHandle {
        self.field_row(Some(declaring_type), name)
    }

    /// Field row without an owner, as a truncated decoder would report it
    pub fn orphan_field(&mut self, name: &str) -> FieldHandle {
        self.field_row(None, name)
    }

    fn field_row(&mut self, declaring_type: Option<TypeDefHandle>, name: &str) -> FieldHandle {
        self.image.fields.push(FieldRow {
            name: name.to_string(),
            declaring_type,
        });
        FieldHandle(self.image.fields.len() as u32)
    }

    pub fn method(&mut self, declaring_type: TypeDefHandle, name: &str) -> MethodHandle {
        self.image.methods.push(MethodRow {
            name: name.to_string(),
            declaring_type: Some(declaring_type),
        });
        MethodHandle(self.image.methods.len() as u32)
    }

    /// Property with `get_`/`set_` accessor methods declared on `declaring_type`
    pub fn property(
        &mut self,
        declaring_type: TypeDefHandle,
        name: &str,
        getter: bool,
        setter: bool,
    ) -> PropertyHandle {
        let getter = getter.then(|| self.method(declaring_type, &format!("get_{}", name)));
        let setter = setter.then(|| self.method(declaring_type, &format!("set_{}", name)));
        self.property_with_accessors(name, PropertyAccessors { getter, setter })
    }

    pub fn property_with_accessors(
        &mut self,
        name: &str,
        accessors: PropertyAccessors,
    ) -> PropertyHandle {
        self.image.properties.push(PropertyRow {
            name: name.to_string(),
            accessors,
        });
        PropertyHandle(self.image.properties.len() as u32)
    }

    pub fn parameter(&mut self, method: MethodHandle, name: &str) -> ParameterHandle {
        self.image.parameters.push(ParameterRow {
            name: name.to_string(),
            method,
        });
        ParameterHandle(self.image.parameters.len() as u32)
    }

    pub fn annotate(
        &mut self,
        attribute_type: TypeHandle,
        parent: AttachmentTarget,
    ) -> AttributeHandle {
        self.image.custom_attributes.push(CustomAttributeRow {
            attribute_type,
            parent,
        });
        AttributeHandle(self.image.custom_attributes.len() as u32)
    }

    pub fn annotate_type(
        &mut self,
        attribute_type: TypeHandle,
        target: TypeDefHandle,
    ) -> AttributeHandle {
        self.annotate(attribute_type, AttachmentTarget::TypeDefinition(target))
    }

    pub fn annotate_field(
        &mut self,
        attribute_type: TypeHandle,
        target: FieldHandle,
    ) -> AttributeHandle {
        self.annotate(attribute_type, AttachmentTarget::Field(target))
    }

    pub fn annotate_property(
        &mut self,
        attribute_type: TypeHandle,
        target: PropertyHandle,
    ) -> AttributeHandle {
        self.annotate(attribute_type, AttachmentTarget::Property(target))
    }

    pub fn annotate_method(
        &mut self,
        attribute_type: TypeHandle,
        target: MethodHandle,
    ) -> AttributeHandle {
        self.annotate(attribute_type, AttachmentTarget::Method(target))
    }

    pub fn annotate_parameter(
        &mut self,
        attribute_type: TypeHandle,
        target: ParameterHandle,
    ) -> AttributeHandle {
        self.annotate(attribute_type, AttachmentTarget::Parameter(target))
    }

    pub fn build(self) -> ModuleImage {
        self.image
    }
}
