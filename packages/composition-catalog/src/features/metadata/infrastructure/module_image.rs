//! Serde-backed metadata tables
//!
//! A decoded module flattened into plain rows. Handles index the row vectors
//! 1-based, like the physical tables they stand in for.

use serde::{Deserialize, Serialize};

use crate::features::metadata::domain::{
    AttachmentTarget, CustomAttribute, FieldDefinition, MethodDefinition, PropertyAccessors,
    PropertyDefinition, TypeDefinition,
};
use crate::features::metadata::ports::MetadataReader;
use crate::shared::models::{
    AttributeHandle, CatalogError, FieldHandle, MethodHandle, PropertyHandle, Result, Token,
    TypeDefHandle, TypeHandle, TypeRefHandle,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRefRow {
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    /// Module the reference resolves into, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_scope: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefRow {
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<TypeHandle>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRow {
    pub name: String,
    pub declaring_type: Option<TypeDefHandle>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodRow {
    pub name: String,
    pub declaring_type: Option<TypeDefHandle>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRow {
    pub name: String,
    #[serde(default)]
    pub accessors: PropertyAccessors,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterRow {
    pub name: String,
    pub method: MethodHandle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomAttributeRow {
    pub attribute_type: TypeHandle,
    pub parent: AttachmentTarget,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleImage {
    pub name: String,
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default)]
    pub type_refs: Vec<TypeRefRow>,
    #[serde(default)]
    pub type_defs: Vec<TypeDefRow>,
    #[serde(default)]
    pub fields: Vec<FieldRow>,
    #[serde(default)]
    pub methods: Vec<MethodRow>,
    #[serde(default)]
    pub properties: Vec<PropertyRow>,
    #[serde(default)]
    pub parameters: Vec<ParameterRow>,
    #[serde(default)]
    pub custom_attributes: Vec<CustomAttributeRow>,
}

impl ModuleImage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn type_def_row(&self, handle: TypeDefHandle) -> Result<&TypeDefRow> {
        row(&self.type_defs, handle.row(), "TypeDef")
    }

    fn type_ref_row(&self, handle: TypeRefHandle) -> Result<&TypeRefRow> {
        row(&self.type_refs, handle.row(), "TypeRef")
    }
}

fn row<'a, T>(table: &'a [T], row: u32, table_name: &str) -> Result<&'a T> {
    if row == 0 {
        return Err(CatalogError::malformed(format!(
            "Nil handle into {} table",
            table_name
        )));
    }
    table.get(row as usize - 1).ok_or_else(|| {
        CatalogError::malformed(format!(
            "Dangling handle: {} row {} of {}",
            table_name,
            row,
            table.len()
        ))
    })
}

fn full_name(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", namespace, name)
    }
}

fn handles<H>(len: usize, make: impl Fn(u32) -> H) -> Vec<H> {
    (1..=len as u32).map(make).collect()
}

impl MetadataReader for ModuleImage {
    fn module_full_name(&self) -> Result<String> {
        if self.name.is_empty() {
            return Err(CatalogError::decoder("Module has no name"));
        }
        Ok(self.name.clone())
    }

    fn referenced_module_names(&self) -> Result<Vec<String>> {
        Ok(self.references.clone())
    }

    fn type_definitions(&self) -> Result<Vec<TypeDefHandle>> {
        Ok(handles(self.type_defs.len(), TypeDefHandle))
    }

    fn custom_attributes(&self) -> Result<Vec<AttributeHandle>> {
        Ok(handles(self.custom_attributes.len(), AttributeHandle))
    }

    fn type_definition(&self, handle: TypeDefHandle) -> Result<TypeDefinition> {
        let def = self.type_def_row(handle)?;
        Ok(TypeDefinition {
            handle,
            full_name: full_name(&def.namespace, &def.name),
            base_type: def.base,
        })
    }

    fn type_full_name(&self, handle: TypeHandle) -> Result<String> {
        match handle {
            TypeHandle::Definition(def) => {
                let def = self.type_def_row(def)?;
                Ok(full_name(&def.namespace, &def.name))
            }
            TypeHandle::Reference(reference) => {
                let reference = self.type_ref_row(reference)?;
                Ok(full_name(&reference.namespace, &reference.name))
            }
        }
    }

    fn type_token(&self, handle: TypeDefHandle) -> Result<Token> {
        self.type_def_row(handle)?;
        Ok(handle.token())
    }

    fn field_definition(&self, handle: FieldHandle) -> Result<FieldDefinition> {
        let field = row(&self.fields, handle.row(), "Field")?;
        Ok(FieldDefinition {
            handle,
            declaring_type: field.declaring_type,
            token: handle.token(),
        })
    }

    fn method_definition(&self, handle: MethodHandle) -> Result<MethodDefinition> {
        let method = row(&self.methods, handle.row(), "MethodDef")?;
        Ok(MethodDefinition {
            handle,
            declaring_type: method.declaring_type,
            token: handle.token(),
        })
    }

    fn property_definition(&self, handle: PropertyHandle) -> Result<PropertyDefinition> {
        let property = row(&self.properties, handle.row(), "Property")?;
        Ok(PropertyDefinition {
            handle,
            accessors: property.accessors,
            token: handle.token(),
        })
    }

    fn custom_attribute(&self, handle: AttributeHandle) -> Result<CustomAttribute> {
        let attribute = row(&self.custom_attributes, handle.row(), "CustomAttribute")?;
        Ok(CustomAttribute {
            handle,
            attribute_type: attribute.attribute_type,
            parent: attribute.parent,
        })
    }
}
