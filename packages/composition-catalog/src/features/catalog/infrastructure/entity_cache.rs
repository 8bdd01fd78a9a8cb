//! Lazy materialization of type and member records
//!
//! Records exist only for composition-relevant entities. Each is created the
//! first time an annotation touches it and is never rebuilt afterwards.

use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;

use crate::features::catalog::domain::{MemberHandle, MemberRecord, TypeRecord};
use crate::features::metadata::MetadataReader;
use crate::shared::models::{
    CatalogError, FieldHandle, MethodHandle, PropertyHandle, Result, TypeDefHandle,
};

#[derive(Debug, Default)]
pub struct EntityCache {
    types: FxHashMap<TypeDefHandle, TypeRecord>,
    fields: FxHashMap<FieldHandle, MemberRecord>,
    properties: FxHashMap<PropertyHandle, MemberRecord>,
    methods: FxHashMap<MethodHandle, MemberRecord>,
}

impl EntityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create_type_record(
        &mut self,
        handle: TypeDefHandle,
        reader: &dyn MetadataReader,
    ) -> Result<&mut TypeRecord> {
        match self.types.entry(handle) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let token = reader.type_token(handle)?;
                Ok(entry.insert(TypeRecord::new(handle, token)))
            }
        }
    }

    pub fn get_or_create_member_record(
        &mut self,
        handle: MemberHandle,
        reader: &dyn MetadataReader,
    ) -> Result<MemberRecord> {
        if let Some(record) = self.cached_member(handle) {
            return Ok(record);
        }

        let record = match handle {
            MemberHandle::Field(field) => {
                let definition = reader.field_definition(field)?;
                let declaring_type = definition.declaring_type.ok_or_else(|| {
                    CatalogError::malformed(format!("Field {} has no declaring type", field))
                })?;
                MemberRecord::new(handle, definition.token, declaring_type)
            }
            MemberHandle::Method(method) => {
                let definition = reader.method_definition(method)?;
                let declaring_type = definition.declaring_type.ok_or_else(|| {
                    CatalogError::malformed(format!("Method {} has no declaring type", method))
                })?;
                MemberRecord::new(handle, definition.token, declaring_type)
            }
            MemberHandle::Property(property) => {
                let definition = reader.property_definition(property)?;
                // Getter first; a setter-only property still has a stable owner.
                let accessor = definition.accessors.primary().ok_or_else(|| {
                    CatalogError::malformed(format!(
                        "Property {} has neither getter nor setter",
                        property
                    ))
                })?;
                let declaring_type = reader
                    .method_definition(accessor)?
                    .declaring_type
                    .ok_or_else(|| {
                        CatalogError::malformed(format!(
                            "Accessor {} of property {} has no declaring type",
                            accessor, property
                        ))
                    })?;
                MemberRecord::new(handle, definition.token, declaring_type)
            }
        };

        match handle {
            MemberHandle::Field(field) => self.fields.insert(field, record),
            MemberHandle::Property(property) => self.properties.insert(property, record),
            MemberHandle::Method(method) => self.methods.insert(method, record),
        };
        Ok(record)
    }

    pub fn add_imported_member(
        &mut self,
        handle: MemberHandle,
        reader: &dyn MetadataReader,
    ) -> Result<MemberRecord> {
        let member = self.get_or_create_member_record(handle, reader)?;
        self.get_or_create_type_record(member.declaring_type, reader)?
            .add_imported_member(member);
        Ok(member)
    }

    pub fn add_exported_member(
        &mut self,
        handle: MemberHandle,
        reader: &dyn MetadataReader,
    ) -> Result<MemberRecord> {
        let member = self.get_or_create_member_record(handle, reader)?;
        self.get_or_create_type_record(member.declaring_type, reader)?
            .add_exported_member(member);
        Ok(member)
    }

    pub fn mark_type_exported(
        &mut self,
        handle: TypeDefHandle,
        reader: &dyn MetadataReader,
    ) -> Result<()> {
        self.get_or_create_type_record(handle, reader)?.mark_exported();
        Ok(())
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn member_count(&self) -> usize {
        self.fields.len() + self.properties.len() + self.methods.len()
    }

    pub fn into_type_records(self) -> FxHashMap<TypeDefHandle, TypeRecord> {
        self.types
    }

    fn cached_member(&self, handle: MemberHandle) -> Option<MemberRecord> {
        match handle {
            MemberHandle::Field(field) => self.fields.get(&field).copied(),
            MemberHandle::Property(property) => self.properties.get(&property).copied(),
            MemberHandle::Method(method) => self.methods.get(&method).copied(),
        }
    }
}
