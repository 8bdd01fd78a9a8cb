use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::BTreeSet;

use super::records::TypeRecord;
use crate::features::marker_registry::MarkerRegistry;
use crate::shared::models::{AttributeHandle, ErrorKind, TypeDefHandle};

/// An annotation entry skipped during the scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogDiagnostic {
    pub attribute: AttributeHandle,
    pub kind: ErrorKind,
    pub message: String,
}

/// Populated composition catalog of one module
///
/// Immutable once built; dependents share it behind an `Arc` and only read
/// its marker registry.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleCatalog {
    full_name: String,
    is_composition_module: bool,
    type_records: FxHashMap<TypeDefHandle, TypeRecord>,
    marker_registry: MarkerRegistry,
    diagnostics: Vec<CatalogDiagnostic>,
}

impl ModuleCatalog {
    pub(crate) fn new(
        full_name: String,
        type_records: FxHashMap<TypeDefHandle, TypeRecord>,
        marker_registry: MarkerRegistry,
        diagnostics: Vec<CatalogDiagnostic>,
    ) -> Self {
        Self {
            full_name,
            is_composition_module: true,
            type_records,
            marker_registry,
            diagnostics,
        }
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn is_composition_module(&self) -> bool {
        self.is_composition_module
    }

    /// Type records in no particular order
    pub fn type_records(&self) -> impl Iterator<Item = &TypeRecord> {
        self.type_records.values()
    }

    /// Type records ordered by handle, for stable output
    pub fn sorted_type_records(&self) -> Vec<&TypeRecord> {
        let mut records: Vec<&TypeRecord> = self.type_records.values().collect();
        records.sort_by_key(|record| record.handle());
        records
    }

    pub fn type_record(&self, handle: TypeDefHandle) -> Option<&TypeRecord> {
        self.type_records.get(&handle)
    }

    pub fn type_count(&self) -> usize {
        self.type_records.len()
    }

    pub fn has_composition_types(&self) -> bool {
        !self.type_records.is_empty()
    }

    pub fn marker_registry(&self) -> &MarkerRegistry {
        &self.marker_registry
    }

    pub fn known_export_markers(&self) -> &BTreeSet<String> {
        self.marker_registry.export_like()
    }

    pub fn known_import_markers(&self) -> &BTreeSet<String> {
        self.marker_registry.import_like()
    }

    pub fn diagnostics(&self) -> &[CatalogDiagnostic] {
        &self.diagnostics
    }

    pub fn to_json(&self) -> crate::shared::models::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
