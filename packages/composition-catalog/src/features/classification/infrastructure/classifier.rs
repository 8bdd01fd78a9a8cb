//! Memoized annotation classification
//!
//! Both caches are write-once per handle. The registry must be complete
//! (references merged, hierarchy walked) before the first query.

use rustc_hash::FxHashMap;

use crate::features::classification::domain::ExportClassification;
use crate::features::marker_registry::{MarkerKind, MarkerRegistry};
use crate::features::metadata::MetadataReader;
use crate::shared::models::{Result, TypeHandle};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifierStats {
    pub import_cache_entries: usize,
    pub export_cache_entries: usize,
    /// Underlying full-name resolutions performed
    pub name_resolutions: usize,
}

#[derive(Debug, Default)]
pub struct AnnotationClassifier {
    import_cache: FxHashMap<TypeHandle, bool>,
    export_cache: FxHashMap<TypeHandle, ExportClassification>,
    name_resolutions: usize,
}

impl AnnotationClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_import_marker(
        &mut self,
        attribute_type: TypeHandle,
        reader: &dyn MetadataReader,
        registry: &MarkerRegistry,
    ) -> Result<bool> {
        if let Some(&cached) = self.import_cache.get(&attribute_type) {
            return Ok(cached);
        }

        let name = self.resolve_name(attribute_type, reader)?;
        let is_import = registry.contains(&name, MarkerKind::Import);
        self.import_cache.insert(attribute_type, is_import);
        Ok(is_import)
    }

    pub fn classify_export(
        &mut self,
        attribute_type: TypeHandle,
        reader: &dyn MetadataReader,
        registry: &MarkerRegistry,
    ) -> Result<ExportClassification> {
        if let Some(&cached) = self.export_cache.get(&attribute_type) {
            return Ok(cached);
        }

        let name = self.resolve_name(attribute_type, reader)?;
        let classification = if registry.contains(&name, MarkerKind::Export) {
            ExportClassification::Export
        } else {
            ExportClassification::None
        };
        self.export_cache.insert(attribute_type, classification);
        Ok(classification)
    }

    pub fn stats(&self) -> ClassifierStats {
        ClassifierStats {
            import_cache_entries: self.import_cache.len(),
            export_cache_entries: self.export_cache.len(),
            name_resolutions: self.name_resolutions,
        }
    }

    fn resolve_name(
        &mut self,
        attribute_type: TypeHandle,
        reader: &dyn MetadataReader,
    ) -> Result<String> {
        self.name_resolutions += 1;
        reader.type_full_name(attribute_type)
    }
}
