//! Recursive descent over base-type chains
//!
//! The chain is an implicit graph that may leave the module (base is a
//! `TypeRef`) or loop back on itself (malformed input). Both are dead ends:
//! a visited-handle guard and a depth bound keep the walk finite.

use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use crate::features::marker_registry::{MarkerKind, MarkerRegistry};
use crate::features::metadata::{MetadataReader, TypeDefinition};
use crate::shared::models::{Result, TypeDefHandle, TypeHandle};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub types_walked: usize,
    pub discovered_exports: usize,
    pub discovered_imports: usize,
}

pub struct TypeHierarchyWalker<'a> {
    reader: &'a dyn MetadataReader,
    max_depth: usize,
}

impl<'a> TypeHierarchyWalker<'a> {
    pub fn new(reader: &'a dyn MetadataReader, max_depth: usize) -> Self {
        Self { reader, max_depth }
    }

    /// Walk every type definition of the module
    pub fn walk_all(&self, registry: &mut MarkerRegistry) -> Result<WalkStats> {
        let exports_before = registry.len(MarkerKind::Export);
        let imports_before = registry.len(MarkerKind::Import);

        let handles = self.reader.type_definitions()?;
        for &handle in &handles {
            let definition = self.reader.type_definition(handle)?;
            self.walk(&definition, registry)?;
        }

        let stats = WalkStats {
            types_walked: handles.len(),
            discovered_exports: registry.len(MarkerKind::Export) - exports_before,
            discovered_imports: registry.len(MarkerKind::Import) - imports_before,
        };
        debug!(
            types = stats.types_walked,
            exports = stats.discovered_exports,
            imports = stats.discovered_imports,
            "hierarchy walk finished"
        );
        Ok(stats)
    }

    /// Record `definition` in the registry if it derives from a known marker.
    ///
    /// Returns the marker kind the definition was recorded under, if any.
    pub fn walk(
        &self,
        definition: &TypeDefinition,
        registry: &mut MarkerRegistry,
    ) -> Result<Option<MarkerKind>> {
        let mut visited = FxHashSet::default();
        self.walk_from(definition, registry, &mut visited, 0)
    }

    fn walk_from(
        &self,
        subject: &TypeDefinition,
        registry: &mut MarkerRegistry,
        visited: &mut FxHashSet<TypeDefHandle>,
        depth: usize,
    ) -> Result<Option<MarkerKind>> {
        if !visited.insert(subject.handle) {
            warn!(
                type_name = %subject.full_name,
                token = %subject.handle,
                "cyclic base-type chain, stopping walk"
            );
            return Ok(None);
        }
        if depth >= self.max_depth {
            warn!(
                type_name = %subject.full_name,
                max_depth = self.max_depth,
                "base-type chain exceeds depth bound, stopping walk"
            );
            return Ok(None);
        }

        let Some(base) = subject.base_type else {
            return Ok(None);
        };

        let base_name = self.reader.type_full_name(base)?;
        if let Some(kind) = registry.kind_of(&base_name) {
            self.record(subject, kind, registry);
            return Ok(Some(kind));
        }

        match base {
            TypeHandle::Definition(base_handle) => {
                let base_definition = self.reader.type_definition(base_handle)?;
                let kind = self.walk_from(&base_definition, registry, visited, depth + 1)?;
                if let Some(kind) = kind {
                    self.record(subject, kind, registry);
                }
                Ok(kind)
            }
            // Lives in another module; only its name was checkable here.
            TypeHandle::Reference(_) => Ok(None),
        }
    }

    fn record(&self, subject: &TypeDefinition, kind: MarkerKind, registry: &mut MarkerRegistry) {
        if registry.insert(subject.full_name.clone(), kind) {
            debug!(
                type_name = %subject.full_name,
                kind = kind.as_str(),
                "discovered marker subclass"
            );
        }
    }
}
