use std::sync::Arc;

use super::outcome::{ModuleFailure, ModuleOutcome};
use crate::features::catalog::ModuleCatalog;

/// Outcome of a batch discovery, grouped by what each module turned out to be
///
/// Every group keeps the order in which names were requested, and each entry
/// carries the requested name. A source may serve an image whose assembly
/// name differs from the name it was asked for.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryReport {
    /// Populated modules with at least one type record
    pub with_types: Vec<(String, Arc<ModuleCatalog>)>,
    /// Populated modules that declare nothing composition-relevant
    pub without_types: Vec<(String, Arc<ModuleCatalog>)>,
    pub failed: Vec<(String, ModuleFailure)>,
    pub not_found: Vec<String>,
}

impl DiscoveryReport {
    pub(crate) fn record(&mut self, module_name: String, outcome: ModuleOutcome) {
        match outcome {
            ModuleOutcome::Populated(catalog) if catalog.has_composition_types() => {
                self.with_types.push((module_name, catalog))
            }
            ModuleOutcome::Populated(catalog) => self.without_types.push((module_name, catalog)),
            ModuleOutcome::NotFound => self.not_found.push(module_name),
            ModuleOutcome::Failed(failure) => self.failed.push((module_name, failure)),
        }
    }

    /// Populated catalogs with the names they were requested under
    pub fn populated(&self) -> impl Iterator<Item = (&str, &Arc<ModuleCatalog>)> {
        self.with_types
            .iter()
            .chain(self.without_types.iter())
            .map(|(name, catalog)| (name.as_str(), catalog))
    }

    /// Looks a catalog up by the name it was requested under
    pub fn catalog(&self, module_name: &str) -> Option<&Arc<ModuleCatalog>> {
        self.populated()
            .find(|(name, _)| *name == module_name)
            .map(|(_, catalog)| catalog)
    }

    pub fn len(&self) -> usize {
        self.with_types.len() + self.without_types.len() + self.failed.len() + self.not_found.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
