//! Map-backed resolver over catalogs that are already populated

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::features::catalog::domain::ModuleCatalog;
use crate::features::catalog::ports::ModuleResolver;
use crate::shared::models::Result;

#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    catalogs: FxHashMap<String, Arc<ModuleCatalog>>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(mut self, catalog: Arc<ModuleCatalog>) -> Self {
        self.insert(catalog);
        self
    }

    /// Registers `catalog` under its own full name, replacing any previous entry
    pub fn insert(&mut self, catalog: Arc<ModuleCatalog>) {
        self.catalogs.insert(catalog.full_name().to_string(), catalog);
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}

#[async_trait]
impl ModuleResolver for StaticResolver {
    async fn resolve(&self, module_name: &str) -> Result<Option<Arc<ModuleCatalog>>> {
        Ok(self.catalogs.get(module_name).cloned())
    }
}
