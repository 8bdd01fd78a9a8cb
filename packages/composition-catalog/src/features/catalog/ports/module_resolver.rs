//! Reference resolution port
//!
//! The builder asks for the catalog of every module it references. The
//! answer carries the whole catalog, but the builder only reads its marker
//! registry.

use async_trait::async_trait;
use std::sync::Arc;

use crate::features::catalog::domain::ModuleCatalog;
use crate::shared::models::Result;

#[async_trait]
pub trait ModuleResolver: Send + Sync {
    /// `Ok(None)` when the module is not found or not composition-relevant;
    /// `Err` only for genuine I/O failures.
    async fn resolve(&self, module_name: &str) -> Result<Option<Arc<ModuleCatalog>>>;
}

/// Resolver for modules scanned in isolation
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReferences;

#[async_trait]
impl ModuleResolver for NoReferences {
    async fn resolve(&self, _module_name: &str) -> Result<Option<Arc<ModuleCatalog>>> {
        Ok(None)
    }
}
