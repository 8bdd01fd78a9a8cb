//! Module loading port

use async_trait::async_trait;
use std::sync::Arc;

use crate::features::metadata::MetadataReader;
use crate::shared::models::Result;

#[async_trait]
pub trait ModuleSource: Send + Sync {
    /// `Ok(None)` when no module of that name is available
    async fn load(&self, module_name: &str) -> Result<Option<Arc<dyn MetadataReader>>>;
}
