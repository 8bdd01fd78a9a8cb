//! Module images stored as `<root>/<module name>.json`

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::features::discovery::ports::ModuleSource;
use crate::features::metadata::{MetadataReader, ModuleImage};
use crate::shared::models::{CatalogError, Result};

#[derive(Debug, Clone)]
pub struct ImageDirectorySource {
    root: PathBuf,
}

impl ImageDirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `None` for names that are not a single plain path component
    fn image_path(&self, module_name: &str) -> Option<PathBuf> {
        let plain = !module_name.is_empty()
            && module_name != "."
            && module_name != ".."
            && !module_name.contains(&['/', '\\', '\0'][..]);
        plain.then(|| self.root.join(format!("{}.json", module_name)))
    }
}

#[async_trait]
impl ModuleSource for ImageDirectorySource {
    async fn load(&self, module_name: &str) -> Result<Option<Arc<dyn MetadataReader>>> {
        let Some(path) = self.image_path(module_name) else {
            warn!(module = %module_name, "module name is not a plain file name, skipping");
            return Ok(None);
        };

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(module = %module_name, path = %path.display(), "no image on disk");
                return Ok(None);
            }
            Err(err) => {
                return Err(CatalogError::resolution(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    err
                ))
                .with_module(module_name)
                .with_source(err))
            }
        };
        let image = ModuleImage::from_json(&content).map_err(|err| err.with_module(module_name))?;
        Ok(Some(Arc::new(image)))
    }
}
