//! In-memory module source
//!
//! Backs discovery with prebuilt [`ModuleImage`]s keyed by module name.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use crate::features::discovery::ports::ModuleSource;
use crate::features::metadata::{MetadataReader, ModuleImage};
use crate::shared::models::Result;

#[derive(Debug, Default)]
pub struct InMemoryModuleSource {
    images: DashMap<String, Arc<ModuleImage>>,
}

impl InMemoryModuleSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(self, image: ModuleImage) -> Self {
        self.insert(image);
        self
    }

    /// Registers `image` under its own name
    pub fn insert(&self, image: ModuleImage) {
        self.images.insert(image.name.clone(), Arc::new(image));
    }

    /// Registers `image` under `module_name`, whatever the image calls itself
    pub fn insert_as(&self, module_name: impl Into<String>, image: ModuleImage) {
        self.images.insert(module_name.into(), Arc::new(image));
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[async_trait]
impl ModuleSource for InMemoryModuleSource {
    async fn load(&self, module_name: &str) -> Result<Option<Arc<dyn MetadataReader>>> {
        Ok(self
            .images
            .get(module_name)
            .map(|image| Arc::clone(image.value()) as Arc<dyn MetadataReader>))
    }
}
