//! Configuration I/O (YAML loading)

use serde::{Deserialize, Serialize};

use super::catalog_config::CatalogConfig;
use super::error::{ConfigError, ConfigResult};

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    pub version: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<CatalogConfig>,
}

impl ConfigFileV1 {
    pub const VERSION: u32 = 1;

    pub fn into_config(self) -> ConfigResult<CatalogConfig> {
        match self.version {
            None => Err(ConfigError::MissingVersion),
            Some(Self::VERSION) => Ok(self.catalog.unwrap_or_default()),
            Some(found) => Err(ConfigError::UnsupportedVersion {
                found,
                supported: vec![Self::VERSION],
            }),
        }
    }
}
