//! Catalog builder settings

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::io::ConfigFileV1;
use super::validation::Validatable;

/// Settings shared by the catalog builder and the discovery layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Per-reference resolution timeout in milliseconds (0 = wait forever)
    pub reference_timeout_ms: u64,

    /// Upper bound on reference resolutions in flight for one module
    pub max_concurrent_references: usize,

    /// Base-type chains longer than this are treated as dead ends
    pub max_hierarchy_depth: usize,

    /// Abort the whole scan on an unsupported annotation target instead of skipping it
    pub strict_targets: bool,
}

impl CatalogConfig {
    pub const MAX_TIMEOUT_MS: u64 = 3_600_000;
    pub const MAX_CONCURRENT_REFERENCES: usize = 1024;
    pub const MAX_HIERARCHY_DEPTH: usize = 4096;

    pub fn reference_timeout_ms(mut self, millis: u64) -> Self {
        self.reference_timeout_ms = millis;
        self
    }

    pub fn max_concurrent_references(mut self, limit: usize) -> Self {
        self.max_concurrent_references = limit;
        self
    }

    pub fn max_hierarchy_depth(mut self, depth: usize) -> Self {
        self.max_hierarchy_depth = depth;
        self
    }

    pub fn strict_targets(mut self, strict: bool) -> Self {
        self.strict_targets = strict;
        self
    }

    /// `None` when the timeout is disabled
    pub fn reference_timeout(&self) -> Option<Duration> {
        match self.reference_timeout_ms {
            0 => None,
            millis => Some(Duration::from_millis(millis)),
        }
    }

    /// Load and validate a YAML configuration file
    pub fn from_yaml(path: &str) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;
        let config = file.into_config()?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(ConfigFileV1::VERSION),
            catalog: Some(self.clone()),
        };
        Ok(serde_yaml::to_string(&file)?)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            reference_timeout_ms: 30_000,
            max_concurrent_references: 16,
            max_hierarchy_depth: 256,
            strict_targets: false,
        }
    }
}

impl Validatable for CatalogConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.reference_timeout_ms > Self::MAX_TIMEOUT_MS {
            return Err(ConfigError::range(
                "reference_timeout_ms",
                self.reference_timeout_ms,
                0,
                Self::MAX_TIMEOUT_MS,
                "Use 0 to disable the timeout.",
            ));
        }
        if self.max_concurrent_references == 0
            || self.max_concurrent_references > Self::MAX_CONCURRENT_REFERENCES
        {
            return Err(ConfigError::range(
                "max_concurrent_references",
                self.max_concurrent_references,
                1,
                Self::MAX_CONCURRENT_REFERENCES,
                "At least one resolution must be allowed in flight.",
            ));
        }
        if self.max_hierarchy_depth == 0 || self.max_hierarchy_depth > Self::MAX_HIERARCHY_DEPTH {
            return Err(ConfigError::range(
                "max_hierarchy_depth",
                self.max_hierarchy_depth,
                1,
                Self::MAX_HIERARCHY_DEPTH,
                "Base-type chains deeper than a few dozen levels are unusual.",
            ));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "CatalogConfig"
    }
}
