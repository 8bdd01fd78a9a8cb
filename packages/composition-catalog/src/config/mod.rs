//! Catalog configuration
//!
//! Defaults cover the common case; a versioned YAML file can override any field.
//!
//! ```rust,ignore
//! use composition_catalog::config::CatalogConfig;
//!
//! let config = CatalogConfig::default();
//! let config = CatalogConfig::from_yaml("catalog.yaml")?;
//! ```

pub mod catalog_config;
pub mod error;
pub mod io;
pub mod validation;

pub use catalog_config::CatalogConfig;
pub use error::{ConfigError, ConfigResult};
pub use io::ConfigFileV1;
pub use validation::Validatable;
