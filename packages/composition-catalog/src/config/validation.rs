//! Configuration validation

use super::error::ConfigResult;

/// Trait for validatable configuration objects
pub trait Validatable {
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;

    /// Get the configuration name for error messages
    fn config_name(&self) -> &'static str {
        "Config"
    }
}

impl<T: Validatable> Validatable for Option<T> {
    fn validate(&self) -> ConfigResult<()> {
        match self {
            Some(config) => config.validate(),
            None => Ok(()),
        }
    }
}
