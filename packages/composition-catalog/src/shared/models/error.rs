//! Error types for composition-catalog
//!
//! One error struct for the whole crate, categorized by [`ErrorKind`].
//! The kind decides the propagation policy: unsupported input is isolated to
//! its annotation entry, malformed metadata fails the module, and resolution
//! failures are isolated to their reference.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error kind categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Annotation attached to a target kind the classifier does not handle
    UnsupportedInput,
    /// Metadata that violates a structural expectation (missing accessors, dangling handles)
    MalformedMetadata,
    /// The decoder could not enumerate or read its tables
    Decoder,
    /// A referenced module could not be loaded (genuine I/O failure)
    Resolution,
    /// A reference resolution exceeded the configured timeout
    Timeout,
    /// `populate()` was invoked on a builder that already ran
    AlreadyPopulated,
    /// Configuration errors
    Config,
    /// I/O errors
    IO,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::UnsupportedInput => "unsupported_input",
            ErrorKind::MalformedMetadata => "malformed_metadata",
            ErrorKind::Decoder => "decoder",
            ErrorKind::Resolution => "resolution",
            ErrorKind::Timeout => "timeout",
            ErrorKind::AlreadyPopulated => "already_populated",
            ErrorKind::Config => "config",
            ErrorKind::IO => "io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Catalog error type
#[derive(Debug, Error)]
#[error("[{kind}] {message}{}", module_suffix(.module))]
pub struct CatalogError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub message: String,
    pub module: Option<String>,
}

fn module_suffix(module: &Option<String>) -> String {
    match module {
        Some(name) => format!(" (module {})", name),
        None => String::new(),
    }
}

impl CatalogError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            module: None,
            source: None,
        }
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn unsupported_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedInput, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedMetadata, message)
    }

    pub fn decoder(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decoder, message)
    }

    pub fn resolution(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Resolution, message)
    }

    pub fn timeout(module_name: impl Into<String>, millis: u64) -> Self {
        let module_name = module_name.into();
        Self::new(
            ErrorKind::Timeout,
            format!("Resolution of {} exceeded {}ms", module_name, millis),
        )
    }

    pub fn already_populated(module_name: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::AlreadyPopulated,
            format!("Catalog already populated or failed: {}", module_name.into()),
        )
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::new(ErrorKind::IO, format!("I/O error: {}", err)).with_source(err)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::decoder(format!("JSON error: {}", err)).with_source(err)
    }
}

impl From<crate::config::ConfigError> for CatalogError {
    fn from(err: crate::config::ConfigError) -> Self {
        CatalogError::config(err.to_string()).with_source(err)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CatalogError>;
