use std::fmt;
use std::sync::Arc;

use crate::features::catalog::ModuleCatalog;
use crate::shared::models::{CatalogError, ErrorKind};

/// Why a module could not be populated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&CatalogError> for ModuleFailure {
    fn from(err: &CatalogError) -> Self {
        Self {
            kind: err.kind,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ModuleFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[derive(Debug, Clone)]
pub enum ModuleOutcome {
    Populated(Arc<ModuleCatalog>),
    NotFound,
    Failed(ModuleFailure),
}

impl ModuleOutcome {
    pub fn catalog(&self) -> Option<&Arc<ModuleCatalog>> {
        match self {
            ModuleOutcome::Populated(catalog) => Some(catalog),
            _ => None,
        }
    }

    pub fn is_populated(&self) -> bool {
        matches!(self, ModuleOutcome::Populated(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleOutcome::Populated(_) => "populated",
            ModuleOutcome::NotFound => "not_found",
            ModuleOutcome::Failed(_) => "failed",
        }
    }
}
