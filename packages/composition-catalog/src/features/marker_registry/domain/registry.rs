use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Plain export and the variant that propagates to subclasses
pub const ROOT_EXPORT_MARKERS: [&str; 2] = [
    "System.ComponentModel.Composition.ExportAttribute",
    "System.ComponentModel.Composition.InheritedExportAttribute",
];

/// Single import and collection import
pub const ROOT_IMPORT_MARKERS: [&str; 2] = [
    "System.ComponentModel.Composition.ImportAttribute",
    "System.ComponentModel.Composition.ImportManyAttribute",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Export,
    Import,
}

impl MarkerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerKind::Export => "export",
            MarkerKind::Import => "import",
        }
    }
}

/// Export-like and import-like annotation full names
///
/// Growth is monotonic: names are only ever added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerRegistry {
    export_like: BTreeSet<String>,
    import_like: BTreeSet<String>,
}

impl MarkerRegistry {
    /// Registry holding only the four root markers
    pub fn seed() -> Self {
        Self {
            export_like: ROOT_EXPORT_MARKERS.iter().map(|s| s.to_string()).collect(),
            import_like: ROOT_IMPORT_MARKERS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Union both sets of `other` into this registry. `None` is a no-op so
    /// unresolved references can be passed straight through.
    pub fn merge_from(&mut self, other: Option<&MarkerRegistry>) {
        let Some(other) = other else {
            return;
        };
        self.export_like.extend(other.export_like.iter().cloned());
        self.import_like.extend(other.import_like.iter().cloned());
    }

    pub fn contains(&self, name: &str, kind: MarkerKind) -> bool {
        self.set(kind).contains(name)
    }

    /// Classify a name, export-like checked first
    pub fn kind_of(&self, name: &str) -> Option<MarkerKind> {
        if self.export_like.contains(name) {
            Some(MarkerKind::Export)
        } else if self.import_like.contains(name) {
            Some(MarkerKind::Import)
        } else {
            None
        }
    }

    /// Returns `true` if the name was not known yet
    pub fn insert(&mut self, name: impl Into<String>, kind: MarkerKind) -> bool {
        match kind {
            MarkerKind::Export => self.export_like.insert(name.into()),
            MarkerKind::Import => self.import_like.insert(name.into()),
        }
    }

    pub fn export_like(&self) -> &BTreeSet<String> {
        &self.export_like
    }

    pub fn import_like(&self) -> &BTreeSet<String> {
        &self.import_like
    }

    pub fn len(&self, kind: MarkerKind) -> usize {
        self.set(kind).len()
    }

    fn set(&self, kind: MarkerKind) -> &BTreeSet<String> {
        match kind {
            MarkerKind::Export => &self.export_like,
            MarkerKind::Import => &self.import_like,
        }
    }
}
