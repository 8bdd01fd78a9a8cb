use serde::{Deserialize, Serialize};

/// Tri-state export classification of an annotation type
///
/// `InheritedExport` is reserved for markers whose export-ness propagates to
/// subclasses of the annotated type. Registry hits are not differentiated
/// yet, so the classifier only ever yields `None` or `Export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportClassification {
    None,
    Export,
    InheritedExport,
}

impl ExportClassification {
    pub fn is_export(&self) -> bool {
        !matches!(self, ExportClassification::None)
    }

    pub fn is_inherited(&self) -> bool {
        matches!(self, ExportClassification::InheritedExport)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportClassification::None => "none",
            ExportClassification::Export => "export",
            ExportClassification::InheritedExport => "inherited_export",
        }
    }
}
