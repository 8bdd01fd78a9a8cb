/// Population lifecycle of one catalog builder
///
/// `Unpopulated → ResolvingReferences → WalkingTypes → ScanningAnnotations → Populated`,
/// with `Failed` reachable from any in-flight phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopulationState {
    Unpopulated,
    ResolvingReferences,
    WalkingTypes,
    ScanningAnnotations,
    Populated,
    Failed,
}

impl PopulationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PopulationState::Unpopulated => "unpopulated",
            PopulationState::ResolvingReferences => "resolving_references",
            PopulationState::WalkingTypes => "walking_types",
            PopulationState::ScanningAnnotations => "scanning_annotations",
            PopulationState::Populated => "populated",
            PopulationState::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PopulationState::Populated | PopulationState::Failed)
    }
}
