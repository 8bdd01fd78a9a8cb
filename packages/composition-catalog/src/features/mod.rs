//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains (as needed):
//! - domain/         - Pure data and rules
//! - ports/          - Interface definitions (traits)
//! - application/    - Use cases
//! - infrastructure/ - Implementations
//!
//! Dependency order, leaf first:
//! metadata → marker_registry → hierarchy → classification → catalog → discovery

pub mod catalog;
pub mod classification;
pub mod discovery;
pub mod hierarchy;
pub mod marker_registry;
pub mod metadata;
