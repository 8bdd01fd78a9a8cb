/*
 * Composition Catalog - static export/import discovery over module metadata
 *
 * Feature-First Hexagonal Architecture:
 * - shared/   : Handles, tokens, error type
 * - config/   : Builder settings (versioned YAML)
 * - features/ : Vertical slices (metadata → registry → hierarchy → classification → catalog → discovery)
 */

//! Composition Catalog
//!
//! Scans a compiled module's metadata tables for declarative composition
//! markers and builds a catalog of exported and imported types and members.
//! Marker annotations may be subclassed, also across module boundaries, so
//! every module's catalog carries the marker registry its dependents merge.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use composition_catalog::{CatalogBuilder, CatalogConfig, NoReferences};
//! use std::sync::Arc;
//!
//! let mut builder = CatalogBuilder::new(Arc::new(image), Arc::new(NoReferences), CatalogConfig::default());
//! builder.populate().await?;
//!
//! for record in builder.catalog().unwrap().sorted_type_records() {
//!     println!("{} exported={}", record.metadata_token(), record.is_exported());
//! }
//! ```
//!
//! Multi-module scans go through [`Discovery`], which populates each module
//! once and serves it to its dependents:
//!
//! ```rust,ignore
//! let discovery = Discovery::new(Arc::new(InMemoryModuleSource::new().with_image(a).with_image(b)), config);
//! let report = discovery.discover(["A", "B"]).await;
//! ```

/// Shared models (handles, tokens, errors)
pub mod shared;

/// Configuration system
pub mod config;

/// Feature modules
pub mod features;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{CatalogConfig, ConfigError};
pub use features::catalog::{
    build_catalog, CatalogBuilder, CatalogDiagnostic, MemberHandle, MemberKind, MemberRecord,
    ModuleCatalog, ModuleResolver, NoReferences, PopulationState, StaticResolver, TypeRecord,
};
pub use features::classification::{AnnotationClassifier, ExportClassification};
pub use features::discovery::{
    Discovery, DiscoveryReport, ImageDirectorySource, InMemoryModuleSource, ModuleFailure,
    ModuleOutcome, ModuleSource,
};
pub use features::hierarchy::TypeHierarchyWalker;
pub use features::marker_registry::{MarkerKind, MarkerRegistry};
pub use features::metadata::{MetadataReader, ModuleImage, ModuleImageBuilder};
pub use shared::models::{CatalogError, ErrorKind, Result, Token, TypeHandle};
