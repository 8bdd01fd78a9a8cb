//! Module population
//!
//! One builder populates one module, once:
//!
//! 1. seed the marker registry
//! 2. resolve every distinct referenced module concurrently and merge each
//!    resolved registry
//! 3. walk every type definition's base chain
//! 4. route every annotation entry through the classifier into the entity cache
//!
//! Step 2 is the only suspension point. Everything after it runs against a
//! registry that no longer changes.

use futures::stream::{self, StreamExt};
use rustc_hash::FxHashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::CatalogConfig;
use crate::features::catalog::domain::{
    CatalogDiagnostic, MemberHandle, ModuleCatalog, PopulationState,
};
use crate::features::catalog::infrastructure::EntityCache;
use crate::features::catalog::ports::ModuleResolver;
use crate::features::classification::{AnnotationClassifier, ExportClassification};
use crate::features::hierarchy::TypeHierarchyWalker;
use crate::features::marker_registry::{MarkerKind, MarkerRegistry};
use crate::features::metadata::{AttachmentTarget, CustomAttribute, MetadataReader};
use crate::shared::models::{CatalogError, ErrorKind, Result};

/// What a single annotation entry contributed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Routed {
    Import,
    Export,
    Ignored,
}

#[derive(Debug, Default)]
struct ScanOutcome {
    imports: usize,
    exports: usize,
    diagnostics: Vec<CatalogDiagnostic>,
}

pub struct CatalogBuilder {
    reader: Arc<dyn MetadataReader>,
    resolver: Arc<dyn ModuleResolver>,
    config: CatalogConfig,
    state: PopulationState,
    module_name: Option<String>,
    catalog: Option<ModuleCatalog>,
}

impl CatalogBuilder {
    pub fn new(
        reader: Arc<dyn MetadataReader>,
        resolver: Arc<dyn ModuleResolver>,
        config: CatalogConfig,
    ) -> Self {
        Self {
            reader,
            resolver,
            config,
            state: PopulationState::Unpopulated,
            module_name: None,
            catalog: None,
        }
    }

    pub fn state(&self) -> PopulationState {
        self.state
    }

    /// Module full name, known once population has started
    pub fn module_name(&self) -> Option<&str> {
        self.module_name.as_deref()
    }

    /// The populated catalog, `None` until `populate()` succeeded
    pub fn catalog(&self) -> Option<&ModuleCatalog> {
        self.catalog.as_ref()
    }

    pub fn into_catalog(self) -> Option<ModuleCatalog> {
        self.catalog
    }

    /// Populate the catalog. Callable exactly once per builder.
    pub async fn populate(&mut self) -> Result<()> {
        if self.state != PopulationState::Unpopulated {
            let name = self.module_name.clone().unwrap_or_default();
            return Err(CatalogError::already_populated(name));
        }

        match self.run().await {
            Ok(catalog) => {
                self.state = PopulationState::Populated;
                self.catalog = Some(catalog);
                Ok(())
            }
            Err(err) => {
                self.state = PopulationState::Failed;
                let err = match &self.module_name {
                    Some(name) if err.module.is_none() => err.with_module(name.clone()),
                    _ => err,
                };
                warn!(error = %err, "module population failed");
                Err(err)
            }
        }
    }

    async fn run(&mut self) -> Result<ModuleCatalog> {
        self.state = PopulationState::ResolvingReferences;
        let module_name = self.reader.module_full_name()?;
        self.module_name = Some(module_name.clone());
        info!(module = %module_name, "populating composition catalog");

        let mut registry = MarkerRegistry::seed();
        let references = self.resolve_references(&module_name).await?;
        for reference in &references {
            registry.merge_from(Some(reference.marker_registry()));
        }

        self.state = PopulationState::WalkingTypes;
        let reader = self.reader.as_ref();
        let walk = TypeHierarchyWalker::new(reader, self.config.max_hierarchy_depth)
            .walk_all(&mut registry)?;

        self.state = PopulationState::ScanningAnnotations;
        let mut cache = EntityCache::new();
        let scan = self.scan_annotations(&registry, &mut cache)?;

        info!(
            module = %module_name,
            references = references.len(),
            types_walked = walk.types_walked,
            type_records = cache.type_count(),
            imports = scan.imports,
            exports = scan.exports,
            skipped = scan.diagnostics.len(),
            export_markers = registry.len(MarkerKind::Export),
            import_markers = registry.len(MarkerKind::Import),
            "composition catalog populated"
        );

        Ok(ModuleCatalog::new(
            module_name,
            cache.into_type_records(),
            registry,
            scan.diagnostics,
        ))
    }

    /// Scatter over distinct references, gather whatever resolved
    async fn resolve_references(&self, module_name: &str) -> Result<Vec<Arc<ModuleCatalog>>> {
        let mut seen = FxHashSet::default();
        let names: Vec<String> = self
            .reader
            .referenced_module_names()?
            .into_iter()
            .filter(|name| seen.insert(name.clone()))
            .collect();
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let timeout = self.config.reference_timeout();
        let timeout_ms = self.config.reference_timeout_ms;
        let resolver = Arc::clone(&self.resolver);

        let outcomes: Vec<(String, Result<Option<Arc<ModuleCatalog>>>)> = stream::iter(names)
            .map(move |name| {
                let resolver = Arc::clone(&resolver);
                async move {
                    let outcome = match timeout {
                        Some(limit) => {
                            match tokio::time::timeout(limit, resolver.resolve(&name)).await {
                                Ok(outcome) => outcome,
                                Err(_) => Err(CatalogError::timeout(name.clone(), timeout_ms)),
                            }
                        }
                        None => resolver.resolve(&name).await,
                    };
                    (name, outcome)
                }
            })
            .buffer_unordered(self.config.max_concurrent_references.max(1))
            .collect()
            .await;

        let mut resolved = Vec::with_capacity(outcomes.len());
        for (reference, outcome) in outcomes {
            match outcome {
                Ok(Some(catalog)) => {
                    debug!(
                        module = %module_name,
                        reference = %reference,
                        "merged reference registry"
                    );
                    resolved.push(catalog);
                }
                Ok(None) => {
                    debug!(
                        module = %module_name,
                        reference = %reference,
                        "reference not resolved, skipping"
                    );
                }
                Err(err) if err.kind == ErrorKind::Timeout => {
                    warn!(
                        module = %module_name,
                        reference = %reference,
                        error = %err,
                        "reference timed out, skipping"
                    );
                }
                Err(err) => {
                    warn!(
                        module = %module_name,
                        reference = %reference,
                        error = %err,
                        "reference failed to resolve, skipping"
                    );
                }
            }
        }
        Ok(resolved)
    }

    fn scan_annotations(
        &self,
        registry: &MarkerRegistry,
        cache: &mut EntityCache,
    ) -> Result<ScanOutcome> {
        let reader = self.reader.as_ref();
        let mut classifier = AnnotationClassifier::new();
        let mut outcome = ScanOutcome::default();

        for handle in reader.custom_attributes()? {
            let attribute = reader.custom_attribute(handle)?;
            match self.route(&attribute, registry, &mut classifier, cache) {
                Ok(Routed::Import) => outcome.imports += 1,
                Ok(Routed::Export) => outcome.exports += 1,
                Ok(Routed::Ignored) => {}
                Err(err)
                    if err.kind == ErrorKind::UnsupportedInput && !self.config.strict_targets =>
                {
                    warn!(
                        attribute = %attribute.handle,
                        target = %attribute.parent,
                        "{}, skipping entry",
                        err.message
                    );
                    outcome.diagnostics.push(CatalogDiagnostic {
                        attribute: attribute.handle,
                        kind: err.kind,
                        message: err.message,
                    });
                }
                Err(err) => return Err(err),
            }
        }

        let stats = classifier.stats();
        debug!(
            annotation_types = stats.import_cache_entries,
            name_resolutions = stats.name_resolutions,
            "annotation scan finished"
        );
        Ok(outcome)
    }

    /// Import check first; the export check only runs for non-imports.
    fn route(
        &self,
        attribute: &CustomAttribute,
        registry: &MarkerRegistry,
        classifier: &mut AnnotationClassifier,
        cache: &mut EntityCache,
    ) -> Result<Routed> {
        let reader = self.reader.as_ref();

        if classifier.is_import_marker(attribute.attribute_type, reader, registry)? {
            let member = match attribute.parent {
                AttachmentTarget::Property(property) => MemberHandle::Property(property),
                AttachmentTarget::Field(field) => MemberHandle::Field(field),
                // Constructor injection, nothing to record
                AttachmentTarget::Parameter(_) => return Ok(Routed::Ignored),
                target => {
                    return Err(CatalogError::unsupported_input(format!(
                        "Import marker on unsupported target {}",
                        target
                    )))
                }
            };
            cache.add_imported_member(member, reader)?;
            return Ok(Routed::Import);
        }

        let classification =
            classifier.classify_export(attribute.attribute_type, reader, registry)?;
        if classification == ExportClassification::None {
            return Ok(Routed::Ignored);
        }

        let member = match attribute.parent {
            AttachmentTarget::TypeDefinition(handle) => {
                if classification.is_inherited() {
                    debug!(target = %attribute.parent, "inherited export on type, ignored");
                    return Ok(Routed::Ignored);
                }
                cache.mark_type_exported(handle, reader)?;
                return Ok(Routed::Export);
            }
            AttachmentTarget::Property(property) => MemberHandle::Property(property),
            AttachmentTarget::Field(field) => MemberHandle::Field(field),
            AttachmentTarget::Method(method) => MemberHandle::Method(method),
            target => {
                return Err(CatalogError::unsupported_input(format!(
                    "Export marker on unsupported target {}",
                    target
                )))
            }
        };
        cache.add_exported_member(member, reader)?;
        Ok(Routed::Export)
    }
}

/// Populate one module and hand back its catalog
pub async fn build_catalog(
    reader: Arc<dyn MetadataReader>,
    resolver: Arc<dyn ModuleResolver>,
    config: CatalogConfig,
) -> Result<ModuleCatalog> {
    let mut builder = CatalogBuilder::new(reader, resolver, config);
    builder.populate().await?;
    builder
        .into_catalog()
        .ok_or_else(|| CatalogError::new(ErrorKind::Decoder, "Population produced no catalog"))
}
