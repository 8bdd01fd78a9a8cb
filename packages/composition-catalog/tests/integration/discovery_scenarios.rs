//! Multi-module discovery scenarios

#[path = "../common/mod.rs"]
mod common;
use common::*;

use composition_catalog::{
    CatalogConfig, Discovery, ErrorKind, ImageDirectorySource, InMemoryModuleSource, MarkerKind,
    MemberKind, ModuleImageBuilder, ModuleOutcome, ModuleResolver,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn discovery(source: InMemoryModuleSource) -> Discovery {
    init_tracing();
    Discovery::new(Arc::new(source), CatalogConfig::default())
}

/// Unbounded reference waits, so only cycle breaking can end a mutual wait
fn unbounded_discovery(source: YieldingSource) -> Discovery {
    init_tracing();
    Discovery::new(Arc::new(source), CatalogConfig::default().reference_timeout_ms(0))
}

#[tokio::test]
async fn test_marker_propagates_through_chain() {
    // Base: PartExport : Export
    // Mid:  ServiceExport : Base.PartExport
    // App:  [ServiceExport] class Worker
    let base = export_marker_module("Base", "Base.PartExport");

    let mut mid = ModuleImageBuilder::new("Mid");
    mid.reference("Base");
    let part_export = mid.type_ref("Base.PartExport");
    mid.type_def("Mid.ServiceExport", Some(part_export.into()));

    let mut app = ModuleImageBuilder::new("App");
    app.reference("Mid");
    let service_export = app.type_ref("Mid.ServiceExport");
    let worker = app.type_def("App.Worker", None);
    app.annotate_type(service_export.into(), worker);

    let discovery = discovery(
        InMemoryModuleSource::new()
            .with_image(base)
            .with_image(mid.build())
            .with_image(app.build()),
    );

    let outcome = discovery.module("App").await;
    let catalog = outcome.catalog().unwrap();
    assert!(catalog.type_record(worker).unwrap().is_exported());
    for marker in ["Base.PartExport", "Mid.ServiceExport"] {
        assert!(catalog.marker_registry().contains(marker, MarkerKind::Export));
    }
    // Base and Mid were populated on the way
    assert_eq!(discovery.started(), 3);
}

#[tokio::test]
async fn test_report_groups_outcomes() {
    let mut parts = ModuleImageBuilder::new("Parts");
    let import = parts.type_ref(IMPORT);
    let consumer = parts.type_def("Parts.Consumer", None);
    let dep = parts.property(consumer, "Dep", true, false);
    parts.annotate_property(import.into(), dep);

    let mut broken = ModuleImageBuilder::new("Broken");
    let export = broken.type_ref(EXPORT);
    let dangling = broken.orphan_field("Lost");
    broken.annotate_field(export.into(), dangling);

    let discovery = discovery(
        InMemoryModuleSource::new()
            .with_image(parts.build())
            .with_image(ModuleImageBuilder::new("Plain").build())
            .with_image(broken.build()),
    );

    let report = discovery
        .discover(["Parts", "Plain", "Broken", "Missing"])
        .await;

    let with_types: Vec<&str> = report.with_types.iter().map(|(_, c)| c.full_name()).collect();
    let without_types: Vec<&str> =
        report.without_types.iter().map(|(_, c)| c.full_name()).collect();
    assert_eq!(with_types, vec!["Parts"]);
    assert_eq!(without_types, vec!["Plain"]);
    assert_eq!(report.not_found, vec!["Missing".to_string()]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].1.kind, ErrorKind::MalformedMetadata);

    let parts = report.catalog("Parts").unwrap();
    let record = parts.type_record(consumer).unwrap();
    assert_eq!(record.imported_members()[0].kind(), MemberKind::Property);
}

#[tokio::test]
async fn test_concurrent_dependents_share_population() {
    let mut source =
        InMemoryModuleSource::new().with_image(import_marker_module("Core", "Core.Need"));
    let mut names = Vec::new();
    for i in 0..8 {
        let name = format!("Plugin{}", i);
        let mut plugin = ModuleImageBuilder::new(name.as_str());
        plugin.reference("Core");
        let need = plugin.type_ref("Core.Need");
        let host = plugin.type_def("Plugin.Host", None);
        let field = plugin.field(host, "Service");
        plugin.annotate_field(need.into(), field);
        source = source.with_image(plugin.build());
        names.push(name);
    }

    let discovery = discovery(source);
    let report = discovery.discover(names).await;
    assert_eq!(report.with_types.len(), 8);
    assert_eq!(discovery.started(), 9);

    let core = discovery.finished("Core").unwrap();
    let core = core.catalog().unwrap();
    for (_, plugin) in &report.with_types {
        assert!(plugin.known_import_markers().contains("Core.Need"));
    }
    assert!(core.known_import_markers().contains("Core.Need"));
}

#[tokio::test]
async fn test_three_module_cycle_completes() {
    let mut source = InMemoryModuleSource::new();
    for (name, next) in [("A", "B"), ("B", "C"), ("C", "A")] {
        let mut image = ModuleImageBuilder::new(name);
        image.reference(next);
        let export = image.type_ref(EXPORT);
        image.type_def(&format!("{}.Marker", name), Some(export.into()));
        source = source.with_image(image.build());
    }

    let discovery = discovery(source);
    let outcome = discovery.module("A").await;
    let a = outcome.catalog().unwrap();
    for marker in ["A.Marker", "B.Marker", "C.Marker"] {
        assert!(a.known_export_markers().contains(marker));
    }
}

#[tokio::test]
async fn test_sibling_cycle_completes() {
    // A -> {B, C}, B <-> C
    let discovery = unbounded_discovery(
        YieldingSource::default()
            .with_image(linked_module("A", &["B", "C"]))
            .with_image(linked_module("B", &["C"]))
            .with_image(linked_module("C", &["B"])),
    );

    let outcome = tokio::time::timeout(Duration::from_secs(5), discovery.module("A"))
        .await
        .expect("sibling cycle must not hang");
    let a = outcome.catalog().unwrap();
    for marker in ["A.Marker", "B.Marker", "C.Marker"] {
        assert!(a.known_export_markers().contains(marker));
    }

    // Exactly one side of B <-> C saw the other as absent
    let b = discovery.finished("B").unwrap();
    let c = discovery.finished("C").unwrap();
    let b_knows_c = b.catalog().unwrap().known_export_markers().contains("C.Marker");
    let c_knows_b = c.catalog().unwrap().known_export_markers().contains("B.Marker");
    assert_ne!(b_knows_c, c_knows_b);
    assert_eq!(discovery.pending_waits(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_mutually_referencing_roots_complete() {
    let discovery = unbounded_discovery(
        YieldingSource::default()
            .with_image(linked_module("A", &["B"]))
            .with_image(linked_module("B", &["A"])),
    );

    let report = tokio::time::timeout(Duration::from_secs(5), discovery.discover(["A", "B"]))
        .await
        .expect("mutually referencing roots must not hang");
    assert_eq!(report.len(), 2);
    assert_eq!(report.populated().count(), 2);
    assert!(report.failed.is_empty());
    assert_eq!(discovery.pending_waits(), 0);
}

#[tokio::test]
async fn test_report_keyed_by_requested_name() {
    init_tracing();
    let source = InMemoryModuleSource::new();
    source.insert_as("Alias", export_marker_module("Real", "Real.PartExport"));
    let discovery = Discovery::new(Arc::new(source), CatalogConfig::default());

    let report = discovery.discover(["Alias"]).await;
    let catalog = report.catalog("Alias").unwrap();
    assert_eq!(catalog.full_name(), "Real");
    assert!(report.catalog("Real").is_none());
    let names: Vec<&str> = report.populated().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["Alias"]);
}

#[tokio::test]
async fn test_discovery_serves_as_resolver() {
    let discovery = discovery(
        InMemoryModuleSource::new().with_image(export_marker_module("Custom", "Custom.MyExport")),
    );

    let resolved = discovery.resolve("Custom").await.unwrap().unwrap();
    assert!(resolved.known_export_markers().contains("Custom.MyExport"));
    assert!(discovery.resolve("Nowhere").await.unwrap().is_none());

    // Reused by a builder outside the discovery
    let mut image = ModuleImageBuilder::new("App");
    image.reference("Custom");
    let my_export = image.type_ref("Custom.MyExport");
    let baz = image.type_def("App.Baz", None);
    let run = image.method(baz, "Do");
    image.annotate_method(my_export.into(), run);

    let catalog = populate_with(image.build(), Arc::new(discovery), CatalogConfig::default())
        .await
        .unwrap();
    assert_eq!(catalog.type_record(baz).unwrap().exported_members().len(), 1);
}

#[tokio::test]
async fn test_directory_source() {
    let dir = TempDir::new().unwrap();
    let core = export_marker_module("Core", "Core.PartExport");
    std::fs::write(dir.path().join("Core.json"), core.to_json().unwrap()).unwrap();

    let mut app = ModuleImageBuilder::new("App");
    app.reference("Core");
    let part_export = app.type_ref("Core.PartExport");
    let worker = app.type_def("App.Worker", None);
    app.annotate_type(part_export.into(), worker);
    std::fs::write(dir.path().join("App.json"), app.build().to_json().unwrap()).unwrap();
    std::fs::write(dir.path().join("Bad.json"), "{ truncated").unwrap();

    init_tracing();
    let discovery = Discovery::new(
        Arc::new(ImageDirectorySource::new(dir.path())),
        CatalogConfig::default(),
    );
    let report = discovery.discover(["App", "Bad"]).await;

    let app = report.catalog("App").unwrap();
    assert!(app.type_record(worker).unwrap().is_exported());
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "Bad");
    assert!(matches!(
        discovery.finished("Bad"),
        Some(ModuleOutcome::Failed(_))
    ));
}
