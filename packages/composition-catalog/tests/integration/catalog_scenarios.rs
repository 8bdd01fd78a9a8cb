//! Single-module population scenarios
//!
//! Each test builds a module image table by table and checks the catalog a
//! full population produces.

#[path = "../common/mod.rs"]
mod common;
use common::*;

use composition_catalog::{
    CatalogBuilder, CatalogConfig, ErrorKind, MarkerKind, MarkerRegistry, MemberHandle,
    MemberKind, ModuleImage, ModuleImageBuilder, NoReferences, PopulationState, StaticResolver,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

// ═══════════════════════════════════════════════════════════════════════════
// Direct markers
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_exported_field_creates_owner_record() {
    // class Foo { [Export] int Bar; }
    let mut image = ModuleImageBuilder::new("Contoso.Parts");
    let export = image.type_ref(EXPORT);
    let foo = image.type_def("Contoso.Foo", None);
    let bar = image.field(foo, "Bar");
    image.annotate_field(export.into(), bar);

    let catalog = populate(image.build()).await.unwrap();
    assert_eq!(catalog.full_name(), "Contoso.Parts");
    assert_eq!(catalog.type_count(), 1);

    let record = catalog.type_record(foo).unwrap();
    assert!(!record.is_exported());
    assert_eq!(record.metadata_token(), foo.token());
    assert_eq!(record.exported_members().len(), 1);
    let member = record.exported_members()[0];
    assert_eq!(member.kind(), MemberKind::Field);
    assert_eq!(member.handle, MemberHandle::Field(bar));
    assert_eq!(member.declaring_type, foo);
    assert!(record.imported_members().is_empty());
}

#[tokio::test]
async fn test_exported_type_without_members() {
    // [Export] class Foo {}
    let mut image = ModuleImageBuilder::new("Contoso.Parts");
    let export = image.type_ref(EXPORT);
    let foo = image.type_def("Contoso.Foo", None);
    image.annotate_type(export.into(), foo);

    let catalog = populate(image.build()).await.unwrap();
    let record = catalog.type_record(foo).unwrap();
    assert!(record.is_exported());
    assert!(record.exported_members().is_empty());
    assert!(record.imported_members().is_empty());
}

#[tokio::test]
async fn test_import_on_constructor_parameter_ignored() {
    // class Foo { Foo([Import] IBar bar) {} }
    let mut image = ModuleImageBuilder::new("Contoso.Parts");
    let import = image.type_ref(IMPORT);
    let foo = image.type_def("Contoso.Foo", None);
    let ctor = image.method(foo, ".ctor");
    let bar = image.parameter(ctor, "bar");
    image.annotate_parameter(import.into(), bar);

    let catalog = populate(image.build()).await.unwrap();
    assert_eq!(catalog.type_count(), 0);
    assert!(catalog.diagnostics().is_empty());
}

#[tokio::test]
async fn test_imports_and_exports_on_one_type() {
    let mut image = ModuleImageBuilder::new("Contoso.Parts");
    let export = image.type_ref(EXPORT);
    let import = image.type_ref(IMPORT);
    let import_many = image.type_ref(IMPORT_MANY);
    let host = image.type_def("Contoso.Host", None);
    let logger = image.property(host, "Logger", true, true);
    let plugins = image.field(host, "Plugins");
    let start = image.method(host, "Start");
    image.annotate_type(export.into(), host);
    image.annotate_property(import.into(), logger);
    image.annotate_field(import_many.into(), plugins);
    image.annotate_method(export.into(), start);

    let catalog = populate(image.build()).await.unwrap();
    assert_eq!(catalog.type_count(), 1);

    let record = catalog.type_record(host).unwrap();
    assert!(record.is_exported());
    let imported: Vec<MemberHandle> = record.imported_members().iter().map(|m| m.handle).collect();
    assert_eq!(
        imported,
        vec![MemberHandle::Property(logger), MemberHandle::Field(plugins)]
    );
    let exported: Vec<MemberHandle> = record.exported_members().iter().map(|m| m.handle).collect();
    assert_eq!(exported, vec![MemberHandle::Method(start)]);
}

#[tokio::test]
async fn test_setter_only_import_property() {
    let mut image = ModuleImageBuilder::new("Contoso.Parts");
    let import = image.type_ref(IMPORT);
    image.type_def("Contoso.Other", None);
    let foo = image.type_def("Contoso.Foo", None);
    let sink = image.property(foo, "Sink", false, true);
    image.annotate_property(import.into(), sink);

    let catalog = populate(image.build()).await.unwrap();
    let record = catalog.type_record(foo).unwrap();
    assert_eq!(record.imported_members().len(), 1);
    assert_eq!(record.imported_members()[0].declaring_type, foo);
}

#[tokio::test]
async fn test_repeated_annotations_share_member_record() {
    let mut image = ModuleImageBuilder::new("Contoso.Parts");
    let export = image.type_ref(EXPORT);
    let foo = image.type_def("Contoso.Foo", None);
    let bar = image.field(foo, "Bar");
    image.annotate_field(export.into(), bar);
    image.annotate_field(export.into(), bar);

    let catalog = populate(image.build()).await.unwrap();
    let members = catalog.type_record(foo).unwrap().exported_members();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0], members[1]);
}

#[tokio::test]
async fn test_unrelated_annotations_create_nothing() {
    let mut image = ModuleImageBuilder::new("Contoso.Parts");
    let obsolete = image.type_ref("System.ObsoleteAttribute");
    let foo = image.type_def("Contoso.Foo", None);
    let run = image.method(foo, "Run");
    image.annotate_type(obsolete.into(), foo);
    image.annotate_method(obsolete.into(), run);

    let catalog = populate(image.build()).await.unwrap();
    assert!(catalog.is_composition_module());
    assert!(!catalog.has_composition_types());
    assert!(catalog.diagnostics().is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// Inherited markers
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_local_marker_subclass_applies() {
    let mut image = ModuleImageBuilder::new("Contoso.Parts");
    let export = image.type_ref(EXPORT);
    let marker = image.type_def("Contoso.PartExport", Some(export.into()));
    let foo = image.type_def("Contoso.Foo", None);
    image.annotate_type(marker.into(), foo);

    let catalog = populate(image.build()).await.unwrap();
    assert!(catalog.type_record(foo).unwrap().is_exported());
    assert!(catalog
        .marker_registry()
        .contains("Contoso.PartExport", MarkerKind::Export));
}

#[tokio::test]
async fn test_two_level_chain_declared_derived_first() {
    let mut image = ModuleImageBuilder::new("Contoso.Parts");
    let import = image.type_ref(IMPORT);
    // Derived row comes before its base row
    let derived = image.type_def("Contoso.LazyImport", None);
    let base = image.type_def("Contoso.PartImport", Some(import.into()));
    image.set_base(derived, Some(base.into()));
    let foo = image.type_def("Contoso.Foo", None);
    let dep = image.field(foo, "Dep");
    image.annotate_field(derived.into(), dep);

    let catalog = populate(image.build()).await.unwrap();
    assert!(catalog.known_import_markers().contains("Contoso.LazyImport"));
    assert!(catalog.known_import_markers().contains("Contoso.PartImport"));
    assert_eq!(catalog.type_record(foo).unwrap().imported_members().len(), 1);
}

#[tokio::test]
async fn test_cyclic_base_chain_terminates() {
    let mut image = ModuleImageBuilder::new("Contoso.Broken");
    let a = image.type_def("A", None);
    let b = image.type_def("B", Some(a.into()));
    image.set_base(a, Some(b.into()));

    let catalog = populate(image.build()).await.unwrap();
    assert_eq!(catalog.marker_registry(), &MarkerRegistry::seed());
}

// ═══════════════════════════════════════════════════════════════════════════
// Cross-module markers
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_referenced_marker_subclass() {
    // R: class MyExport : ExportAttribute
    // M: class Baz { [MyExport] void Do() {} }
    let reference = populate(export_marker_module("Custom", "Custom.MyExport"))
        .await
        .unwrap();

    let mut image = ModuleImageBuilder::new("Contoso.App");
    image.reference("Custom");
    let my_export = image.type_ref("Custom.MyExport");
    let baz = image.type_def("Contoso.Baz", None);
    let run = image.method(baz, "Do");
    image.annotate_method(my_export.into(), run);

    let resolver = StaticResolver::new().with_catalog(Arc::new(reference));
    let catalog = populate_with(image.build(), Arc::new(resolver), CatalogConfig::default())
        .await
        .unwrap();

    let record = catalog.type_record(baz).unwrap();
    assert!(!record.is_exported());
    assert_eq!(record.exported_members().len(), 1);
    assert_eq!(record.exported_members()[0].kind(), MemberKind::Method);
}

#[tokio::test]
async fn test_unresolved_reference_marker_is_unknown() {
    let mut image = ModuleImageBuilder::new("Contoso.App");
    image.reference("Custom");
    let my_export = image.type_ref("Custom.MyExport");
    let baz = image.type_def("Contoso.Baz", None);
    let run = image.method(baz, "Do");
    image.annotate_method(my_export.into(), run);

    let catalog = populate(image.build()).await.unwrap();
    assert!(catalog.type_record(baz).is_none());
}

// ═══════════════════════════════════════════════════════════════════════════
// Failure policy
// ═══════════════════════════════════════════════════════════════════════════

fn export_on_parameter() -> ModuleImage {
    let mut image = ModuleImageBuilder::new("Contoso.Parts");
    let export = image.type_ref(EXPORT);
    let import = image.type_ref(IMPORT);
    let foo = image.type_def("Contoso.Foo", None);
    let run = image.method(foo, "Run");
    let arg = image.parameter(run, "arg");
    let dep = image.field(foo, "Dep");
    image.annotate_parameter(export.into(), arg);
    image.annotate_field(import.into(), dep);
    image.build()
}

#[tokio::test]
async fn test_unsupported_target_skipped_by_default() {
    let catalog = populate(export_on_parameter()).await.unwrap();

    assert_eq!(catalog.diagnostics().len(), 1);
    let diagnostic = &catalog.diagnostics()[0];
    assert_eq!(diagnostic.kind, ErrorKind::UnsupportedInput);
    assert!(diagnostic.message.contains("parameter"));
    assert_eq!(catalog.type_count(), 1);
}

#[tokio::test]
async fn test_unsupported_target_aborts_when_strict() {
    let err = populate_with(
        export_on_parameter(),
        Arc::new(NoReferences),
        CatalogConfig::default().strict_targets(true),
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnsupportedInput);
}

#[tokio::test]
async fn test_property_without_accessors_fails_module() {
    let mut image = ModuleImageBuilder::new("Contoso.Parts");
    let import = image.type_ref(IMPORT);
    image.type_def("Contoso.Foo", None);
    let broken = image.property_with_accessors("Broken", Default::default());
    image.annotate_property(import.into(), broken);

    let mut builder = CatalogBuilder::new(
        Arc::new(image.build()),
        Arc::new(NoReferences),
        CatalogConfig::default(),
    );
    let err = builder.populate().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::MalformedMetadata);
    assert_eq!(err.module.as_deref(), Some("Contoso.Parts"));
    assert_eq!(builder.state(), PopulationState::Failed);
}

#[tokio::test]
async fn test_dangling_attribute_type_fails_module() {
    let mut image = ModuleImageBuilder::new("Contoso.Parts");
    let foo = image.type_def("Contoso.Foo", None);
    image.annotate_type(composition_catalog::TypeHandle::Reference(
        composition_catalog::shared::models::TypeRefHandle(42),
    ), foo);

    let err = populate(image.build()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::MalformedMetadata);
}

#[tokio::test]
async fn test_catalog_json_lists_records() {
    let mut image = ModuleImageBuilder::new("Contoso.Parts");
    let export = image.type_ref(EXPORT);
    let foo = image.type_def("Contoso.Foo", None);
    image.annotate_type(export.into(), foo);

    let catalog = populate(image.build()).await.unwrap();
    let json: serde_json::Value = serde_json::from_str(&catalog.to_json().unwrap()).unwrap();
    assert_eq!(json["full_name"], "Contoso.Parts");
    assert_eq!(json["is_composition_module"], true);
    let records = json["type_records"].as_object().unwrap();
    assert_eq!(records.len(), 1);
}
