mod catalog_builder;

pub use catalog_builder::{build_catalog, CatalogBuilder};
