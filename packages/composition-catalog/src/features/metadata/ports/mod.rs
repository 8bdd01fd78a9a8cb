mod metadata_reader;

pub use metadata_reader::MetadataReader;
