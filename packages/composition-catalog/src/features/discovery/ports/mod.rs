mod module_source;

pub use module_source::ModuleSource;
