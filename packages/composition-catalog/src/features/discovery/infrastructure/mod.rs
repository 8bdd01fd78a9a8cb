mod directory_source;
mod discovery;
mod in_memory_source;

pub use directory_source::ImageDirectorySource;
pub use discovery::Discovery;
pub use in_memory_source::InMemoryModuleSource;
