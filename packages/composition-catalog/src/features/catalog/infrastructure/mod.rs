mod entity_cache;
mod static_resolver;

pub use entity_cache::EntityCache;
pub use static_resolver::StaticResolver;
