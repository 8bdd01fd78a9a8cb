mod module_resolver;

pub use module_resolver::{ModuleResolver, NoReferences};
