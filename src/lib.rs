pub mod harvest;
pub mod model;
pub mod registry;
pub mod telemetry;
pub mod traits;

// Re-export common types for convenience
pub use harvest::*;
pub use model::*;
pub use registry::{FieldDef, RegistryError, TypeDef, TypeHandle, TypeTable};
pub use traits::*;
