//! Type definitions for admiral models, bindings, adapters and settings

mod adapter_types;
mod binding_types;
mod key_types;
mod schema_types;
mod settings_types;

pub use adapter_types::*;
pub use binding_types::*;
pub use key_types::*;
pub use schema_types::*;
pub use settings_types::*;
