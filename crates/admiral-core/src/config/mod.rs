//! Global settings and settings loading

mod loader;
mod settings;

pub use loader::{HiddenFieldsValue, SettingsFile, SettingsLoader};
pub use settings::{Settings, DEFAULT_ENGINE_NAME};
