//! Command implementations

pub mod models;
pub mod pool;
pub mod settings;
pub mod visible;

use admiral_core::{Settings, SettingsLoader};
use anyhow::Result;
use camino::Utf8Path;

/// Effective settings for `engine_name`, layered from `config_dir` or the user config directory
pub(crate) fn load_settings(config_dir: Option<&Utf8Path>, engine_name: &str) -> Result<Settings> {
    let loader = match config_dir {
        Some(dir) => SettingsLoader::with_dir(dir.to_path_buf()),
        None => SettingsLoader::new()?,
    };
    Ok(loader.load(engine_name)?)
}
