//! Pool command

use admiral_core::config::DEFAULT_ENGINE_NAME;
use admiral_discovery::{FsModelDiscovery, ModelCatalog};
use admiral_registry::AdminContext;
use anyhow::Result;
use camino::Utf8Path;
use std::sync::Arc;

use crate::cli::PoolArgs;
use crate::commands::load_settings;
use crate::output;

pub fn run(args: PoolArgs, config_dir: Option<&Utf8Path>) -> Result<()> {
    let settings = load_settings(config_dir, DEFAULT_ENGINE_NAME)?;
    let discovery = Arc::new(FsModelDiscovery::new(args.roots));
    let admin = AdminContext::with_settings(discovery, Arc::new(ModelCatalog::new()), settings);

    let pool = admin.models_pool()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&pool)?);
        return Ok(());
    }

    if pool.is_empty() {
        output::warning("No models found under the given roots");
        return Ok(());
    }

    for name in &pool {
        println!("{}", name);
    }
    output::info(&format!("{} models", pool.len()));
    Ok(())
}
