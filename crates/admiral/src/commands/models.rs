//! Models command

use admiral_core::config::DEFAULT_ENGINE_NAME;
use admiral_core::types::ModelDiscovery;
use admiral_discovery::FsModelDiscovery;
use anyhow::Result;
use camino::Utf8Path;
use serde::Serialize;
use std::sync::Arc;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::ModelsArgs;
use crate::commands::load_settings;
use crate::output;
use crate::schema::AppSchema;

#[derive(Tabled, Serialize)]
struct ModelRow {
    model: String,
    label: String,
    weight: i32,
    fields: usize,
    excluded: bool,
}

pub fn run(args: ModelsArgs, config_dir: Option<&Utf8Path>) -> Result<()> {
    let settings = load_settings(config_dir, DEFAULT_ENGINE_NAME)?;
    let schema = AppSchema::load(&args.schema)?;

    let discovery = if args.roots.is_empty() {
        None
    } else {
        Some(Arc::new(FsModelDiscovery::new(args.roots)) as Arc<dyn ModelDiscovery>)
    };
    let admin = schema.admin_context(discovery, settings)?;

    let mut rows = Vec::new();
    for model in admin.models()? {
        rows.push(ModelRow {
            model: model.key().to_string(),
            label: model.label()?,
            weight: model.weight()?,
            fields: model.fields()?.len(),
            excluded: model.is_excluded(),
        });
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        output::warning("No models in play");
        return Ok(());
    }

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);
    Ok(())
}
