//! Visible command

use admiral_core::config::DEFAULT_ENGINE_NAME;
use admiral_core::types::CurrentUser;
use admiral_core::Bindings;
use anyhow::Result;
use camino::Utf8Path;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::VisibleArgs;
use crate::commands::load_settings;
use crate::output;
use crate::schema::AppSchema;

#[derive(Tabled, Serialize)]
struct VisibleRow {
    position: usize,
    model: String,
    label: String,
    weight: i32,
}

fn bindings_for(user: Option<String>, roles: Vec<String>) -> Bindings {
    match user {
        Some(id) => {
            let user = roles
                .into_iter()
                .fold(CurrentUser::new(id), |user, role| user.with_role(role));
            Bindings::new().with_current_user(user)
        }
        None => {
            if !roles.is_empty() {
                output::warning("--role has no effect without --user");
            }
            Bindings::new()
        }
    }
}

pub fn run(args: VisibleArgs, config_dir: Option<&Utf8Path>) -> Result<()> {
    let settings = load_settings(config_dir, DEFAULT_ENGINE_NAME)?;
    let schema = AppSchema::load(&args.schema)?;
    let admin = schema.admin_context(None, settings)?;

    let bindings = bindings_for(args.user, args.roles);
    let visible = admin.visible_models(&bindings)?;

    let mut rows = Vec::with_capacity(visible.len());
    for (index, model) in visible.iter().enumerate() {
        rows.push(VisibleRow {
            position: index + 1,
            model: model.key().to_string(),
            label: model.label()?,
            weight: model.weight()?,
        });
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        output::warning("No visible models");
        return Ok(());
    }

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);
    Ok(())
}
