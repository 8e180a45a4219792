//! Settings command

use admiral_core::SettingsFile;
use anyhow::Result;
use camino::Utf8Path;

use crate::cli::SettingsArgs;
use crate::commands::load_settings;
use crate::output;

pub fn run(args: SettingsArgs, config_dir: Option<&Utf8Path>) -> Result<()> {
    let settings = load_settings(config_dir, &args.engine)?;
    let snapshot = SettingsFile::snapshot(&settings);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    output::header("Effective settings");
    output::kv("Engine", settings.engine_name());
    output::kv("Search operator", settings.default_search_operator().as_str());
    println!();
    print!("{}", serde_yaml_ng::to_string(&snapshot)?);
    Ok(())
}
