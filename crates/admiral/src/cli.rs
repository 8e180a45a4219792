//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Admiral - admin model configuration inspector
#[derive(Parser, Debug)]
#[command(name = "admiral")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory holding admiral.yaml
    #[arg(short, long, global = true, env = "ADMIRAL_CONFIG_DIR")]
    pub config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every discoverable model, minus the blocklist
    Pool(PoolArgs),

    /// List the models in play with their configuration
    Models(ModelsArgs),

    /// List the models a user would see, in navigation order
    Visible(VisibleArgs),

    /// Show the effective settings
    Settings(SettingsArgs),
}

#[derive(Args, Debug)]
pub struct PoolArgs {
    /// Model source directory (repeatable)
    #[arg(short, long = "root", required = true)]
    pub roots: Vec<Utf8PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ModelsArgs {
    /// Model schema file (YAML)
    #[arg(short, long)]
    pub schema: Utf8PathBuf,

    /// Discover models from these source directories instead of the schema
    #[arg(short, long = "root")]
    pub roots: Vec<Utf8PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct VisibleArgs {
    /// Model schema file (YAML)
    #[arg(short, long)]
    pub schema: Utf8PathBuf,

    /// Current user id
    #[arg(short, long)]
    pub user: Option<String>,

    /// Role of the current user (repeatable)
    #[arg(long = "role")]
    pub roles: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SettingsArgs {
    /// Engine name of the host application
    #[arg(long, default_value = admiral_core::config::DEFAULT_ENGINE_NAME)]
    pub engine: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
