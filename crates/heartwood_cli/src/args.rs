//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "heartwood")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Scaffold and validate service objects")]
pub struct Cli {
    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Absolute directory for rotating log files; logs go to stderr otherwise
    #[arg(long, global = true)]
    pub log_dir: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new service object file
    Generate(GenerateArgs),
    /// Validate an input mapping against declared contracts
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Service name, e.g. `my_thing` or `Admin::UserSync`
    pub name: String,

    /// Project root
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Services directory relative to the root
    #[arg(long, default_value = heartwood_core::DEFAULT_SERVICES_DIR)]
    pub services_dir: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// JSON file holding an array of contract declarations
    #[arg(long)]
    pub contracts: PathBuf,

    /// Variant to construct
    #[arg(long)]
    pub variant: String,

    /// Input mapping as a JSON object
    #[arg(long, default_value = "{}")]
    pub input: String,
}
