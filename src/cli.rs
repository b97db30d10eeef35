//! CLI argument parsing for the catalog roadmap generator.
//!
//! The CLI is intentionally thin: it resolves the base directory and layout and
//! hands off to the workflow.
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "catalog-roadmap",
    version,
    about = "Generate the supported-integration catalog and roadmap files",
    after_help = "Commands:\n  generate --basedir <dir>   Scan descriptors, apply roadmaps, detect artifacts, write outputs\n  status --basedir <dir>     Preview item states without writing anything\n\nExamples:\n  catalog-roadmap generate --basedir catalog\n  catalog-roadmap status --basedir catalog --json",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    Generate(GenerateArgs),
    Status(StatusArgs),
}

/// Inputs shared by every command.
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Module root the layout paths are resolved against
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub basedir: PathBuf,

    /// Layout JSON (defaults to <basedir>/catalog.json when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log debug events (overridden by RUST_LOG)
    #[arg(long)]
    pub verbose: bool,
}

/// Generate command inputs.
#[derive(Parser, Debug)]
#[command(about = "Write properties, roadmaps and supported descriptor copies")]
pub struct GenerateArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Status command inputs.
#[derive(Parser, Debug)]
#[command(about = "Summarize item states without writing outputs")]
pub struct StatusArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

impl Command {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Command::Generate(args) => &args.common,
            Command::Status(args) => &args.common,
        }
    }
}
