//! nodetree CLI - inspect frozen snapshots of node trees stored as TOML.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nodetree")]
#[command(author, version, about = "Inspect frozen node tree snapshots", long_about = None)]
struct Cli {
    /// Freeze options file (default: <config dir>/nodetree/options.toml if present)
    #[arg(long, global = true, value_name = "FILE")]
    options: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summary statistics and nodes grouped by idname
    Inspect(commands::inspect::InspectArgs),

    /// Table of every socket with its dense id
    Sockets(commands::sockets::SocketsArgs),

    /// Producers of every linked input
    Links(commands::links::LinksArgs),

    /// Check tree files for malformed authoring data
    Validate(commands::validate::ValidateArgs),

    /// Show or initialize the effective freeze options
    Options(commands::options::OptionsArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = cli.options.as_deref();

    match cli.command {
        Commands::Inspect(args) => commands::inspect::run(args, options),
        Commands::Sockets(args) => commands::sockets::run(args, options),
        Commands::Links(args) => commands::links::run(args, options),
        Commands::Validate(args) => commands::validate::run(args, options),
        Commands::Options(args) => commands::options::run(args, options),
    }
}
