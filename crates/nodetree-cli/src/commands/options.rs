//! Freeze options command.

use std::path::Path;

use anyhow::Context;
use clap::Args;
use nodetree_config::{OptionsFile, default_options_path, ensure_user_config_dir};

use super::common::{load_options, source_label};

/// Show the effective freeze options.
#[derive(Args)]
pub struct OptionsArgs {
    /// Write the default options to the user config file
    #[arg(long)]
    pub init: bool,

    /// Overwrite an existing file with --init
    #[arg(long, requires = "init")]
    pub force: bool,
}

/// Run the options command.
pub fn run(args: OptionsArgs, options: Option<&Path>) -> anyhow::Result<()> {
    if args.init {
        let path = default_options_path();
        if path.exists() && !args.force {
            anyhow::bail!(
                "'{}' already exists (use --force to overwrite)",
                path.display()
            );
        }
        ensure_user_config_dir()?;
        OptionsFile::default()
            .save(&path)
            .with_context(|| format!("cannot write '{}'", path.display()))?;
        tracing::info!(path = %path.display(), "wrote default options");
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let (options, source) = load_options(options)?;
    println!("# source: {}", source_label(&source));
    print!("{}", OptionsFile::new(options).to_toml()?);
    Ok(())
}
