//! Link listing command.

use std::path::{Path, PathBuf};

use clap::Args;

use super::common::{describe, freeze, load_options, load_tree};

/// List the producers of every linked input.
#[derive(Args)]
pub struct LinksArgs {
    /// Path to the tree TOML file
    pub file: PathBuf,

    /// Show producers with pass-through nodes collapsed
    #[arg(long)]
    pub resolved: bool,
}

/// Run the links command.
///
/// Prints one `consumer <- producer` line per producer. With `--resolved`,
/// inputs of pass-through nodes are skipped since their values only flow on.
pub fn run(args: LinksArgs, options: Option<&Path>) -> anyhow::Result<()> {
    let tree = load_tree(&args.file)?;
    let (options, _) = load_options(options)?;
    let vtree = freeze(&tree, &options)?;

    for input in vtree.inputs_with_links() {
        if args.resolved {
            if input.node().is_pass_through() {
                continue;
            }
            let producers: Vec<String> = input.links().map(describe).collect();
            if producers.is_empty() {
                println!("{} <- (none)", describe(input));
            }
            for producer in producers {
                println!("{} <- {producer}", describe(input));
            }
        } else {
            for producer in input.direct_links() {
                println!("{} <- {}", describe(input), describe(producer));
            }
        }
    }

    Ok(())
}
