//! Tree validation command.

use std::path::{Path, PathBuf};

use clap::Args;
use nodetree_config::{list_tree_files, tree_name_from_path, validate_tree};

use super::common::{freeze, load_options, load_tree};

/// Check tree files for malformed authoring data.
#[derive(Args)]
pub struct ValidateArgs {
    /// Tree TOML files, or directories of them
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

/// Run the validate command.
///
/// Every problem is printed; the command fails if any file has one.
pub fn run(args: ValidateArgs, options: Option<&Path>) -> anyhow::Result<()> {
    let (options, _) = load_options(options)?;

    let mut files = Vec::new();
    for path in &args.paths {
        if path.is_dir() {
            let found = list_tree_files(path);
            tracing::debug!(dir = %path.display(), count = found.len(), "scanning directory");
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }

    let mut failed = 0usize;
    for file in &files {
        let label = tree_name_from_path(file).unwrap_or_else(|| file.display().to_string());
        let tree = match load_tree(file) {
            Ok(tree) => tree,
            Err(e) => {
                println!("FAIL  {label}: {e:#}");
                failed += 1;
                continue;
            }
        };

        if let Err(e) = validate_tree(&tree) {
            println!("FAIL  {label}");
            for issue in e.issues() {
                println!("      - {issue}");
            }
            failed += 1;
            continue;
        }

        match freeze(&tree, &options) {
            Ok(vtree) => {
                let stats = vtree.stats();
                println!(
                    "OK    {label} ({} nodes, {} links)",
                    stats.nodes, stats.links
                );
                for socket in vtree.cycle_truncated_sockets() {
                    println!(
                        "      warning: pass-through cycle at {}.{}",
                        socket.node().name(),
                        socket.identifier()
                    );
                }
            }
            Err(e) => {
                println!("FAIL  {label}: {e:#}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} tree file(s) failed validation", files.len());
    }
    Ok(())
}
