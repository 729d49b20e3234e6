//! Tree summary command.

use std::path::{Path, PathBuf};

use clap::Args;

use super::common::{freeze, load_options, load_tree, source_label};

/// Show summary statistics of a frozen tree.
#[derive(Args)]
pub struct InspectArgs {
    /// Path to the tree TOML file
    pub file: PathBuf,
}

/// Run the inspect command.
pub fn run(args: InspectArgs, options: Option<&Path>) -> anyhow::Result<()> {
    let tree = load_tree(&args.file)?;
    let (options, source) = load_options(options)?;
    let vtree = freeze(&tree, &options)?;
    let stats = vtree.stats();

    println!("Tree:          {}", tree.name);
    println!("Options:       {}", source_label(&source));
    println!("Nodes:         {}", stats.nodes);
    println!("Sockets:       {}", stats.sockets);
    println!("Links:         {}", stats.links);
    println!("Linked inputs: {}", stats.inputs_with_links);
    println!("Pass-through:  {}", stats.pass_through_nodes);
    println!("Idnames:       {}", stats.idnames);
    if stats.truncated_cycles > 0 {
        println!("Truncated:     {} (pass-through cycles)", stats.truncated_cycles);
    }

    if stats.nodes > 0 {
        println!();
        println!("Nodes by idname:");
        println!();
        let width = vtree.idnames().map(str::len).max().unwrap_or(0);
        for idname in vtree.idnames() {
            let names: Vec<&str> = vtree.nodes_with_idname(idname).map(|n| n.name()).collect();
            println!("  {idname:width$}  {}", names.join(", "));
        }
    }

    Ok(())
}
