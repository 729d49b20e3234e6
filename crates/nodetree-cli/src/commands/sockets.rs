//! Socket table command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use std::path::{Path, PathBuf};

use clap::Args;

use super::common::{freeze, load_options, load_tree};

/// List every socket with its dense id.
#[derive(Args)]
pub struct SocketsArgs {
    /// Path to the tree TOML file
    pub file: PathBuf,

    /// Only list sockets of nodes with this idname
    #[arg(long, value_name = "IDNAME")]
    pub idname: Option<String>,
}

/// Run the sockets command.
pub fn run(args: SocketsArgs, options: Option<&Path>) -> anyhow::Result<()> {
    let tree = load_tree(&args.file)?;
    let (options, _) = load_options(options)?;
    let vtree = freeze(&tree, &options)?;

    println!(
        "  {:>5}  {:20}  {:6}  {:20}  {}",
        "Id", "Node", "Dir", "Identifier", "Idname"
    );
    println!(
        "  {:>5}  {:20}  {:6}  {:20}  {}",
        "--", "----", "---", "----------", "------"
    );

    for socket in vtree.sockets() {
        let node = socket.node();
        if args.idname.as_deref().is_some_and(|wanted| node.idname() != wanted) {
            continue;
        }
        println!(
            "  {:>5}  {:20}  {:6}  {:20}  {}",
            socket.id().index(),
            node.name(),
            socket.direction().to_string(),
            socket.identifier(),
            socket.idname()
        );
    }

    Ok(())
}
