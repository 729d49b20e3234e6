//! Integration tests for nodetree-config.
//!
//! These tests go from files on disk to a frozen tree.

use nodetree_config::{
    ConfigError, CyclePolicy, OptionsFile, OptionsSource, ValidationError, load_tree,
    load_tree_checked, resolve_options, save_tree,
};
use nodetree_core::{GraphError, TreeBuilder};
use tempfile::TempDir;

const REROUTED: &str = r#"
name = "rerouted"

[[nodes]]
name = "Value"
idname = "FunctionNodeValue"
outputs = [{ name = "Value", idname = "SocketFloat" }]

[[nodes]]
name = "Relay"
idname = "FunctionNodeRelay"
inputs = [{ name = "In", idname = "SocketFloat" }]
outputs = [{ name = "Out", idname = "SocketFloat" }]

[[nodes]]
name = "Reroute"
idname = "NodeReroute"
inputs = [{ name = "Input", idname = "SocketFloat" }]
outputs = [{ name = "Output", idname = "SocketFloat" }]

[[nodes]]
name = "Print"
idname = "FunctionNodePrint"
inputs = [{ name = "Value", idname = "SocketFloat" }]

[[links]]
from_node = "Value"
from_socket = "Value"
to_node = "Relay"
to_socket = "In"

[[links]]
from_node = "Relay"
from_socket = "Out"
to_node = "Reroute"
to_socket = "Input"

[[links]]
from_node = "Reroute"
from_socket = "Output"
to_node = "Print"
to_socket = "Value"
"#;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Tree file plus options file change what the frozen tree resolves to.
#[test]
fn test_options_file_extends_pass_through() {
    let dir = TempDir::new().unwrap();
    let tree_path = write(&dir, "tree.toml", REROUTED);
    let options_path = write(
        &dir,
        "options.toml",
        "pass_through = [\"NodeReroute\", \"FunctionNodeRelay\"]\n",
    );

    let tree = load_tree_checked(&tree_path).unwrap();

    // Defaults: only the reroute is skipped.
    let mut builder = TreeBuilder::new();
    builder.add_all_of_tree(&tree).unwrap();
    let vtree = builder.freeze_and_index().unwrap();
    let print = vtree.nodes_with_idname("FunctionNodePrint").next().unwrap();
    assert_eq!(print.input(0).links().next().unwrap().node().name(), "Relay");

    // With the options file the relay is skipped too.
    let (options, source) = resolve_options(Some(options_path.as_path()), &[]).unwrap();
    assert_eq!(source, OptionsSource::File(options_path));
    let mut builder = TreeBuilder::new();
    builder.add_all_of_tree(&tree).unwrap();
    let vtree = builder.freeze_and_index_with(&options).unwrap();
    let print = vtree.nodes_with_idname("FunctionNodePrint").next().unwrap();
    assert_eq!(print.input(0).links().next().unwrap().node().name(), "Value");
    assert_eq!(vtree.stats().pass_through_nodes, 2);
}

/// A saved tree loads back identical and freezes the same way.
#[test]
fn test_save_load_freeze() {
    let dir = TempDir::new().unwrap();
    let original = nodetree_config::tree_from_toml(REROUTED).unwrap();
    let path = dir.path().join("out").join("copy.toml");
    save_tree(&original, &path).unwrap();

    let loaded = load_tree(&path).unwrap();
    assert_eq!(loaded, original);

    let mut builder = TreeBuilder::new();
    builder.add_all_of_tree(&loaded).unwrap();
    let vtree = builder.freeze_and_index().unwrap();
    assert_eq!(vtree.socket_count(), original.socket_count());
    assert_eq!(vtree.inputs_with_links().len(), 3);
}

/// Validation reports everything; the builder stops at the first problem.
#[test]
fn test_validation_and_builder_agree_on_bad_links() {
    let dir = TempDir::new().unwrap();
    let broken = REROUTED.replace("to_socket = \"Value\"", "to_socket = \"Missing\"");
    let path = write(&dir, "broken.toml", &broken);

    let validation = match load_tree_checked(&path) {
        Err(ConfigError::Validation(validation)) => validation,
        other => panic!("expected validation error, got {other:?}"),
    };
    assert!(matches!(
        validation,
        ValidationError::UnknownSocket { link: 2, .. }
    ));

    let tree = load_tree(&path).unwrap();
    let mut builder = TreeBuilder::new();
    let result = builder.add_all_of_tree(&tree);
    assert!(matches!(result, Err(GraphError::UnknownSocket { link: 2, .. })));
}

/// Reject policy from a file surfaces as a graph error through `ConfigError`.
#[test]
fn test_reject_policy_from_file() {
    let dir = TempDir::new().unwrap();
    let looped = r#"
[[nodes]]
name = "A"
idname = "NodeReroute"
inputs = [{ name = "Input", idname = "SocketFloat" }]
outputs = [{ name = "Output", idname = "SocketFloat" }]

[[nodes]]
name = "B"
idname = "NodeReroute"
inputs = [{ name = "Input", idname = "SocketFloat" }]
outputs = [{ name = "Output", idname = "SocketFloat" }]

[[links]]
from_node = "A"
from_socket = "Output"
to_node = "B"
to_socket = "Input"

[[links]]
from_node = "B"
from_socket = "Output"
to_node = "A"
to_socket = "Input"
"#;
    let tree_path = write(&dir, "loop.toml", looped);
    let options_path = write(&dir, "strict.toml", "cycle_policy = \"reject\"\n");

    let tree = load_tree_checked(&tree_path).unwrap();
    let options = OptionsFile::load(&options_path).unwrap().into_freeze_options();
    assert_eq!(options.cycle_policy, CyclePolicy::Reject);

    let freeze = || -> Result<usize, ConfigError> {
        let mut builder = TreeBuilder::new();
        builder.add_all_of_tree(&tree)?;
        Ok(builder.freeze_and_index_with(&options)?.socket_count())
    };
    let err = freeze().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Graph(GraphError::PassThroughCycle { .. })
    ));
}
