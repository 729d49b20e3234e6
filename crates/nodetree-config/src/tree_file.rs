//! Authoring tree files.
//!
//! # TOML Format
//!
//! ```toml
//! name = "example"
//!
//! [[nodes]]
//! name = "Value"
//! idname = "FunctionNodeValue"
//! outputs = [{ name = "Value", idname = "SocketFloat" }]
//!
//! [[nodes]]
//! name = "Math"
//! idname = "FunctionNodeFloatMath"
//! inputs = [
//!     { name = "Value", idname = "SocketFloat", identifier = "a" },
//!     { name = "Value", idname = "SocketFloat", identifier = "b" },
//! ]
//! outputs = [{ name = "Value", idname = "SocketFloat" }]
//!
//! [[links]]
//! from_node = "Value"
//! from_socket = "Value"
//! to_node = "Math"
//! to_socket = "a"
//! ```
//!
//! A socket without `identifier` is addressed by its `name`.

use std::path::Path;

use nodetree_core::AuthoringTree;

use crate::error::ConfigError;
use crate::validation::validate_tree;

/// Load an authoring tree from a TOML file.
///
/// The tree is parsed only; see [`load_tree_checked`] to also validate it.
pub fn load_tree(path: impl AsRef<Path>) -> Result<AuthoringTree, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    tree_from_toml(&content)
}

/// Load an authoring tree and run [`validate_tree`] on it.
pub fn load_tree_checked(path: impl AsRef<Path>) -> Result<AuthoringTree, ConfigError> {
    let tree = load_tree(path)?;
    validate_tree(&tree)?;
    Ok(tree)
}

/// Parse an authoring tree from a TOML string.
pub fn tree_from_toml(toml_str: &str) -> Result<AuthoringTree, ConfigError> {
    Ok(toml::from_str(toml_str)?)
}

/// Convert an authoring tree to a TOML string.
pub fn tree_to_toml(tree: &AuthoringTree) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(tree)?)
}

/// Save an authoring tree to a TOML file, creating parent directories.
pub fn save_tree(tree: &AuthoringTree, path: impl AsRef<Path>) -> Result<(), ConfigError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
    }

    let content = tree_to_toml(tree)?;
    std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodetree_core::{AuthoringLink, AuthoringNode, AuthoringSocket};
    use tempfile::TempDir;

    const EXAMPLE: &str = r#"
name = "example"

[[nodes]]
name = "Value"
idname = "FunctionNodeValue"
outputs = [{ name = "Value", idname = "SocketFloat" }]

[[nodes]]
name = "Math"
idname = "FunctionNodeFloatMath"
inputs = [
    { name = "Value", idname = "SocketFloat", identifier = "a" },
    { name = "Value", idname = "SocketFloat", identifier = "b" },
]
outputs = [{ name = "Value", idname = "SocketFloat" }]

[[links]]
from_node = "Value"
from_socket = "Value"
to_node = "Math"
to_socket = "b"
"#;

    #[test]
    fn test_parse_example() {
        let tree = tree_from_toml(EXAMPLE).unwrap();
        assert_eq!(tree.name, "example");
        assert_eq!(tree.nodes.len(), 2);
        assert_eq!(tree.links.len(), 1);

        let math = tree.find_node("Math").unwrap();
        assert_eq!(math.inputs[1].identifier(), "b");
        assert_eq!(math.outputs[0].identifier(), "Value");
        assert_eq!(math.find_input("b"), Some(1));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let tree = tree_from_toml("name = \"empty\"").unwrap();
        assert!(tree.nodes.is_empty());
        assert!(tree.links.is_empty());
    }

    #[test]
    fn test_parse_error() {
        let result = tree_from_toml("[[nodes]]\nname = 3");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("tree.toml");

        let tree = AuthoringTree::new("saved")
            .with_node(
                AuthoringNode::new("V", "FunctionNodeValue")
                    .with_output(AuthoringSocket::new("Value", "SocketFloat")),
            )
            .with_node(
                AuthoringNode::new("P", "FunctionNodePrint").with_input(
                    AuthoringSocket::new("Value", "SocketFloat").with_identifier("value_in"),
                ),
            )
            .with_link(AuthoringLink::new("V", "Value", "P", "value_in"));

        save_tree(&tree, &path).unwrap();
        assert!(path.exists());
        assert_eq!(load_tree(&path).unwrap(), tree);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_tree("/nonexistent/path/tree_12345.toml");
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }

    #[test]
    fn test_load_checked_rejects_dangling_link() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.toml");
        std::fs::write(
            &path,
            "[[links]]\nfrom_node = \"a\"\nfrom_socket = \"x\"\nto_node = \"a\"\nto_socket = \"y\"\n",
        )
        .unwrap();

        assert!(load_tree(&path).is_ok());
        assert!(matches!(
            load_tree_checked(&path),
            Err(ConfigError::Validation(_))
        ));
    }
}
