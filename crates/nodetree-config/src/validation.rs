//! Authoring tree and options validation.
//!
//! [`TreeBuilder::add_all_of_tree`](nodetree_core::TreeBuilder::add_all_of_tree)
//! stops at the first problem it cannot build around. Validation instead walks
//! the whole authoring tree and reports every problem at once, which is what a
//! user fixing a hand-written tree file wants.
//!
//! # Example
//!
//! ```rust
//! use nodetree_config::{ValidationError, validate_tree};
//! use nodetree_core::{AuthoringLink, AuthoringNode, AuthoringTree};
//!
//! let tree = AuthoringTree::new("broken")
//!     .with_node(AuthoringNode::new("A", "Value"))
//!     .with_link(AuthoringLink::new("A", "out", "Missing", "in"));
//!
//! let err = validate_tree(&tree).unwrap_err();
//! assert!(matches!(err, ValidationError::Multiple(_)));
//! ```

use std::collections::HashMap;

use nodetree_core::{AuthoringNode, AuthoringTree, FreezeOptions, SocketDirection};
use thiserror::Error;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A node has an empty name and cannot be addressed by links.
    #[error("node {node} has an empty name")]
    EmptyNodeName {
        /// Position of the node in the tree.
        node: usize,
    },

    /// A node has an empty type name.
    #[error("node '{node}' has an empty idname")]
    EmptyNodeIdname {
        /// Node name.
        node: String,
    },

    /// A socket has an empty type name.
    #[error("{direction} socket '{socket}' of node '{node}' has an empty idname")]
    EmptySocketIdname {
        /// Node name.
        node: String,
        /// Socket identifier.
        socket: String,
        /// Input or output side.
        direction: SocketDirection,
    },

    /// Two nodes share a name.
    #[error("duplicate node name '{0}'")]
    DuplicateNodeName(String),

    /// Two sockets on the same side of a node share an identifier.
    #[error("node '{node}' has more than one {direction} socket with identifier '{identifier}'")]
    DuplicateSocketIdentifier {
        /// Node name.
        node: String,
        /// Input or output side.
        direction: SocketDirection,
        /// The repeated identifier.
        identifier: String,
    },

    /// A link names a node that does not exist.
    #[error("link {link} references unknown node '{node}'")]
    UnknownNode {
        /// Position of the link in the tree.
        link: usize,
        /// The missing node name.
        node: String,
    },

    /// A link names a socket its node does not have.
    #[error("link {link} references unknown {direction} socket '{socket}' on node '{node}'")]
    UnknownSocket {
        /// Position of the link in the tree.
        link: usize,
        /// Node name.
        node: String,
        /// The missing socket identifier.
        socket: String,
        /// Input or output side that was searched.
        direction: SocketDirection,
    },

    /// A pass-through idname in the options is empty.
    #[error("pass-through idname {index} is empty")]
    EmptyPassThroughIdname {
        /// Position in the `pass_through` list.
        index: usize,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

impl ValidationError {
    /// The individual problems: the inner list for [`Multiple`](Self::Multiple),
    /// otherwise just this error.
    pub fn issues(&self) -> &[ValidationError] {
        match self {
            Self::Multiple(errors) => errors,
            other => std::slice::from_ref(other),
        }
    }
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Checks a whole authoring tree and reports every problem found.
///
/// Returns a single error when there is exactly one problem, and
/// [`ValidationError::Multiple`] otherwise.
pub fn validate_tree(tree: &AuthoringTree) -> ValidationResult<()> {
    let mut errors = Vec::new();
    let mut by_name: HashMap<&str, &AuthoringNode> = HashMap::new();

    for (index, node) in tree.nodes.iter().enumerate() {
        if node.name.is_empty() {
            errors.push(ValidationError::EmptyNodeName { node: index });
        } else if by_name.insert(node.name.as_str(), node).is_some() {
            errors.push(ValidationError::DuplicateNodeName(node.name.clone()));
        }
        if node.idname.is_empty() {
            errors.push(ValidationError::EmptyNodeIdname {
                node: node.name.clone(),
            });
        }
        validate_sockets(node, SocketDirection::Input, &mut errors);
        validate_sockets(node, SocketDirection::Output, &mut errors);
    }

    for (index, link) in tree.links.iter().enumerate() {
        let endpoints = [
            (&link.from_node, &link.from_socket, SocketDirection::Output),
            (&link.to_node, &link.to_socket, SocketDirection::Input),
        ];
        for (node_name, socket, direction) in endpoints {
            let Some(node) = by_name.get(node_name.as_str()) else {
                errors.push(ValidationError::UnknownNode {
                    link: index,
                    node: node_name.clone(),
                });
                continue;
            };
            let found = match direction {
                SocketDirection::Input => node.find_input(socket),
                SocketDirection::Output => node.find_output(socket),
            };
            if found.is_none() {
                errors.push(ValidationError::UnknownSocket {
                    link: index,
                    node: node_name.clone(),
                    socket: socket.clone(),
                    direction,
                });
            }
        }
    }

    collect(errors)
}

fn validate_sockets(
    node: &AuthoringNode,
    direction: SocketDirection,
    errors: &mut Vec<ValidationError>,
) {
    let sockets = match direction {
        SocketDirection::Input => &node.inputs,
        SocketDirection::Output => &node.outputs,
    };
    let mut seen = Vec::with_capacity(sockets.len());
    for socket in sockets {
        let identifier = socket.identifier();
        if socket.idname.is_empty() {
            errors.push(ValidationError::EmptySocketIdname {
                node: node.name.clone(),
                socket: identifier.to_string(),
                direction,
            });
        }
        if seen.contains(&identifier) {
            errors.push(ValidationError::DuplicateSocketIdentifier {
                node: node.name.clone(),
                direction,
                identifier: identifier.to_string(),
            });
        } else {
            seen.push(identifier);
        }
    }
}

/// Checks freeze options.
pub fn validate_options(options: &FreezeOptions) -> ValidationResult<()> {
    let errors = options
        .pass_through
        .iter()
        .enumerate()
        .filter(|(_, idname)| idname.trim().is_empty())
        .map(|(index, _)| ValidationError::EmptyPassThroughIdname { index })
        .collect();
    collect(errors)
}

fn collect(mut errors: Vec<ValidationError>) -> ValidationResult<()> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}
