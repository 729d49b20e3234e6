//! Authoring-side records: the editable graph a snapshot is built from.
//!
//! These are plain data types standing in for the editor's own node tree.
//! A [`VirtualTree`](crate::VirtualTree) borrows them for its whole lifetime
//! and never mutates them, so the borrow checker keeps the authoring graph
//! stable while a snapshot exists.
//!
//! Links name their endpoints by node name and socket identifier. A socket
//! whose `identifier` is empty is identified by its `name`.

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One pin of an authoring node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AuthoringSocket {
    /// Display name, used for the debug-only name checks on positional access.
    pub name: String,
    /// Socket type name (e.g. `"SocketFloat"`).
    pub idname: String,
    /// Stable identifier within the node; falls back to `name` when empty.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "String::is_empty")
    )]
    pub identifier: String,
}

impl AuthoringSocket {
    /// Creates a socket identified by its name.
    pub fn new(name: impl Into<String>, idname: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            idname: idname.into(),
            identifier: String::new(),
        }
    }

    /// Sets an identifier distinct from the display name.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    /// Returns the identifier links use to address this socket.
    pub fn identifier(&self) -> &str {
        if self.identifier.is_empty() {
            &self.name
        } else {
            &self.identifier
        }
    }
}

/// One node of the authoring graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AuthoringNode {
    /// Unique node name within its tree.
    pub name: String,
    /// Node type name (e.g. `"FunctionNodeFloatMath"`).
    pub idname: String,
    /// Input sockets, in display order.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub inputs: Vec<AuthoringSocket>,
    /// Output sockets, in display order.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub outputs: Vec<AuthoringSocket>,
}

impl AuthoringNode {
    /// Creates a node without sockets.
    pub fn new(name: impl Into<String>, idname: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            idname: idname.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Appends an input socket.
    pub fn with_input(mut self, socket: AuthoringSocket) -> Self {
        self.inputs.push(socket);
        self
    }

    /// Appends an output socket.
    pub fn with_output(mut self, socket: AuthoringSocket) -> Self {
        self.outputs.push(socket);
        self
    }

    /// Position of the input with the given identifier.
    pub fn find_input(&self, identifier: &str) -> Option<usize> {
        self.inputs.iter().position(|s| s.identifier() == identifier)
    }

    /// Position of the output with the given identifier.
    pub fn find_output(&self, identifier: &str) -> Option<usize> {
        self.outputs.iter().position(|s| s.identifier() == identifier)
    }

    /// Total number of sockets on the node.
    pub fn socket_count(&self) -> usize {
        self.inputs.len() + self.outputs.len()
    }
}

/// An authored connection from an output socket to an input socket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AuthoringLink {
    /// Name of the producing node.
    pub from_node: String,
    /// Identifier of the producing output socket.
    pub from_socket: String,
    /// Name of the consuming node.
    pub to_node: String,
    /// Identifier of the consuming input socket.
    pub to_socket: String,
}

impl AuthoringLink {
    /// Creates a link `from_node.from_socket -> to_node.to_socket`.
    pub fn new(
        from_node: impl Into<String>,
        from_socket: impl Into<String>,
        to_node: impl Into<String>,
        to_socket: impl Into<String>,
    ) -> Self {
        Self {
            from_node: from_node.into(),
            from_socket: from_socket.into(),
            to_node: to_node.into(),
            to_socket: to_socket.into(),
        }
    }
}

/// A complete authoring graph: nodes plus the links between their sockets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AuthoringTree {
    /// Tree name, informational only.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// Nodes in insertion order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub nodes: Vec<AuthoringNode>,
    /// Links in insertion order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub links: Vec<AuthoringLink>,
}

impl AuthoringTree {
    /// Creates an empty tree.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Appends a node.
    pub fn with_node(mut self, node: AuthoringNode) -> Self {
        self.nodes.push(node);
        self
    }

    /// Appends a link.
    pub fn with_link(mut self, link: AuthoringLink) -> Self {
        self.links.push(link);
        self
    }

    /// Returns the first node with the given name.
    pub fn find_node(&self, name: &str) -> Option<&AuthoringNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Total number of sockets over all nodes.
    pub fn socket_count(&self) -> usize {
        self.nodes.iter().map(AuthoringNode::socket_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_falls_back_to_name() {
        let socket = AuthoringSocket::new("Value", "SocketFloat");
        assert_eq!(socket.identifier(), "Value");

        let socket = socket.with_identifier("value_001");
        assert_eq!(socket.identifier(), "value_001");
        assert_eq!(socket.name, "Value");
    }

    #[test]
    fn test_find_sockets_by_identifier() {
        let node = AuthoringNode::new("Math", "FunctionNodeFloatMath")
            .with_input(AuthoringSocket::new("A", "SocketFloat").with_identifier("a"))
            .with_input(AuthoringSocket::new("B", "SocketFloat").with_identifier("b"))
            .with_output(AuthoringSocket::new("Result", "SocketFloat"));

        assert_eq!(node.find_input("b"), Some(1));
        assert_eq!(node.find_input("B"), None);
        assert_eq!(node.find_output("Result"), Some(0));
        assert_eq!(node.find_output("a"), None);
        assert_eq!(node.socket_count(), 3);
    }

    #[test]
    fn test_tree_builders() {
        let tree = AuthoringTree::new("t")
            .with_node(AuthoringNode::new("A", "X").with_output(AuthoringSocket::new("o", "S")))
            .with_node(AuthoringNode::new("B", "X").with_input(AuthoringSocket::new("i", "S")))
            .with_link(AuthoringLink::new("A", "o", "B", "i"));

        assert_eq!(tree.nodes.len(), 2);
        assert_eq!(tree.links.len(), 1);
        assert_eq!(tree.socket_count(), 2);
        assert_eq!(tree.find_node("B").map(|n| n.inputs.len()), Some(1));
        assert!(tree.find_node("C").is_none());
    }
}
