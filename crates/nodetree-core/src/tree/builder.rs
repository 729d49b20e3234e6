//! Mutable population phase.
//!
//! [`TreeBuilder`] collects nodes, sockets and links from an authoring graph.
//! It exposes insertion operations only; the indexed, queryable form is
//! produced by [`freeze_and_index()`](TreeBuilder::freeze_and_index), which
//! consumes the builder.

#[cfg(not(feature = "std"))]
use alloc::{collections::BTreeMap, string::ToString, vec::Vec};
#[cfg(feature = "std")]
use std::collections::BTreeMap;

use crate::arena::{Arena, Span};
use crate::authoring::{AuthoringNode, AuthoringSocket, AuthoringTree};
use crate::error::GraphError;

use super::link::LinkId;
use super::node::NodeId;
use super::socket::{SocketDirection, SocketHandle};

/// Pending node record.
pub(super) struct PendingNode<'a> {
    pub authoring: &'a AuthoringNode,
    /// Span of [`SocketHandle`]s.
    pub inputs: Span,
    /// Span of [`SocketHandle`]s.
    pub outputs: Span,
}

/// Pending socket record. Has no dense id yet.
pub(super) struct PendingSocket<'a> {
    pub node: NodeId,
    pub direction: SocketDirection,
    pub index: u32,
    pub authoring: &'a AuthoringSocket,
}

/// Pending link record.
pub(super) struct PendingLink {
    pub from: SocketHandle,
    pub to: SocketHandle,
}

/// Builder for a [`VirtualTree`](super::VirtualTree).
///
/// The builder borrows the authoring graph for `'a`; the frozen tree keeps
/// that borrow, so the authoring graph cannot change while a snapshot of it
/// exists.
///
/// # Usage
///
/// 1. Create a builder with [`new()`](Self::new)
/// 2. Add nodes and links: [`add_all_of_tree()`](Self::add_all_of_tree), or
///    [`add_node()`](Self::add_node) + [`add_link()`](Self::add_link)
/// 3. Freeze: [`freeze_and_index()`](Self::freeze_and_index)
#[derive(Default)]
pub struct TreeBuilder<'a> {
    pub(super) nodes: Arena<NodeId, PendingNode<'a>>,
    pub(super) sockets: Arena<SocketHandle, PendingSocket<'a>>,
    pub(super) links: Arena<LinkId, PendingLink>,
}

impl<'a> TreeBuilder<'a> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Population ---

    /// Adds a node and one socket per authoring input and output.
    ///
    /// Socket order follows the authoring node. No duplicate detection is
    /// performed: adding the same authoring node twice creates two nodes.
    pub fn add_node(&mut self, authoring: &'a AuthoringNode) -> NodeId {
        let id = self.nodes.next_id();
        let inputs = self.alloc_sockets(id, SocketDirection::Input, &authoring.inputs);
        let outputs = self.alloc_sockets(id, SocketDirection::Output, &authoring.outputs);
        self.nodes.alloc(PendingNode {
            authoring,
            inputs,
            outputs,
        });
        #[cfg(feature = "tracing")]
        tracing::trace!(
            "tree_add: node {id} '{}' ({} in, {} out)",
            authoring.name,
            inputs.len(),
            outputs.len()
        );
        id
    }

    fn alloc_sockets(
        &mut self,
        node: NodeId,
        direction: SocketDirection,
        sockets: &'a [AuthoringSocket],
    ) -> Span {
        let start = self.sockets.next_id().0;
        for (index, authoring) in sockets.iter().enumerate() {
            self.sockets.alloc(PendingSocket {
                node,
                direction,
                index: index as u32,
                authoring,
            });
        }
        Span::new(start, sockets.len() as u32)
    }

    /// Adds a link from an output socket to an input socket.
    ///
    /// The caller guarantees `from` is an output and `to` an input of nodes in
    /// this builder. Direction mismatches are only caught by debug assertions.
    pub fn add_link(&mut self, from: SocketHandle, to: SocketHandle) -> LinkId {
        debug_assert_eq!(
            self.sockets[from].direction,
            SocketDirection::Output,
            "link source {from} is not an output"
        );
        debug_assert_eq!(
            self.sockets[to].direction,
            SocketDirection::Input,
            "link target {to} is not an input"
        );
        let id = self.links.alloc(PendingLink { from, to });
        #[cfg(feature = "tracing")]
        tracing::trace!("tree_link: {from} → {to}");
        id
    }

    /// Adds every node of `tree`, then every link.
    ///
    /// Links address nodes by name and sockets by identifier. The import is
    /// all-or-nothing: endpoints are resolved before anything is inserted, so
    /// on error the builder is unchanged.
    ///
    /// # Errors
    ///
    /// - [`GraphError::DuplicateNodeName`] if two nodes share a name
    /// - [`GraphError::UnknownNode`] / [`GraphError::UnknownSocket`] if a link
    ///   references something the tree does not contain
    pub fn add_all_of_tree(&mut self, tree: &'a AuthoringTree) -> Result<(), GraphError> {
        let mut by_name: BTreeMap<&str, usize> = BTreeMap::new();
        for (index, node) in tree.nodes.iter().enumerate() {
            if by_name.insert(node.name.as_str(), index).is_some() {
                return Err(GraphError::DuplicateNodeName(node.name.clone()));
            }
        }

        // Resolve every endpoint up front.
        let mut endpoints = Vec::with_capacity(tree.links.len());
        for (link_index, link) in tree.links.iter().enumerate() {
            let (from_node, from_socket) = resolve_endpoint(
                tree,
                &by_name,
                link_index,
                &link.from_node,
                &link.from_socket,
                SocketDirection::Output,
            )?;
            let (to_node, to_socket) = resolve_endpoint(
                tree,
                &by_name,
                link_index,
                &link.to_node,
                &link.to_socket,
                SocketDirection::Input,
            )?;
            endpoints.push((from_node, from_socket, to_node, to_socket));
        }

        let ids: Vec<NodeId> = tree.nodes.iter().map(|node| self.add_node(node)).collect();
        for (from_node, from_socket, to_node, to_socket) in endpoints {
            let from = self.output(ids[from_node], from_socket);
            let to = self.input(ids[to_node], to_socket);
            self.add_link(from, to);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "tree_import: '{}', {} nodes, {} links",
            tree.name,
            tree.nodes.len(),
            tree.links.len()
        );
        Ok(())
    }

    // --- Builder-phase lookups ---

    /// Handle of the input socket at `index` on `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not in this builder or `index` is out of range.
    pub fn input(&self, node: NodeId, index: usize) -> SocketHandle {
        SocketHandle(self.nodes[node].inputs.at(index))
    }

    /// Handle of the output socket at `index` on `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not in this builder or `index` is out of range.
    pub fn output(&self, node: NodeId, index: usize) -> SocketHandle {
        SocketHandle(self.nodes[node].outputs.at(index))
    }

    /// Number of nodes added so far.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of links added so far.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Number of sockets that will receive ids when the tree is frozen.
    pub fn pending_socket_count(&self) -> usize {
        self.sockets.len()
    }
}

/// Finds the node and socket position a link endpoint names.
fn resolve_endpoint(
    tree: &AuthoringTree,
    by_name: &BTreeMap<&str, usize>,
    link: usize,
    node_name: &str,
    socket: &str,
    direction: SocketDirection,
) -> Result<(usize, usize), GraphError> {
    let node_index = *by_name.get(node_name).ok_or_else(|| GraphError::UnknownNode {
        link,
        node: node_name.to_string(),
    })?;
    let node = &tree.nodes[node_index];
    let socket_index = match direction {
        SocketDirection::Input => node.find_input(socket),
        SocketDirection::Output => node.find_output(socket),
    }
    .ok_or_else(|| GraphError::UnknownSocket {
        link,
        node: node_name.to_string(),
        socket: socket.to_string(),
        direction,
    })?;
    Ok((node_index, socket_index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authoring::AuthoringLink;

    fn math_node(name: &str) -> AuthoringNode {
        AuthoringNode::new(name, "FunctionNodeFloatMath")
            .with_input(AuthoringSocket::new("A", "SocketFloat"))
            .with_input(AuthoringSocket::new("B", "SocketFloat"))
            .with_output(AuthoringSocket::new("Result", "SocketFloat"))
    }

    #[test]
    fn test_add_node_allocates_sockets_in_order() {
        let a = math_node("a");
        let b = math_node("b");
        let mut builder = TreeBuilder::new();
        let na = builder.add_node(&a);
        let nb = builder.add_node(&b);

        assert_eq!(na.index(), 0);
        assert_eq!(nb.index(), 1);
        assert_eq!(builder.node_count(), 2);
        assert_eq!(builder.pending_socket_count(), 6);

        assert_eq!(builder.input(na, 0).index(), 0);
        assert_eq!(builder.input(na, 1).index(), 1);
        assert_eq!(builder.output(na, 0).index(), 2);
        assert_eq!(builder.input(nb, 0).index(), 3);
    }

    #[test]
    fn test_add_node_twice_creates_two_nodes() {
        let a = math_node("a");
        let mut builder = TreeBuilder::new();
        let first = builder.add_node(&a);
        let second = builder.add_node(&a);
        assert_ne!(first, second);
        assert_eq!(builder.node_count(), 2);
    }

    #[test]
    fn test_add_link() {
        let a = math_node("a");
        let b = math_node("b");
        let mut builder = TreeBuilder::new();
        let na = builder.add_node(&a);
        let nb = builder.add_node(&b);

        let link = builder.add_link(builder.output(na, 0), builder.input(nb, 1));
        assert_eq!(link.index(), 0);
        assert_eq!(builder.link_count(), 1);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_input_out_of_range() {
        let a = math_node("a");
        let mut builder = TreeBuilder::new();
        let na = builder.add_node(&a);
        builder.input(na, 2);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "is not an output")]
    fn test_add_link_wrong_direction_debug_assert() {
        let a = math_node("a");
        let b = math_node("b");
        let mut builder = TreeBuilder::new();
        let na = builder.add_node(&a);
        let nb = builder.add_node(&b);
        builder.add_link(builder.input(na, 0), builder.input(nb, 0));
    }

    #[test]
    fn test_add_all_of_tree() {
        let tree = AuthoringTree::new("t")
            .with_node(math_node("a"))
            .with_node(math_node("b"))
            .with_link(AuthoringLink::new("a", "Result", "b", "A"))
            .with_link(AuthoringLink::new("a", "Result", "b", "B"));

        let mut builder = TreeBuilder::new();
        builder.add_all_of_tree(&tree).unwrap();

        assert_eq!(builder.node_count(), 2);
        assert_eq!(builder.link_count(), 2);
        assert_eq!(builder.pending_socket_count(), 6);
    }

    #[test]
    fn test_add_all_of_tree_duplicate_name() {
        let tree = AuthoringTree::new("t")
            .with_node(math_node("a"))
            .with_node(math_node("a"));

        let mut builder = TreeBuilder::new();
        let result = builder.add_all_of_tree(&tree);
        assert_eq!(result, Err(GraphError::DuplicateNodeName("a".to_string())));
        assert_eq!(builder.node_count(), 0);
    }

    #[test]
    fn test_add_all_of_tree_unknown_node_leaves_builder_unchanged() {
        let tree = AuthoringTree::new("t")
            .with_node(math_node("a"))
            .with_link(AuthoringLink::new("ghost", "Result", "a", "A"));

        let mut builder = TreeBuilder::new();
        let result = builder.add_all_of_tree(&tree);
        assert!(matches!(
            result,
            Err(GraphError::UnknownNode { link: 0, ref node }) if node == "ghost"
        ));
        assert_eq!(builder.node_count(), 0);
        assert_eq!(builder.link_count(), 0);
    }

    #[test]
    fn test_add_all_of_tree_unknown_socket() {
        let tree = AuthoringTree::new("t")
            .with_node(math_node("a"))
            .with_node(math_node("b"))
            .with_link(AuthoringLink::new("a", "Result", "b", "A"))
            // "A" is an input of a, not an output.
            .with_link(AuthoringLink::new("a", "A", "b", "B"));

        let mut builder = TreeBuilder::new();
        let result = builder.add_all_of_tree(&tree);
        assert!(matches!(
            result,
            Err(GraphError::UnknownSocket {
                link: 1,
                direction: SocketDirection::Output,
                ..
            })
        ));
    }
}
