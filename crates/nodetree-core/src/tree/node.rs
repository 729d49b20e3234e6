//! Node ids, records, and the borrowed [`Node`] view.
//!
//! Each node of a frozen tree owns two contiguous runs of socket ids: its
//! inputs, then its outputs, both in authoring order. Positional access by
//! index is therefore O(1).

use crate::arena::Span;
use crate::authoring::AuthoringNode;

use super::checked;
use super::snapshot::VirtualTree;
use super::socket::{Socket, SocketId};

arena_id! {
    /// Identifier of a node, in insertion order.
    ///
    /// Node ids are assigned by [`TreeBuilder::add_node`](super::TreeBuilder::add_node)
    /// and stay the same in the frozen tree.
    NodeId
}

/// Frozen node record.
pub(crate) struct NodeData<'a> {
    pub authoring: &'a AuthoringNode,
    pub inputs: Span,
    pub outputs: Span,
    /// Forwards its single input to all outputs during link resolution.
    pub pass_through: bool,
}

/// Borrowed view of one node of a frozen tree.
#[derive(Clone, Copy)]
pub struct Node<'t, 'a> {
    tree: &'t VirtualTree<'a>,
    id: NodeId,
}

impl<'t, 'a> Node<'t, 'a> {
    #[inline]
    pub(crate) fn new(tree: &'t VirtualTree<'a>, id: NodeId) -> Self {
        Self { tree, id }
    }

    #[inline]
    fn data(self) -> &'t NodeData<'a> {
        &self.tree.nodes[self.id]
    }

    /// Insertion-order id of the node.
    #[inline]
    pub fn id(self) -> NodeId {
        self.id
    }

    /// The tree this node belongs to.
    #[inline]
    pub fn tree(self) -> &'t VirtualTree<'a> {
        self.tree
    }

    /// The authoring node this record was built from.
    #[inline]
    pub fn authoring(self) -> &'a AuthoringNode {
        self.data().authoring
    }

    /// Node name.
    #[inline]
    pub fn name(self) -> &'a str {
        &self.authoring().name
    }

    /// Node type name.
    #[inline]
    pub fn idname(self) -> &'a str {
        &self.authoring().idname
    }

    /// Returns true if link resolution skips over this node.
    #[inline]
    pub fn is_pass_through(self) -> bool {
        self.data().pass_through
    }

    /// Number of input sockets.
    #[inline]
    pub fn input_count(self) -> usize {
        self.data().inputs.len()
    }

    /// Number of output sockets.
    #[inline]
    pub fn output_count(self) -> usize {
        self.data().outputs.len()
    }

    /// Input sockets in authoring order.
    pub fn inputs(self) -> impl ExactSizeIterator<Item = Socket<'t, 'a>> {
        let tree = self.tree;
        self.data()
            .inputs
            .positions()
            .map(move |raw| Socket::new(tree, SocketId(raw)))
    }

    /// Output sockets in authoring order.
    pub fn outputs(self) -> impl ExactSizeIterator<Item = Socket<'t, 'a>> {
        let tree = self.tree;
        self.data()
            .outputs
            .positions()
            .map(move |raw| Socket::new(tree, SocketId(raw)))
    }

    /// All sockets: inputs first, then outputs.
    pub fn sockets(self) -> impl Iterator<Item = Socket<'t, 'a>> {
        self.inputs().chain(self.outputs())
    }

    /// Input socket at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= input_count()`.
    #[inline]
    pub fn input(self, index: usize) -> Socket<'t, 'a> {
        Socket::new(self.tree, SocketId(self.data().inputs.at(index)))
    }

    /// Output socket at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= output_count()`.
    #[inline]
    pub fn output(self, index: usize) -> Socket<'t, 'a> {
        Socket::new(self.tree, SocketId(self.data().outputs.at(index)))
    }

    /// Input socket at `index`, checking its name in debug builds.
    ///
    /// Consumers that hard-code socket positions use this to catch layout
    /// drift early. In release builds it is identical to [`input()`](Self::input).
    #[inline]
    pub fn input_named(self, index: usize, expected_name: &str) -> Socket<'t, 'a> {
        let socket = self.input(index);
        checked::socket_name(socket, expected_name);
        socket
    }

    /// Output socket at `index`, checking its name in debug builds.
    #[inline]
    pub fn output_named(self, index: usize, expected_name: &str) -> Socket<'t, 'a> {
        let socket = self.output(index);
        checked::socket_name(socket, expected_name);
        socket
    }
}

impl PartialEq for Node<'_, '_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && core::ptr::eq(self.tree, other.tree)
    }
}

impl Eq for Node<'_, '_> {}

impl core::fmt::Debug for Node<'_, '_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("idname", &self.idname())
            .finish()
    }
}
