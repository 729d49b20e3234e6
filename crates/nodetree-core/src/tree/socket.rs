//! Socket ids, records, and the borrowed [`Socket`] view.
//!
//! A socket is one input or output pin of a node. During population sockets
//! are addressed by [`SocketHandle`]; their dense [`SocketId`] only exists once
//! the tree is frozen.

use crate::arena::Span;
use crate::authoring::AuthoringSocket;

use super::node::{Node, NodeId};
use super::snapshot::VirtualTree;

arena_id! {
    /// Dense socket identity in a frozen tree.
    ///
    /// Ids run `0..socket_count()` without gaps, in node order with each
    /// node's inputs before its outputs, so callers can use them to index
    /// their own parallel arrays.
    SocketId
}

arena_id! {
    /// Builder-phase handle to a socket, used to add links before freezing.
    ///
    /// Handles are only meaningful for the [`TreeBuilder`](super::TreeBuilder)
    /// that produced them.
    SocketHandle
}

/// Whether a socket consumes (input) or produces (output) a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SocketDirection {
    /// Consumes a value; linked from at most one output in well-formed data.
    Input,
    /// Produces a value; may feed any number of inputs.
    Output,
}

impl core::fmt::Display for SocketDirection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Input => "input",
            Self::Output => "output",
        })
    }
}

/// Frozen socket record.
pub(crate) struct SocketData<'a> {
    pub node: NodeId,
    pub direction: SocketDirection,
    /// Position within the node's inputs or outputs.
    pub index: u32,
    pub authoring: &'a AuthoringSocket,
    /// Span into `VirtualTree::direct_pool`.
    pub direct: Span,
    /// Span into `VirtualTree::resolved_pool`.
    pub resolved: Span,
}

/// Borrowed view of one socket of a frozen tree.
#[derive(Clone, Copy)]
pub struct Socket<'t, 'a> {
    tree: &'t VirtualTree<'a>,
    id: SocketId,
}

impl<'t, 'a> Socket<'t, 'a> {
    #[inline]
    pub(crate) fn new(tree: &'t VirtualTree<'a>, id: SocketId) -> Self {
        Self { tree, id }
    }

    #[inline]
    fn data(self) -> &'t SocketData<'a> {
        &self.tree.sockets[self.id]
    }

    /// Dense id of this socket.
    #[inline]
    pub fn id(self) -> SocketId {
        self.id
    }

    /// The tree this socket belongs to.
    #[inline]
    pub fn tree(self) -> &'t VirtualTree<'a> {
        self.tree
    }

    /// Input or output.
    #[inline]
    pub fn direction(self) -> SocketDirection {
        self.data().direction
    }

    /// Returns true for input sockets.
    #[inline]
    pub fn is_input(self) -> bool {
        self.direction() == SocketDirection::Input
    }

    /// Returns true for output sockets.
    #[inline]
    pub fn is_output(self) -> bool {
        self.direction() == SocketDirection::Output
    }

    /// Position of the socket within its node's inputs or outputs.
    #[inline]
    pub fn index(self) -> usize {
        self.data().index as usize
    }

    /// The node owning this socket.
    #[inline]
    pub fn node(self) -> Node<'t, 'a> {
        Node::new(self.tree, self.data().node)
    }

    /// The authoring socket this record was built from.
    #[inline]
    pub fn authoring(self) -> &'a AuthoringSocket {
        self.data().authoring
    }

    /// Display name.
    #[inline]
    pub fn name(self) -> &'a str {
        &self.authoring().name
    }

    /// Socket type name.
    #[inline]
    pub fn idname(self) -> &'a str {
        &self.authoring().idname
    }

    /// Identifier links use to address the socket.
    #[inline]
    pub fn identifier(self) -> &'a str {
        self.authoring().identifier()
    }

    /// Literal authored neighbors, in link order.
    ///
    /// For an input these are the producing outputs; for an output, the
    /// consuming inputs.
    pub fn direct_links(self) -> impl ExactSizeIterator<Item = Socket<'t, 'a>> {
        let tree = self.tree;
        tree.direct_pool[self.data().direct.range()]
            .iter()
            .map(move |&id| Socket::new(tree, id))
    }

    /// Effective neighbors after collapsing pass-through nodes.
    ///
    /// For an input these are the outputs that actually produce its value;
    /// for an output, the inputs that actually consume it. Empty for
    /// unconnected sockets and for chains that end in a dangling reroute.
    pub fn links(self) -> impl ExactSizeIterator<Item = Socket<'t, 'a>> {
        let tree = self.tree;
        tree.resolved_pool[self.data().resolved.range()]
            .iter()
            .map(move |&id| Socket::new(tree, id))
    }

    /// Returns true if at least one authored link touches this socket.
    #[inline]
    pub fn is_linked(self) -> bool {
        !self.data().direct.is_empty()
    }
}

impl PartialEq for Socket<'_, '_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && core::ptr::eq(self.tree, other.tree)
    }
}

impl Eq for Socket<'_, '_> {}

impl core::fmt::Debug for Socket<'_, '_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Socket")
            .field("id", &self.id)
            .field("node", &self.node().name())
            .field("direction", &self.direction())
            .field("name", &self.name())
            .finish()
    }
}
