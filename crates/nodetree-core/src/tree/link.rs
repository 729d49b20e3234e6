//! Link ids, records, and the borrowed [`Link`] view.
//!
//! A link is a directed connection from a producing output socket to a
//! consuming input socket, exactly as authored. Link ids are assigned at
//! insertion time and stay stable through freezing.

use super::snapshot::VirtualTree;
use super::socket::{Socket, SocketId};

arena_id! {
    /// Identifier of an authored link, in insertion order.
    LinkId
}

/// Frozen link record.
pub(crate) struct LinkData {
    pub from: SocketId,
    pub to: SocketId,
}

/// Borrowed view of one link of a frozen tree.
#[derive(Clone, Copy)]
pub struct Link<'t, 'a> {
    tree: &'t VirtualTree<'a>,
    id: LinkId,
}

impl<'t, 'a> Link<'t, 'a> {
    #[inline]
    pub(crate) fn new(tree: &'t VirtualTree<'a>, id: LinkId) -> Self {
        Self { tree, id }
    }

    /// Insertion-order id of the link.
    #[inline]
    pub fn id(self) -> LinkId {
        self.id
    }

    /// The producing output socket.
    #[inline]
    pub fn from(self) -> Socket<'t, 'a> {
        Socket::new(self.tree, self.tree.links[self.id].from)
    }

    /// The consuming input socket.
    #[inline]
    pub fn to(self) -> Socket<'t, 'a> {
        Socket::new(self.tree, self.tree.links[self.id].to)
    }
}

impl PartialEq for Link<'_, '_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && core::ptr::eq(self.tree, other.tree)
    }
}

impl Eq for Link<'_, '_> {}

impl core::fmt::Debug for Link<'_, '_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let from = self.from();
        let to = self.to();
        write!(
            f,
            "Link({}: {}.{} -> {}.{})",
            self.id.0,
            from.node().name(),
            from.identifier(),
            to.node().name(),
            to.identifier()
        )
    }
}
