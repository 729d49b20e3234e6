//! Frozen, indexed tree and its query surface.

#[cfg(not(feature = "std"))]
use alloc::{collections::BTreeMap, string::String, vec::Vec};
#[cfg(feature = "std")]
use std::collections::{BTreeMap, HashMap};

use crate::arena::Arena;
use crate::multimap::MultiMap;

use super::link::{Link, LinkData, LinkId};
use super::node::{Node, NodeData, NodeId};
use super::socket::{Socket, SocketData, SocketId};

/// Immutable snapshot of an authoring graph with precomputed indices.
///
/// Produced by [`TreeBuilder::freeze_and_index()`](super::TreeBuilder::freeze_and_index).
/// The tree borrows the authoring graph for `'a` and never changes after
/// construction, so it is `Send + Sync` and can be shared by reference across
/// threads without locking.
///
/// All collection queries return iterators with a known length; none of them
/// allocate.
pub struct VirtualTree<'a> {
    pub(crate) nodes: Arena<NodeId, NodeData<'a>>,
    pub(crate) sockets: Arena<SocketId, SocketData<'a>>,
    pub(crate) links: Arena<LinkId, LinkData>,
    pub(crate) direct_pool: Vec<SocketId>,
    pub(crate) resolved_pool: Vec<SocketId>,
    pub(crate) inputs_with_links: Vec<SocketId>,
    pub(crate) nodes_by_idname: MultiMap<&'a str, NodeId>,
    /// Sockets whose resolution stopped at a pass-through cycle.
    pub(crate) truncated: Vec<SocketId>,
}

/// Summary counts of a frozen tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeStats {
    /// Number of nodes.
    pub nodes: usize,
    /// Number of sockets, inputs and outputs.
    pub sockets: usize,
    /// Number of authored links.
    pub links: usize,
    /// Number of inputs with at least one direct link.
    pub inputs_with_links: usize,
    /// Number of nodes skipped by link resolution.
    pub pass_through_nodes: usize,
    /// Number of distinct node idnames.
    pub idnames: usize,
    /// Number of sockets whose resolution hit a pass-through cycle.
    pub truncated_cycles: usize,
}

impl<'a> VirtualTree<'a> {
    // --- Collections ---

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = Node<'_, 'a>> {
        (0..self.nodes.len() as u32).map(move |raw| Node::new(self, NodeId(raw)))
    }

    /// All sockets in id order.
    pub fn sockets(&self) -> impl ExactSizeIterator<Item = Socket<'_, 'a>> {
        (0..self.sockets.len() as u32).map(move |raw| Socket::new(self, SocketId(raw)))
    }

    /// All authored links in insertion order.
    pub fn links(&self) -> impl ExactSizeIterator<Item = Link<'_, 'a>> {
        (0..self.links.len() as u32).map(move |raw| Link::new(self, LinkId(raw)))
    }

    /// Input sockets with at least one direct link, in id order.
    pub fn inputs_with_links(&self) -> impl ExactSizeIterator<Item = Socket<'_, 'a>> {
        self.inputs_with_links
            .iter()
            .map(move |&id| Socket::new(self, id))
    }

    /// Nodes whose idname equals `idname`, in insertion order.
    ///
    /// Empty if no node has that idname.
    pub fn nodes_with_idname(&self, idname: &str) -> impl ExactSizeIterator<Item = Node<'_, 'a>> {
        self.nodes_by_idname
            .lookup(idname)
            .iter()
            .map(move |&id| Node::new(self, id))
    }

    /// Distinct node idnames in sorted order.
    pub fn idnames(&self) -> impl ExactSizeIterator<Item = &'a str> + '_ {
        self.nodes_by_idname.keys().copied()
    }

    /// Sockets whose resolution met a pass-through cycle and was truncated.
    pub fn cycle_truncated_sockets(&self) -> impl ExactSizeIterator<Item = Socket<'_, 'a>> {
        self.truncated.iter().map(move |&id| Socket::new(self, id))
    }

    // --- Counts ---

    /// Number of sockets. Socket ids run `0..socket_count()`.
    #[inline]
    pub fn socket_count(&self) -> usize {
        self.sockets.len()
    }

    /// Number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of authored links.
    #[inline]
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Summary counts.
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            nodes: self.nodes.len(),
            sockets: self.sockets.len(),
            links: self.links.len(),
            inputs_with_links: self.inputs_with_links.len(),
            pass_through_nodes: self.nodes.iter().filter(|n| n.pass_through).count(),
            idnames: self.nodes_by_idname.key_count(),
            truncated_cycles: self.truncated.len(),
        }
    }

    // --- Lookups by id ---

    /// View of the node with `id`, or `None` if the id is out of range.
    pub fn node(&self, id: NodeId) -> Option<Node<'_, 'a>> {
        self.nodes.get(id).map(|_| Node::new(self, id))
    }

    /// View of the socket with `id`, or `None` if the id is out of range.
    pub fn socket(&self, id: SocketId) -> Option<Socket<'_, 'a>> {
        self.sockets.get(id).map(|_| Socket::new(self, id))
    }

    /// View of the link with `id`, or `None` if the id is out of range.
    pub fn link(&self, id: LinkId) -> Option<Link<'_, 'a>> {
        self.links.get(id).map(|_| Link::new(self, id))
    }

    // --- Per-socket value mapping ---

    /// Maps every socket's type idname to a value, in socket id order.
    ///
    /// Sockets whose idname is missing from `map` get a clone of `default`.
    /// The result has exactly [`socket_count()`](Self::socket_count) entries
    /// and can be indexed by [`SocketId::index()`].
    pub fn map_socket_idnames<T, M>(&self, map: &M, default: &T) -> Vec<T>
    where
        T: Clone,
        M: SocketValueMap<T> + ?Sized,
    {
        self.sockets
            .iter()
            .map(|socket| map.value_for(&socket.authoring.idname).unwrap_or(default).clone())
            .collect()
    }

    /// Like [`map_socket_idnames()`](Self::map_socket_idnames), writing into
    /// a caller-provided buffer.
    ///
    /// # Panics
    ///
    /// Panics if `out.len() != socket_count()`.
    pub fn map_socket_idnames_into<T, M>(&self, map: &M, default: &T, out: &mut [T])
    where
        T: Clone,
        M: SocketValueMap<T> + ?Sized,
    {
        assert_eq!(
            out.len(),
            self.sockets.len(),
            "output buffer length does not match socket count"
        );
        for (slot, socket) in out.iter_mut().zip(self.sockets.iter()) {
            *slot = map
                .value_for(&socket.authoring.idname)
                .unwrap_or(default)
                .clone();
        }
    }
}

impl core::fmt::Debug for VirtualTree<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualTree")
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

/// A lookup table from socket type idnames to values.
///
/// Implemented for the usual string-keyed maps, so callers can pass whatever
/// they already have to [`VirtualTree::map_socket_idnames()`].
pub trait SocketValueMap<T> {
    /// Value stored for `idname`, if any.
    fn value_for(&self, idname: &str) -> Option<&T>;
}

impl<T> SocketValueMap<T> for BTreeMap<String, T> {
    fn value_for(&self, idname: &str) -> Option<&T> {
        self.get(idname)
    }
}

impl<T> SocketValueMap<T> for BTreeMap<&str, T> {
    fn value_for(&self, idname: &str) -> Option<&T> {
        self.get(idname)
    }
}

#[cfg(feature = "std")]
impl<T, S: core::hash::BuildHasher> SocketValueMap<T> for HashMap<String, T, S> {
    fn value_for(&self, idname: &str) -> Option<&T> {
        self.get(idname)
    }
}

#[cfg(feature = "std")]
impl<T, S: core::hash::BuildHasher> SocketValueMap<T> for HashMap<&str, T, S> {
    fn value_for(&self, idname: &str) -> Option<&T> {
        self.get(idname)
    }
}
