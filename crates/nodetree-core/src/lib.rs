//! nodetree core - frozen, indexed snapshots of editor node graphs.
//!
//! Node editors keep their graphs in a mutable, editable form: nodes own
//! sockets, links point at sockets, and everything can change at any time.
//! Evaluators and code generators want something else: a structure that does
//! not move while they walk it, where every socket has a dense integer id and
//! connectivity is precomputed.
//!
//! This crate builds that structure in two phases:
//!
//! - [`TreeBuilder`]: the mutable phase. Add authoring nodes and links, one
//!   by one or with [`add_all_of_tree()`](TreeBuilder::add_all_of_tree).
//! - [`VirtualTree`]: the frozen phase, produced by the consuming
//!   [`freeze_and_index()`](TreeBuilder::freeze_and_index). Holds dense socket
//!   ids, direct and resolved links per socket, the list of linked inputs and
//!   an idname → nodes multimap. Read-only, `Send + Sync`.
//!
//! Because freezing consumes the builder, inserting after freezing, querying
//! indices before freezing and freezing twice are compile errors rather than
//! runtime assertions.
//!
//! # Resolved links
//!
//! Reroute-style nodes forward their single input to their outputs without
//! computing anything. Freezing collapses chains of such pass-through nodes so
//! that [`Socket::links()`] reports the effective producers (for inputs) or
//! consumers (for outputs), while [`Socket::direct_links()`] keeps the literal
//! authored edges. Which idnames count as pass-through is set by
//! [`FreezeOptions`].
//!
//! # Example
//!
//! ```rust
//! use nodetree_core::{AuthoringLink, AuthoringNode, AuthoringSocket, AuthoringTree, TreeBuilder};
//!
//! let tree = AuthoringTree::new("demo")
//!     .with_node(
//!         AuthoringNode::new("Value", "FunctionNodeValue")
//!             .with_output(AuthoringSocket::new("Value", "SocketFloat")),
//!     )
//!     .with_node(
//!         AuthoringNode::new("Reroute", "NodeReroute")
//!             .with_input(AuthoringSocket::new("Input", "SocketFloat"))
//!             .with_output(AuthoringSocket::new("Output", "SocketFloat")),
//!     )
//!     .with_node(
//!         AuthoringNode::new("Print", "FunctionNodePrint")
//!             .with_input(AuthoringSocket::new("Value", "SocketFloat")),
//!     )
//!     .with_link(AuthoringLink::new("Value", "Value", "Reroute", "Input"))
//!     .with_link(AuthoringLink::new("Reroute", "Output", "Print", "Value"));
//!
//! let mut builder = TreeBuilder::new();
//! builder.add_all_of_tree(&tree).unwrap();
//! let vtree = builder.freeze_and_index().unwrap();
//!
//! let print = vtree.nodes_with_idname("FunctionNodePrint").next().unwrap();
//! let input = print.input(0);
//! assert_eq!(input.direct_links().next().unwrap().node().name(), "Reroute");
//! assert_eq!(input.links().next().unwrap().node().name(), "Value");
//! assert_eq!(vtree.socket_count(), 4);
//! ```
//!
//! # no_std Support
//!
//! The crate is `no_std` compatible with `alloc`. Disable the default `std`
//! feature:
//!
//! ```toml
//! [dependencies]
//! nodetree-core = { version = "0.1", default-features = false }
//! ```
//!
//! Optional features: `tracing` (build and freeze diagnostics) and `serde`
//! (serialization of the authoring model and [`FreezeOptions`]).

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod arena;
pub mod authoring;
mod error;
mod multimap;
mod options;
pub mod tree;

pub use arena::{Arena, ArenaId, Span};
pub use authoring::{AuthoringLink, AuthoringNode, AuthoringSocket, AuthoringTree};
pub use error::GraphError;
pub use multimap::MultiMap;
pub use options::{CyclePolicy, DEFAULT_PASS_THROUGH, FreezeOptions};
pub use tree::{
    Link, LinkId, Node, NodeId, Socket, SocketDirection, SocketHandle, SocketId, SocketValueMap,
    TreeBuilder, TreeStats, VirtualTree,
};
