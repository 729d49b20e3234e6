//! Virtual node tree: builder, freeze-and-index, and the frozen query surface.
//!
//! # Architecture
//!
//! The module uses a **two-type split**:
//!
//! - [`TreeBuilder`]: mutable phase. Holds pending node, socket and link
//!   records in [`Arena`](crate::Arena)s. Only insertion operations exist here.
//! - [`VirtualTree`]: frozen phase, returned by the consuming
//!   [`freeze_and_index()`](TreeBuilder::freeze_and_index). Only queries exist
//!   here. Nothing can be inserted after freezing because the builder is gone.
//!
//! Frozen records refer to each other by dense ids ([`NodeId`], [`SocketId`],
//! [`LinkId`]). Queries hand out borrowed views ([`Node`], [`Socket`],
//! [`Link`]) that pair an id with the tree, so navigation reads like pointer
//! chasing without any shared ownership.
//!
//! # Indexing
//!
//! Freezing computes, in order:
//!
//! 1. dense socket ids: node order, inputs before outputs;
//! 2. direct links per socket: producers for inputs, consumers for outputs;
//! 3. resolved links per socket: direct links with pass-through chains
//!    collapsed (see [`FreezeOptions`](crate::FreezeOptions));
//! 4. the inputs that have at least one direct link;
//! 5. the idname → nodes multimap.
//!
//! Per-socket link lists are stored flattened in two pools; each socket keeps
//! a [`Span`](crate::Span) into them.

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub(crate) u32);

        impl $name {
            /// Returns the id as an index, usable for parallel arrays.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl $crate::arena::ArenaId for $name {
            #[inline]
            fn from_index(index: usize) -> Self {
                Self(index as u32)
            }

            #[inline]
            fn to_index(self) -> usize {
                self.0 as usize
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

mod builder;
mod checked;
mod freeze;
pub mod link;
pub mod node;
mod snapshot;
pub mod socket;

pub use builder::TreeBuilder;
pub use link::{Link, LinkId};
pub use node::{Node, NodeId};
pub use snapshot::{SocketValueMap, TreeStats, VirtualTree};
pub use socket::{Socket, SocketDirection, SocketHandle, SocketId};
