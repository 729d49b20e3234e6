//! Errors reported while building or freezing a tree.

#[cfg(not(feature = "std"))]
use alloc::string::String;

use crate::tree::{SocketDirection, SocketId};

/// Errors that can occur while importing authoring data or freezing.
///
/// Phase misuse (inserting after freezing, querying before freezing) is not
/// represented here: the builder/tree split rules it out at compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Two authoring nodes share a name, so links naming it are ambiguous.
    DuplicateNodeName(String),
    /// A link names a node that is not part of the tree.
    UnknownNode {
        /// Position of the link in the authoring tree.
        link: usize,
        /// The missing node name.
        node: String,
    },
    /// A link names a socket its node does not have.
    UnknownSocket {
        /// Position of the link in the authoring tree.
        link: usize,
        /// Name of the node that was found.
        node: String,
        /// The missing socket identifier.
        socket: String,
        /// Which side of the node was searched.
        direction: SocketDirection,
    },
    /// Link resolution ran into a cycle of pass-through nodes while
    /// [`CyclePolicy::Reject`](crate::CyclePolicy::Reject) was selected.
    PassThroughCycle {
        /// The socket whose resolution walk found the cycle.
        socket: SocketId,
    },
}

impl core::fmt::Display for GraphError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::DuplicateNodeName(name) => write!(f, "duplicate node name '{name}'"),
            Self::UnknownNode { link, node } => {
                write!(f, "link {link} references unknown node '{node}'")
            }
            Self::UnknownSocket {
                link,
                node,
                socket,
                direction,
            } => write!(
                f,
                "link {link} references unknown {direction} socket '{socket}' on node '{node}'"
            ),
            Self::PassThroughCycle { socket } => {
                write!(f, "pass-through cycle while resolving links of {socket}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GraphError {}
