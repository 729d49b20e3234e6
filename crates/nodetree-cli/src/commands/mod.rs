//! CLI command implementations.

pub mod common;
pub mod inspect;
pub mod links;
pub mod options;
pub mod sockets;
pub mod validate;
