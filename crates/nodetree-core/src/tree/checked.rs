//! Debug-build self checks for positional socket access.
//!
//! Compiled to no-ops without `debug_assertions`; these checks guard consumer
//! code against socket layout drift and are not part of the production
//! contract.

use super::socket::Socket;

#[cfg(debug_assertions)]
pub(crate) fn socket_name(socket: Socket<'_, '_>, expected: &str) {
    assert!(
        socket.name() == expected,
        "{} socket {} of node '{}' is named '{}', expected '{}'",
        socket.direction(),
        socket.index(),
        socket.node().name(),
        socket.name(),
        expected
    );
}

#[cfg(not(debug_assertions))]
#[inline(always)]
pub(crate) fn socket_name(_socket: Socket<'_, '_>, _expected: &str) {}
