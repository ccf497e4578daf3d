//! Callback contracts of the asynchronous socket framework.
//!
//! The framework invokes these synchronously from the thread that owns its
//! event loop. None of the methods may fail; implementations that need to
//! report something do so through their own state.

use std::net::SocketAddr;
use std::time::Instant;

use crate::net::error::{AcceptError, ConnectError};
use crate::net::handle::NativeHandle;

/// Metadata the framework attaches to each accepted connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcceptInfo {
    /// When the connection was queued for the accept callback, if it was.
    pub time_before_enqueue: Option<Instant>,
}

/// Low-level connection events from a listening socket.
pub trait ConnectionEventCallback: Send + Sync {
    fn on_connection_accepted(&self, handle: NativeHandle, addr: &SocketAddr);

    fn on_connection_accept_error(&self, errno: i32);

    fn on_connection_dropped(&self, handle: NativeHandle, addr: &SocketAddr);

    fn on_connection_enqueued_for_acceptor_callback(&self, handle: NativeHandle, addr: &SocketAddr);

    fn on_connection_dequeued_by_acceptor_callback(&self, handle: NativeHandle, addr: &SocketAddr);

    fn on_backoff_started(&self);

    fn on_backoff_ended(&self);

    fn on_backoff_error(&self);
}

/// Accept lifecycle of a listening socket.
///
/// For a given listening socket the framework calls these sequentially:
/// `accept_started`, any number of `connection_accepted` / `accept_error`,
/// then `accept_stopped`.
pub trait AcceptCallback: Send + Sync {
    /// A connection was accepted. The callee now owns `handle`.
    fn connection_accepted(&self, handle: NativeHandle, peer: &SocketAddr, info: AcceptInfo);

    /// Accepting failed.
    fn accept_error(&self, error: &AcceptError);

    /// The callback was installed and accepting began.
    fn accept_started(&self) {}

    /// The callback was removed; no further calls follow.
    fn accept_stopped(&self) {}
}

/// Progress of an outgoing connect.
pub trait ConnectCallback: Send + Sync {
    /// Called after the socket is created and before `connect()` is issued.
    fn pre_connect(&self, _handle: NativeHandle) {}

    fn connect_success(&self);

    fn connect_err(&self, error: &ConnectError);
}
