//! Connect callback that prepares the socket before connecting.

use crate::net::{ConnectCallback, ConnectError, NativeHandle};

/// A [`ConnectCallback`] that turns on `SO_REUSEADDR` before the connect is
/// issued.
///
/// Failure to set the option is logged and otherwise ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectHook;

impl ConnectHook {
    pub fn new() -> Self {
        Self
    }
}

impl ConnectCallback for ConnectHook {
    fn pre_connect(&self, handle: NativeHandle) {
        if let Err(e) = handle.set_reuse_address(true) {
            tracing::debug!(handle = %handle, error = %e, "Failed to set SO_REUSEADDR before connect");
        }
    }

    fn connect_success(&self) {
        tracing::trace!("Connect succeeded");
    }

    fn connect_err(&self, error: &ConnectError) {
        tracing::trace!(error = %error, "Connect failed");
    }
}
