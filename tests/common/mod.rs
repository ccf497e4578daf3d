//! Shared utilities for integration testing.
//!
//! A minimal stand-in for the socket framework: a loopback listener that
//! fires accept callbacks from its own task, and a connector that brackets a
//! TCP connect with connect callbacks.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use accept_probe::{
    AcceptCallback, AcceptError, AcceptInfo, ConnectCallback, ConnectError, ConnectHook,
    ConnectionEventCallback, NativeHandle,
};
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tokio::task::JoinHandle;

/// Bind a loopback listener.
pub async fn bind_listener(bind_address: &str) -> (TcpListener, SocketAddr) {
    let listener = TcpListener::bind(bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, addr)
}

/// Accept `expected` connections, reporting each step to the callbacks.
///
/// Accepted streams are returned so their handles stay open until the test
/// is done with them.
pub fn start_acceptor(
    listener: TcpListener,
    expected: usize,
    events: Arc<dyn ConnectionEventCallback>,
    accept: Arc<dyn AcceptCallback>,
) -> JoinHandle<Vec<TcpStream>> {
    tokio::spawn(async move {
        let mut streams = Vec::with_capacity(expected);
        accept.accept_started();

        while streams.len() < expected {
            match listener.accept().await {
                Ok((stream, peer)) => {
                    let handle = NativeHandle::of(&stream);
                    let queued_at = Instant::now();
                    events.on_connection_accepted(handle, &peer);
                    events.on_connection_enqueued_for_acceptor_callback(handle, &peer);
                    events.on_connection_dequeued_by_acceptor_callback(handle, &peer);
                    accept.connection_accepted(
                        handle,
                        &peer,
                        AcceptInfo {
                            time_before_enqueue: Some(queued_at),
                        },
                    );
                    streams.push(stream);
                }
                Err(e) => {
                    events.on_connection_accept_error(e.raw_os_error().unwrap_or_default());
                    accept.accept_error(&AcceptError::from(e));
                    break;
                }
            }
        }

        accept.accept_stopped();
        streams
    })
}

/// Result of a connect driven through a [`ConnectCallback`].
pub struct Connected {
    pub stream: TcpStream,
    /// `SO_REUSEADDR` as observed between `pre_connect` and `connect()`.
    pub reuse_address_at_connect: bool,
}

/// Connect to `addr`, calling `pre_connect` on the fresh socket and then
/// exactly one of `connect_success` / `connect_err`.
pub async fn connect_with(addr: SocketAddr, callback: &dyn ConnectCallback) -> Result<Connected, ConnectError> {
    let socket = TcpSocket::new_v4()?;
    socket.set_reuseaddr(false)?;

    callback.pre_connect(NativeHandle::of(&socket));
    let reuse_address_at_connect = socket.reuseaddr()?;

    match socket.connect(addr).await {
        Ok(stream) => {
            callback.connect_success();
            Ok(Connected {
                stream,
                reuse_address_at_connect,
            })
        }
        Err(e) => {
            let err = ConnectError::from(e);
            callback.connect_err(&err);
            Err(err)
        }
    }
}

/// A connect callback that applies [`ConnectHook`] and records the outcome.
#[derive(Default)]
pub struct RecordingConnect {
    hook: ConnectHook,
    pub outcomes: Mutex<Vec<&'static str>>,
}

impl ConnectCallback for RecordingConnect {
    fn pre_connect(&self, handle: NativeHandle) {
        self.hook.pre_connect(handle);
        self.outcomes.lock().unwrap().push("pre_connect");
    }

    fn connect_success(&self) {
        self.hook.connect_success();
        self.outcomes.lock().unwrap().push("success");
    }

    fn connect_err(&self, error: &ConnectError) {
        self.hook.connect_err(error);
        self.outcomes.lock().unwrap().push("error");
    }
}
