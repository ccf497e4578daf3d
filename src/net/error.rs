//! Errors delivered to callbacks by the socket framework.

use std::io;
use thiserror::Error;

/// An accept failure reported to an [`AcceptCallback`](super::AcceptCallback).
///
/// The `Display` output is the human-readable message the journal records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcceptError {
    /// `accept()` failed at the OS level.
    #[error("accept failed: {message}")]
    Os { errno: i32, message: String },

    /// Any other failure, described by its message alone.
    #[error("{0}")]
    Message(String),
}

impl AcceptError {
    /// Build an error that displays as exactly `message`.
    pub fn message(message: impl Into<String>) -> Self {
        AcceptError::Message(message.into())
    }

    /// The OS error number, when there is one.
    pub fn errno(&self) -> Option<i32> {
        match self {
            AcceptError::Os { errno, .. } => Some(*errno),
            AcceptError::Message(_) => None,
        }
    }
}

impl From<io::Error> for AcceptError {
    fn from(e: io::Error) -> Self {
        match e.raw_os_error() {
            Some(errno) => AcceptError::Os {
                errno,
                message: e.to_string(),
            },
            None => AcceptError::Message(e.to_string()),
        }
    }
}

/// A connect failure reported to a [`ConnectCallback`](super::ConnectCallback).
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("connection refused")]
    Refused,

    #[error("connect timed out")]
    TimedOut,

    #[error("connect failed: {0}")]
    Io(#[source] io::Error),
}

impl From<io::Error> for ConnectError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::ConnectionRefused => ConnectError::Refused,
            io::ErrorKind::TimedOut => ConnectError::TimedOut,
            _ => ConnectError::Io(e),
        }
    }
}
