//! Non-owning native socket handles.
//!
//! # Responsibilities
//! - Carry the platform socket handle through callback payloads
//! - Apply socket options to a handle the framework still owns

use std::fmt;
use std::io;

#[cfg(unix)]
use std::os::fd::{AsRawFd, BorrowedFd, RawFd};
#[cfg(windows)]
use std::os::windows::io::{AsRawSocket, BorrowedSocket, RawSocket};

#[cfg(unix)]
type Raw = RawFd;
#[cfg(windows)]
type Raw = RawSocket;

#[cfg(unix)]
const INVALID_RAW: Raw = -1;
#[cfg(windows)]
const INVALID_RAW: Raw = !0;

/// A native socket handle as handed out by the socket framework.
///
/// The handle is `Copy` and never closes the underlying socket. Whoever
/// passed it in keeps ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeHandle(Raw);

impl NativeHandle {
    /// The sentinel for "no socket".
    pub const INVALID: NativeHandle = NativeHandle(INVALID_RAW);

    /// Wrap a raw platform handle.
    pub const fn from_raw(raw: Raw) -> Self {
        Self(raw)
    }

    /// Get the raw platform handle.
    pub const fn as_raw(&self) -> Raw {
        self.0
    }

    /// Check whether this is something other than the invalid sentinel.
    ///
    /// A valid-looking handle may still refer to a closed socket.
    pub const fn is_valid(&self) -> bool {
        self.0 != INVALID_RAW
    }

    /// Borrow the handle of a live socket.
    #[cfg(unix)]
    pub fn of<S: AsRawFd>(socket: &S) -> Self {
        Self(socket.as_raw_fd())
    }

    /// Borrow the handle of a live socket.
    #[cfg(windows)]
    pub fn of<S: AsRawSocket>(socket: &S) -> Self {
        Self(socket.as_raw_socket())
    }

    /// Set `SO_REUSEADDR` on the socket behind this handle.
    ///
    /// The invalid sentinel is rejected with `InvalidInput` before any
    /// system call is made. A stale handle surfaces as the OS error
    /// (`EBADF` / `WSAENOTSOCK`).
    pub fn set_reuse_address(&self, enable: bool) -> io::Result<()> {
        if !self.is_valid() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid socket handle",
            ));
        }

        // SAFETY: the borrow does not outlive this call and is never closed
        // through. The framework keeps the socket open for the duration of
        // the callback that handed us the handle.
        #[cfg(unix)]
        let borrowed = unsafe { BorrowedFd::borrow_raw(self.as_raw()) };
        #[cfg(windows)]
        let borrowed = unsafe { BorrowedSocket::borrow_raw(self.as_raw()) };

        socket2::SockRef::from(&borrowed).set_reuse_address(enable)
    }
}

impl Default for NativeHandle {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for NativeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "sock-{}", self.as_raw())
        } else {
            write!(f, "sock-invalid")
        }
    }
}
