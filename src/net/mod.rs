//! Socket boundary types.
//!
//! # Data Flow
//! ```text
//! Listening socket (external event loop)
//!     → ConnectionEventCallback (accept, drop, queue, backoff notifications)
//!     → AcceptCallback (started → accepted* / error* → stopped)
//!
//! Connecting socket (external event loop)
//!     → ConnectCallback (pre_connect → success | error)
//! ```
//!
//! # Design Decisions
//! - The accept/connect machinery is a black box; only its callback
//!   contracts live here
//! - Callbacks take `&self` and are `Send + Sync` so one observer can be
//!   shared between the I/O thread and the asserting thread
//! - Handles are borrowed, never owned, by anything in this crate

pub mod callback;
pub mod error;
pub mod handle;

pub use callback::{AcceptCallback, AcceptInfo, ConnectCallback, ConnectionEventCallback};
pub use error::{AcceptError, ConnectError};
pub use handle::NativeHandle;
