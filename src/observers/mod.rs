//! Test observers for the socket framework's callbacks.
//!
//! # Data Flow
//! ```text
//! I/O thread (framework event loop)
//!     → counters.rs     (ConnectionEventCallback → RwLock'd counts)
//!     → journal.rs      (AcceptCallback → ordered Journal → optional hook)
//!     → connect_hook.rs (ConnectCallback → SO_REUSEADDR before connect)
//!
//! Test thread:
//!     → counter accessors / snapshot
//!     → Journal::wait_for_appended → snapshot / lock
//! ```
//!
//! # Design Decisions
//! - Observers are purely reactive; they never schedule work
//! - No notification returns an error or panics on its own account
//! - Hook failures are the hook's problem and propagate unchanged

pub mod connect_hook;
pub mod counters;
pub mod journal;

pub use connect_hook::ConnectHook;
pub use counters::{ConnectionEventCounts, EventCounterObserver};
pub use journal::{AcceptEvent, EventJournalRecorder, Journal};
