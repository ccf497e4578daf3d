//! Test instrumentation for asynchronous accept and connect sockets.
//!
//! Observers that a socket framework calls from its I/O thread, and that a
//! test thread reads back to assert on event counts, ordering and payloads.
//!
//! # Architecture Overview
//!
//! ```text
//!     framework event loop                         test thread
//!     ────────────────────                         ───────────
//!     ConnectionEventCallback ──▶ EventCounterObserver ──▶ counters / snapshot
//!     AcceptCallback          ──▶ EventJournalRecorder ──▶ Journal (wait, snapshot, lock)
//!                                       └──▶ optional hooks (run inline)
//!     ConnectCallback         ──▶ ConnectHook (SO_REUSEADDR before connect)
//! ```

// Callback contracts
pub mod net;

// Observers
pub mod observers;

// Cross-cutting concerns
pub mod config;
pub mod observability;

pub use config::ProbeConfig;
pub use net::{AcceptCallback, AcceptError, AcceptInfo, ConnectCallback, ConnectError, ConnectionEventCallback, NativeHandle};
pub use observers::{AcceptEvent, ConnectHook, ConnectionEventCounts, EventCounterObserver, EventJournalRecorder, Journal};
