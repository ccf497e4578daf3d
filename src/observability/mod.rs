//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Observers produce:
//!     → tracing events (handle, peer_addr, errno, error fields)
//!
//! Consumers:
//!     → logging.rs (fmt subscriber, captured by the test harness)
//! ```
//!
//! # Design Decisions
//! - Per-notification events are `trace` level; ignored failures are `debug`
//! - Nothing is logged while a lock is held

pub mod logging;

pub use logging::init_logging;
