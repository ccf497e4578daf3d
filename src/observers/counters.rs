//! Connection event counting.
//!
//! # Responsibilities
//! - Count each low-level connection event category
//! - Accept increments from the I/O thread while the test thread reads
//!
//! # Design Decisions
//! - One `RwLock` around all eight counters: notifications take the write
//!   guard, accessors the read guard
//! - Payloads are logged, never retained
//! - A poisoned lock is recovered, so a notification can never panic

use std::net::SocketAddr;
use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use crate::net::{ConnectionEventCallback, NativeHandle};

/// Point-in-time copy of every counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectionEventCounts {
    pub connection_accepted: u64,
    pub connection_accept_error: u64,
    pub connection_dropped: u64,
    pub connection_enqueued_for_accept_callback: u64,
    pub connection_dequeued_by_accept_callback: u64,
    pub backoff_started: u64,
    pub backoff_ended: u64,
    pub backoff_error: u64,
}

impl ConnectionEventCounts {
    /// Every counter paired with its name, in declaration order.
    pub fn entries(&self) -> [(&'static str, u64); 8] {
        [
            ("connection_accepted", self.connection_accepted),
            ("connection_accept_error", self.connection_accept_error),
            ("connection_dropped", self.connection_dropped),
            ("connection_enqueued_for_accept_callback", self.connection_enqueued_for_accept_callback),
            ("connection_dequeued_by_accept_callback", self.connection_dequeued_by_accept_callback),
            ("backoff_started", self.backoff_started),
            ("backoff_ended", self.backoff_ended),
            ("backoff_error", self.backoff_error),
        ]
    }
}

/// A [`ConnectionEventCallback`] that counts every notification it receives.
///
/// Counters start at zero and only ever increase.
#[derive(Debug, Default)]
pub struct EventCounterObserver {
    counts: RwLock<ConnectionEventCounts>,
}

impl EventCounterObserver {
    /// Create an observer with every counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(&self, counter: fn(&mut ConnectionEventCounts) -> &mut u64) {
        let mut counts = self.counts.write().unwrap_or_else(PoisonError::into_inner);
        *counter(&mut *counts) += 1;
    }

    fn read(&self) -> RwLockReadGuard<'_, ConnectionEventCounts> {
        self.counts.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read all counters under a single shared hold.
    pub fn snapshot(&self) -> ConnectionEventCounts {
        *self.read()
    }

    pub fn connection_accepted(&self) -> u64 {
        self.read().connection_accepted
    }

    pub fn connection_accept_error(&self) -> u64 {
        self.read().connection_accept_error
    }

    pub fn connection_dropped(&self) -> u64 {
        self.read().connection_dropped
    }

    pub fn connection_enqueued_for_accept_callback(&self) -> u64 {
        self.read().connection_enqueued_for_accept_callback
    }

    pub fn connection_dequeued_by_accept_callback(&self) -> u64 {
        self.read().connection_dequeued_by_accept_callback
    }

    pub fn backoff_started(&self) -> u64 {
        self.read().backoff_started
    }

    pub fn backoff_ended(&self) -> u64 {
        self.read().backoff_ended
    }

    pub fn backoff_error(&self) -> u64 {
        self.read().backoff_error
    }
}

impl ConnectionEventCallback for EventCounterObserver {
    fn on_connection_accepted(&self, handle: NativeHandle, addr: &SocketAddr) {
        tracing::trace!(handle = %handle, peer_addr = %addr, "Connection accepted");
        self.bump(|c| &mut c.connection_accepted);
    }

    fn on_connection_accept_error(&self, errno: i32) {
        tracing::trace!(errno, "Connection accept error");
        self.bump(|c| &mut c.connection_accept_error);
    }

    fn on_connection_dropped(&self, handle: NativeHandle, addr: &SocketAddr) {
        tracing::trace!(handle = %handle, peer_addr = %addr, "Connection dropped");
        self.bump(|c| &mut c.connection_dropped);
    }

    fn on_connection_enqueued_for_acceptor_callback(&self, handle: NativeHandle, addr: &SocketAddr) {
        tracing::trace!(handle = %handle, peer_addr = %addr, "Connection enqueued for accept callback");
        self.bump(|c| &mut c.connection_enqueued_for_accept_callback);
    }

    fn on_connection_dequeued_by_acceptor_callback(&self, handle: NativeHandle, addr: &SocketAddr) {
        tracing::trace!(handle = %handle, peer_addr = %addr, "Connection dequeued by accept callback");
        self.bump(|c| &mut c.connection_dequeued_by_accept_callback);
    }

    fn on_backoff_started(&self) {
        tracing::trace!("Accept backoff started");
        self.bump(|c| &mut c.backoff_started);
    }

    fn on_backoff_ended(&self) {
        tracing::trace!("Accept backoff ended");
        self.bump(|c| &mut c.backoff_ended);
    }

    fn on_backoff_error(&self) {
        tracing::trace!("Accept backoff error");
        self.bump(|c| &mut c.backoff_error);
    }
}
