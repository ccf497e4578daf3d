//! Ordered accept-lifecycle journal.
//!
//! # Responsibilities
//! - Append one record per accept callback, in invocation order
//! - Run the optional test-supplied hook after each append
//! - Let the asserting thread wait for, snapshot, or edit the log
//!
//! # Design Decisions
//! - Records live behind a shareable [`Journal`] handle so a hook can look at
//!   the log it is being called from
//! - The journal lock is released before a hook runs
//! - Hooks are set through `&mut self`; once the recorder is shared they are
//!   fixed
//! - A panicking hook is not caught

use std::fmt;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;

use crate::net::{AcceptCallback, AcceptError, AcceptInfo, NativeHandle};

/// One recorded accept-lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptEvent {
    Start,
    Accepted { handle: NativeHandle, peer: SocketAddr },
    Error { message: String },
    Stop,
}

impl AcceptEvent {
    /// Short name of the event kind, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AcceptEvent::Start => "start",
            AcceptEvent::Accepted { .. } => "accept",
            AcceptEvent::Error { .. } => "error",
            AcceptEvent::Stop => "stop",
        }
    }
}

/// Shared handle to the recorded events.
#[derive(Debug, Clone)]
pub struct Journal {
    events: Arc<Mutex<Vec<AcceptEvent>>>,
    /// Total records appended since creation.
    appended: Arc<watch::Sender<usize>>,
}

impl Journal {
    fn new() -> Self {
        let (tx, _) = watch::channel(0);
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            appended: Arc::new(tx),
        }
    }

    fn append(&self, event: AcceptEvent) {
        let kind = event.kind();
        let index = {
            let mut events = self.lock();
            events.push(event);
            events.len() - 1
        };
        self.appended.send_modify(|n| *n += 1);
        tracing::trace!(index, kind, "Accept event recorded");
    }

    /// Lock the live event sequence.
    ///
    /// The caller may inspect or edit it. Holding the guard blocks the
    /// recorder, so release it before the framework dispatches again.
    pub fn lock(&self) -> MutexGuard<'_, Vec<AcceptEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the events recorded so far.
    pub fn snapshot(&self) -> Vec<AcceptEvent> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of records appended over the journal's lifetime.
    ///
    /// Edits made through [`Journal::lock`] do not change this.
    pub fn appended(&self) -> usize {
        *self.appended.borrow()
    }

    /// Wait until at least `count` records have been appended.
    ///
    /// Returns `false` if `timeout` elapses first. Once this returns `true`
    /// every append it counted is visible to the caller.
    pub async fn wait_for_appended(&self, count: usize, timeout: Duration) -> bool {
        let mut rx = self.appended.subscribe();
        let reached = tokio::time::timeout(timeout, rx.wait_for(|&n| n >= count))
            .await
            .map(|seen| seen.is_ok());

        match reached {
            Ok(reached) => reached,
            Err(_) => {
                tracing::debug!(
                    expected = count,
                    appended = self.appended(),
                    "Timed out waiting for accept events"
                );
                false
            }
        }
    }
}

type LifecycleHook = Box<dyn Fn() + Send + Sync>;
type AcceptedHook = Box<dyn Fn(NativeHandle, &SocketAddr) + Send + Sync>;
type ErrorHook = Box<dyn Fn(&AcceptError) + Send + Sync>;

/// An [`AcceptCallback`] that journals every callback and then runs an
/// optional hook for it.
pub struct EventJournalRecorder {
    journal: Journal,
    accept_started_hook: Option<LifecycleHook>,
    connection_accepted_hook: Option<AcceptedHook>,
    accept_error_hook: Option<ErrorHook>,
    accept_stopped_hook: Option<LifecycleHook>,
}

impl EventJournalRecorder {
    pub fn new() -> Self {
        Self {
            journal: Journal::new(),
            accept_started_hook: None,
            connection_accepted_hook: None,
            accept_error_hook: None,
            accept_stopped_hook: None,
        }
    }

    /// Handle to the journal. Clones observe the same records.
    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }

    /// Copy of the events recorded so far.
    pub fn events(&self) -> Vec<AcceptEvent> {
        self.journal.snapshot()
    }

    pub fn set_accept_started_hook(&mut self, hook: impl Fn() + Send + Sync + 'static) {
        self.accept_started_hook = Some(Box::new(hook));
    }

    pub fn set_connection_accepted_hook(
        &mut self,
        hook: impl Fn(NativeHandle, &SocketAddr) + Send + Sync + 'static,
    ) {
        self.connection_accepted_hook = Some(Box::new(hook));
    }

    pub fn set_accept_error_hook(&mut self, hook: impl Fn(&AcceptError) + Send + Sync + 'static) {
        self.accept_error_hook = Some(Box::new(hook));
    }

    pub fn set_accept_stopped_hook(&mut self, hook: impl Fn() + Send + Sync + 'static) {
        self.accept_stopped_hook = Some(Box::new(hook));
    }

    pub fn with_accept_started_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.set_accept_started_hook(hook);
        self
    }

    pub fn with_connection_accepted_hook(
        mut self,
        hook: impl Fn(NativeHandle, &SocketAddr) + Send + Sync + 'static,
    ) -> Self {
        self.set_connection_accepted_hook(hook);
        self
    }

    pub fn with_accept_error_hook(mut self, hook: impl Fn(&AcceptError) + Send + Sync + 'static) -> Self {
        self.set_accept_error_hook(hook);
        self
    }

    pub fn with_accept_stopped_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.set_accept_stopped_hook(hook);
        self
    }
}

impl Default for EventJournalRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventJournalRecorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventJournalRecorder")
            .field("journal", &self.journal)
            .field("accept_started_hook", &self.accept_started_hook.is_some())
            .field("connection_accepted_hook", &self.connection_accepted_hook.is_some())
            .field("accept_error_hook", &self.accept_error_hook.is_some())
            .field("accept_stopped_hook", &self.accept_stopped_hook.is_some())
            .finish()
    }
}

impl AcceptCallback for EventJournalRecorder {
    fn connection_accepted(&self, handle: NativeHandle, peer: &SocketAddr, _info: AcceptInfo) {
        tracing::trace!(handle = %handle, peer_addr = %peer, "Accept callback: connection accepted");
        self.journal.append(AcceptEvent::Accepted { handle, peer: *peer });

        if let Some(hook) = &self.connection_accepted_hook {
            hook(handle, peer);
        }
    }

    fn accept_error(&self, error: &AcceptError) {
        tracing::trace!(error = %error, "Accept callback: accept error");
        self.journal.append(AcceptEvent::Error {
            message: error.to_string(),
        });

        if let Some(hook) = &self.accept_error_hook {
            hook(error);
        }
    }

    fn accept_started(&self) {
        tracing::trace!("Accept callback: started");
        self.journal.append(AcceptEvent::Start);

        if let Some(hook) = &self.accept_started_hook {
            hook();
        }
    }

    fn accept_stopped(&self) {
        tracing::trace!("Accept callback: stopped");
        self.journal.append(AcceptEvent::Stop);

        if let Some(hook) = &self.accept_stopped_hook {
            hook();
        }
    }
}
