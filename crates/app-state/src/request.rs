//! Per-screen request tracking
//!
//! Each screen instance may have at most one backend request in flight.
//! Requests run as tokio tasks so navigation stays responsive; when a screen
//! leaves the navigation stack its request is aborted.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::{AbortHandle, JoinHandle};

/// Request tracking errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The screen already has a request in flight
    #[error("A request is already in progress")]
    Busy,

    /// The request was aborted before it finished
    #[error("Request cancelled")]
    Cancelled,
}

/// Result type for request tracking
pub type Result<T> = std::result::Result<T, RequestError>;

/// Request state of one screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    /// Nothing in flight; actions are enabled
    Idle,

    /// A request is in flight; actions are disabled
    Pending,
}

#[derive(Debug)]
struct Slot {
    id: u64,
    abort: AbortHandle,
}

#[derive(Debug, Default)]
struct Inner {
    slots: Mutex<HashMap<String, Slot>>,
    next_id: AtomicU64,
}

/// Table of in-flight requests keyed by screen key
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    inner: Arc<Inner>,
}

impl RequestTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `fut` on behalf of `screen`
    ///
    /// Fails with [`RequestError::Busy`] while the screen already has a
    /// request in flight.
    pub fn start<F, T>(&self, screen: &str, fut: F) -> Result<PendingRequest<T>>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let mut slots = self.inner.slots.lock();
        if slots.contains_key(screen) {
            tracing::debug!(screen, "request rejected, screen busy");
            return Err(RequestError::Busy);
        }

        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let handle = tokio::spawn(fut);
        let abort = handle.abort_handle();
        slots.insert(screen.to_string(), Slot { id, abort: abort.clone() });

        Ok(PendingRequest {
            handle,
            guard: SlotGuard { tracker: self.clone(), screen: screen.to_string(), id, abort },
        })
    }

    /// State of a screen
    pub fn state(&self, screen: &str) -> RequestState {
        if self.is_pending(screen) {
            RequestState::Pending
        } else {
            RequestState::Idle
        }
    }

    /// Whether a screen has a request in flight
    pub fn is_pending(&self, screen: &str) -> bool {
        self.inner.slots.lock().contains_key(screen)
    }

    /// Number of requests in flight
    pub fn pending_count(&self) -> usize {
        self.inner.slots.lock().len()
    }

    /// Abort the request of one screen; returns whether one was running
    pub fn cancel(&self, screen: &str) -> bool {
        match self.inner.slots.lock().remove(screen) {
            Some(slot) => {
                slot.abort.abort();
                tracing::debug!(screen, "request cancelled");
                true
            }
            None => false,
        }
    }

    /// Abort every request whose screen fails `is_live`
    pub fn retain(&self, mut is_live: impl FnMut(&str) -> bool) {
        self.inner.slots.lock().retain(|screen, slot| {
            let live = is_live(screen);
            if !live {
                slot.abort.abort();
                tracing::debug!(screen = %screen, "request cancelled, screen gone");
            }
            live
        });
    }

    /// Abort everything
    pub fn cancel_all(&self) {
        for (_, slot) in self.inner.slots.lock().drain() {
            slot.abort.abort();
        }
    }

    fn release(&self, screen: &str, id: u64) {
        let mut slots = self.inner.slots.lock();
        if slots.get(screen).is_some_and(|slot| slot.id == id) {
            slots.remove(screen);
        }
    }
}

/// Frees the screen's slot when the request is finished or dropped
///
/// A request dropped before it finished is aborted, so a freed slot never
/// has a task still running behind it.
#[derive(Debug)]
struct SlotGuard {
    tracker: RequestTracker,
    screen: String,
    id: u64,
    abort: AbortHandle,
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        // No-op once the task has finished
        self.abort.abort();
        self.tracker.release(&self.screen, self.id);
    }
}

/// A request started through [`RequestTracker::start`]
#[derive(Debug)]
pub struct PendingRequest<T> {
    handle: JoinHandle<T>,
    guard: SlotGuard,
}

impl<T> PendingRequest<T> {
    /// Key of the screen that owns the request
    pub fn screen(&self) -> &str {
        &self.guard.screen
    }

    /// Wait for the result
    ///
    /// Returns [`RequestError::Cancelled`] if the request was aborted.
    pub async fn wait(self) -> Result<T> {
        let PendingRequest { handle, guard } = self;
        let outcome = handle.await;
        drop(guard);

        match outcome {
            Ok(value) => Ok(value),
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(_) => Err(RequestError::Cancelled),
        }
    }
}
