//! Single-flight session refresh
//!
//! Every request that hits an expired session joins the coordinator. The
//! first one in becomes the leader and performs the refresh; everyone else
//! (leader included) waits in the pending queue. When the leader resolves the
//! flight, the queue is drained exactly once and the coordinator returns to
//! idle inside the same critical section, so no queued request can observe an
//! idle coordinator before it has been answered.

use crate::{Error, Result};
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, trace, warn};

/// New session token, or the refresh failure shared by every waiter
pub type RefreshOutcome = std::result::Result<String, Arc<Error>>;

/// A request suspended until the in-flight refresh resolves
#[derive(Debug)]
pub struct PendingRequest {
    sender: oneshot::Sender<RefreshOutcome>,
}

impl PendingRequest {
    fn new() -> (Self, oneshot::Receiver<RefreshOutcome>) {
        let (sender, receiver) = oneshot::channel();
        (Self { sender }, receiver)
    }

    /// Resume the request with the new token
    pub fn on_success(self, token: &str) {
        if self.sender.send(Ok(token.to_string())).is_err() {
            trace!("Pending request went away before the refresh succeeded");
        }
    }

    /// Fail the request with the refresh error
    pub fn on_failure(self, error: Arc<Error>) {
        if self.sender.send(Err(error)).is_err() {
            trace!("Pending request went away before the refresh failed");
        }
    }
}

#[derive(Debug, Default)]
struct RefreshState {
    refreshing: bool,
    queue: Vec<PendingRequest>,
    flights: u64,
    latest: Option<String>,
}

/// Owns the refresh-in-progress flag and the pending queue
///
/// Clones share state, so every clone of one API client refreshes through the
/// same coordinator while separate clients stay independent.
#[derive(Debug, Clone, Default)]
pub struct RefreshCoordinator {
    state: Arc<Mutex<RefreshState>>,
}

impl RefreshCoordinator {
    /// Create an idle coordinator
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a refresh is currently in flight
    pub fn is_refreshing(&self) -> bool {
        self.state.lock().refreshing
    }

    /// Number of requests waiting on the current flight
    pub fn pending_len(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Number of refresh flights started so far
    pub fn flights_started(&self) -> u64 {
        self.state.lock().flights
    }

    /// Queue the caller behind the current flight, starting one if idle
    pub fn join(&self) -> Ticket {
        let mut state = self.state.lock();
        self.enqueue(&mut state)
    }

    /// Like [`join`](Self::join), unless `sent` is already outdated
    ///
    /// A request that went out with a token older than the last refreshed one
    /// gets that token back at once instead of starting another flight. The
    /// check and the join share one critical section.
    pub fn join_unless_refreshed(&self, sent: &str) -> Ticket {
        let mut state = self.state.lock();
        if !state.refreshing
            && let Some(latest) = state.latest.as_deref().filter(|latest| *latest != sent)
        {
            debug!("Session already refreshed, skipping flight");
            let (pending, receiver) = PendingRequest::new();
            pending.on_success(latest);
            return Ticket {
                receiver,
                flight: None,
            };
        }
        self.enqueue(&mut state)
    }

    fn enqueue(&self, state: &mut RefreshState) -> Ticket {
        let (pending, receiver) = PendingRequest::new();
        state.queue.push(pending);

        let flight = if state.refreshing {
            debug!(
                queued = state.queue.len(),
                "Refresh already in flight, request queued"
            );
            None
        } else {
            state.refreshing = true;
            state.flights += 1;
            debug!(flight = state.flights, "Starting session refresh");
            Some(Flight {
                state: self.state.clone(),
                resolved: false,
            })
        };

        Ticket { receiver, flight }
    }

    /// Join the current flight, running `refresh` if the caller leads it
    pub async fn refresh_with<F, Fut>(&self, refresh: F) -> RefreshOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        let mut ticket = self.join();
        if let Some(flight) = ticket.take_flight() {
            let outcome = refresh().await.map_err(Arc::new);
            flight.resolve(&outcome);
        }
        ticket.wait().await
    }
}

/// A place in the pending queue, plus the flight itself for the leader
#[derive(Debug)]
pub struct Ticket {
    receiver: oneshot::Receiver<RefreshOutcome>,
    flight: Option<Flight>,
}

impl Ticket {
    /// Whether this ticket started the flight
    pub fn is_leader(&self) -> bool {
        self.flight.is_some()
    }

    /// Take the flight out of a leader ticket
    pub fn take_flight(&mut self) -> Option<Flight> {
        self.flight.take()
    }

    /// Wait for the flight to resolve
    ///
    /// A leader that never took its flight fails the flight here rather than
    /// waiting on itself.
    pub async fn wait(self) -> RefreshOutcome {
        let Ticket { receiver, flight } = self;
        drop(flight);

        receiver.await.unwrap_or_else(|_| {
            Err(Arc::new(Error::internal(
                "refresh coordinator dropped a pending request",
            )))
        })
    }
}

/// The leader's handle on an in-flight refresh
///
/// Dropping it unresolved (cancelled or panicking leader) fails every queued
/// request and returns the coordinator to idle.
#[derive(Debug)]
pub struct Flight {
    state: Arc<Mutex<RefreshState>>,
    resolved: bool,
}

impl Flight {
    /// Answer every queued request with `outcome`, then go idle
    ///
    /// Returns how many requests were drained.
    pub fn resolve(mut self, outcome: &RefreshOutcome) -> usize {
        self.resolved = true;
        drain(&self.state, outcome)
    }
}

impl Drop for Flight {
    fn drop(&mut self) {
        if !self.resolved {
            warn!("Session refresh abandoned before completion");
            let outcome = Err(Arc::new(Error::internal_with_context(
                "session refresh was interrupted",
                "refresh",
            )));
            drain(&self.state, &outcome);
        }
    }
}

fn drain(state: &Mutex<RefreshState>, outcome: &RefreshOutcome) -> usize {
    let mut state = state.lock();
    let queue = std::mem::take(&mut state.queue);
    let drained = queue.len();

    for pending in queue {
        match outcome {
            Ok(token) => pending.on_success(token),
            Err(error) => pending.on_failure(error.clone()),
        }
    }

    if let Ok(token) = outcome {
        state.latest = Some(token.clone());
    }
    state.refreshing = false;
    debug!(drained, success = outcome.is_ok(), "Refresh queue drained");
    drained
}
