//! Sequential request queue used around login
//!
//! Right after a login the server may not have propagated the new session
//! yet, so requests fired in that window are run one at a time in arrival
//! order. Outside the window requests go straight through.

use super::error::QueueCleared;
use super::job::{Outcome, QueuedRequest};
use crate::config::QueueConfig;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Window after a completed login during which requests stay serialized
pub const AUTH_GRACE_PERIOD: Duration = Duration::from_millis(2000);

/// Pause after each successful queued request
pub const PACING_DELAY: Duration = Duration::from_millis(50);

#[derive(Default)]
struct QueueState {
    queue: VecDeque<QueuedRequest>,
    is_processing: bool,
    is_authenticating: bool,
    authentication_time: Option<Instant>,
    /// Bumped by `clear()` so a drain loop started before it stops picking up work
    generation: u64,
}

impl QueueState {
    fn in_grace_period(&self, now: Instant, grace_period: Duration) -> bool {
        self.authentication_time
            .is_some_and(|completed| now.saturating_duration_since(completed) < grace_period)
    }

    fn should_queue(&self, now: Instant, grace_period: Duration) -> bool {
        self.is_authenticating || self.in_grace_period(now, grace_period)
    }
}

struct Inner {
    state: Mutex<QueueState>,
    grace_period: Duration,
    pacing_delay: Duration,
}

/// Serializes API calls while a login is in progress and shortly after it.
///
/// Cloning is cheap and every clone drives the same queue.
#[derive(Clone)]
pub struct RequestQueue {
    inner: Arc<Inner>,
}

impl Default for RequestQueue {
    fn default() -> Self {
        Self::with_timing(AUTH_GRACE_PERIOD, PACING_DELAY)
    }
}

impl std::fmt::Debug for RequestQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock_state();
        f.debug_struct("RequestQueue")
            .field("pending", &state.queue.len())
            .field("is_processing", &state.is_processing)
            .field("is_authenticating", &state.is_authenticating)
            .field("grace_period", &self.inner.grace_period)
            .field("pacing_delay", &self.inner.pacing_delay)
            .finish()
    }
}

impl RequestQueue {
    /// Create a queue from configuration
    pub fn new(config: &QueueConfig) -> Self {
        Self::with_timing(config.grace_period(), config.pacing_delay())
    }

    /// Create a queue with explicit grace period and pacing delay
    pub fn with_timing(grace_period: Duration, pacing_delay: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(QueueState::default()),
                grace_period,
                pacing_delay,
            }),
        }
    }

    /// Run `operation` now, or behind every request already waiting when a
    /// login is in progress or has just completed.
    ///
    /// A request still waiting when [`clear`](Self::clear) is called fails
    /// with [`QueueCleared`]; any other outcome is the operation's own. A
    /// queued operation that panics does not stop the queue: the panic
    /// resumes in this caller, as it would for an operation run immediately.
    pub async fn enqueue<T, E, F, Fut>(&self, operation: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: From<QueueCleared> + Send + 'static,
    {
        match self.push(operation) {
            Ok(reply) => match reply.await {
                Ok(Ok(result)) => result,
                Ok(Err(panic)) => std::panic::resume_unwind(panic),
                Err(_) => Err(E::from(QueueCleared)),
            },
            Err(operation) => operation().await,
        }
    }

    /// Queue the operation if the window is open, otherwise hand it back
    fn push<T, E, F, Fut>(&self, operation: F) -> Result<oneshot::Receiver<Outcome<T, E>>, F>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: From<QueueCleared> + Send + 'static,
    {
        let mut state = self.lock_state();
        if !state.should_queue(Instant::now(), self.inner.grace_period) {
            return Err(operation);
        }

        let (tx, rx) = oneshot::channel();
        let request = QueuedRequest::new(operation, tx);
        debug!(
            "Queueing request {} behind {} waiting",
            request.id,
            state.queue.len()
        );
        state.queue.push_back(request);

        if !state.is_processing {
            state.is_processing = true;
            let generation = state.generation;
            tokio::spawn(self.clone().drain(generation));
        }

        Ok(rx)
    }

    /// Mark that a login flow has started
    pub fn start_authentication(&self) {
        let mut state = self.lock_state();
        state.is_authenticating = true;
        state.authentication_time = None;
        info!("Authentication started, serializing API requests");
    }

    /// Mark that a login flow obtained credentials
    pub fn complete_authentication(&self) {
        let mut state = self.lock_state();
        state.is_authenticating = false;
        state.authentication_time = Some(Instant::now());
        info!(
            "Authentication completed, serializing API requests for {:?}",
            self.inner.grace_period
        );
    }

    /// Reject every waiting request and reset to the initial state.
    ///
    /// A request that is already executing is left to settle on its own.
    pub fn clear(&self) {
        let rejected: Vec<QueuedRequest> = {
            let mut state = self.lock_state();
            state.generation = state.generation.wrapping_add(1);
            state.is_processing = false;
            state.is_authenticating = false;
            state.authentication_time = None;
            state.queue.drain(..).collect()
        };

        if !rejected.is_empty() {
            warn!("Clearing request queue, rejecting {} waiting requests", rejected.len());
        }
        for request in rejected {
            debug!("Rejecting queued request {}", request.id);
            request.reject();
        }
    }

    /// Number of requests waiting for their turn
    pub fn pending(&self) -> usize {
        self.lock_state().queue.len()
    }

    pub fn is_authenticating(&self) -> bool {
        self.lock_state().is_authenticating
    }

    /// Whether a completed login is recent enough to keep serializing
    pub fn in_grace_period(&self) -> bool {
        self.lock_state()
            .in_grace_period(Instant::now(), self.inner.grace_period)
    }

    /// Whether a request issued now would be queued
    pub fn should_queue(&self) -> bool {
        self.lock_state()
            .should_queue(Instant::now(), self.inner.grace_period)
    }

    pub fn grace_period(&self) -> Duration {
        self.inner.grace_period
    }

    pub fn pacing_delay(&self) -> Duration {
        self.inner.pacing_delay
    }

    async fn drain(self, generation: u64) {
        loop {
            let request = {
                let mut state = self.lock_state();
                if state.generation != generation {
                    debug!("Queue was cleared, stopping stale drain loop");
                    return;
                }
                match state.queue.pop_front() {
                    Some(request) => request,
                    None => {
                        state.is_processing = false;
                        return;
                    }
                }
            };

            let id = request.id.clone();
            debug!("Executing queued request {}", id);
            if request.run().await {
                tokio::time::sleep(self.inner.pacing_delay).await;
            } else {
                debug!("Queued request {} failed", id);
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, QueueState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
