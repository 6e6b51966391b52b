//! Type-erased queued requests

use super::error::QueueCleared;
use async_trait::async_trait;
use futures_util::FutureExt;
use rand::Rng;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use tokio::sync::oneshot;
use tracing::{debug, warn};

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

/// What a queued request sends back: the operation's own result, or the
/// payload of a panic raised while running it
pub(crate) type Outcome<T, E> = std::thread::Result<Result<T, E>>;

/// Work waiting in the queue, independent of the caller's result type
#[async_trait]
pub(crate) trait Job: Send {
    /// Run the operation and hand its outcome to the caller.
    /// Returns whether the operation succeeded; a panic counts as a failure.
    async fn run(self: Box<Self>) -> bool;

    /// Settle the caller with [`QueueCleared`] without running the operation
    fn reject(self: Box<Self>);
}

struct Pending<F, T, E> {
    operation: F,
    reply: oneshot::Sender<Outcome<T, E>>,
}

#[async_trait]
impl<F, Fut, T, E> Job for Pending<F, T, E>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: From<QueueCleared> + Send + 'static,
{
    async fn run(self: Box<Self>) -> bool {
        let Pending { operation, reply } = *self;
        let outcome = AssertUnwindSafe(async move { operation().await })
            .catch_unwind()
            .await;
        if outcome.is_err() {
            warn!("Queued operation panicked, handing the panic back to its caller");
        }
        let succeeded = matches!(outcome, Ok(Ok(_)));
        if reply.send(outcome).is_err() {
            debug!("Caller went away before its queued request settled");
        }
        succeeded
    }

    fn reject(self: Box<Self>) {
        let _ = self.reply.send(Ok(Err(E::from(QueueCleared))));
    }
}

/// A request waiting for its turn in the drain loop
pub(crate) struct QueuedRequest {
    pub id: String,
    job: Box<dyn Job>,
}

impl QueuedRequest {
    pub fn new<F, Fut, T, E>(operation: F, reply: oneshot::Sender<Outcome<T, E>>) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: From<QueueCleared> + Send + 'static,
    {
        Self {
            id: request_id(),
            job: Box::new(Pending { operation, reply }),
        }
    }

    pub async fn run(self) -> bool {
        self.job.run().await
    }

    pub fn reject(self) {
        self.job.reject();
    }
}

/// Short pseudo-random base-36 id, only used to tell requests apart in logs
fn request_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_shape() {
        let id = request_id();
        assert_eq!(id.len(), ID_LEN);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[tokio::test]
    async fn test_run_delivers_outcome() {
        let (tx, rx) = oneshot::channel();
        let request = QueuedRequest::new(|| async { Ok::<_, anyhow::Error>(7) }, tx);

        assert!(request.run().await);
        assert_eq!(rx.await.unwrap().unwrap().unwrap(), 7);
    }

    #[tokio::test]
    async fn test_run_reports_failure() {
        let (tx, rx) = oneshot::channel();
        let request = QueuedRequest::new(
            || async { Err::<u8, _>(anyhow::anyhow!("boom")) },
            tx,
        );

        assert!(!request.run().await);
        assert_eq!(
            rx.await.unwrap().unwrap().unwrap_err().to_string(),
            "boom"
        );
    }

    #[tokio::test]
    async fn test_reject_sends_cleared() {
        let (tx, rx) = oneshot::channel();
        let request = QueuedRequest::new(|| async { Ok::<_, anyhow::Error>(()) }, tx);

        request.reject();
        let err = rx.await.unwrap().unwrap().unwrap_err();
        assert!(err.downcast_ref::<QueueCleared>().is_some());
    }

    fn explode() -> Result<u8, anyhow::Error> {
        panic!("operation blew up")
    }

    #[tokio::test]
    async fn test_run_hands_back_panic() {
        let (tx, rx) = oneshot::channel();
        let request = QueuedRequest::new(|| async { explode() }, tx);

        assert!(!request.run().await);
        let payload = rx.await.unwrap().unwrap_err();
        assert_eq!(payload.downcast_ref::<&str>(), Some(&"operation blew up"));
    }
}
