use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::time::Instant;
use tracing::debug;

/// Trailing-edge debounce for search-as-you-type style inputs.
///
/// Every `call` restarts the wait; the callback sees only the last value
/// once `wait` passes without a new call. Dropping the debouncer does not
/// cancel a pending value, it still fires when its wait runs out.
pub struct Debouncer<T> {
    tx: UnboundedSender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Must be called from within a tokio runtime
    pub fn new<F>(wait: Duration, mut callback: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<T>();

        tokio::spawn(async move {
            while let Some(mut latest) = rx.recv().await {
                let deadline = tokio::time::sleep(wait);
                tokio::pin!(deadline);
                loop {
                    tokio::select! {
                        next = rx.recv() => match next {
                            Some(value) => {
                                latest = value;
                                deadline.as_mut().reset(Instant::now() + wait);
                            }
                            None => {
                                deadline.as_mut().await;
                                callback(latest);
                                return;
                            }
                        },
                        _ = &mut deadline => {
                            callback(latest);
                            break;
                        }
                    }
                }
            }
        });

        Self { tx }
    }

    pub fn call(&self, value: T) {
        if self.tx.send(value).is_err() {
            debug!("Debounce task has stopped, dropping value");
        }
    }
}
