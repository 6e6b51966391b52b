use thiserror::Error;

/// Raised for every request still waiting in line when the queue is cleared.
///
/// Kept as its own type so callers can tell "my request failed" apart from
/// "my request was discarded at logout".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Request queue cleared")]
pub struct QueueCleared;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message() {
        assert_eq!(QueueCleared.to_string(), "Request queue cleared");
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = QueueCleared.into();
        assert!(err.downcast_ref::<QueueCleared>().is_some());
    }
}
