use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    /// The outgoing request queue is full or the event loop is gone
    #[error("Publish rejected by client: {0}")]
    Rejected(String),

    #[error("Publish failed: {0}")]
    Failed(String),
}

/// Fire-and-forget sink for twin updates
///
/// Implementations must return promptly; a slow or unreachable broker is
/// reported as an error, never waited out.
pub trait TwinPublisher: Send + Sync {
    fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), PublishError>;
}
