//! Pub/sub transport contract for real-time click events.

use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by a pub/sub transport.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The transport could not deliver the payload.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Contract for the external pub/sub transport.
///
/// The returned future resolves with the transport's own success or failure
/// signal. Callers that need a latency bound race it against a deadline; see
/// [`crate::application::services::EventPublisher`].
///
/// # Implementations
///
/// - [`crate::infrastructure::pubsub::RedisPublisher`] - Redis `PUBLISH`
/// - [`crate::infrastructure::pubsub::NullTransport`] - no-op for tests and
///   deployments without a realtime channel
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventTransport: Send + Sync {
    /// Delivers one payload on the named channel.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Transport`] when the transport reports a
    /// delivery failure.
    async fn publish(&self, channel: &str, payload: Vec<u8>) -> Result<(), PublishError>;
}
