//! No-op transport for deployments without a real-time channel.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::repositories::event_transport::{EventTransport, PublishError};

/// [`EventTransport`] that discards every payload.
///
/// Used when no pub/sub endpoint is configured and in tests that only care
/// about the store side of a visit.
#[derive(Debug, Default)]
pub struct NullTransport;

impl NullTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventTransport for NullTransport {
    async fn publish(&self, channel: &str, payload: Vec<u8>) -> Result<(), PublishError> {
        debug!(channel, bytes = payload.len(), "discarding click event (null transport)");
        Ok(())
    }
}
