//! Best-effort click event publishing with a hard latency ceiling.
//!
//! Analytics publishing must never delay the user-facing redirect. The
//! publisher races the transport's completion against a deadline and returns
//! as soon as either resolves; a publish still in flight at the deadline is
//! abandoned to finish (or fail) silently in the background. Nothing on this
//! path is ever surfaced to the caller as an error.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::click_event::ClickMessage;
use crate::domain::repositories::event_transport::EventTransport;

/// Default ceiling on the latency a publish may add to a redirect.
pub const DEFAULT_PUBLISH_TIMEOUT: Duration = Duration::from_secs(1);

/// Fire-and-forget publisher over an [`EventTransport`].
pub struct EventPublisher {
    transport: Arc<dyn EventTransport>,
    timeout: Duration,
}

impl EventPublisher {
    pub fn new(transport: Arc<dyn EventTransport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    /// Publishes `message` on `channel`, returning within the configured
    /// timeout regardless of transport behavior.
    ///
    /// Three outcomes race: transport success, transport failure, and the
    /// deadline. Whichever occurs first ends the wait; the others are
    /// abandoned. All outcomes are logged, none propagate.
    pub async fn publish(&self, channel: &str, message: &ClickMessage) {
        let payload = match serde_json::to_vec(message) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(channel, error = %e, "click event not serializable, dropping");
                return;
            }
        };

        let transport = Arc::clone(&self.transport);
        let channel_owned = channel.to_string();
        let delivery =
            tokio::spawn(async move { transport.publish(&channel_owned, payload).await });

        tokio::select! {
            outcome = delivery => match outcome {
                Ok(Ok(())) => debug!(channel, "click event published"),
                Ok(Err(e)) => warn!(channel, error = %e, "click event publish failed"),
                Err(e) => warn!(channel, error = %e, "click event publish task panicked"),
            },
            _ = tokio::time::sleep(self.timeout) => {
                // The spawned publish keeps running detached; only the wait ends.
                warn!(
                    channel,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "click event publish timed out"
                );
            }
        }
    }
}
