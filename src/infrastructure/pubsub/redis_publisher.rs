//! Redis PUBLISH transport for click events.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tracing::{debug, info};

use crate::domain::repositories::event_transport::{EventTransport, PublishError};

/// [`EventTransport`] over Redis pub/sub.
pub struct RedisPublisher {
    conn: ConnectionManager,
    channel_prefix: String,
}

impl RedisPublisher {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// `channel_prefix` namespaces every channel (e.g. `"clicks:"`).
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Transport`] when the connection cannot be
    /// established.
    pub async fn connect(redis_url: &str, channel_prefix: &str) -> Result<Self, PublishError> {
        info!("connecting to redis pub/sub at {}", redis_url);

        let client = Client::open(redis_url)
            .map_err(|e| PublishError::Transport(format!("redis open failed: {e}")))?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| PublishError::Transport(format!("redis connect failed: {e}")))?;

        let mut probe = conn.clone();
        probe
            .ping::<()>()
            .await
            .map_err(|e| PublishError::Transport(format!("redis ping failed: {e}")))?;

        info!("redis pub/sub connected");
        Ok(Self {
            conn,
            channel_prefix: channel_prefix.to_string(),
        })
    }
}

#[async_trait]
impl EventTransport for RedisPublisher {
    async fn publish(&self, channel: &str, payload: Vec<u8>) -> Result<(), PublishError> {
        let mut conn = self.conn.clone();
        let full_channel = format!("{}{}", self.channel_prefix, channel);

        let receivers: i64 = conn
            .publish(&full_channel, payload)
            .await
            .map_err(|e| PublishError::Transport(format!("redis publish failed: {e}")))?;

        debug!(channel = %full_channel, receivers, "click event delivered");
        Ok(())
    }
}
