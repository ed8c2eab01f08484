//! Service wiring shared by embedding binaries.
//!
//! Builds the store, the transports, and the application services from a
//! loaded [`Config`]. Routing layers clone the state and call into the
//! services; nothing here is HTTP-aware.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::application::services::{EventPublisher, LinkService, VisitService};
use crate::config::Config;
use crate::domain::repositories::event_transport::EventTransport;
use crate::infrastructure::persistence::RedisStore;
use crate::infrastructure::pubsub::{NullTransport, RedisPublisher};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<RedisStore>>,
    pub visit_service: Arc<VisitService<RedisStore>>,
}

impl AppState {
    /// Wires all services against Redis.
    ///
    /// The store connection is mandatory. The pub/sub transport is not: when
    /// it cannot be established, click events are dropped via
    /// [`NullTransport`] and link serving continues.
    ///
    /// # Errors
    ///
    /// Returns an error when the Redis store connection fails.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let store = Arc::new(
            RedisStore::connect(&config.redis_url, &config.key_prefix)
                .await
                .context("failed to connect to redis store")?,
        );

        let transport: Arc<dyn EventTransport> =
            match RedisPublisher::connect(&config.redis_url, &config.channel_prefix).await {
                Ok(publisher) => {
                    tracing::info!("Click publishing enabled (Redis pub/sub)");
                    Arc::new(publisher)
                }
                Err(e) => {
                    tracing::warn!("Failed to connect publisher: {e}. Dropping click events.");
                    Arc::new(NullTransport::new())
                }
            };

        let publisher = EventPublisher::new(transport, config.publish_timeout());
        let link_service = Arc::new(LinkService::new(Arc::clone(&store), config.shard_count));
        let visit_service = Arc::new(VisitService::new(store, publisher));

        Ok(Self {
            link_service,
            visit_service,
        })
    }
}
