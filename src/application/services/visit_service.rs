//! Visit recording: aggregate analytics, persist, publish, redirect.

use std::sync::Arc;

use tracing::info;

use crate::application::services::event_publisher::EventPublisher;
use crate::domain::click_event::{ClickEvent, ClickMessage, VisitMeta};
use crate::domain::entities::link::LinkRecord;
use crate::domain::repositories::kv_store::{KvStore, StoreError};
use crate::error::CoreError;

/// Service behind the redirect path.
pub struct VisitService<S: KvStore> {
    store: Arc<S>,
    publisher: EventPublisher,
}

impl<S: KvStore> VisitService<S> {
    pub fn new(store: Arc<S>, publisher: EventPublisher) -> Self {
        Self { store, publisher }
    }

    /// Records one visit and returns the URL to redirect to.
    ///
    /// The load-aggregate-store cycle runs as one transactional update on
    /// the link key, so two interleaved visits to the same link never lose
    /// an increment. The follow-up publish is best-effort and bounded by the
    /// publisher's timeout; its outcome never affects the redirect.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] when no record exists for `short_id`
    /// (nothing is created or mutated in that case). Analytics corruption is
    /// not an error: corrupt tables restart empty and the visit is still
    /// recorded.
    pub async fn record_visit_and_redirect_target(
        &self,
        short_id: &str,
        meta: &VisitMeta,
    ) -> Result<String, CoreError> {
        let dims = meta.dims();
        let key = LinkRecord::storage_key(short_id);

        let mut mutate = |current: Option<&[u8]>| {
            let bytes = current.ok_or_else(|| StoreError::Missing(key.clone()))?;
            let record = LinkRecord::from_bytes(bytes)?.with_visit(&dims);
            record.to_bytes()
        };

        let written = match self.store.update(&key, &mut mutate).await {
            Ok(bytes) => bytes,
            Err(StoreError::Missing(_)) => {
                return Err(CoreError::NotFound {
                    short_id: short_id.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        let record = LinkRecord::from_bytes(&written)?;

        let message = ClickMessage {
            data: record.analytics.clone(),
            click: ClickEvent::new(meta.client_ip(), &dims),
        };
        self.publisher.publish(short_id, &message).await;

        info!(short_id, clicks = record.analytics.clicks, "visit recorded");
        Ok(record.target_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::event_publisher::DEFAULT_PUBLISH_TIMEOUT;
    use crate::infrastructure::persistence::MemoryStore;
    use crate::infrastructure::pubsub::NullTransport;

    fn service(store: Arc<MemoryStore>) -> VisitService<MemoryStore> {
        let publisher = EventPublisher::new(Arc::new(NullTransport::new()), DEFAULT_PUBLISH_TIMEOUT);
        VisitService::new(store, publisher)
    }

    async fn seed_link(store: &MemoryStore, short_id: &str, url: &str) {
        let record = LinkRecord::new(short_id.to_string(), url.to_string());
        store
            .put(
                &LinkRecord::storage_key(short_id),
                record.to_bytes().unwrap(),
            )
            .await
            .unwrap();
    }

    fn meta_with_referer(referer: &str) -> VisitMeta {
        VisitMeta {
            referer: Some(referer.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_visit_returns_target_and_counts_click() {
        let store = Arc::new(MemoryStore::new());
        seed_link(&store, "b", "https://example.com/").await;

        let target = service(Arc::clone(&store))
            .record_visit_and_redirect_target("b", &VisitMeta::default())
            .await
            .unwrap();
        assert_eq!(target, "https://example.com/");

        let stored = store.get(&LinkRecord::storage_key("b")).await.unwrap().unwrap();
        let record = LinkRecord::from_bytes(&stored).unwrap();
        assert_eq!(record.analytics.clicks, 1);
    }

    #[tokio::test]
    async fn test_three_visits_aggregate_referrers() {
        let store = Arc::new(MemoryStore::new());
        seed_link(&store, "b", "https://example.com/").await;
        let service = service(Arc::clone(&store));

        for referer in ["a", "a", "b"] {
            service
                .record_visit_and_redirect_target("b", &meta_with_referer(referer))
                .await
                .unwrap();
        }

        let stored = store.get(&LinkRecord::storage_key("b")).await.unwrap().unwrap();
        let record = LinkRecord::from_bytes(&stored).unwrap();
        assert_eq!(record.analytics.clicks, 3);

        let referrers = record.analytics.referrer_table();
        assert_eq!(referrers.count("a"), 2);
        assert_eq!(referrers.count("b"), 1);
    }

    #[tokio::test]
    async fn test_visit_unknown_id_is_not_found_and_writes_nothing() {
        let store = Arc::new(MemoryStore::new());
        let result = service(Arc::clone(&store))
            .record_visit_and_redirect_target("ghost", &VisitMeta::default())
            .await;

        assert!(matches!(result, Err(CoreError::NotFound { .. })));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_concurrent_visits_lose_no_clicks() {
        let store = Arc::new(MemoryStore::new());
        seed_link(&store, "b", "https://example.com/").await;
        let service = Arc::new(service(Arc::clone(&store)));

        let mut handles = Vec::new();
        for _ in 0..40 {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move {
                service
                    .record_visit_and_redirect_target("b", &VisitMeta::default())
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = store.get(&LinkRecord::storage_key("b")).await.unwrap().unwrap();
        let record = LinkRecord::from_bytes(&stored).unwrap();
        assert_eq!(record.analytics.clicks, 40);
    }

    #[tokio::test]
    async fn test_visit_recovers_corrupt_analytics_table() {
        let store = Arc::new(MemoryStore::new());
        let mut record = LinkRecord::new("b".to_string(), "https://example.com/".to_string());
        record.analytics.clicks = 9;
        record.analytics.referrers = b"{definitely not json".to_vec();
        store
            .put(&LinkRecord::storage_key("b"), record.to_bytes().unwrap())
            .await
            .unwrap();

        let target = service(Arc::clone(&store))
            .record_visit_and_redirect_target("b", &meta_with_referer("fresh"))
            .await
            .unwrap();
        assert_eq!(target, "https://example.com/");

        let stored = store.get(&LinkRecord::storage_key("b")).await.unwrap().unwrap();
        let updated = LinkRecord::from_bytes(&stored).unwrap();
        assert_eq!(updated.analytics.clicks, 10);
        assert_eq!(updated.analytics.referrer_table().count("fresh"), 1);
    }
}
