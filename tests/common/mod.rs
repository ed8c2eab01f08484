//! Shared helpers for integration tests.

use std::sync::Arc;
use std::time::Duration;

use publink::application::services::{EventPublisher, LinkService, VisitService};
use publink::domain::click_event::VisitMeta;
use publink::infrastructure::persistence::MemoryStore;
use publink::infrastructure::pubsub::NullTransport;

pub const TEST_SHARD_COUNT: u32 = 20;

pub fn create_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

pub fn create_link_service(store: Arc<MemoryStore>) -> LinkService<MemoryStore> {
    LinkService::new(store, TEST_SHARD_COUNT)
}

pub fn create_visit_service(store: Arc<MemoryStore>) -> VisitService<MemoryStore> {
    let publisher = EventPublisher::new(Arc::new(NullTransport::new()), Duration::from_millis(50));
    VisitService::new(store, publisher)
}

pub fn visit_meta(referer: Option<&str>, user_agent: Option<&str>) -> VisitMeta {
    VisitMeta {
        remote_addr: Some("203.0.113.7".to_string()),
        forwarded_for: None,
        user_agent: user_agent.map(str::to_string),
        accept_language: Some("en-US,en;q=0.9".to_string()),
        referer: referer.map(str::to_string),
    }
}
