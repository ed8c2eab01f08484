//! Business logic services for the application layer.

pub mod counter;
pub mod event_publisher;
pub mod link_service;
pub mod visit_service;

pub use counter::{DEFAULT_SHARD_COUNT, ShardedCounter};
pub use event_publisher::{DEFAULT_PUBLISH_TIMEOUT, EventPublisher};
pub use link_service::LinkService;
pub use visit_service::VisitService;
