//! Pub/sub transport implementations.
//!
//! Provides the [`crate::domain::repositories::EventTransport`] backends:
//! - [`RedisPublisher`] - production Redis PUBLISH transport
//! - [`NullTransport`] - no-op for tests/disabled realtime channel

pub mod null_transport;
pub mod redis_publisher;

pub use null_transport::NullTransport;
pub use redis_publisher::RedisPublisher;
