//! Trait definitions for the external collaborators of the core.
//!
//! The core talks to exactly two external systems: a key-value store with
//! single-key transactional read-modify-write, and a pub/sub transport for
//! real-time click events. Both are abstracted behind traits here and
//! implemented in `crate::infrastructure`.
//!
//! # Testing
//!
//! [`EventTransport`] carries an auto-generated `mockall` mock; store-backed
//! tests use [`crate::infrastructure::persistence::MemoryStore`] directly.

pub mod event_transport;
pub mod kv_store;

pub use event_transport::{EventTransport, PublishError};
pub use kv_store::{KvStore, Mutator, StoreError, StoreResult};

#[cfg(test)]
pub use event_transport::MockEventTransport;
