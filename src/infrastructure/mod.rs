//! Infrastructure layer for external integrations.
//!
//! Implements the traits defined by the domain layer against concrete
//! backends.
//!
//! # Modules
//!
//! - [`persistence`] - key-value store implementations (Redis, in-memory)
//! - [`pubsub`] - click event transports (Redis PUBLISH, no-op)

pub mod persistence;
pub mod pubsub;
