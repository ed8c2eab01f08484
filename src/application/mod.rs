//! Application layer services implementing the core operations.
//!
//! This layer orchestrates the domain model against the store and transport
//! traits and provides the plain-data API the routing layer calls.
//!
//! # Available Services
//!
//! - [`services::ShardedCounter`] - contention-free identifier allocation
//! - [`services::LinkService`] - short id allocation and link creation
//! - [`services::VisitService`] - visit recording behind the redirect path
//! - [`services::EventPublisher`] - bounded-latency click event publishing

pub mod services;
