//! Domain layer containing the persisted data model and collaborator traits.
//!
//! # Architecture
//!
//! - [`entities`] - Link records, shard records, and click analytics
//! - [`repositories`] - Store and transport trait definitions
//! - [`click_event`] - Request metadata and the real-time click payload
//!
//! # Design Principles
//!
//! - The domain layer has no dependency on infrastructure backends
//! - All mutable shared state lives in the external store; records are value
//!   types retrieved, mutated locally, and written back
//! - The click aggregation update ([`entities::ClickAnalytics::record_visit`])
//!   is a pure function; persistence and publishing are orchestrated by
//!   [`crate::application::services`]

pub mod click_event;
pub mod entities;
pub mod repositories;
