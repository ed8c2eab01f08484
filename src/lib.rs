//! # Publink
//!
//! Core of a link-shortening and click-tracking service: collision-tolerant
//! short identifier allocation over a sharded counter, per-link click
//! analytics, and bounded-latency click event publishing over Redis.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Core entities, click model, and store/transport traits
//! - **Application Layer** ([`application`]) - Counter, link, visit, and publisher services
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis store and pub/sub transport
//!
//! HTTP routing, HTML rendering, and authentication live in embedding
//! binaries, not here.
//!
//! ## Quick Start
//!
//! ```bash
//! # Set required environment variables
//! export REDIS_URL="redis://localhost:6379"
//! ```
//!
//! ```rust,no_run
//! use publink::config;
//! use publink::state::AppState;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = config::load_from_env()?;
//! publink::logging::init(&config);
//!
//! let state = AppState::from_config(&config).await?;
//! let link = state.link_service.create_link("https://example.com").await?;
//! println!("short id: {}", link.short_id);
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod logging;

pub use error::CoreError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        EventPublisher, LinkService, ShardedCounter, VisitService,
    };
    pub use crate::domain::click_event::{ClickEvent, ClickMessage, VisitMeta};
    pub use crate::domain::entities::link::LinkRecord;
    pub use crate::error::CoreError;
    pub use crate::state::AppState;
}
