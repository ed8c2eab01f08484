//! Utility functions for identifier encoding and request processing.
//!
//! - [`short_id`] - base-62 encoding of counter values
//! - [`url_normalizer`] - target URL validation and normalization
//! - [`user_agent`] - coarse browser/OS detection for analytics labels

pub mod short_id;
pub mod url_normalizer;
pub mod user_agent;
