//! Error taxonomy for the core operations.
//!
//! Only [`CoreError::CounterUnavailable`] and [`CoreError::NotFound`] should
//! change what an end user sees. Analytics corruption is recovered locally
//! (an empty table is substituted), and publish failures or timeouts are
//! logged inside the publisher; neither ever reaches this type.

use thiserror::Error;

use crate::domain::repositories::kv_store::StoreError;
use crate::utils::url_normalizer::UrlNormalizationError;

/// Errors surfaced by the inbound operations of the core.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The shard increment transaction failed. No identifier was minted;
    /// link creation must abort rather than proceed without one.
    #[error("counter unavailable: {0}")]
    CounterUnavailable(#[source] StoreError),

    /// No link record exists for the requested short id.
    #[error("no link for short id '{short_id}'")]
    NotFound { short_id: String },

    /// The target URL failed validation.
    #[error("invalid target url: {0}")]
    InvalidUrl(#[from] UrlNormalizationError),

    /// Every allocated identifier collided with an existing record.
    #[error("no free short id after {attempts} allocation attempts")]
    AllocationFailed { attempts: usize },

    /// The store failed outside the counter path.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CoreError {
    /// True for failures the routing layer should answer with a fallback
    /// redirect rather than an error page.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
