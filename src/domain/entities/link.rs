//! Link record: the mapping from a short identifier to its target URL.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::click_event::ClickDims;
use crate::domain::entities::analytics::ClickAnalytics;
use crate::domain::repositories::kv_store::{StoreError, StoreResult};

/// A shortened link and its accumulated click analytics.
///
/// Created once at shortening time, keyed by `short_id`, and mutated on
/// every visit (analytics only). The core never deletes link records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub short_id: String,
    pub created_at: DateTime<Utc>,
    pub target_url: String,
    #[serde(default)]
    pub analytics: ClickAnalytics,
}

impl LinkRecord {
    /// Creates a fresh link record with zeroed analytics.
    pub fn new(short_id: String, target_url: String) -> Self {
        Self {
            short_id,
            created_at: Utc::now(),
            target_url,
            analytics: ClickAnalytics::default(),
        }
    }

    /// Store key for a link record.
    pub fn storage_key(short_id: &str) -> String {
        format!("link:{short_id}")
    }

    /// Returns a copy of the record with one visit recorded.
    #[must_use]
    pub fn with_visit(mut self, dims: &ClickDims) -> Self {
        self.analytics = self.analytics.record_visit(dims);
        self
    }

    /// Decodes a record from its stored form.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Codec`] when the bytes are not a valid record.
    pub fn from_bytes(bytes: &[u8]) -> StoreResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::Codec(e.to_string()))
    }

    /// Encodes the record to its stored form.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Codec`] when serialization fails.
    pub fn to_bytes(&self) -> StoreResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| StoreError::Codec(e.to_string()))
    }
}
