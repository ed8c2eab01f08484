//! Per-link click analytics: a click total plus four frequency tables.
//!
//! Each table is persisted inside the link record as an opaque serialized
//! blob and deserialized on every update. A blob that fails to decode is
//! treated as an empty table so that analytics corruption can never block a
//! visit from being recorded.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::click_event::ClickDims;

/// A mapping from a categorical label to an occurrence count.
///
/// Serialized as a compact JSON object (`{"label": count, ...}`) and stored
/// as an opaque blob inside [`ClickAnalytics`]. Table size is unbounded and
/// grows with distinct label cardinality; that is an accepted property, not
/// a defect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable(BTreeMap<String, u64>);

impl FrequencyTable {
    /// Deserializes a table from its blob form.
    ///
    /// An empty or corrupt blob yields an empty table; the corruption is
    /// logged, never propagated.
    pub fn from_blob(blob: &[u8]) -> Self {
        if blob.is_empty() {
            return Self::default();
        }
        match serde_json::from_slice(blob) {
            Ok(map) => Self(map),
            Err(e) => {
                tracing::warn!("discarding corrupt frequency table blob: {}", e);
                Self::default()
            }
        }
    }

    /// Serializes the table to its blob form.
    pub fn to_blob(&self) -> Vec<u8> {
        // A string-keyed map of integers cannot fail to serialize; fall back
        // to an empty object rather than propagate.
        serde_json::to_vec(&self.0).unwrap_or_else(|_| b"{}".to_vec())
    }

    /// Increments the count for `label`, inserting it with count 1 if absent.
    pub fn increment(&mut self, label: &str) {
        *self.0.entry(label.to_string()).or_insert(0) += 1;
    }

    /// Returns the count recorded for `label` (0 when absent).
    pub fn count(&self, label: &str) -> u64 {
        self.0.get(label).copied().unwrap_or(0)
    }

    /// Sum of all counts in the table.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// base64 transport encoding for the opaque table blobs inside JSON records.
mod blob {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(de)?;
        // A blob that fails to decode follows the same recovery rule as a
        // corrupt table: start empty.
        Ok(STANDARD.decode(encoded.as_bytes()).unwrap_or_default())
    }
}

/// Aggregated click analytics attached to a link record.
///
/// Invariant: `clicks` equals the value-sum of any one of the four tables,
/// because all four are updated together on every visit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickAnalytics {
    pub clicks: u64,
    #[serde(with = "blob", default)]
    pub referrers: Vec<u8>,
    #[serde(with = "blob", default)]
    pub languages: Vec<u8>,
    #[serde(with = "blob", default)]
    pub browsers: Vec<u8>,
    #[serde(with = "blob", default)]
    pub os_names: Vec<u8>,
}

impl ClickAnalytics {
    /// Records one visit, pure over the four categorical dimensions.
    ///
    /// Increments `clicks` by exactly 1 and bumps each dimension's table at
    /// the incoming label. Persistence is the caller's responsibility.
    #[must_use]
    pub fn record_visit(mut self, dims: &ClickDims) -> Self {
        self.clicks += 1;
        self.referrers = bump(&self.referrers, &dims.referrer);
        self.languages = bump(&self.languages, &dims.language);
        self.browsers = bump(&self.browsers, &dims.browser);
        self.os_names = bump(&self.os_names, &dims.os_name);
        self
    }

    /// Deserialized view of the referrer table.
    pub fn referrer_table(&self) -> FrequencyTable {
        FrequencyTable::from_blob(&self.referrers)
    }

    /// Deserialized view of the language table.
    pub fn language_table(&self) -> FrequencyTable {
        FrequencyTable::from_blob(&self.languages)
    }

    /// Deserialized view of the browser table.
    pub fn browser_table(&self) -> FrequencyTable {
        FrequencyTable::from_blob(&self.browsers)
    }

    /// Deserialized view of the OS table.
    pub fn os_table(&self) -> FrequencyTable {
        FrequencyTable::from_blob(&self.os_names)
    }
}

/// Deserialize-increment-reserialize cycle for one dimension.
fn bump(blob: &[u8], label: &str) -> Vec<u8> {
    let mut table = FrequencyTable::from_blob(blob);
    table.increment(label);
    table.to_blob()
}
