//! Sharded approximate counter for identifier allocation.
//!
//! A single counter record serialized across all writers becomes a hot spot
//! under concurrent link creation. Instead the logical counter is spread
//! over a fixed set of independent shard records: an increment touches one
//! uniformly random shard, so up to N increments proceed without conflict,
//! while a read sums the whole set.
//!
//! The tradeoff is deliberate and documented rather than hidden: the value
//! returned by [`ShardedCounter::next`] is an eventual-consistency
//! approximation, not a strict sequence number. Two concurrent calls may
//! observe overlapping sums, so callers deriving identifiers from it must
//! detect a taken identifier and retry with a fresh allocation (see
//! [`crate::application::services::LinkService`]).

use std::sync::Arc;

use rand::Rng;
use tracing::debug;

use crate::domain::entities::shard::ShardRecord;
use crate::domain::repositories::kv_store::{KvStore, StoreError};
use crate::error::CoreError;

/// Default number of shard records. A design constant, not user input:
/// `current()` scans all of them, so the set must stay small and bounded.
pub const DEFAULT_SHARD_COUNT: u32 = 20;

/// Approximate global monotonic counter over N shard records.
pub struct ShardedCounter<S: KvStore> {
    store: Arc<S>,
    shard_count: u32,
}

impl<S: KvStore> ShardedCounter<S> {
    /// Creates a counter over `shard_count` shards (clamped to at least 1).
    pub fn new(store: Arc<S>, shard_count: u32) -> Self {
        Self {
            store,
            shard_count: shard_count.max(1),
        }
    }

    /// Store key for one shard: `shard0`..`shardN-1`.
    fn shard_key(index: u32) -> String {
        format!("shard{index}")
    }

    /// Current global approximation: the sum over every shard record.
    ///
    /// Linear in shard count; acceptable because the set is small and fixed.
    /// Returns 0 when no shard record exists yet. The value is monotonically
    /// non-decreasing in real time but may be stale with respect to
    /// concurrently committing increments.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CounterUnavailable`] when any shard read fails.
    pub async fn current(&self) -> Result<u64, CoreError> {
        let mut total = 0u64;
        for index in 0..self.shard_count {
            let key = Self::shard_key(index);
            let bytes = self
                .store
                .get(&key)
                .await
                .map_err(CoreError::CounterUnavailable)?;
            if let Some(bytes) = bytes {
                let record: ShardRecord = serde_json::from_slice(&bytes)
                    .map_err(|e| CoreError::CounterUnavailable(StoreError::Codec(e.to_string())))?;
                total += record.count;
            }
        }
        Ok(total)
    }

    /// Increments one uniformly random shard and returns the post-increment
    /// global approximation.
    ///
    /// The increment is a transactional read-modify-write on that single
    /// shard key; an absent record counts as 0, not an error. A failed
    /// transaction never silently yields a value: it aborts allocation.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CounterUnavailable`] when the shard transaction
    /// or the follow-up read fails.
    pub async fn next(&self) -> Result<u64, CoreError> {
        let index = rand::rng().random_range(0..self.shard_count);
        let key = Self::shard_key(index);

        self.store
            .update(&key, &mut |current| {
                let mut record = match current {
                    Some(bytes) => serde_json::from_slice::<ShardRecord>(bytes)
                        .map_err(|e| StoreError::Codec(e.to_string()))?,
                    None => ShardRecord::new(key.clone()),
                };
                record.count += 1;
                serde_json::to_vec(&record).map_err(|e| StoreError::Codec(e.to_string()))
            })
            .await
            .map_err(CoreError::CounterUnavailable)?;

        debug!(shard = %key, "shard incremented");
        self.current().await
    }
}
