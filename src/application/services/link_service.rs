//! Link creation and retrieval service.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::services::counter::ShardedCounter;
use crate::domain::entities::link::LinkRecord;
use crate::domain::repositories::kv_store::KvStore;
use crate::error::CoreError;
use crate::utils::short_id;
use crate::utils::url_normalizer::normalize_url;

/// Bound on fresh allocations when a derived identifier turns out taken.
///
/// Collisions need the sharded counter to hand two creators overlapping
/// sums, so one retry almost always suffices; the bound exists to fail
/// loudly instead of looping if something is systematically wrong.
const MAX_ALLOCATION_ATTEMPTS: usize = 10;

/// Service for allocating identifiers and creating/loading link records.
pub struct LinkService<S: KvStore> {
    store: Arc<S>,
    counter: ShardedCounter<S>,
}

impl<S: KvStore> LinkService<S> {
    /// Creates the service over a store, with a sharded counter of
    /// `shard_count` shards for identifier allocation.
    pub fn new(store: Arc<S>, shard_count: u32) -> Self {
        Self {
            counter: ShardedCounter::new(Arc::clone(&store), shard_count),
            store,
        }
    }

    /// Allocates the next short identifier.
    ///
    /// The value is derived from the sharded counter, so under heavy
    /// concurrent creation two calls may rarely yield the same string;
    /// [`Self::create_link`] detects that and retries. A counter failure
    /// mints nothing.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CounterUnavailable`] when the underlying shard
    /// transaction fails.
    pub async fn allocate_short_id(&self) -> Result<String, CoreError> {
        let value = self.counter.next().await?;
        Ok(short_id::encode(value))
    }

    /// Creates a link record for `target_url` and persists it.
    ///
    /// The URL is normalized first; the identifier comes from
    /// [`Self::allocate_short_id`], retried with a fresh allocation when the
    /// derived identifier already has a record.
    ///
    /// # Errors
    ///
    /// - [`CoreError::InvalidUrl`] when the target fails validation
    /// - [`CoreError::CounterUnavailable`] when allocation fails; no record
    ///   is written
    /// - [`CoreError::AllocationFailed`] when every attempt collided
    pub async fn create_link(&self, target_url: &str) -> Result<LinkRecord, CoreError> {
        let normalized = normalize_url(target_url)?;

        for _ in 0..MAX_ALLOCATION_ATTEMPTS {
            let candidate = self.allocate_short_id().await?;
            let key = LinkRecord::storage_key(&candidate);

            if self.store.get(&key).await?.is_some() {
                debug!(short_id = %candidate, "allocated id already taken, retrying");
                continue;
            }

            let record = LinkRecord::new(candidate, normalized.clone());
            self.store.put(&key, record.to_bytes()?).await?;
            info!(short_id = %record.short_id, "link created");
            return Ok(record);
        }

        Err(CoreError::AllocationFailed {
            attempts: MAX_ALLOCATION_ATTEMPTS,
        })
    }

    /// Loads a link record by its short identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] when no record exists under the id.
    pub async fn get_link(&self, short_id: &str) -> Result<LinkRecord, CoreError> {
        match self.store.get(&LinkRecord::storage_key(short_id)).await? {
            Some(bytes) => Ok(LinkRecord::from_bytes(&bytes)?),
            None => Err(CoreError::NotFound {
                short_id: short_id.to_string(),
            }),
        }
    }
}
