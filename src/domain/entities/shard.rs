//! Counter shard record.

use serde::{Deserialize, Serialize};

/// One record of the sharded counter.
///
/// A fixed set of these (`shard0`..`shardN-1`) together represent a single
/// logical counter. Records are created lazily on the first increment of
/// their shard, mutated only via transactional increment, and never deleted.
/// No component other than the counter reads or writes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardRecord {
    pub shard_id: String,
    pub count: u64,
}

impl ShardRecord {
    /// A fresh shard record with a zero count.
    pub fn new(shard_id: impl Into<String>) -> Self {
        Self {
            shard_id: shard_id.into(),
            count: 0,
        }
    }
}
