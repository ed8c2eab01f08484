//! Core domain entities representing the persisted data model.
//!
//! Only two record kinds ever hit the store:
//!
//! - [`LinkRecord`] - a shortened link plus its accumulated [`ClickAnalytics`]
//! - [`ShardRecord`] - one shard of the distributed counter
//!
//! Both are value types: retrieved, mutated locally, and written back. No
//! in-process shared mutable state is held across requests.

pub mod analytics;
pub mod link;
pub mod shard;

pub use analytics::{ClickAnalytics, FrequencyTable};
pub use link::LinkRecord;
pub use shard::ShardRecord;
