//! Key-value store implementations.
//!
//! - [`RedisStore`] - production store with optimistic WATCH/MULTI/EXEC
//!   transactions for single-key read-modify-write
//! - [`MemoryStore`] - in-process map for tests and single-node use

pub mod memory_store;
pub mod redis_store;

pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;
