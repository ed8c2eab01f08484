//! Key-value store contract with single-key transactional updates.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend rejected or failed the operation.
    #[error("store backend error: {0}")]
    Backend(String),

    /// A transactional update required a record that does not exist.
    #[error("no record stored under key '{0}'")]
    Missing(String),

    /// An optimistic transaction kept conflicting and gave up.
    #[error("transaction aborted after {0} attempts")]
    TransactionFailed(usize),

    /// A stored record could not be encoded or decoded.
    #[error("record codec error: {0}")]
    Codec(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Mutation applied inside a transactional read-modify-write.
///
/// Receives the current value under the key (`None` when the record is
/// absent) and returns the bytes to write back. Returning an error aborts
/// the transaction without writing.
pub type Mutator<'a> = &'a mut (dyn FnMut(Option<&[u8]>) -> StoreResult<Vec<u8>> + Send);

/// Contract for the external key-value store.
///
/// The store must distinguish "not found" (`Ok(None)`) from backend failure
/// and must provide single-key read-modify-write isolation for [`update`]:
/// two racing updates on the same key are serialized (or one fails), never
/// silently merged.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::RedisStore`] - Redis with
///   optimistic WATCH/MULTI/EXEC transactions
/// - [`crate::infrastructure::persistence::MemoryStore`] - in-process map
///   for tests and single-node deployments
///
/// [`update`]: KvStore::update
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] on backend failure. A missing key is
    /// `Ok(None)`, not an error.
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Writes `value` under `key`, replacing any existing value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] on backend failure.
    async fn put(&self, key: &str, value: Vec<u8>) -> StoreResult<()>;

    /// Transactional single-key read-modify-write.
    ///
    /// Reads the current value, applies `mutate`, and writes the result back
    /// so that no concurrent update of the same key is lost in between.
    /// Returns the bytes that were written.
    ///
    /// # Errors
    ///
    /// - Whatever error `mutate` returns, with nothing written
    /// - [`StoreError::TransactionFailed`] when the backend cannot commit
    ///   after bounded retries
    /// - [`StoreError::Backend`] on other backend failures
    async fn update(&self, key: &str, mutate: Mutator<'_>) -> StoreResult<Vec<u8>>;
}
