//! Redis-backed key-value store with optimistic single-key transactions.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tracing::{debug, info};

use crate::domain::repositories::kv_store::{KvStore, Mutator, StoreError, StoreResult};

/// Bound on optimistic retries when an update keeps conflicting.
const MAX_TXN_ATTEMPTS: usize = 5;

/// Redis implementation of [`KvStore`].
///
/// Plain reads and writes go through a shared [`ConnectionManager`].
/// Transactional updates use WATCH/MULTI/EXEC, which requires a connection
/// that no other task interleaves commands on, so each [`KvStore::update`]
/// call runs on a dedicated connection.
pub struct RedisStore {
    client: Client,
    conn: ConnectionManager,
    key_prefix: String,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// `key_prefix` namespaces every key this store touches (e.g. `"publink:"`).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the URL is invalid, the connection
    /// cannot be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, key_prefix: &str) -> StoreResult<Self> {
        info!("connecting to redis store at {}", redis_url);

        let client = Client::open(redis_url).map_err(|e| map_redis_error("open", e))?;
        let conn = ConnectionManager::new(client.clone())
            .await
            .map_err(|e| map_redis_error("connect", e))?;

        let mut probe = conn.clone();
        probe
            .ping::<()>()
            .await
            .map_err(|e| map_redis_error("ping", e))?;

        info!("redis store connected");
        Ok(Self {
            client,
            conn,
            key_prefix: key_prefix.to_string(),
        })
    }

    fn build_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        conn.get::<_, Option<Vec<u8>>>(self.build_key(key))
            .await
            .map_err(|e| map_redis_error("get", e))
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(self.build_key(key), value)
            .await
            .map_err(|e| map_redis_error("set", e))
    }

    async fn update(&self, key: &str, mutate: Mutator<'_>) -> StoreResult<Vec<u8>> {
        // WATCH state is per connection; the shared manager multiplexes
        // commands from many tasks, so open a dedicated connection here.
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| map_redis_error("connect", e))?;
        let full_key = self.build_key(key);

        for attempt in 1..=MAX_TXN_ATTEMPTS {
            redis::cmd("WATCH")
                .arg(&full_key)
                .query_async::<()>(&mut conn)
                .await
                .map_err(|e| map_redis_error("watch", e))?;

            let current: Option<Vec<u8>> = conn
                .get(&full_key)
                .await
                .map_err(|e| map_redis_error("get", e))?;

            let next = match mutate(current.as_deref()) {
                Ok(next) => next,
                Err(e) => {
                    // Abort without writing; the key stays untouched.
                    let _ = redis::cmd("UNWATCH").query_async::<()>(&mut conn).await;
                    return Err(e);
                }
            };

            // EXEC returns nil when the watched key changed under us.
            let committed: Option<()> = redis::pipe()
                .atomic()
                .set(&full_key, next.as_slice())
                .ignore()
                .query_async(&mut conn)
                .await
                .map_err(|e| map_redis_error("exec", e))?;

            match committed {
                Some(()) => return Ok(next),
                None => {
                    debug!(key = %full_key, attempt, "transaction conflicted, retrying");
                }
            }
        }

        Err(StoreError::TransactionFailed(MAX_TXN_ATTEMPTS))
    }
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> StoreError {
    StoreError::Backend(format!("redis {operation} failed: {err}"))
}
