//! Redis-backed adapters for the score index and rewind quota counter.
//!
//! Both adapters share one `bb8-redis` connection pool and use namespaced,
//! versioned keys so the layout can change without clashing with older
//! deployments. The score index maps onto a sorted set (ZINCRBY and
//! ZREVRANGE WITHSCORES); the quota counter is a plain string key whose
//! increment-and-expire runs as a single Lua script, keeping the port's
//! atomicity contract even under concurrent rewinds.

use async_trait::async_trait;
use bb8_redis::redis::{AsyncCommands, RedisError, Script};
use bb8_redis::{RedisConnectionManager, bb8};
use chrono::NaiveDate;

use crate::domain::UserId;
use crate::domain::ports::{
    RewindQuotaStore, RewindQuotaStoreError, ScoreEntry, ScoreIndex, ScoreIndexError,
};

/// Shared Redis connection pool.
pub type RedisPool = bb8::Pool<RedisConnectionManager>;

/// Build a connection pool for the given Redis URL.
pub async fn connect(url: &str) -> Result<RedisPool, RedisError> {
    let manager = RedisConnectionManager::new(url)?;
    bb8::Pool::builder().build(manager).await
}

const DEFAULT_RANK_KEY: &str = "swipe:rank:v1";
const DEFAULT_QUOTA_PREFIX: &str = "swipe:rewind:v1";

// INCR and EXPIRE must land together; see the RewindQuotaStore contract.
const INCREMENT_WITH_TTL: &str = r"
local value = redis.call('INCR', KEYS[1])
redis.call('EXPIRE', KEYS[1], ARGV[1])
return value
";

/// Sorted-set score index.
#[derive(Clone)]
pub struct RedisScoreIndex {
    pool: RedisPool,
    key: String,
}

impl RedisScoreIndex {
    /// Create an index over the default rank key.
    pub fn new(pool: RedisPool) -> Self {
        Self::with_key(pool, DEFAULT_RANK_KEY)
    }

    /// Create an index over a caller-chosen rank key.
    pub fn with_key(pool: RedisPool, key: impl Into<String>) -> Self {
        Self {
            pool,
            key: key.into(),
        }
    }
}

#[async_trait]
impl ScoreIndex for RedisScoreIndex {
    async fn increment(&self, user_id: UserId, delta: i64) -> Result<i64, ScoreIndexError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| ScoreIndexError::connection(err.to_string()))?;
        let score: f64 = conn
            .zincr(self.key.as_str(), user_id.value(), delta)
            .await
            .map_err(|err| ScoreIndexError::command(err.to_string()))?;
        Ok(score as i64)
    }

    async fn top(&self, count: usize) -> Result<Vec<ScoreEntry>, ScoreIndexError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| ScoreIndexError::connection(err.to_string()))?;
        let stop = isize::try_from(count).unwrap_or(isize::MAX).saturating_sub(1);
        let rows: Vec<(u64, f64)> = conn
            .zrevrange_withscores(self.key.as_str(), 0, stop)
            .await
            .map_err(|err| ScoreIndexError::command(err.to_string()))?;
        Ok(rows
            .into_iter()
            .map(|(id, score)| ScoreEntry {
                user_id: UserId::new(id),
                score: score as i64,
            })
            .collect())
    }
}

/// Expiring per-user, per-day rewind counter.
#[derive(Clone)]
pub struct RedisRewindQuotaStore {
    pool: RedisPool,
    prefix: String,
    increment_script: Script,
}

impl RedisRewindQuotaStore {
    /// Create a counter store over the default key prefix.
    pub fn new(pool: RedisPool) -> Self {
        Self::with_prefix(pool, DEFAULT_QUOTA_PREFIX)
    }

    /// Create a counter store over a caller-chosen key prefix.
    pub fn with_prefix(pool: RedisPool, prefix: impl Into<String>) -> Self {
        Self {
            pool,
            prefix: prefix.into(),
            increment_script: Script::new(INCREMENT_WITH_TTL),
        }
    }

    fn key(&self, user_id: UserId, day: NaiveDate) -> String {
        quota_key(&self.prefix, user_id, day)
    }
}

fn quota_key(prefix: &str, user_id: UserId, day: NaiveDate) -> String {
    format!("{prefix}:{day}:{user_id}")
}

#[async_trait]
impl RewindQuotaStore for RedisRewindQuotaStore {
    async fn count(
        &self,
        user_id: UserId,
        day: NaiveDate,
    ) -> Result<u32, RewindQuotaStoreError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| RewindQuotaStoreError::connection(err.to_string()))?;
        let value: Option<u32> = conn
            .get(self.key(user_id, day))
            .await
            .map_err(|err| RewindQuotaStoreError::command(err.to_string()))?;
        Ok(value.unwrap_or(0))
    }

    async fn increment(
        &self,
        user_id: UserId,
        day: NaiveDate,
        ttl_seconds: u64,
    ) -> Result<u32, RewindQuotaStoreError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| RewindQuotaStoreError::connection(err.to_string()))?;
        let value: u32 = self
            .increment_script
            .key(self.key(user_id, day))
            .arg(ttl_seconds)
            .invoke_async(&mut *conn)
            .await
            .map_err(|err| RewindQuotaStoreError::command(err.to_string()))?;
        Ok(value)
    }
}
