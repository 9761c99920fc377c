//! Redis Store Module
//!
//! Remote tier. Values are JSON strings under `repo_data:{owner}:{repo}`,
//! written with `SETEX` so Redis expires them on its own.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tokio::sync::OnceCell;

use crate::cache::{RepoKey, Store};
use crate::error::Result;

// == Redis Store ==
/// Redis-backed store using a connection manager for reconnects.
///
/// Opening only parses the URL; the connection is made on first use, which
/// is normally the availability probe.
pub struct RedisStore {
    client: redis::Client,
    conn: OnceCell<ConnectionManager>,
}

impl RedisStore {
    /// Parses `url` (e.g. `redis://localhost:6379`) without connecting.
    pub fn open(url: &str) -> Result<Self> {
        Ok(Self {
            client: redis::Client::open(url)?,
            conn: OnceCell::new(),
        })
    }

    async fn connection(&self) -> Result<ConnectionManager> {
        let conn = self
            .conn
            .get_or_try_init(|| ConnectionManager::new(self.client.clone()))
            .await?;
        Ok(conn.clone())
    }
}

#[async_trait]
impl Store for RedisStore {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &RepoKey) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key.storage_key()).await?;
        Ok(value)
    }

    async fn set(&self, key: &RepoKey, value: &str, ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.connection().await?;
        match ttl {
            Some(ttl) => {
                let seconds = ttl.as_secs().max(1);
                conn.set_ex::<_, _, ()>(key.storage_key(), value, seconds)
                    .await?;
            }
            None => {
                conn.set::<_, _, ()>(key.storage_key(), value).await?;
            }
        }
        Ok(())
    }

    async fn delete(&self, key: &RepoKey) -> Result<()> {
        let mut conn = self.connection().await?;
        conn.del::<_, ()>(key.storage_key()).await?;
        Ok(())
    }

    async fn exists(&self, key: &RepoKey) -> Result<bool> {
        let mut conn = self.connection().await?;
        let exists: bool = conn.exists(key.storage_key()).await?;
        Ok(exists)
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;

    /// Fixed rather than read from `REDIS_URL`: the config tests rewrite it.
    const TEST_REDIS_URL: &str = "redis://localhost:6379";

    /// Skip test if Redis not available.
    async fn get_test_store() -> Option<RedisStore> {
        let store = RedisStore::open(TEST_REDIS_URL).ok()?;
        let ping = tokio::time::timeout(Duration::from_secs(1), store.ping()).await;
        matches!(ping, Ok(Ok(()))).then_some(store)
    }

    /// Unique key so parallel runs do not collide.
    fn test_key(suffix: &str) -> RepoKey {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        RepoKey::new("repo-cache-test", format!("{}-{}", suffix, nanos)).unwrap()
    }

    #[test]
    fn test_open_rejects_bad_url() {
        assert!(matches!(
            RedisStore::open("not a url"),
            Err(CacheError::Remote(_))
        ));
    }

    #[tokio::test]
    async fn test_redis_set_get_delete() {
        let Some(store) = get_test_store().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };
        let key = test_key("set_get");

        store
            .set(&key, r#"{"files":12}"#, Some(Duration::from_secs(60)))
            .await
            .unwrap();
        assert_eq!(
            store.get(&key).await.unwrap().as_deref(),
            Some(r#"{"files":12}"#)
        );
        assert!(store.exists(&key).await.unwrap());

        store.delete(&key).await.unwrap();
        assert!(store.get(&key).await.unwrap().is_none());
        assert!(!store.exists(&key).await.unwrap());
    }

    #[tokio::test]
    async fn test_redis_ttl() {
        let Some(store) = get_test_store().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };
        let key = test_key("ttl");

        store
            .set(&key, "1", Some(Duration::from_secs(1)))
            .await
            .unwrap();
        assert!(store.exists(&key).await.unwrap());

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(store.get(&key).await.unwrap().is_none());
    }
}
