use std::time::Duration;

use async_trait::async_trait;
use fred::prelude::*;

use crate::{cache::Cache, error::cache::CacheError};

/// Redis/Valkey-backed cache over a `fred` connection pool.
pub struct RedisCache {
    pool: Pool,
}

impl RedisCache {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let value: Option<Vec<u8>> = self.pool.get(key).await?;

        Ok(value)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        let _: () = self
            .pool
            .set(
                key,
                value,
                Some(Expiration::EX(ttl.as_secs() as i64)),
                None,
                false,
            )
            .await?;

        Ok(())
    }

    async fn set_members(&self, key: &str) -> Result<Vec<Vec<u8>>, CacheError> {
        let members: Vec<Vec<u8>> = self.pool.smembers(key).await?;

        Ok(members)
    }

    async fn set_replace(
        &self,
        key: &str,
        values: Vec<Vec<u8>>,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let _: () = self.pool.del(key).await?;

        if values.is_empty() {
            return Ok(());
        }

        let _: () = self.pool.sadd(key, values).await?;
        let _: bool = self
            .pool
            .expire(key, ttl.as_secs() as i64, None)
            .await?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let _: () = self.pool.del(key).await?;

        Ok(())
    }
}
