//! Freshness store: conditional-request metadata (ETag + expiry) per logical
//! upstream resource, with a short-lived cache in front of the table.
//!
//! Absence of a token is a valid, non-error state meaning "freshness unknown,
//! must revalidate".

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::{cache, cache::Cache, data::etag::EtagRepository, error::Error};

const ETAG_CACHE_TTL: Duration = Duration::from_secs(300);
const CACHE_KIND: &str = "etag";

#[derive(Clone)]
pub struct EtagService {
    db: DatabaseConnection,
    cache: Arc<dyn Cache>,
}

impl EtagService {
    pub fn new(db: DatabaseConnection, cache: Arc<dyn Cache>) -> Self {
        Self { db, cache }
    }

    /// Look up the freshness token for a resource key. `Ok(None)` means the
    /// caller must revalidate against upstream.
    pub async fn get(&self, resource_key: &str) -> Result<Option<entity::etag::Model>, Error> {
        let cache_key = cache::key(&[CACHE_KIND, resource_key]);

        match self.cache.get(&cache_key).await {
            Ok(Some(data)) => match serde_json::from_slice::<entity::etag::Model>(&data) {
                Ok(token) => return Ok(Some(token)),
                Err(err) => warn!(%resource_key, "discarding undecodable cached etag: {err}"),
            },
            Ok(None) => {}
            Err(err) => warn!(%resource_key, "etag cache read failed: {err}"),
        }

        let token = EtagRepository::new(&self.db)
            .get_by_resource_key(resource_key)
            .await?;

        if let Some(token) = &token {
            self.cache_token(&cache_key, token).await;
        }

        Ok(token)
    }

    /// Upsert the freshness token for a resource key.
    pub async fn put(
        &self,
        resource_key: &str,
        etag: &str,
        cached_until: NaiveDateTime,
    ) -> Result<entity::etag::Model, Error> {
        let token = EtagRepository::new(&self.db)
            .upsert(resource_key, etag, cached_until)
            .await?;

        let cache_key = cache::key(&[CACHE_KIND, resource_key]);
        self.cache_token(&cache_key, &token).await;

        Ok(token)
    }

    async fn cache_token(&self, cache_key: &str, token: &entity::etag::Model) {
        let data = match serde_json::to_vec(token) {
            Ok(data) => data,
            Err(err) => {
                warn!("failed to encode etag for cache: {err}");
                return;
            }
        };

        if let Err(err) = self.cache.set(cache_key, data, ETAG_CACHE_TTL).await {
            warn!("etag cache write failed: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use sea_orm::{ConnectionTrait, Database, DbBackend, Schema};

    use super::EtagService;
    use crate::cache::MemoryCache;
    use crate::error::Error;

    async fn setup() -> Result<EtagService, Error> {
        let db = Database::connect("sqlite::memory:").await?;
        let schema = Schema::new(DbBackend::Sqlite);
        db.execute(&schema.create_table_from_entity(entity::prelude::Etag))
            .await?;

        Ok(EtagService::new(db, Arc::new(MemoryCache::new())))
    }

    /// Expect a put token to be readable back through the service
    #[tokio::test]
    async fn put_then_get_round_trips() -> Result<(), Error> {
        let service = setup().await?;

        let cached_until = Utc::now().naive_utc() + chrono::Duration::hours(1);
        service.put("abc123", "\"v1\"", cached_until).await?;

        let token = service.get("abc123").await?.expect("token should exist");
        assert_eq!(token.etag, "\"v1\"");
        assert_eq!(token.cached_until, cached_until);

        Ok(())
    }

    /// Expect a missing token to come back as Ok(None), not an error
    #[tokio::test]
    async fn missing_token_is_not_an_error() -> Result<(), Error> {
        let service = setup().await?;

        assert!(service.get("unknown").await?.is_none());

        Ok(())
    }
}
