//! Entity synchronizer: the get-or-refresh engine behind every mirrored
//! entity.
//!
//! One lookup reconciles three tiers. The ephemeral cache answers first when
//! it holds the entity. On a miss the durable store answers, but only while
//! the entity's freshness token says the upstream copy cannot have changed.
//! Otherwise a conditional request goes upstream: a 304 revalidates the
//! stored copy for free, a 200 persists the new state. Freshness tokens are
//! written by a response modifier on both outcomes, so revalidation always
//! extends the window.
//!
//! Cache unavailability is never fatal; a read failure is a miss and a write
//! failure is dropped with a warning.

pub mod alliance;
pub mod character;
pub mod clone;
pub mod contact;
pub mod corporation;
pub mod implant;
pub mod singleflight;
pub mod skill;
pub mod solar_system;

#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde::{
    de::{DeserializeOwned, Error as _},
    Serialize,
};
use tracing::{debug, warn};

use crate::{
    cache,
    cache::Cache,
    error::{cache::CacheError, Error},
    esi::{
        endpoint::Endpoint,
        modifier::{BearerToken, CaptureEtag, IfNoneMatch, ModifierSet},
        EsiClient, FetchOutcome,
    },
    etag::EtagService,
    sync::singleflight::FlightGroup,
};

/// A stored entity is served without revalidation only while its freshness
/// token extends strictly beyond now plus this grace period.
const FRESHNESS_GRACE_SECS: i64 = 60;

const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// How an entity's cache entry is laid out in Redis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheLayout {
    /// One JSON blob under the key.
    Blob,
    /// A set of independently serialized items under the key.
    Set,
}

/// A cache entry in transit, matching one of the layouts.
pub enum CachePayload {
    Blob(Vec<u8>),
    Set(Vec<Vec<u8>>),
}

/// One mirrored entity kind: which endpoint serves it, how it is cached, and
/// how fetched state is persisted.
#[async_trait]
pub trait SyncResource: Send + Sync {
    /// Decoded upstream response body.
    type Fetched: Send;
    /// Persisted shape, served from cache and store alike.
    type Value: Clone + Serialize + DeserializeOwned + Send + Sync;

    /// Cache key segment, e.g. `skillboard::<KIND>::<id>`.
    const KIND: &'static str;

    fn endpoint(&self, id: i64) -> Endpoint;

    fn cache_ttl(&self) -> Duration {
        DEFAULT_CACHE_TTL
    }

    fn cache_layout(&self) -> CacheLayout {
        CacheLayout::Blob
    }

    /// Floor for the freshness window, for entities that change far less
    /// often than upstream's `Expires` header implies.
    fn min_expiry(&self) -> Option<chrono::Duration> {
        None
    }

    async fn fetch(
        &self,
        esi: &EsiClient,
        id: i64,
        mods: &ModifierSet<'_>,
    ) -> Result<FetchOutcome<Self::Fetched>, Error>;

    /// The persisted copy, if any. Multi-row entities return `None` when no
    /// rows exist.
    async fn load(&self, db: &DatabaseConnection, id: i64) -> Result<Option<Self::Value>, Error>;

    /// Persist a fresh upstream state, replacing or updating `existing`.
    async fn store(
        &self,
        db: &DatabaseConnection,
        id: i64,
        fetched: Self::Fetched,
        existing: Option<Self::Value>,
    ) -> Result<Self::Value, Error>;

    fn encode_cached(&self, value: &Self::Value) -> Result<CachePayload, CacheError> {
        Ok(CachePayload::Blob(
            serde_json::to_vec(value).map_err(CacheError::Encode)?,
        ))
    }

    fn decode_cached(&self, payload: CachePayload) -> Result<Self::Value, CacheError> {
        match payload {
            CachePayload::Blob(data) => {
                serde_json::from_slice(&data).map_err(CacheError::Decode)
            }
            CachePayload::Set(_) => decode_layout_mismatch(),
        }
    }
}

pub(crate) fn decode_layout_mismatch<T>() -> Result<T, CacheError> {
    Err(CacheError::Decode(serde_json::Error::custom(
        "cache payload does not match the resource's layout",
    )))
}

pub struct Synchronizer<R: SyncResource> {
    db: DatabaseConnection,
    cache: Arc<dyn Cache>,
    etags: EtagService,
    esi: EsiClient,
    resource: R,
    flights: FlightGroup,
}

impl<R: SyncResource> Synchronizer<R> {
    pub fn new(
        db: DatabaseConnection,
        cache: Arc<dyn Cache>,
        etags: EtagService,
        esi: EsiClient,
        resource: R,
    ) -> Self {
        Self {
            db,
            cache,
            etags,
            esi,
            resource,
            flights: FlightGroup::new(),
        }
    }

    /// Current state of the entity, fetching from upstream only when neither
    /// the cache nor the store can vouch for it.
    ///
    /// `Ok(None)` is the degenerate case where upstream revalidated (304) an
    /// entity this mirror never persisted; the freshness token predates the
    /// row, which heals once the token expires.
    pub async fn get_or_refresh(
        &self,
        id: i64,
        access_token: Option<&str>,
    ) -> Result<Option<R::Value>, Error> {
        let cache_key = cache::key(&[R::KIND, &id.to_string()]);

        if let Some(value) = self.read_cache(&cache_key).await {
            return Ok(Some(value));
        }

        // Concurrent lookups for the same entity wait here; all but the
        // first are then answered by the recheck below.
        let _guard = self.flights.lock(&cache_key).await;

        if let Some(value) = self.read_cache(&cache_key).await {
            return Ok(Some(value));
        }

        let endpoint = self.resource.endpoint(id);
        let resource_key = endpoint.resource_key();

        let token = self.etags.get(&resource_key).await?;
        let persisted = self.resource.load(&self.db, id).await?;

        if let (Some(persisted), Some(token)) = (&persisted, &token) {
            let grace = chrono::Duration::seconds(FRESHNESS_GRACE_SECS);
            if token.cached_until > (Utc::now() + grace).naive_utc() {
                debug!(kind = R::KIND, id, "serving stored entity within freshness window");
                self.write_cache(&cache_key, persisted).await;
                return Ok(Some(persisted.clone()));
            }
        }

        let min_expiry = self
            .resource
            .min_expiry()
            .map(|floor| (Utc::now() + floor).naive_utc());

        let mut mods =
            ModifierSet::new().with(CaptureEtag::new(&self.etags, resource_key, min_expiry));
        if let Some(token) = &token {
            if !token.etag.is_empty() {
                mods = mods.with(IfNoneMatch::new(&token.etag));
            }
        }
        if let Some(access_token) = access_token {
            if !access_token.is_empty() {
                mods = mods.with(BearerToken::new(access_token));
            }
        }

        match self.resource.fetch(&self.esi, id, &mods).await? {
            FetchOutcome::NotModified => {
                if let Some(persisted) = &persisted {
                    self.write_cache(&cache_key, persisted).await;
                }
                Ok(persisted)
            }
            FetchOutcome::Fresh(fetched) => {
                let value = self.resource.store(&self.db, id, fetched, persisted).await?;
                self.write_cache(&cache_key, &value).await;
                Ok(Some(value))
            }
        }
    }

    async fn read_cache(&self, key: &str) -> Option<R::Value> {
        let payload = match self.resource.cache_layout() {
            CacheLayout::Blob => match self.cache.get(key).await {
                Ok(Some(data)) => CachePayload::Blob(data),
                Ok(None) => return None,
                Err(err) => {
                    warn!(kind = R::KIND, %key, "cache read failed, treating as miss: {err}");
                    return None;
                }
            },
            CacheLayout::Set => match self.cache.set_members(key).await {
                Ok(members) if !members.is_empty() => CachePayload::Set(members),
                Ok(_) => return None,
                Err(err) => {
                    warn!(kind = R::KIND, %key, "cache read failed, treating as miss: {err}");
                    return None;
                }
            },
        };

        match self.resource.decode_cached(payload) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(kind = R::KIND, %key, "discarding undecodable cache entry: {err}");
                None
            }
        }
    }

    async fn write_cache(&self, key: &str, value: &R::Value) {
        let payload = match self.resource.encode_cached(value) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(kind = R::KIND, %key, "failed to encode for cache: {err}");
                return;
            }
        };

        let ttl = self.resource.cache_ttl();
        let result = match payload {
            CachePayload::Blob(data) => self.cache.set(key, data, ttl).await,
            // An empty set cannot be represented; clear the key instead.
            CachePayload::Set(members) if members.is_empty() => self.cache.delete(key).await,
            CachePayload::Set(members) => self.cache.set_replace(key, members, ttl).await,
        };

        if let Err(err) = result {
            warn!(kind = R::KIND, %key, "cache write failed, continuing: {err}");
        }
    }
}
