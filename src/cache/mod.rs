//! Ephemeral cache in front of the persistent store.
//!
//! The cache is strictly non-authoritative: entries may be evicted or the
//! backing Redis may be unavailable at any time without affecting correctness,
//! only the number of upstream calls. Multi-valued entities (contacts,
//! implants) are stored as a Redis set of serialized items with a separate
//! TTL call; everything else is a single JSON blob.

mod memory;
mod redis;

use std::time::Duration;

use async_trait::async_trait;

pub use memory::MemoryCache;
pub use redis::RedisCache;

use crate::error::cache::CacheError;

const KEY_PREFIX: &str = "skillboard";

/// Build a namespaced cache key: `skillboard::<part>::<part>...`
pub fn key(parts: &[&str]) -> String {
    let mut all = Vec::with_capacity(parts.len() + 1);
    all.push(KEY_PREFIX);
    all.extend_from_slice(parts);
    all.join("::")
}

#[async_trait]
pub trait Cache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError>;

    /// All members of a set-valued entry; empty when the key is absent.
    async fn set_members(&self, key: &str) -> Result<Vec<Vec<u8>>, CacheError>;

    /// Replace a set-valued entry wholesale, then apply the TTL.
    async fn set_replace(
        &self,
        key: &str,
        values: Vec<Vec<u8>>,
        ttl: Duration,
    ) -> Result<(), CacheError>;

    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}
