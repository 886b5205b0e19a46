use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::{cache::Cache, error::cache::CacheError};

enum Payload {
    Blob(Vec<u8>),
    Set(Vec<Vec<u8>>),
}

struct Entry {
    payload: Payload,
    expires_at: Instant,
}

/// In-process cache with per-entry TTLs, used by the test suite in place of
/// a real Valkey; expired entries are dropped lazily on read.
#[derive(Default)]
pub struct MemoryCache {
    entries: DashMap<String, Entry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn live(&self, key: &str) -> Option<dashmap::mapref::one::Ref<'_, String, Entry>> {
        // The guard from `get` must be dropped before `remove` touches the
        // same shard.
        let expired = match self.entries.get(key) {
            Some(entry) => entry.expires_at <= Instant::now(),
            None => return None,
        };

        if expired {
            self.entries.remove(key);
            return None;
        }

        self.entries.get(key)
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.live(key).and_then(|entry| match &entry.payload {
            Payload::Blob(data) => Some(data.clone()),
            Payload::Set(_) => None,
        }))
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        self.entries.insert(
            key.to_string(),
            Entry {
                payload: Payload::Blob(value),
                expires_at: Instant::now() + ttl,
            },
        );

        Ok(())
    }

    async fn set_members(&self, key: &str) -> Result<Vec<Vec<u8>>, CacheError> {
        Ok(self
            .live(key)
            .map(|entry| match &entry.payload {
                Payload::Set(members) => members.clone(),
                Payload::Blob(_) => Vec::new(),
            })
            .unwrap_or_default())
    }

    async fn set_replace(
        &self,
        key: &str,
        values: Vec<Vec<u8>>,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        if values.is_empty() {
            self.entries.remove(key);
            return Ok(());
        }

        self.entries.insert(
            key.to_string(),
            Entry {
                payload: Payload::Set(values),
                expires_at: Instant::now() + ttl,
            },
        );

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.remove(key);

        Ok(())
    }
}
