use fred::prelude::*;
use tracing::warn;
use uuid::Uuid;

use crate::error::Error;

const QUEUE_KEY: &str = "skillboard::queue::refresh";

/// Redis sorted set of principal ids awaiting a refresh pass, scored by
/// enqueue time so the longest-waiting user drains first.
pub struct RefreshQueue {
    pool: Pool,
    queue_key: String,
}

impl RefreshQueue {
    pub fn new(pool: Pool) -> Self {
        Self {
            pool,
            queue_key: QUEUE_KEY.to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_queue_key(pool: Pool, queue_key: &str) -> Self {
        Self {
            pool,
            queue_key: queue_key.to_string(),
        }
    }

    /// Enqueue a user. `NX` keeps the original score when the user is
    /// already queued, so repeated sweeps never reorder or duplicate.
    pub async fn push(&self, user_id: Uuid) -> Result<(), Error> {
        let score = chrono::Utc::now().timestamp() as f64;

        let _: () = self
            .pool
            .zadd(
                &self.queue_key,
                Some(SetOptions::NX),
                None,
                false,
                false,
                (score, user_id.to_string()),
            )
            .await?;

        Ok(())
    }

    /// Block until a user id is available. Entries that are not valid UUIDs
    /// are dropped with a warning rather than wedging the loop.
    pub async fn pop(&self) -> Result<Uuid, Error> {
        loop {
            let entry: Option<(String, String, f64)> =
                self.pool.bzpopmin(&self.queue_key, 0.0).await?;

            let Some((_, member, _)) = entry else {
                continue;
            };

            match Uuid::parse_str(&member) {
                Ok(user_id) => return Ok(user_id),
                Err(err) => {
                    warn!(%member, "discarding non-uuid queue entry: {err}");
                }
            }
        }
    }
}
