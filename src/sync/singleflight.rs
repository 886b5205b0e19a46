//! Per-key mutual exclusion for refreshes.
//!
//! Concurrent callers refreshing the same cache key serialize behind one
//! async lock; whoever enters second finds the first caller's result in the
//! cache and skips the upstream call entirely.

use std::sync::{Arc, Weak};

use dashmap::{mapref::entry::Entry, DashMap};
use tokio::sync::{Mutex, OwnedMutexGuard};

const PRUNE_THRESHOLD: usize = 1024;

#[derive(Default)]
pub struct FlightGroup {
    flights: DashMap<String, Weak<Mutex<()>>>,
}

impl FlightGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for a key, creating it on first use. The entry is a
    /// weak reference, so a key whose last guard dropped is recreated fresh.
    pub async fn lock(&self, key: &str) -> OwnedMutexGuard<()> {
        if self.flights.len() > PRUNE_THRESHOLD {
            self.flights.retain(|_, flight| flight.strong_count() > 0);
        }

        let flight = match self.flights.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => match occupied.get().upgrade() {
                Some(flight) => flight,
                None => {
                    let flight = Arc::new(Mutex::new(()));
                    occupied.insert(Arc::downgrade(&flight));
                    flight
                }
            },
            Entry::Vacant(vacant) => {
                let flight = Arc::new(Mutex::new(()));
                vacant.insert(Arc::downgrade(&flight));
                flight
            }
        };

        flight.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::FlightGroup;

    /// Expect callers on the same key to run one at a time
    #[tokio::test]
    async fn same_key_serializes() {
        let group = Arc::new(FlightGroup::new());
        let in_flight = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let group = Arc::clone(&group);
            let in_flight = Arc::clone(&in_flight);
            handles.push(tokio::spawn(async move {
                let _guard = group.lock("alliance::99000001").await;
                let concurrent = in_flight.fetch_add(1, Ordering::SeqCst);
                assert_eq!(concurrent, 0);
                tokio::task::yield_now().await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }
    }

    /// Expect different keys to proceed independently
    #[tokio::test]
    async fn different_keys_do_not_block() {
        let group = FlightGroup::new();

        let first = group.lock("alliance::99000001").await;
        let second = group.lock("alliance::99000002").await;

        drop(first);
        drop(second);
    }
}
