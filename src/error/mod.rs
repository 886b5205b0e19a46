//! Error types for the skillboard mirror.
//!
//! Each domain gets its own `thiserror` enum; [`Error`] aggregates them with
//! `#[from]` conversions so the `?` operator works across layers. Absence of a
//! record (cache miss, unknown freshness token, missing row) is never modeled
//! as an error — those are `Option`s at the call sites.

pub mod cache;
pub mod config;
pub mod esi;
pub mod retry;

use thiserror::Error;

use crate::error::{cache::CacheError, config::ConfigError, esi::EsiError};

#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Upstream ESI error (rejected request, malformed body, transport).
    #[error(transparent)]
    Esi(#[from] EsiError),
    /// Ephemeral cache error. Inside the synchronizer these are demoted to
    /// logs; this variant surfaces only from cache-owning call sites.
    #[error(transparent)]
    Cache(#[from] CacheError),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
    /// Redis error from the refresh queue.
    #[error(transparent)]
    Redis(#[from] fred::prelude::Error),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    Scheduler(#[from] tokio_cron_scheduler::JobSchedulerError),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    Parse(String),
}
