//! Skillboard: a local mirror of EVE Online player data.
//!
//! The engine is a generic get-or-refresh synchronizer ([`sync`]) that
//! reconciles an ephemeral Valkey cache, the durable store, and the upstream
//! ESI API using conditional requests, plus a scope-gated processor layer
//! ([`processor`]) that refreshes each authenticated user's data in the
//! background.

pub mod cache;
pub mod config;
pub mod data;
pub mod error;
pub mod esi;
pub mod etag;
pub mod processor;
pub mod scheduler;
pub mod startup;
pub mod sync;

mod util;
