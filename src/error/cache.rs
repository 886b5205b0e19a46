use thiserror::Error;

/// Errors from the ephemeral cache layer.
///
/// The cache is non-authoritative: the synchronizer treats read failures as a
/// miss and write failures as best-effort, so these errors are usually logged
/// rather than propagated.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error(transparent)]
    Redis(#[from] fred::prelude::Error),
    #[error("Failed to encode cache payload")]
    Encode(#[source] serde_json::Error),
    #[error("Failed to decode cache payload")]
    Decode(#[source] serde_json::Error),
}
