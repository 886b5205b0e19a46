use reqwest::StatusCode;
use thiserror::Error;

/// Errors from the upstream ESI client.
///
/// Retryable conditions (network failures, 5xx, error-limit responses) are
/// handled inside the request loop and never surface here; these variants are
/// the fatal outcomes.
#[derive(Error, Debug)]
pub enum EsiError {
    /// ESI answered with a non-retryable client error. The body is kept for
    /// diagnostics but must only ever be logged, never shown to end users.
    #[error("ESI rejected request to {path} with status {status}: {body}")]
    Rejected {
        path: String,
        status: StatusCode,
        body: String,
    },
    /// The response body could not be decoded into the expected shape.
    #[error("Failed to decode ESI response body for {path}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    /// The `Expires` header was present but unparseable.
    #[error("Failed to parse ESI Expires header: {value:?}")]
    InvalidExpiry { value: String },
    /// Request construction or another non-retryable transport failure.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}
