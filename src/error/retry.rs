use sea_orm::DbErr;

use super::Error;

/// Strategy for handling errors in a retry context
pub enum ErrorRetryStrategy {
    /// Transient failure, safe to re-enqueue the work
    Retry,
    /// Failed permanently
    Fail,
}

impl Error {
    /// Determine the retry strategy for a failed refresh based on the error type.
    ///
    /// Upstream 5xx and network errors are retried inside the ESI request loop
    /// and never reach this classifier; by the time an `Esi` error arrives here
    /// it is a rejected request or a decode failure, both permanent.
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            Self::Db(db_err) => match db_err {
                // Connection-level errors are transient
                DbErr::ConnectionAcquire(_) => ErrorRetryStrategy::Retry,
                DbErr::Conn(_) => ErrorRetryStrategy::Retry,
                // Everything else (query errors, constraint violations, type
                // conversion) indicates a bug or bad data that a retry will
                // not fix
                _ => ErrorRetryStrategy::Fail,
            },

            // Redis connectivity is transient
            Self::Redis(_) => ErrorRetryStrategy::Retry,
            Self::Cache(_) => ErrorRetryStrategy::Retry,

            // Rejected requests, decode failures, bad configuration
            Self::Esi(_) => ErrorRetryStrategy::Fail,
            Self::Config(_) => ErrorRetryStrategy::Fail,
            Self::Parse(_) => ErrorRetryStrategy::Fail,
            Self::Scheduler(_) => ErrorRetryStrategy::Fail,
        }
    }
}
