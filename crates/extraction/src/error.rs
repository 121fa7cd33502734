use thiserror::Error;

use stitch_core::CoreError;
use stitch_http::HttpError;

/// Errors from triggering or monitoring an extraction.
///
/// None of these are retried here beyond the monitor's own poll cadence;
/// they propagate to the host scheduler, which applies its retry policy.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Http(#[from] HttpError),

    /// The sync endpoint answered 200 but carried an error object; the
    /// remote signals "already running" this way rather than via status code.
    #[error("sync refused for source {source_id}: type = {error_type}, message = {message}")]
    AlreadyRunning {
        source_id: String,
        error_type: String,
        message: String,
    },

    /// The trigger response carried neither an error nor a job name.
    #[error("sync for source {source_id} returned no job_name, response: {body}")]
    MalformedResponse { source_id: String, body: String },

    /// The run finished with a non-zero tap exit status.
    #[error("extraction failed for source {source_id}")]
    Failed { source_id: String },

    /// The source never appeared on any page of the status feed.
    #[error("source {source_id} not found in status feed")]
    SourceNotFound { source_id: String },

    /// The monitoring deadline elapsed without a terminal condition.
    #[error("extraction for source {source_id} timed out after {timeout_secs}s")]
    Timeout { source_id: String, timeout_secs: u64 },
}
