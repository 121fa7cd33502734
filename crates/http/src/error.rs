use thiserror::Error;

/// Errors from authenticated HTTP calls.
///
/// Nothing here is retried internally; failures propagate to the caller and
/// ultimately to the host scheduler.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Transport-level failure (connect, TLS, body read).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not valid JSON.
    #[error("failed to decode response as JSON: {0}")]
    Decode(String),
}
