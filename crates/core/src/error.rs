use thiserror::Error;

/// Errors raised while resolving configuration or connections.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required identifier or credential is missing. Raised at
    /// construction time so misconfigured tasks fail fast.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The connection's `extra` field is not a flat JSON object of strings.
    #[error("connection '{conn_id}' has invalid extra JSON: {reason}")]
    ExtraParse { conn_id: String, reason: String },
}
