//! Credential-bearing JSON HTTP client.
//!
//! [`SecureClient`] wraps `reqwest` with an Authorization header built from a
//! configured [`AuthScheme`] and a connection secret. All responses are
//! decoded as JSON; non-2xx statuses are surfaced with the remote body.

pub mod auth;
pub mod client;
pub mod error;

pub use auth::AuthScheme;
pub use client::SecureClient;
pub use error::HttpError;
