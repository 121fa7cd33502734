//! Connection records and the registry seam.
//!
//! Connections are owned and persisted by an external registry; this crate
//! only reads them. [`EnvConnectionRegistry`] is the shipped implementation,
//! resolving `CONN_{ID}_*` environment variables.

use std::env;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A named credential record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub conn_id: String,
    /// Optional host override for the remote API.
    pub host: Option<String>,
    /// Secret (API key or password) used for the Authorization header.
    pub password: String,
    /// Extra JSON-encoded fields, interpreted as additional request headers.
    pub extra: Option<String>,
}

impl Connection {
    /// Parse `extra` as a flat JSON object of header name/value pairs.
    pub fn extra_headers(&self) -> Result<Vec<(String, String)>, CoreError> {
        let Some(raw) = self.extra.as_deref() else {
            return Ok(Vec::new());
        };

        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| CoreError::ExtraParse {
                conn_id: self.conn_id.clone(),
                reason: e.to_string(),
            })?;

        let Some(map) = value.as_object() else {
            return Err(CoreError::ExtraParse {
                conn_id: self.conn_id.clone(),
                reason: "expected a JSON object".to_string(),
            });
        };

        let mut headers = Vec::with_capacity(map.len());
        for (name, v) in map {
            let Some(s) = v.as_str() else {
                return Err(CoreError::ExtraParse {
                    conn_id: self.conn_id.clone(),
                    reason: format!("value for '{}' is not a string", name),
                });
            };
            headers.push((name.clone(), s.to_string()));
        }
        Ok(headers)
    }
}

/// Read-only access to the external connection store.
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// Resolve a connection by id. Fails with [`CoreError::Configuration`]
    /// when the id is unset or unknown.
    async fn get_connection(&self, conn_id: &str) -> Result<Connection, CoreError>;
}

/// Registry backed by environment variables.
///
/// For a connection id `stitch-prod` the lookup keys are
/// `CONN_STITCH_PROD_HOST`, `CONN_STITCH_PROD_PASSWORD` and
/// `CONN_STITCH_PROD_EXTRA`. The password is required; host and extra are
/// optional.
#[derive(Debug, Default)]
pub struct EnvConnectionRegistry;

impl EnvConnectionRegistry {
    pub fn new() -> Self {
        Self
    }

    fn env_key(conn_id: &str, suffix: &str) -> String {
        let id = conn_id.to_uppercase().replace('-', "_");
        format!("CONN_{}_{}", id, suffix)
    }

    fn env_opt(key: &str) -> Option<String> {
        env::var(key).ok().filter(|s| !s.is_empty())
    }
}

#[async_trait]
impl ConnectionRegistry for EnvConnectionRegistry {
    async fn get_connection(&self, conn_id: &str) -> Result<Connection, CoreError> {
        if conn_id.is_empty() {
            return Err(CoreError::Configuration("connection id is required".to_string()));
        }

        let password = Self::env_opt(&Self::env_key(conn_id, "PASSWORD")).ok_or_else(|| {
            CoreError::Configuration(format!(
                "connection '{}' not found: {} is unset",
                conn_id,
                Self::env_key(conn_id, "PASSWORD")
            ))
        })?;

        Ok(Connection {
            conn_id: conn_id.to_string(),
            host: Self::env_opt(&Self::env_key(conn_id, "HOST")),
            password,
            extra: Self::env_opt(&Self::env_key(conn_id, "EXTRA")),
        })
    }
}

// ── Tests ────────────────────────────────────────────────────────
