use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use stitch_core::{Connection, CoreError};

use crate::auth::AuthScheme;
use crate::error::HttpError;

/// Authenticated JSON HTTP client.
///
/// Holds the rendered Authorization header and any extra connection headers;
/// every request carries them plus `Content-Type: application/json`.
#[derive(Debug)]
pub struct SecureClient {
    client: reqwest::Client,
    auth_header: String,
    extra_headers: Vec<(String, String)>,
}

impl SecureClient {
    /// Build a client from a raw secret and scheme.
    pub fn new(scheme: AuthScheme, secret: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            auth_header: scheme.header_value(secret),
            extra_headers: Vec::new(),
        }
    }

    /// Build a client from a resolved [`Connection`], carrying over the
    /// connection's extra headers.
    pub fn from_connection(scheme: AuthScheme, conn: &Connection) -> Result<Self, CoreError> {
        Ok(Self {
            client: reqwest::Client::new(),
            auth_header: scheme.header_value(&conn.password),
            extra_headers: conn.extra_headers()?,
        })
    }

    /// Issue a request and decode the response body as JSON.
    ///
    /// Fails with [`HttpError::Status`] on any non-2xx response (remote
    /// status and body preserved) and [`HttpError::Decode`] when the body is
    /// not valid JSON.
    pub async fn request_json(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Value, HttpError> {
        debug!(%method, url, "sending request");

        let mut req = self
            .client
            .request(method, url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json");
        for (name, value) in &self.extra_headers {
            req = req.header(name.as_str(), value.as_str());
        }
        if let Some(b) = body {
            req = req.json(b);
        }

        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(HttpError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| HttpError::Decode(e.to_string()))
    }

    /// GET a URL as JSON.
    pub async fn get_json(&self, url: &str) -> Result<Value, HttpError> {
        self.request_json(Method::GET, url, None).await
    }

    /// POST to a URL (optionally with a JSON body) and decode JSON.
    pub async fn post_json(&self, url: &str, body: Option<&Value>) -> Result<Value, HttpError> {
        self.request_json(Method::POST, url, body).await
    }
}
