//! Stitch sync client: trigger, monitor, and the combined run.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use stitch_core::{ApiConfig, CoreError, MonitorConfig};
use stitch_http::SecureClient;

use crate::error::ExtractionError;
use crate::monitor::{scan_page, ExtractionStatus, PageVerdict};
use crate::types::{ExtractionJob, StatusPage};

/// Client for one source on the Stitch extraction platform.
///
/// Wraps the authenticated HTTP client and adds:
/// - Sync triggering with body-level error detection (the remote answers
///   200 even when a sync is already running)
/// - Status-feed monitoring with pagination, staleness checks, and a
///   bounded-time poll loop
#[derive(Debug)]
pub struct StitchClient {
    http: SecureClient,
    api: ApiConfig,
    monitor: MonitorConfig,
    source_id: String,
    client_id: String,
}

impl StitchClient {
    /// Create a client for a source. Empty identifiers fail fast with a
    /// configuration error.
    pub fn new(
        http: SecureClient,
        api: ApiConfig,
        monitor: MonitorConfig,
        source_id: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Result<Self, ExtractionError> {
        let source_id = source_id.into();
        let client_id = client_id.into();
        if source_id.is_empty() {
            return Err(CoreError::Configuration("source_id is required".to_string()).into());
        }
        if client_id.is_empty() {
            return Err(CoreError::Configuration("client_id is required".to_string()).into());
        }
        Ok(Self { http, api, monitor, source_id, client_id })
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    // -----------------------------------------------------------------------
    // Public API
    // -----------------------------------------------------------------------

    /// Kick off a sync run for the source.
    ///
    /// The remote returns HTTP 200 even when a sync is already running and
    /// signals that via an `error` object in the body, so success is decided
    /// by body content rather than status code.
    pub async fn trigger_extraction(&self) -> Result<ExtractionJob, ExtractionError> {
        let url = format!("{}/sources/{}/sync", self.api.api_base(), self.source_id);
        let body = self.http.post_json(&url, None).await?;

        if let Some(error) = body.get("error").filter(|v| !v.is_null()) {
            let error_type = field_or(error, "type", "unspecified");
            let message = field_or(error, "message", "unspecified");
            warn!(
                source_id = %self.source_id,
                error_type = %error_type,
                message = %message,
                "sync refused"
            );
            return Err(ExtractionError::AlreadyRunning {
                source_id: self.source_id.clone(),
                error_type,
                message,
            });
        }

        let Some(job_name) = body.get("job_name").and_then(Value::as_str) else {
            return Err(ExtractionError::MalformedResponse {
                source_id: self.source_id.clone(),
                body: body.to_string(),
            });
        };

        info!(
            source_id = %self.source_id,
            job_name = %job_name,
            dashboard = %self.api.dashboard_url(&self.client_id, &self.source_id),
            "extraction triggered"
        );

        Ok(ExtractionJob {
            job_name: job_name.to_string(),
            source_id: self.source_id.clone(),
            client_id: self.client_id.clone(),
        })
    }

    /// Follow the status feed until the run started at-or-after `start_time`
    /// reaches a terminal state or the deadline elapses.
    ///
    /// Lifecycle:
    /// 1. Wait the grace period: the remote job needs time to register, and
    ///    polling immediately risks reading the previous run.
    /// 2. Poll the feed, paginating forward while the source is absent from
    ///    the pages seen so far.
    /// 3. On a stale hit, sleep and restart from the first page: the feed
    ///    lists the most recent run per source first, so a stale entry means
    ///    the new record does not exist yet on any page.
    pub async fn monitor_extraction(&self, start_time: DateTime<Utc>) -> Result<(), ExtractionError> {
        tokio::time::sleep(self.monitor.grace()).await;

        let first_page = self.extractions_url();
        let mut url = first_page.clone();

        while elapsed_secs(start_time) < self.monitor.timeout_secs {
            let page = self.fetch_status_page(&url).await?;

            match scan_page(&page, &self.source_id, start_time) {
                PageVerdict::Complete(item) => {
                    info!(
                        source_id = %self.source_id,
                        elapsed_secs = elapsed_secs(start_time),
                        completion_time = %item.completion_time,
                        "extraction succeeded"
                    );
                    return Ok(());
                }
                PageVerdict::Failed(item) => {
                    warn!(
                        source_id = %self.source_id,
                        tap_exit_status = ?item.tap_exit_status,
                        "extraction failed"
                    );
                    return Err(ExtractionError::Failed { source_id: self.source_id.clone() });
                }
                PageVerdict::Stale(item) => {
                    debug!(
                        source_id = %self.source_id,
                        completion_time = %item.completion_time,
                        "previous run still newest entry, waiting"
                    );
                    tokio::time::sleep(self.monitor.poll_interval()).await;
                    url = first_page.clone();
                }
                PageVerdict::NotOnPage => match page.links.next.as_deref() {
                    // Keep walking forward without sleeping until the source
                    // shows up or the pages run out.
                    Some(next) => url = self.resolve_next(&url, next)?,
                    None => {
                        return Err(ExtractionError::SourceNotFound {
                            source_id: self.source_id.clone(),
                        })
                    }
                },
            }
        }

        Err(ExtractionError::Timeout {
            source_id: self.source_id.clone(),
            timeout_secs: self.monitor.timeout_secs,
        })
    }

    /// One full pagination walk, without sleeping (the sensor variant).
    ///
    /// The host scheduler provides the repeat cadence; each call reports
    /// whether the run is complete ([`ExtractionStatus::Complete`]) or the
    /// feed still shows a previous run ([`ExtractionStatus::Pending`]).
    /// Failure and absence are terminal errors exactly as in
    /// [`Self::monitor_extraction`].
    pub async fn check_extraction(
        &self,
        start_time: DateTime<Utc>,
    ) -> Result<ExtractionStatus, ExtractionError> {
        let mut url = self.extractions_url();

        loop {
            let page = self.fetch_status_page(&url).await?;

            match scan_page(&page, &self.source_id, start_time) {
                PageVerdict::Complete(_) => return Ok(ExtractionStatus::Complete),
                PageVerdict::Stale(_) => return Ok(ExtractionStatus::Pending),
                PageVerdict::Failed(_) => {
                    return Err(ExtractionError::Failed { source_id: self.source_id.clone() })
                }
                PageVerdict::NotOnPage => match page.links.next.as_deref() {
                    Some(next) => url = self.resolve_next(&url, next)?,
                    None => {
                        return Err(ExtractionError::SourceNotFound {
                            source_id: self.source_id.clone(),
                        })
                    }
                },
            }
        }
    }

    /// Trigger, then monitor, measuring from now.
    pub async fn run_and_monitor(&self) -> Result<ExtractionJob, ExtractionError> {
        self.run_and_monitor_from(Utc::now()).await
    }

    /// Trigger, then monitor. `start_time` must be captured **before** the
    /// trigger so the grace delay and staleness comparisons are relative to
    /// task start, not trigger completion.
    pub async fn run_and_monitor_from(
        &self,
        start_time: DateTime<Utc>,
    ) -> Result<ExtractionJob, ExtractionError> {
        info!(source_id = %self.source_id, "starting extraction");
        let job = self.trigger_extraction().await?;

        info!(source_id = %self.source_id, job_name = %job.job_name, "monitoring extraction");
        self.monitor_extraction(start_time).await?;

        Ok(job)
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    /// First page of the status feed.
    fn extractions_url(&self) -> String {
        format!("{}/{}/extractions", self.api.api_base(), self.client_id)
    }

    async fn fetch_status_page(&self, url: &str) -> Result<StatusPage, ExtractionError> {
        let body = self.http.get_json(url).await?;
        serde_json::from_value(body.clone()).map_err(|e| {
            warn!(url, error = %e, "status feed page did not match expected shape");
            ExtractionError::MalformedResponse {
                source_id: self.source_id.clone(),
                body: body.to_string(),
            }
        })
    }

    /// Resolve a `links.next` reference against the current page URL. The
    /// feed emits path-only links, so this lands on the API host.
    fn resolve_next(&self, current: &str, next: &str) -> Result<String, ExtractionError> {
        Url::parse(current)
            .and_then(|base| base.join(next))
            .map(String::from)
            .map_err(|e| ExtractionError::MalformedResponse {
                source_id: self.source_id.clone(),
                body: format!("links.next = '{}': {}", next, e),
            })
    }
}

fn field_or(value: &Value, key: &str, default: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

/// Whole seconds since `start_time`, clamped at zero.
fn elapsed_secs(start_time: DateTime<Utc>) -> u64 {
    (Utc::now() - start_time).num_seconds().max(0) as u64
}
