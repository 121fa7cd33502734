use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default Stitch API host.
const DEFAULT_BASE_URL: &str = "https://api.stitchdata.com";

/// Default Stitch dashboard host (used for log links only).
const DEFAULT_APP_URL: &str = "https://app.stitchdata.com";

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries `{PROFILE}_{KEY}` first, falls back to `{KEY}`.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u64(profile: &str, key: &str, default: u64) -> u64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

/// Configuration for the Stitch connectors.
///
/// Reads from environment variables with optional profile prefix.
/// When `STITCH_PROFILE=PROD`, every key is first looked up as
/// `PROD_{KEY}`, falling back to `{KEY}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StitchConfig {
    /// Active profile name (empty = default).
    pub profile: String,
    pub api: ApiConfig,
    pub monitor: MonitorConfig,
}

impl StitchConfig {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        let profile = env_or("STITCH_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            api: ApiConfig::from_env_profiled(p),
            monitor: MonitorConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs. No secrets live here; credentials
    /// come from the connection registry.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  api:      base={}, version={}", self.api.base_url, self.api.api_version);
        tracing::info!(
            "  monitor:  grace={}s, poll={}s, timeout={}s",
            self.monitor.grace_secs,
            self.monitor.poll_secs,
            self.monitor.timeout_secs
        );
    }
}

// ── API endpoints ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API host, without version suffix.
    pub base_url: String,
    /// API version path segment ("v4").
    pub api_version: String,
    /// Dashboard host for human-navigable links in logs.
    pub app_url: String,
}

impl ApiConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            base_url: profiled_env_or(p, "STITCH_BASE_URL", DEFAULT_BASE_URL),
            api_version: profiled_env_or(p, "STITCH_API_VERSION", "v4"),
            app_url: profiled_env_or(p, "STITCH_APP_URL", DEFAULT_APP_URL),
        }
    }

    /// Versioned API root, e.g. `https://api.stitchdata.com/v4`.
    pub fn api_base(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.api_version)
    }

    /// Dashboard URL for a source's pipeline page.
    pub fn dashboard_url(&self, client_id: &str, source_id: &str) -> String {
        format!(
            "{}/client/{}/pipeline/v2/sources/{}/",
            self.app_url.trim_end_matches('/'),
            client_id,
            source_id
        )
    }
}

// ── Monitor timing ────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Delay before the first status poll, giving the remote job time to
    /// register. Polling immediately risks reading the previous run.
    pub grace_secs: u64,
    /// Sleep between polls after a stale status hit.
    pub poll_secs: u64,
    /// Overall monitoring deadline, measured from the task's start time.
    pub timeout_secs: u64,
}

impl MonitorConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            grace_secs: profiled_env_u64(p, "STITCH_GRACE_SECONDS", 30),
            poll_secs: profiled_env_u64(p, "STITCH_POLL_SECONDS", 300),
            timeout_secs: profiled_env_u64(p, "STITCH_TIMEOUT_SECONDS", 86_400),
        }
    }

    pub fn grace(&self) -> Duration {
        Duration::from_secs(self.grace_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ── Tests ────────────────────────────────────────────────────────
