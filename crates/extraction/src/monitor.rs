//! Per-page decision logic for the status feed.
//!
//! The monitor loop itself lives in [`crate::client::StitchClient`]; the
//! decision about what one page of feed data means for a source is pure and
//! kept here so it can be tested without HTTP.

use chrono::{DateTime, Utc};

use crate::types::{ExtractionStatusItem, StatusPage};

/// Non-terminal verdict of one full pagination walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStatus {
    /// The run finished after the monitored start time.
    Complete,
    /// The feed only shows a run older than the monitored start time; the
    /// new completion record does not exist yet.
    Pending,
}

/// What one page of the feed says about a source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum PageVerdict<'a> {
    /// Finished at-or-after the start time with exit status 0 or absent.
    Complete(&'a ExtractionStatusItem),
    /// Finished at-or-after the start time with a non-zero exit status.
    Failed(&'a ExtractionStatusItem),
    /// The matching entry predates the start time (a previous run).
    Stale(&'a ExtractionStatusItem),
    /// The source does not appear on this page.
    NotOnPage,
}

/// Scan one page for the source, stopping at the first match.
///
/// Staleness is strict: an entry completed exactly at `start_time` counts as
/// this run's completion. A present-and-nonzero `tap_exit_status` is a
/// failure; `0` or absent is success. An absent status on a fresh entry is
/// ambiguous upstream (it may also mean "still running"); it is treated as
/// success here, matching the feed's observed behavior.
pub(crate) fn scan_page<'a>(
    page: &'a StatusPage,
    source_id: &str,
    start_time: DateTime<Utc>,
) -> PageVerdict<'a> {
    for item in &page.data {
        if item.source_id == source_id {
            if item.completion_time < start_time {
                return PageVerdict::Stale(item);
            }
            if matches!(item.tap_exit_status, Some(status) if status != 0) {
                return PageVerdict::Failed(item);
            }
            return PageVerdict::Complete(item);
        }
    }
    PageVerdict::NotOnPage
}

// ── Tests ────────────────────────────────────────────────────────
