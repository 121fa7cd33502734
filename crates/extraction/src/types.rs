//! Wire types for the sync and status-feed endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A triggered sync run. Exists for the duration of the task; used for
/// logging and correlation only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionJob {
    pub job_name: String,
    pub source_id: String,
    pub client_id: String,
}

/// One entry from the status feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionStatusItem {
    /// The feed emits this as either a JSON string or a number.
    #[serde(deserialize_with = "string_or_number")]
    pub source_id: String,
    /// Completion time of the most recent run for this source.
    #[serde(with = "feed_time")]
    pub completion_time: DateTime<Utc>,
    /// Remote-side process exit code; `0` = success, absent while ambiguous.
    #[serde(default)]
    pub tap_exit_status: Option<i64>,
}

/// One page of the status feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusPage {
    #[serde(default)]
    pub data: Vec<ExtractionStatusItem>,
    #[serde(default)]
    pub links: PageLinks,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageLinks {
    #[serde(default)]
    pub next: Option<String>,
}

/// Accept a JSON string or number and normalise to `String`.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "source_id must be a string or number, got {}",
            other
        ))),
    }
}

/// The feed's timestamp format: `%Y-%m-%dT%H:%M:%SZ` (UTC, no offset).
pub(crate) mod feed_time {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

    pub fn serialize<S>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}

// ── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn status_item_parses_string_source_id() {
        let item: ExtractionStatusItem = serde_json::from_str(
            r#"{"source_id":"123","completion_time":"2024-05-01T10:30:00Z","tap_exit_status":0}"#,
        )
        .unwrap();
        assert_eq!(item.source_id, "123");
        assert_eq!(item.tap_exit_status, Some(0));
        assert_eq!(
            item.completion_time,
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap()
        );
    }

    #[test]
    fn status_item_parses_numeric_source_id() {
        let item: ExtractionStatusItem = serde_json::from_str(
            r#"{"source_id":123,"completion_time":"2024-05-01T10:30:00Z"}"#,
        )
        .unwrap();
        assert_eq!(item.source_id, "123");
        assert_eq!(item.tap_exit_status, None);
    }

    #[test]
    fn status_item_null_exit_status() {
        let item: ExtractionStatusItem = serde_json::from_str(
            r#"{"source_id":"1","completion_time":"2024-05-01T10:30:00Z","tap_exit_status":null}"#,
        )
        .unwrap();
        assert_eq!(item.tap_exit_status, None);
    }

    #[test]
    fn status_item_rejects_offset_timestamps() {
        let result: Result<ExtractionStatusItem, _> = serde_json::from_str(
            r#"{"source_id":"1","completion_time":"2024-05-01T10:30:00+02:00"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn page_without_links_defaults_to_no_next() {
        let page: StatusPage = serde_json::from_str(r#"{"data":[]}"#).unwrap();
        assert!(page.data.is_empty());
        assert!(page.links.next.is_none());
    }

    #[test]
    fn page_with_next_link() {
        let page: StatusPage = serde_json::from_str(
            r#"{"data":[],"links":{"next":"/v4/9999/extractions?page=2"}}"#,
        )
        .unwrap();
        assert_eq!(page.links.next.as_deref(), Some("/v4/9999/extractions?page=2"));
    }

    #[test]
    fn feed_time_roundtrip() {
        let item = ExtractionStatusItem {
            source_id: "7".into(),
            completion_time: Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap(),
            tap_exit_status: Some(0),
        };
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"2024-05-01T10:30:00Z\""));
    }
}
