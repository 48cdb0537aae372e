//! Scheduled calendar events.
//!
//! Events arrive from the backend as [`RawEvent`] records with ISO-8601
//! string timestamps and are normalized into [`Event`] before any
//! detection runs. Normalization never fails: an unparsable start leaves
//! the event without a start, which excludes it from every comparison.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Naive date-time layouts accepted in addition to RFC 3339. Interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// A scheduled calendar item, ready for conflict detection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// `None` when the source start time was absent or unparsable.
    pub start: Option<DateTime<Utc>>,
    /// `None` means zero duration (end == start).
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub trade: Option<String>,
}

impl Event {
    /// Create an event with a known start and optional end.
    pub fn new(id: impl Into<String>, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Self {
        Self {
            id: id.into(),
            title: None,
            start: Some(start),
            end,
            project_id: None,
            trade: None,
        }
    }

    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_trade(mut self, trade: impl Into<String>) -> Self {
        self.trade = Some(trade.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The `[start, end]` interval used for comparisons.
    ///
    /// Returns `None` for events without a start. A missing end means a
    /// zero-duration interval; an end that is present is used as given,
    /// even when it precedes the start.
    pub fn interval(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let start = self.start?;
        Some((start, self.end.unwrap_or(start)))
    }

    /// Whether this event takes part in comparisons at all.
    pub fn is_comparable(&self) -> bool {
        self.start.is_some()
    }

    /// Trade tag, with empty strings treated as absent.
    pub fn trade_tag(&self) -> Option<&str> {
        self.trade.as_deref().filter(|t| !t.is_empty())
    }

    /// Label for display: the title when present, the id otherwise.
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }
}

/// Event record as fetched from the backend, before normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEvent {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub trade: Option<String>,
}

impl RawEvent {
    /// Parse timestamps and blank-out empty identifiers.
    pub fn normalize(&self) -> Event {
        let start = self.start_time.as_deref().and_then(parse_instant);
        if start.is_none() {
            tracing::warn!(
                id = %self.id,
                start_time = ?self.start_time,
                "event has no usable start time; excluding from comparisons"
            );
        }

        let end = self.end_time.as_deref().and_then(|s| {
            let parsed = parse_instant(s);
            if parsed.is_none() {
                tracing::debug!(id = %self.id, end_time = s, "unparsable end time, treating as zero duration");
            }
            parsed
        });

        Event {
            id: self.id.clone(),
            title: non_empty(self.title.as_deref()),
            start,
            end,
            project_id: non_empty(self.project_id.as_deref()),
            trade: non_empty(self.trade.as_deref()),
        }
    }
}

/// Empty strings become `None`. Whitespace is kept, so `"electrical "` and
/// `"electrical"` stay distinct trades.
fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}

/// Parse an ISO-8601 instant.
///
/// Accepts RFC 3339 with any offset, naive date-times (taken as UTC), and
/// bare dates (midnight UTC). Returns `None` for anything else.
pub fn parse_instant(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parse a JSON array of raw events and normalize each one.
///
/// # Errors
///
/// Returns an error if the document is not a JSON array of event records.
/// Individual records with bad timestamps are kept, not rejected.
pub fn parse_events(json: &str) -> Result<Vec<Event>> {
    let raw: Vec<RawEvent> = serde_json::from_str(json)?;
    Ok(raw.iter().map(RawEvent::normalize).collect())
}

/// Read and normalize an events file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid event JSON.
pub fn load_events(path: &Path) -> Result<Vec<Event>> {
    let content = std::fs::read_to_string(path)?;
    let events = parse_events(&content)?;
    tracing::debug!(path = %path.display(), count = events.len(), "loaded events");
    Ok(events)
}
