//! Named metrics for dashboard panels.
//!
//! Panels ask a [`MetricsSource`] for values by name and never compute
//! numbers themselves, so a placeholder source can be swapped for a real
//! one without touching the panel.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::conflict::{ConflictDetector, Severity};
use crate::event::Event;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Count(u64),
    Ratio(f64),
    Text(String),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Ratio(r) => write!(f, "{r:.2}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Anything that can answer metric lookups by name.
pub trait MetricsSource {
    fn fetch_metric(&self, name: &str) -> Option<MetricValue>;

    /// Names this source can answer, in display order.
    fn metric_names(&self) -> Vec<String>;

    /// Every metric as `(name, value)`.
    fn snapshot(&self) -> Vec<(String, MetricValue)> {
        self.metric_names()
            .into_iter()
            .filter_map(|name| self.fetch_metric(&name).map(|v| (name, v)))
            .collect()
    }
}

/// Fixed values, for panels that have no live data behind them yet.
#[derive(Debug, Clone, Default)]
pub struct StaticMetrics {
    values: BTreeMap<String, MetricValue>,
}

impl StaticMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: MetricValue) -> Self {
        self.values.insert(name.into(), value);
        self
    }
}

impl MetricsSource for StaticMetrics {
    fn fetch_metric(&self, name: &str) -> Option<MetricValue> {
        self.values.get(name).cloned()
    }

    fn metric_names(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

pub const EVENTS_TOTAL: &str = "events.total";
pub const EVENTS_EXCLUDED: &str = "events.excluded";
pub const PROJECTS_TOTAL: &str = "projects.total";
pub const CONFLICTS_TOTAL: &str = "conflicts.total";
pub const CONFLICTS_HIGH: &str = "conflicts.high";
pub const CONFLICTS_MEDIUM: &str = "conflicts.medium";
pub const CONFLICT_RATE: &str = "conflicts.rate";

/// Metrics computed from an event list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleMetrics {
    pub events_total: u64,
    pub events_excluded: u64,
    pub projects_total: u64,
    pub conflicts_total: u64,
    pub conflicts_high: u64,
    pub conflicts_medium: u64,
}

impl ScheduleMetrics {
    pub fn compute(events: &[Event], detector: &ConflictDetector) -> Self {
        let conflicts = detector.detect(events);
        let high = conflicts
            .iter()
            .filter(|c| c.severity == Severity::High)
            .count() as u64;
        let projects: BTreeSet<Option<&str>> = events
            .iter()
            .filter(|e| e.is_comparable())
            .map(|e| e.project_id.as_deref())
            .collect();

        Self {
            events_total: events.len() as u64,
            events_excluded: events.iter().filter(|e| !e.is_comparable()).count() as u64,
            projects_total: projects.len() as u64,
            conflicts_total: conflicts.len() as u64,
            conflicts_high: high,
            conflicts_medium: conflicts.len() as u64 - high,
        }
    }

    /// Conflicts per comparable event; 0 when there are none.
    pub fn conflict_rate(&self) -> f64 {
        let comparable = self.events_total - self.events_excluded;
        if comparable == 0 {
            0.0
        } else {
            self.conflicts_total as f64 / comparable as f64
        }
    }
}

impl MetricsSource for ScheduleMetrics {
    fn fetch_metric(&self, name: &str) -> Option<MetricValue> {
        let value = match name {
            EVENTS_TOTAL => MetricValue::Count(self.events_total),
            EVENTS_EXCLUDED => MetricValue::Count(self.events_excluded),
            PROJECTS_TOTAL => MetricValue::Count(self.projects_total),
            CONFLICTS_TOTAL => MetricValue::Count(self.conflicts_total),
            CONFLICTS_HIGH => MetricValue::Count(self.conflicts_high),
            CONFLICTS_MEDIUM => MetricValue::Count(self.conflicts_medium),
            CONFLICT_RATE => MetricValue::Ratio(self.conflict_rate()),
            _ => return None,
        };
        Some(value)
    }

    fn metric_names(&self) -> Vec<String> {
        [
            EVENTS_TOTAL,
            EVENTS_EXCLUDED,
            PROJECTS_TOTAL,
            CONFLICTS_TOTAL,
            CONFLICTS_HIGH,
            CONFLICTS_MEDIUM,
            CONFLICT_RATE,
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }
}
