//! Schedule conflict detection.
//!
//! Two events conflict when they belong to the same project and their
//! intervals intersect under a strict comparison:
//! `start_a < end_b && start_b < end_a`, with a missing end treated as the
//! start. Intervals that merely touch (`end_a == start_b`) never conflict,
//! and neither do two zero-duration events at the same instant.
//!
//! Events without a project form their own group and are compared with
//! each other. Events without a start are skipped entirely.
//!
//! [`detect_conflicts`] is the reference pairwise scan, O(n²).
//! [`detect_conflicts_sweep`] produces the same output in O(n log n + k)
//! for large inputs.

mod cap;
mod proptests;
mod sweep;

pub use cap::{cap_conflicts, CappedConflicts};
pub use sweep::detect_conflicts_sweep;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::event::Event;

/// Qualitative rank of a conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Both events have the same, non-empty trade.
    High,
    /// Different trades, or at least one trade missing.
    Medium,
}

impl Severity {
    /// Classify a pair of events by their trade tags.
    pub fn for_pair(a: &Event, b: &Event) -> Self {
        match (a.trade_tag(), b.trade_tag()) {
            (Some(ta), Some(tb)) if ta == tb => Self::High,
            _ => Self::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Two overlapping events from the same project.
///
/// `event_a` always precedes `event_b` in the input slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConflictPair<'a> {
    pub event_a: &'a Event,
    pub event_b: &'a Event,
    pub severity: Severity,
    #[serde(skip)]
    pub index_a: usize,
    #[serde(skip)]
    pub index_b: usize,
}

impl<'a> ConflictPair<'a> {
    fn new(events: &'a [Event], index_a: usize, index_b: usize) -> Self {
        let event_a = &events[index_a];
        let event_b = &events[index_b];
        Self {
            event_a,
            event_b,
            severity: Severity::for_pair(event_a, event_b),
            index_a,
            index_b,
        }
    }

    /// Length of the shared part of both intervals, never negative.
    pub fn overlap(&self) -> chrono::Duration {
        match (self.event_a.interval(), self.event_b.interval()) {
            (Some((sa, ea)), Some((sb, eb))) => (ea.min(eb) - sa.max(sb)).max(chrono::Duration::zero()),
            _ => chrono::Duration::zero(),
        }
    }
}

/// Strict interval intersection.
pub fn intervals_overlap(
    a: (DateTime<Utc>, DateTime<Utc>),
    b: (DateTime<Utc>, DateTime<Utc>),
) -> bool {
    a.0 < b.1 && b.0 < a.1
}

/// Whether two events are eligible for comparison and overlap.
pub fn events_conflict(a: &Event, b: &Event) -> bool {
    if a.project_id != b.project_id {
        return false;
    }
    match (a.interval(), b.interval()) {
        (Some(ia), Some(ib)) => intervals_overlap(ia, ib),
        _ => false,
    }
}

/// Find every conflicting pair with a pairwise scan.
///
/// Pairs are emitted in evaluation order: increasing `index_a`, then
/// increasing `index_b`. Nothing is dropped; capping for display is a
/// separate step (see [`cap_conflicts`]).
pub fn detect_conflicts(events: &[Event]) -> Vec<ConflictPair<'_>> {
    let mut conflicts = Vec::new();

    for i in 0..events.len() {
        for j in (i + 1)..events.len() {
            if events_conflict(&events[i], &events[j]) {
                conflicts.push(ConflictPair::new(events, i, j));
            }
        }
    }

    tracing::debug!(
        events = events.len(),
        conflicts = conflicts.len(),
        "pairwise conflict scan finished"
    );
    conflicts
}

/// Algorithm used by [`ConflictDetector`].
///
/// Parsing goes through [`FromStr`] everywhere (config file, `config set`,
/// CLI flags) and ignores case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum DetectionStrategy {
    #[default]
    Pairwise,
    Sweep,
}

impl fmt::Display for DetectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pairwise => f.write_str("pairwise"),
            Self::Sweep => f.write_str("sweep"),
        }
    }
}

impl FromStr for DetectionStrategy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pairwise" => Ok(Self::Pairwise),
            "sweep" => Ok(Self::Sweep),
            _ => Err(ValidationError::InvalidValue {
                field: "strategy".into(),
                message: format!("unknown detection strategy '{s}' (expected pairwise or sweep)"),
            }),
        }
    }
}

impl TryFrom<String> for DetectionStrategy {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Conflict detector with a selectable algorithm.
///
/// Both strategies return identical output for identical input.
#[derive(Debug, Clone, Default)]
pub struct ConflictDetector {
    strategy: DetectionStrategy,
}

impl ConflictDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, strategy: DetectionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> DetectionStrategy {
        self.strategy
    }

    pub fn detect<'a>(&self, events: &'a [Event]) -> Vec<ConflictPair<'a>> {
        match self.strategy {
            DetectionStrategy::Pairwise => detect_conflicts(events),
            DetectionStrategy::Sweep => detect_conflicts_sweep(events),
        }
    }
}
