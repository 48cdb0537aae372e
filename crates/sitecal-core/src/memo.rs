//! Memoized conflict detection.
//!
//! The calendar recomputes conflicts whenever the event list or the
//! selected project changes. [`MemoizedConflicts`] keeps the last inputs
//! and result so repeated renders with unchanged inputs skip detection.

use serde::{Deserialize, Serialize};

use crate::conflict::{ConflictDetector, ConflictPair, Severity};
use crate::event::Event;
use crate::filter::{filter_events, ProjectFilter};

/// Owned form of a [`ConflictPair`], detached from the input slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictRecord {
    pub event_a: String,
    pub event_b: String,
    /// Positions in the filtered event list.
    pub index_a: usize,
    pub index_b: usize,
    pub severity: Severity,
}

impl From<&ConflictPair<'_>> for ConflictRecord {
    fn from(pair: &ConflictPair<'_>) -> Self {
        Self {
            event_a: pair.event_a.id.clone(),
            event_b: pair.event_b.id.clone(),
            index_a: pair.index_a,
            index_b: pair.index_b,
            severity: pair.severity,
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    events: Vec<Event>,
    filter: ProjectFilter,
    records: Vec<ConflictRecord>,
}

/// Single-slot cache keyed on `(events, filter)`.
#[derive(Debug, Default)]
pub struct MemoizedConflicts {
    detector: ConflictDetector,
    entry: Option<CacheEntry>,
    hits: u64,
    misses: u64,
}

impl MemoizedConflicts {
    pub fn new(detector: ConflictDetector) -> Self {
        Self {
            detector,
            ..Self::default()
        }
    }

    /// Conflicts among the events selected by `filter`.
    ///
    /// Indices in the returned records refer to the filtered list.
    pub fn get(&mut self, events: &[Event], filter: &ProjectFilter) -> &[ConflictRecord] {
        let fresh = matches!(
            &self.entry,
            Some(entry) if entry.filter == *filter && entry.events == events
        );

        if fresh {
            self.hits += 1;
        } else {
            self.misses += 1;
            let filtered = filter_events(events, filter);
            let records = self
                .detector
                .detect(&filtered)
                .iter()
                .map(ConflictRecord::from)
                .collect();
            tracing::debug!(%filter, events = events.len(), "recomputed conflicts");
            self.entry = Some(CacheEntry {
                events: events.to_vec(),
                filter: filter.clone(),
                records,
            });
        }

        self.entry
            .as_ref()
            .map(|entry| entry.records.as_slice())
            .unwrap_or(&[])
    }

    /// Drop the cached result.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
