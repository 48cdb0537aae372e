//! Interval sweep over each project's events.
//!
//! Events are grouped by project and visited in start order while a
//! min-heap holds the end times of intervals still open. Anything whose
//! end is at or before the current start is retired; whatever remains is
//! a candidate overlap. Cost is O(n log n + k) for k reported pairs.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use chrono::{DateTime, Utc};

use super::{intervals_overlap, ConflictPair};
use crate::event::Event;

/// Same result as [`super::detect_conflicts`], including order.
pub fn detect_conflicts_sweep(events: &[Event]) -> Vec<ConflictPair<'_>> {
    let mut groups: HashMap<Option<&str>, Vec<(DateTime<Utc>, DateTime<Utc>, usize)>> =
        HashMap::new();
    for (idx, event) in events.iter().enumerate() {
        if let Some((start, end)) = event.interval() {
            groups
                .entry(event.project_id.as_deref())
                .or_default()
                .push((start, end, idx));
        }
    }

    let mut pairs: Vec<(usize, usize)> = Vec::new();
    for (_, mut group) in groups {
        group.sort_by_key(|&(start, _, idx)| (start, idx));
        sweep_group(&group, &mut pairs);
    }

    pairs.sort_unstable();

    tracing::debug!(
        events = events.len(),
        conflicts = pairs.len(),
        "sweep conflict scan finished"
    );

    pairs
        .into_iter()
        .map(|(a, b)| ConflictPair::new(events, a, b))
        .collect()
}

fn sweep_group(group: &[(DateTime<Utc>, DateTime<Utc>, usize)], pairs: &mut Vec<(usize, usize)>) {
    let mut active: BinaryHeap<Reverse<(DateTime<Utc>, DateTime<Utc>, usize)>> = BinaryHeap::new();

    for &(start, end, idx) in group {
        while let Some(Reverse((open_end, _, _))) = active.peek() {
            if *open_end <= start {
                active.pop();
            } else {
                break;
            }
        }

        for Reverse((open_end, open_start, open_idx)) in active.iter() {
            if intervals_overlap((*open_start, *open_end), (start, end)) {
                pairs.push(((*open_idx).min(idx), (*open_idx).max(idx)));
            }
        }

        active.push(Reverse((end, start, idx)));
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{at, event};
    use super::*;

    #[test]
    fn reports_pairs_in_input_order_even_when_starts_are_reversed() {
        let events = vec![
            event("late", "P1", (10, 0), (11, 0)),
            event("early", "P1", (9, 0), (10, 30)),
        ];
        let conflicts = detect_conflicts_sweep(&events);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].event_a.id, "late");
        assert_eq!(conflicts[0].event_b.id, "early");
    }

    #[test]
    fn retires_finished_intervals() {
        let events = vec![
            event("a", "P1", (8, 0), (9, 0)),
            event("b", "P1", (9, 0), (10, 0)),
            event("c", "P1", (9, 30), (11, 0)),
        ];
        let pairs: Vec<(usize, usize)> = detect_conflicts_sweep(&events)
            .iter()
            .map(|c| (c.index_a, c.index_b))
            .collect();
        assert_eq!(pairs, vec![(1, 2)]);
    }

    #[test]
    fn same_start_zero_duration_is_not_an_overlap() {
        let events = vec![
            event("a", "P1", (9, 0), (10, 0)),
            Event::new("b", at(9, 0), None).with_project("P1"),
        ];
        assert!(detect_conflicts_sweep(&events).is_empty());
    }

    #[test]
    fn keeps_projects_apart() {
        let events = vec![
            event("a", "P1", (9, 0), (10, 0)),
            event("b", "P2", (9, 0), (10, 0)),
            event("c", "P1", (9, 15), (9, 45)),
        ];
        let pairs: Vec<(usize, usize)> = detect_conflicts_sweep(&events)
            .iter()
            .map(|c| (c.index_a, c.index_b))
            .collect();
        assert_eq!(pairs, vec![(0, 2)]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(detect_conflicts_sweep(&[]).is_empty());
    }
}
