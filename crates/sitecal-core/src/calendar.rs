//! Calendar view helpers: day membership and upcoming events.
//!
//! Day membership is inclusive at the day's start: an event that ends
//! exactly at midnight still shows on the day it ended, and a zero-duration
//! event at midnight belongs to the day it opens. Conflict detection uses
//! the strict rule in [`crate::conflict`] instead.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::error::ValidationError;
use crate::event::Event;

/// Parse a `YYYY-MM-DD` day argument.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDate`] for anything else.
pub fn parse_day(input: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate {
        input: input.to_string(),
    })
}

/// `[midnight, next midnight)` for `day` in UTC.
pub fn day_bounds(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = day.and_time(chrono::NaiveTime::MIN).and_utc();
    (start, start + Duration::days(1))
}

/// Whether `event` appears on `day`.
pub fn occurs_on(event: &Event, day: NaiveDate) -> bool {
    let Some((start, end)) = event.interval() else {
        return false;
    };
    let (day_start, day_end) = day_bounds(day);
    start < day_end && end >= day_start
}

/// Events shown on `day`, sorted by start. Ties keep input order.
pub fn events_on_day(events: &[Event], day: NaiveDate) -> Vec<&Event> {
    let mut matching: Vec<&Event> = events.iter().filter(|e| occurs_on(e, day)).collect();
    matching.sort_by_key(|e| e.start);
    matching
}

/// The next `limit` events starting at or after `now`, soonest first.
pub fn upcoming_events(events: &[Event], now: DateTime<Utc>, limit: usize) -> Vec<&Event> {
    let mut upcoming: Vec<&Event> = events
        .iter()
        .filter(|e| e.start.is_some_and(|s| s >= now))
        .collect();
    upcoming.sort_by_key(|e| e.start);
    upcoming.truncate(limit);
    upcoming
}
