//! Project selection applied before detection.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::event::Event;

/// Which events the calendar is currently looking at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ProjectFilter {
    #[default]
    All,
    Project(String),
    /// Events with no project assigned.
    Unassigned,
}

impl ProjectFilter {
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            Self::All => true,
            Self::Project(id) => event.project_id.as_deref() == Some(id.as_str()),
            Self::Unassigned => event.project_id.is_none(),
        }
    }
}

impl fmt::Display for ProjectFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all projects"),
            Self::Project(id) => write!(f, "project {id}"),
            Self::Unassigned => f.write_str("unassigned events"),
        }
    }
}

/// Events matching `filter`, in input order.
pub fn filter_events(events: &[Event], filter: &ProjectFilter) -> Vec<Event> {
    events.iter().filter(|e| filter.matches(e)).cloned().collect()
}
