//! # sitecal Core Library
//!
//! Scheduling logic behind the construction calendar: normalizing events
//! fetched from the backend and flagging overlapping work within a project.
//! The `sitecal` CLI is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Events**: backend records are normalized into [`Event`]; bad
//!   timestamps exclude an event instead of failing the batch
//! - **Conflicts**: pairwise and sweep detectors with identical output,
//!   ranked by trade into [`Severity`]
//! - **Calendar**: project filtering, day membership, upcoming events,
//!   and a memoized conflict view
//! - **Metrics**: a [`MetricsSource`] trait for dashboard panels
//! - **Config**: TOML configuration with dot-path get/set
//!
//! ## Key Components
//!
//! - [`detect_conflicts`]: reference pairwise conflict scan
//! - [`ConflictDetector`]: strategy-selecting front end
//! - [`MemoizedConflicts`]: cache keyed on events and project filter
//! - [`Config`]: application configuration management

pub mod calendar;
pub mod config;
pub mod conflict;
pub mod error;
pub mod event;
pub mod filter;
pub mod memo;
pub mod metrics;

pub use calendar::{events_on_day, parse_day, upcoming_events};
pub use config::Config;
pub use conflict::{
    cap_conflicts, detect_conflicts, detect_conflicts_sweep, CappedConflicts, ConflictDetector,
    ConflictPair, DetectionStrategy, Severity,
};
pub use error::{ConfigError, CoreError, ValidationError};
pub use event::{load_events, parse_events, parse_instant, Event, RawEvent};
pub use filter::{filter_events, ProjectFilter};
pub use memo::{ConflictRecord, MemoizedConflicts};
pub use metrics::{MetricValue, MetricsSource, ScheduleMetrics, StaticMetrics};
