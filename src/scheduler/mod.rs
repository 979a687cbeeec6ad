//! Content schedulers and schedule metrics.
//!
//! # Algorithms
//!
//! `BulkScheduler` places a batch of content items into rule-defined slots
//! with a greedy, priority-driven, first-fit search and a fixed fallback.
//! `RecurringScheduler` expands daily, weekly, or monthly patterns into
//! upcoming occurrences.
//!
//! # KPI
//!
//! `ScheduleSummary` reports rule coverage, fallback use, time spread, and
//! spacing violations.

mod bulk;
mod kpi;
mod recurring;

pub use bulk::BulkScheduler;
pub use kpi::ScheduleSummary;
pub use recurring::{Recurrence, RecurrenceEnd, RecurringPattern, RecurringScheduler};
