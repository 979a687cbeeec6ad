//! Content scheduling for social publishing.
//!
//! Places post drafts into rule-defined posting slots, expands recurring
//! posts, and derives multi-platform publishing status. Everything is pure
//! and synchronous: inputs are plain values, outputs are recomputed on
//! every call, and nothing is persisted.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ContentItem`, `SchedulingRule`,
//!   `TimeSlot`, `Weekdays`, `BulkSchedule`, `PublishJob`
//! - **`dispatching`**: Ordering rules that decide who wins contested slots
//! - **`scheduler`**: `BulkScheduler`, `RecurringScheduler`, `ScheduleSummary`
//! - **`validation`**: Advisory input checks (duplicate IDs, unreachable rules)
//! - **`config`**: `SchedulerConfig`, loadable from TOML
//! - **`error`**: Construction and configuration errors
//!
//! # Time Model
//!
//! All times are local wall-clock `NaiveDateTime`s. Weekdays are numbered
//! 0 (Sunday) through 6 (Saturday).

pub mod config;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{Error, Result};
