//! Scheduling domain models.
//!
//! Provides the core data types for content scheduling problems and
//! their solutions.
//!
//! # Domain Mappings
//!
//! | u-social-schedule | Meaning |
//! |-------------------|---------|
//! | ContentItem | Post draft targeting one or more platforms |
//! | SchedulingRule | Platforms, weekdays and times eligible for placement |
//! | TimeSlot | Wall-clock posting time (`HH:MM`) |
//! | BulkSchedule | Posting times produced by one run |
//! | PublishJob | Per-platform publishing progress of one item |

mod calendar;
mod content;
mod publishing;
mod rule;
mod schedule;

pub use calendar::{day_at, weekday_number, SlotCalendar, TimeSlot, Weekdays};
pub use content::{ContentItem, ContentStatus, Priority};
pub use publishing::{JobStatus, PlatformPublication, PlatformStatus, PublishJob};
pub use rule::{SchedulingRule, MS_PER_HOUR};
pub use schedule::{AssignmentSource, BulkSchedule, ScheduledAssignment};
