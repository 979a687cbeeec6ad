//! Error types for parsing scheduling inputs and configuration.
//!
//! The slot assignment itself is total and never fails. Errors only arise
//! when building inputs from untrusted strings (time slots, weekdays),
//! validating recurring patterns, or loading a [`SchedulerConfig`](crate::config::SchedulerConfig).

/// Result alias for fallible constructors in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while constructing scheduling inputs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A time slot string that is not a valid `HH:MM` wall-clock time.
    #[error("invalid time slot '{0}': expected HH:MM")]
    InvalidTimeSlot(String),

    /// A weekday number outside `0..=6` (0 = Sunday).
    #[error("invalid weekday {0}: expected 0 (Sunday) through 6 (Saturday)")]
    InvalidWeekday(u8),

    /// A recurring pattern that can never produce an occurrence or is malformed.
    #[error("invalid recurrence: {0}")]
    InvalidRecurrence(String),

    /// A configuration value that parses but cannot be used.
    #[error("invalid scheduler configuration: {0}")]
    InvalidConfig(String),

    /// Configuration text that is not valid TOML for [`SchedulerConfig`](crate::config::SchedulerConfig).
    #[error("failed to parse scheduler configuration: {0}")]
    Config(#[from] toml::de::Error),
}
