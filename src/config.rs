//! Scheduler configuration.
//!
//! Defaults reproduce the bulk scheduler's fixed behaviour: a 30-day search
//! horizon, and a fallback slot at 09:00 on the day after the reference time.
//!
//! # TOML
//!
//! ```
//! use u_social_schedule::config::SchedulerConfig;
//!
//! let config = SchedulerConfig::from_toml_str(r#"
//!     horizon_days = 14
//!     fallback_time = "10:30"
//! "#).unwrap();
//! assert_eq!(config.horizon_days, 14);
//! assert_eq!(config.fallback_day_offset, 1);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::TimeSlot;

/// Default number of days searched for a rule slot (today included).
pub const DEFAULT_HORIZON_DAYS: u32 = 30;

/// Tunables for [`BulkScheduler`](crate::scheduler::BulkScheduler).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulerConfig {
    /// Days searched per rule, starting at the reference date.
    pub horizon_days: u32,
    /// Calendar days after the reference date for the fallback slot.
    pub fallback_day_offset: u32,
    /// Wall-clock time of the fallback slot.
    pub fallback_time: TimeSlot,
    /// Whether booked times supplied by the caller take part in the
    /// spacing check. Off by default: only assignments made in the same
    /// run are checked.
    pub respect_booked: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            fallback_day_offset: 1,
            fallback_time: nine_am(),
            respect_booked: false,
        }
    }
}

fn nine_am() -> TimeSlot {
    match TimeSlot::new(9, 0) {
        Ok(slot) => slot,
        Err(_) => unreachable!("09:00 is a valid wall-clock time"),
    }
}

impl SchedulerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a TOML document. Missing keys take defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        debug!(?config, "scheduler config loaded");
        Ok(config)
    }

    /// Sets the search horizon.
    pub fn with_horizon_days(mut self, days: u32) -> Self {
        self.horizon_days = days;
        self
    }

    /// Sets the fallback day offset.
    pub fn with_fallback_day_offset(mut self, days: u32) -> Self {
        self.fallback_day_offset = days;
        self
    }

    /// Sets the fallback time.
    pub fn with_fallback_time(mut self, slot: TimeSlot) -> Self {
        self.fallback_time = slot;
        self
    }

    /// Enables checking caller-supplied booked times.
    pub fn with_respect_booked(mut self, respect: bool) -> Self {
        self.respect_booked = respect;
        self
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.horizon_days == 0 {
            return Err(Error::InvalidConfig(
                "horizon_days must be at least 1".into(),
            ));
        }
        if self.fallback_day_offset == 0 {
            return Err(Error::InvalidConfig(
                "fallback_day_offset must be at least 1 so the fallback lies in the future".into(),
            ));
        }
        Ok(())
    }
}
