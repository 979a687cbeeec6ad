//! Recurring post expansion.
//!
//! A recurring pattern repeats one content item daily, weekly on chosen
//! weekdays, or monthly on a day of the month, every `interval` periods,
//! at a fixed wall-clock time.
//!
//! # Counting
//! `After { count }` counts occurrences from the series start, including
//! ones already in the past. Only occurrences strictly after the reference
//! time are returned.
//!
//! # Monthly
//! Months that lack the requested day (e.g. the 31st in April) are skipped,
//! not clamped.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{weekday_number, BulkSchedule, ContentItem, ScheduledAssignment, TimeSlot, Weekdays};

/// Upper bound on periods scanned past the first relevant one.
const MAX_PERIODS: u32 = 5_000;

/// Repetition unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "frequency", rename_all = "lowercase")]
pub enum Recurrence {
    /// Every `interval` days.
    Daily,
    /// Every `interval` weeks (Sunday-based) on the given weekdays.
    Weekly {
        /// Posting weekdays.
        days: Weekdays,
    },
    /// Every `interval` months on the given day of month.
    Monthly {
        /// Day of month (1-31).
        #[serde(rename = "dayOfMonth")]
        day_of_month: u32,
    },
}

/// When a series stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RecurrenceEnd {
    /// Open-ended.
    #[default]
    Never,
    /// After a number of occurrences counted from the start.
    After {
        /// Total occurrences in the series.
        count: u32,
    },
    /// Last eligible date (inclusive).
    Until {
        /// Final date.
        date: NaiveDate,
    },
}

/// A recurring posting pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringPattern {
    /// Repetition unit.
    pub recurrence: Recurrence,
    /// Periods between repetitions (at least 1).
    pub interval: u32,
    /// Posting time.
    pub time: TimeSlot,
    /// First eligible date.
    pub start_date: NaiveDate,
    /// End condition.
    #[serde(default)]
    pub end: RecurrenceEnd,
}

impl RecurringPattern {
    /// Creates an open-ended pattern repeating every period.
    pub fn new(recurrence: Recurrence, time: TimeSlot, start_date: NaiveDate) -> Self {
        Self {
            recurrence,
            interval: 1,
            time,
            start_date,
            end: RecurrenceEnd::Never,
        }
    }

    /// Daily at `time` from `start_date`.
    pub fn daily(time: TimeSlot, start_date: NaiveDate) -> Self {
        Self::new(Recurrence::Daily, time, start_date)
    }

    /// Weekly on `days` at `time` from `start_date`.
    pub fn weekly(days: Weekdays, time: TimeSlot, start_date: NaiveDate) -> Self {
        Self::new(Recurrence::Weekly { days }, time, start_date)
    }

    /// Monthly on `day_of_month` at `time` from `start_date`.
    pub fn monthly(day_of_month: u32, time: TimeSlot, start_date: NaiveDate) -> Self {
        Self::new(Recurrence::Monthly { day_of_month }, time, start_date)
    }

    /// Sets the interval.
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the end condition.
    pub fn with_end(mut self, end: RecurrenceEnd) -> Self {
        self.end = end;
        self
    }

    /// Checks that the pattern can produce occurrences.
    pub fn validate(&self) -> Result<()> {
        if self.interval == 0 {
            return Err(Error::InvalidRecurrence("interval must be at least 1".into()));
        }
        match &self.recurrence {
            Recurrence::Weekly { days } if days.is_empty() => {
                return Err(Error::InvalidRecurrence(
                    "weekly recurrence needs at least one weekday".into(),
                ));
            }
            Recurrence::Monthly { day_of_month } if !(1..=31).contains(day_of_month) => {
                return Err(Error::InvalidRecurrence(format!(
                    "day of month {day_of_month} is outside 1-31"
                )));
            }
            _ => {}
        }
        match self.end {
            RecurrenceEnd::After { count: 0 } => Err(Error::InvalidRecurrence(
                "occurrence count must be at least 1".into(),
            )),
            RecurrenceEnd::Until { date } if date < self.start_date => Err(
                Error::InvalidRecurrence(format!("end date {date} is before start date")),
            ),
            _ => Ok(()),
        }
    }

    /// All series dates from the start, honouring the end condition.
    ///
    /// Empty if the pattern is invalid.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates_from_period(0)
    }

    /// Occurrences strictly after `now`, at most `limit` of them.
    ///
    /// Scanning starts at the period containing `now`, so series that began
    /// long ago cost the same as fresh ones.
    pub fn occurrences(&self, now: NaiveDateTime, limit: usize) -> Vec<NaiveDateTime> {
        self.dates_from_period(self.period_of(now.date()))
            .map(|date| self.time.on(date))
            .filter(|&at| at > now)
            .take(limit)
            .collect()
    }

    /// The next occurrence strictly after `now`.
    pub fn next_occurrence(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        self.occurrences(now, 1).into_iter().next()
    }

    /// Series dates from the `first`-th period on. Earlier periods still
    /// count towards `After { count }`.
    fn dates_from_period(&self, first: u32) -> impl Iterator<Item = NaiveDate> + '_ {
        let valid = self.validate().is_ok();
        let remaining = match self.end {
            RecurrenceEnd::After { count } => {
                count.saturating_sub(self.dates_before_period(first)) as usize
            }
            _ => usize::MAX,
        };
        let until = match self.end {
            RecurrenceEnd::Until { date } => Some(date),
            _ => None,
        };
        let last = if valid { first.saturating_add(MAX_PERIODS) } else { first };

        (first..last)
            .flat_map(move |period| self.period_dates(period))
            .take_while(move |date| until.map_or(true, |u| *date <= u))
            .take(remaining)
    }

    /// The latest period that starts on or before `date` (0 before the start).
    ///
    /// Every date of an earlier period is before `date`.
    fn period_of(&self, date: NaiveDate) -> u32 {
        if date <= self.start_date || self.interval == 0 {
            return 0;
        }
        let units = match &self.recurrence {
            Recurrence::Daily => date.signed_duration_since(self.start_date).num_days(),
            Recurrence::Weekly { .. } => {
                let week_of = |d: NaiveDate| d.num_days_from_ce() - weekday_number(d) as i32;
                i64::from(week_of(date) - week_of(self.start_date)) / 7
            }
            Recurrence::Monthly { .. } => {
                let month_of = |d: NaiveDate| i64::from(d.year()) * 12 + i64::from(d.month0());
                month_of(date) - month_of(self.start_date)
            }
        };
        u32::try_from(units / i64::from(self.interval)).unwrap_or(u32::MAX)
    }

    /// Number of series dates in periods before `period`.
    fn dates_before_period(&self, period: u32) -> u32 {
        if period == 0 {
            return 0;
        }
        match &self.recurrence {
            Recurrence::Daily => period,
            // Only the first week can lose days to the start date.
            Recurrence::Weekly { days } => {
                let first = self.period_dates(0).len() as u32;
                first.saturating_add((period - 1).saturating_mul(days.len() as u32))
            }
            // Months lacking the day contribute nothing, so count them.
            Recurrence::Monthly { .. } => (0..period)
                .map(|p| self.period_dates(p).len() as u32)
                .fold(0u32, u32::saturating_add),
        }
    }

    /// Dates of the `period`-th repetition (period 0 contains the start).
    fn period_dates(&self, period: u32) -> Vec<NaiveDate> {
        let step = period.saturating_mul(self.interval);
        match &self.recurrence {
            Recurrence::Daily => self
                .start_date
                .checked_add_days(Days::new(u64::from(step)))
                .into_iter()
                .collect(),
            Recurrence::Weekly { days } => {
                let offset = u64::from(weekday_number(self.start_date));
                let Some(week_start) = self
                    .start_date
                    .checked_sub_days(Days::new(offset))
                    .and_then(|d| d.checked_add_days(Days::new(u64::from(step) * 7)))
                else {
                    return Vec::new();
                };
                days.days()
                    .into_iter()
                    .filter_map(|d| week_start.checked_add_days(Days::new(u64::from(d))))
                    .filter(|date| *date >= self.start_date)
                    .collect()
            }
            Recurrence::Monthly { day_of_month } => {
                NaiveDate::from_ymd_opt(self.start_date.year(), self.start_date.month(), 1)
                    .and_then(|first| first.checked_add_months(Months::new(step)))
                    .and_then(|month| {
                        NaiveDate::from_ymd_opt(month.year(), month.month(), *day_of_month)
                    })
                    .filter(|date| *date >= self.start_date)
                    .into_iter()
                    .collect()
            }
        }
    }
}

/// Expands recurring patterns into assignments.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecurringScheduler;

impl RecurringScheduler {
    /// Creates a recurring scheduler.
    pub fn new() -> Self {
        Self
    }

    /// One assignment per upcoming occurrence of `pattern` for `item`.
    pub fn expand(
        &self,
        item: &ContentItem,
        pattern: &RecurringPattern,
        now: NaiveDateTime,
        limit: usize,
    ) -> Result<BulkSchedule> {
        pattern.validate()?;

        let mut schedule = BulkSchedule::new();
        for at in pattern.occurrences(now, limit) {
            schedule.add_assignment(ScheduledAssignment::recurring(&item.id, at));
        }
        debug!(
            content_id = %item.id,
            occurrences = schedule.assignment_count(),
            "recurring pattern expanded"
        );
        Ok(schedule)
    }
}
