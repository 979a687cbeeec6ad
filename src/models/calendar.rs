//! Posting calendar: wall-clock time slots, weekday sets, and candidate
//! slot enumeration.
//!
//! # Time Model
//! All times are local wall-clock times (`NaiveDateTime`) as the user sees
//! them. Weekdays are numbered 0 (Sunday) through 6 (Saturday).
//!
//! # Candidate Order
//! Candidates are produced day by day starting at the reference date
//! (offset 0), and within a day in the order the time slots were given.
//! Days whose weekday is not in the set are skipped entirely.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A wall-clock posting time (hour and minute, seconds always zero).
///
/// Serialized as an `"HH:MM"` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot(NaiveTime);

impl TimeSlot {
    /// Creates a time slot from hour (0-23) and minute (0-59).
    pub fn new(hour: u32, minute: u32) -> Result<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| Error::InvalidTimeSlot(format!("{hour}:{minute}")))
    }

    /// Parses an `"HH:MM"` string. A single-digit hour (`"9:30"`) is accepted.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidTimeSlot(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(invalid());
        }
        if !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let hour: u32 = h.parse().map_err(|_| invalid())?;
        let minute: u32 = m.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }

    /// Hour of day (0-23).
    #[inline]
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Minute of hour (0-59).
    #[inline]
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// The timestamp of this slot on the given date.
    #[inline]
    pub fn on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.0)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeSlot {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.to_string()
    }
}

/// Weekday number of a date (0 = Sunday, 6 = Saturday).
#[inline]
pub fn weekday_number(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// A set of weekdays, 0 (Sunday) through 6 (Saturday).
///
/// Serialized as a sorted list of weekday numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Weekdays(u8);

impl Weekdays {
    /// The empty set.
    pub fn none() -> Self {
        Self(0)
    }

    /// Every day of the week.
    pub fn all() -> Self {
        Self(0b0111_1111)
    }

    /// Monday through Friday.
    pub fn weekdays() -> Self {
        Self(0b0011_1110)
    }

    /// Builds a set from weekday numbers. Duplicates are ignored.
    pub fn from_days<I: IntoIterator<Item = u8>>(days: I) -> Result<Self> {
        let mut mask = 0u8;
        for day in days {
            if day > 6 {
                return Err(Error::InvalidWeekday(day));
            }
            mask |= 1u8 << day;
        }
        Ok(Self(mask))
    }

    /// Adds a weekday.
    pub fn with_day(self, day: u8) -> Result<Self> {
        if day > 6 {
            return Err(Error::InvalidWeekday(day));
        }
        Ok(Self(self.0 | (1u8 << day)))
    }

    /// Whether the weekday number is in the set.
    #[inline]
    pub fn contains(&self, day: u8) -> bool {
        day <= 6 && self.0 & (1u8 << day) != 0
    }

    /// Whether the date falls on a weekday in the set.
    #[inline]
    pub fn includes(&self, date: NaiveDate) -> bool {
        self.contains(weekday_number(date))
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of weekdays in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Weekday numbers in ascending order.
    pub fn days(&self) -> Vec<u8> {
        (0..7).filter(|&d| self.contains(d)).collect()
    }
}

impl TryFrom<Vec<u8>> for Weekdays {
    type Error = Error;

    fn try_from(days: Vec<u8>) -> Result<Self> {
        Self::from_days(days)
    }
}

impl From<Weekdays> for Vec<u8> {
    fn from(days: Weekdays) -> Self {
        days.days()
    }
}

/// The date `day_offset` calendar days after `from`, at `slot`.
///
/// Returns `None` only if the date leaves chrono's representable range.
pub fn day_at(from: NaiveDate, day_offset: u64, slot: TimeSlot) -> Option<NaiveDateTime> {
    from.checked_add_days(Days::new(day_offset))
        .map(|date| slot.on(date))
}

/// Enumerates candidate slots over a horizon of days.
///
/// Borrowed view over a rule's weekdays and time slots.
#[derive(Debug, Clone, Copy)]
pub struct SlotCalendar<'a> {
    weekdays: Weekdays,
    slots: &'a [TimeSlot],
    horizon_days: u32,
}

impl<'a> SlotCalendar<'a> {
    /// Creates a calendar view.
    pub fn new(weekdays: Weekdays, slots: &'a [TimeSlot], horizon_days: u32) -> Self {
        Self {
            weekdays,
            slots,
            horizon_days,
        }
    }

    /// Whether this calendar can produce any candidate at all.
    pub fn is_empty(&self) -> bool {
        self.weekdays.is_empty() || self.slots.is_empty() || self.horizon_days == 0
    }

    /// Candidate timestamps starting on `from` (offset 0) and running for
    /// `horizon_days` days, in day-then-slot order.
    pub fn candidates(&self, from: NaiveDate) -> impl Iterator<Item = NaiveDateTime> + 'a {
        let weekdays = self.weekdays;
        let slots = self.slots;
        (0..u64::from(self.horizon_days))
            .filter_map(move |offset| from.checked_add_days(Days::new(offset)))
            .filter(move |date| weekdays.includes(*date))
            .flat_map(move |date| slots.iter().map(move |slot| slot.on(date)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_time_slot_parse() {
        let slot = TimeSlot::parse("09:30").unwrap();
        assert_eq!(slot.hour(), 9);
        assert_eq!(slot.minute(), 30);
        assert_eq!(slot.to_string(), "09:30");

        assert_eq!(TimeSlot::parse("9:05").unwrap().to_string(), "09:05");
        assert_eq!(TimeSlot::parse("23:59").unwrap().hour(), 23);
    }

    #[test]
    fn test_time_slot_parse_rejects_garbage() {
        for bad in ["", "9", "24:00", "12:60", "12:5", "ab:cd", "-1:00", "12:00:00", " : "] {
            assert!(TimeSlot::parse(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_time_slot_serde() {
        let slot: TimeSlot = serde_json::from_str("\"18:45\"").unwrap();
        assert_eq!(slot, TimeSlot::new(18, 45).unwrap());
        assert_eq!(serde_json::to_string(&slot).unwrap(), "\"18:45\"");
        assert!(serde_json::from_str::<TimeSlot>("\"25:00\"").is_err());
    }

    #[test]
    fn test_weekday_number() {
        // 2024-01-07 was a Sunday
        assert_eq!(weekday_number(date(2024, 1, 7)), 0);
        assert_eq!(weekday_number(date(2024, 1, 8)), 1);
        assert_eq!(weekday_number(date(2024, 1, 13)), 6);
    }

    #[test]
    fn test_weekdays_set() {
        let days = Weekdays::from_days([1, 3, 3, 5]).unwrap();
        assert_eq!(days.len(), 3);
        assert!(days.contains(1));
        assert!(!days.contains(2));
        assert!(!days.contains(9));
        assert_eq!(days.days(), vec![1, 3, 5]);

        assert!(Weekdays::from_days([7]).is_err());
        assert!(Weekdays::none().is_empty());
        assert_eq!(Weekdays::all().len(), 7);
        assert_eq!(Weekdays::weekdays().days(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_weekdays_serde() {
        let days: Weekdays = serde_json::from_str("[5, 0]").unwrap();
        assert_eq!(serde_json::to_string(&days).unwrap(), "[0,5]");
        assert!(serde_json::from_str::<Weekdays>("[8]").is_err());
    }

    #[test]
    fn test_day_at() {
        let slot = TimeSlot::new(9, 0).unwrap();
        let t = day_at(date(2024, 1, 31), 1, slot).unwrap();
        assert_eq!(t, date(2024, 2, 1).and_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn test_candidates_order() {
        // Mondays and Wednesdays, two slots each
        let slots = [TimeSlot::new(18, 0).unwrap(), TimeSlot::new(9, 0).unwrap()];
        let cal = SlotCalendar::new(Weekdays::from_days([1, 3]).unwrap(), &slots, 7);

        // Starting Sunday 2024-01-07
        let got: Vec<_> = cal.candidates(date(2024, 1, 7)).collect();
        assert_eq!(
            got,
            vec![
                date(2024, 1, 8).and_hms_opt(18, 0, 0).unwrap(),
                date(2024, 1, 8).and_hms_opt(9, 0, 0).unwrap(),
                date(2024, 1, 10).and_hms_opt(18, 0, 0).unwrap(),
                date(2024, 1, 10).and_hms_opt(9, 0, 0).unwrap(),
            ]
        );
    }

    #[test]
    fn test_candidates_horizon_is_exclusive() {
        let slots = [TimeSlot::new(12, 0).unwrap()];
        let cal = SlotCalendar::new(Weekdays::all(), &slots, 30);
        let got: Vec<_> = cal.candidates(date(2024, 3, 1)).collect();
        assert_eq!(got.len(), 30);
        assert_eq!(got.last().unwrap().date(), date(2024, 3, 30));
    }

    #[test]
    fn test_empty_calendar() {
        let slots = [TimeSlot::new(12, 0).unwrap()];
        let no_days = SlotCalendar::new(Weekdays::none(), &slots, 30);
        assert!(no_days.is_empty());
        assert_eq!(no_days.candidates(date(2024, 3, 1)).count(), 0);

        let no_slots = SlotCalendar::new(Weekdays::all(), &[], 30);
        assert!(no_slots.is_empty());
        assert_eq!(no_slots.candidates(date(2024, 3, 1)).count(), 0);
    }
}
