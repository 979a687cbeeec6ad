//! Scheduling rule model.
//!
//! A rule names the platforms, weekdays, and times that are eligible for
//! automatic placement, plus a minimum spacing between placements.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{ContentItem, SlotCalendar, TimeSlot, Weekdays};

/// Milliseconds per hour.
pub const MS_PER_HOUR: f64 = 3_600_000.0;

/// A posting policy for automatic placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingRule {
    /// Unique rule identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Platforms this rule places content for.
    pub platforms: Vec<String>,
    /// Posting times, tried in this order within a day.
    pub time_slots: Vec<TimeSlot>,
    /// Eligible weekdays.
    pub days_of_week: Weekdays,
    /// Minimum gap (hours) between a placement under this rule and any
    /// other placement in the same run.
    #[serde(default)]
    pub spacing_hours: f64,
    /// Only enabled rules participate in scheduling.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl SchedulingRule {
    /// Creates an enabled rule with no platforms, slots, or days.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            platforms: Vec::new(),
            time_slots: Vec::new(),
            days_of_week: Weekdays::none(),
            spacing_hours: 0.0,
            enabled: true,
        }
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a platform.
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platforms.push(platform.into());
        self
    }

    /// Adds a time slot.
    pub fn with_time_slot(mut self, slot: TimeSlot) -> Self {
        self.time_slots.push(slot);
        self
    }

    /// Sets the eligible weekdays.
    pub fn with_days(mut self, days: Weekdays) -> Self {
        self.days_of_week = days;
        self
    }

    /// Sets the spacing in hours.
    pub fn with_spacing_hours(mut self, hours: f64) -> Self {
        self.spacing_hours = hours;
        self
    }

    /// Enables or disables the rule.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Whether the rule shares at least one platform with the item.
    pub fn matches(&self, item: &ContentItem) -> bool {
        item.shares_platform(&self.platforms)
    }

    /// Minimum spacing in milliseconds.
    #[inline]
    pub fn spacing_ms(&self) -> f64 {
        self.spacing_hours * MS_PER_HOUR
    }

    /// Whether `candidate` lies strictly within the spacing window of `other`.
    pub fn conflicts(&self, candidate: NaiveDateTime, other: NaiveDateTime) -> bool {
        let gap_ms = (candidate - other).num_milliseconds().abs();
        (gap_ms as f64) < self.spacing_ms()
    }

    /// Calendar view over this rule's weekdays and slots.
    pub fn calendar(&self, horizon_days: u32) -> SlotCalendar<'_> {
        SlotCalendar::new(self.days_of_week, &self.time_slots, horizon_days)
    }

    /// Whether the rule can ever produce a candidate slot.
    pub fn has_candidates(&self) -> bool {
        !self.time_slots.is_empty() && !self.days_of_week.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentItem;
    use chrono::{Duration, NaiveDate};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 8)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn linkedin_rule() -> SchedulingRule {
        SchedulingRule::new("r1")
            .with_name("Weekday mornings")
            .with_platform("linkedin")
            .with_time_slot(TimeSlot::new(9, 0).unwrap())
            .with_days(Weekdays::weekdays())
            .with_spacing_hours(4.0)
    }

    #[test]
    fn test_rule_matches() {
        let rule = linkedin_rule();
        let li = ContentItem::new("a").with_platform("twitter").with_platform("linkedin");
        let ig = ContentItem::new("b").with_platform("instagram");
        let none = ContentItem::new("c");

        assert!(rule.matches(&li));
        assert!(!rule.matches(&ig));
        assert!(!rule.matches(&none));
    }

    #[test]
    fn test_conflicts_is_strict() {
        let rule = linkedin_rule();
        assert!(rule.conflicts(at(9, 0), at(12, 59)));
        assert!(rule.conflicts(at(13, 0) - Duration::milliseconds(1), at(9, 0)));
        assert!(!rule.conflicts(at(13, 0), at(9, 0))); // exactly 4h apart
        assert!(!rule.conflicts(at(5, 0), at(9, 0)));
    }

    #[test]
    fn test_zero_spacing_never_conflicts() {
        let rule = linkedin_rule().with_spacing_hours(0.0);
        assert!(!rule.conflicts(at(9, 0), at(9, 0)));
    }

    #[test]
    fn test_fractional_spacing() {
        let rule = linkedin_rule().with_spacing_hours(0.5);
        assert!(rule.conflicts(at(9, 0), at(9, 29)));
        assert!(!rule.conflicts(at(9, 0), at(9, 30)));
    }

    #[test]
    fn test_has_candidates() {
        assert!(linkedin_rule().has_candidates());
        assert!(!linkedin_rule().with_days(Weekdays::none()).has_candidates());
        assert!(!SchedulingRule::new("empty").has_candidates());
    }

    #[test]
    fn test_rule_wire_shape() {
        let json = r#"{
            "id": "r1",
            "platforms": ["linkedin"],
            "timeSlots": ["09:00", "17:30"],
            "daysOfWeek": [1, 2, 3],
            "spacingHours": 4
        }"#;
        let rule: SchedulingRule = serde_json::from_str(json).unwrap();
        assert!(rule.enabled);
        assert_eq!(rule.time_slots.len(), 2);
        assert_eq!(rule.time_slots[1].to_string(), "17:30");
        assert_eq!(rule.days_of_week.days(), vec![1, 2, 3]);
        assert_eq!(rule.spacing_ms(), 4.0 * MS_PER_HOUR);

        let bad = r#"{"id":"r","platforms":[],"timeSlots":["9am"],"daysOfWeek":[]}"#;
        assert!(serde_json::from_str::<SchedulingRule>(bad).is_err());
    }
}
