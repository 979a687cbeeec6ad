//! Rule-based bulk slot assignment.
//!
//! # Algorithm
//!
//! 1. Order items by the rule engine (default: priority rank descending,
//!    input order on ties).
//! 2. For each item, walk enabled rules in their given order. A rule
//!    matches when it shares at least one platform with the item.
//! 3. For a matching rule, walk candidate slots: day offsets
//!    `0..horizon_days` on the rule's weekdays, then its time slots in order.
//! 4. Accept the first candidate strictly after `now` that is not within
//!    the rule's spacing of any time already taken in this run.
//! 5. If nothing is accepted, use the fallback slot (next day 09:00 by
//!    default) without any conflict check.
//!
//! First fit, not best fit. Fallback times are recorded as taken, so later
//! rule candidates keep their spacing from them.
//!
//! # Complexity
//! O(n × r × d × s × n) where n=items, r=rules, d=horizon days, s=slots/day.
//! Intended for interactive batch sizes (tens of items).

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::config::SchedulerConfig;
use crate::dispatching::RuleEngine;
use crate::models::{day_at, BulkSchedule, ContentItem, ScheduledAssignment, SchedulingRule};

/// Greedy first-fit slot assigner.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_social_schedule::models::{ContentItem, Priority, SchedulingRule, TimeSlot, Weekdays};
/// use u_social_schedule::scheduler::BulkScheduler;
///
/// // Monday 2024-01-08, 08:00
/// let now = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap().and_hms_opt(8, 0, 0).unwrap();
/// let items = vec![
///     ContentItem::new("a").with_platform("linkedin").with_priority(Priority::Low),
///     ContentItem::new("b").with_platform("linkedin").with_priority(Priority::High),
/// ];
/// let rules = vec![SchedulingRule::new("mornings")
///     .with_platform("linkedin")
///     .with_time_slot(TimeSlot::parse("09:00").unwrap())
///     .with_days(Weekdays::from_days([1]).unwrap())
///     .with_spacing_hours(4.0)];
///
/// let schedule = BulkScheduler::new().assign(&items, &rules, now);
/// let b = schedule.assignment_for("b").unwrap();
/// assert_eq!(b.scheduled_at.to_string(), "2024-01-08 09:00:00");
/// let a = schedule.assignment_for("a").unwrap();
/// assert_eq!(a.scheduled_at.to_string(), "2024-01-15 09:00:00");
/// ```
#[derive(Debug, Clone, Default)]
pub struct BulkScheduler {
    config: SchedulerConfig,
    rule_engine: RuleEngine,
    booked: Vec<NaiveDateTime>,
}

impl BulkScheduler {
    /// Creates a scheduler with default configuration and priority ordering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the rule engine that orders items before placement.
    pub fn with_rule_engine(mut self, engine: RuleEngine) -> Self {
        self.rule_engine = engine;
        self
    }

    /// Supplies times already booked outside this batch.
    ///
    /// Only consulted when [`SchedulerConfig::respect_booked`] is set.
    pub fn with_booked<I: IntoIterator<Item = NaiveDateTime>>(mut self, times: I) -> Self {
        self.booked.extend(times);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// The fallback slot for a run started at `now`.
    ///
    /// Saturates to [`NaiveDateTime::MAX`] when the fallback day is past the
    /// end of the representable calendar, so it stays after `now`.
    pub fn fallback_slot(&self, now: NaiveDateTime) -> NaiveDateTime {
        let offset = self.config.fallback_day_offset;
        day_at(now.date(), u64::from(offset), self.config.fallback_time).unwrap_or_else(|| {
            warn!(%now, day_offset = offset, "fallback day out of range, saturating");
            NaiveDateTime::MAX
        })
    }

    /// Assigns a posting time to every item.
    ///
    /// `now` is the reference time captured at the start of the run. The
    /// result holds exactly one assignment per input item, in placement
    /// order. Never fails: unplaceable items get the fallback slot.
    pub fn assign(
        &self,
        items: &[ContentItem],
        rules: &[SchedulingRule],
        now: NaiveDateTime,
    ) -> BulkSchedule {
        let enabled: Vec<&SchedulingRule> = rules.iter().filter(|r| r.enabled).collect();
        let mut taken: Vec<NaiveDateTime> = if self.config.respect_booked {
            self.booked.clone()
        } else {
            Vec::new()
        };
        let mut schedule = BulkSchedule::new();

        for idx in self.rule_engine.sort_indices(items) {
            let item = &items[idx];

            match self.first_fit(item, &enabled, &taken, now) {
                Some((rule, at)) => {
                    debug!(content_id = %item.id, rule_id = %rule.id, %at, "slot accepted");
                    schedule.add_assignment(ScheduledAssignment::from_rule(&item.id, at, &rule.id));
                    taken.push(at);
                }
                None => {
                    let at = self.fallback_slot(now);
                    warn!(content_id = %item.id, %at, "no rule slot available, using fallback");
                    schedule.add_assignment(ScheduledAssignment::fallback(&item.id, at));
                    taken.push(at);
                }
            }
        }

        info!(
            items = items.len(),
            rules = enabled.len(),
            fallbacks = schedule.fallback_count(),
            "bulk schedule computed"
        );
        schedule
    }

    /// Assigns using the current local time as the reference.
    pub fn assign_now(&self, items: &[ContentItem], rules: &[SchedulingRule]) -> BulkSchedule {
        self.assign(items, rules, Local::now().naive_local())
    }

    /// Schedules the selected items of a collection and merges the result
    /// back by ID.
    ///
    /// Selected items are taken in collection order. Items not selected are
    /// returned unchanged.
    pub fn schedule_items<S: AsRef<str>>(
        &self,
        collection: Vec<ContentItem>,
        selected_ids: &[S],
        rules: &[SchedulingRule],
        now: NaiveDateTime,
    ) -> Vec<ContentItem> {
        let selected: Vec<ContentItem> = collection
            .iter()
            .filter(|item| selected_ids.iter().any(|id| id.as_ref() == item.id))
            .cloned()
            .collect();

        self.assign(&selected, rules, now).merge_into(collection)
    }

    fn first_fit<'r>(
        &self,
        item: &ContentItem,
        rules: &[&'r SchedulingRule],
        taken: &[NaiveDateTime],
        now: NaiveDateTime,
    ) -> Option<(&'r SchedulingRule, NaiveDateTime)> {
        rules
            .iter()
            .copied()
            .filter(|rule| rule.matches(item))
            .find_map(|rule| {
                rule.calendar(self.config.horizon_days)
                    .candidates(now.date())
                    .find(|&candidate| {
                        candidate > now && !taken.iter().any(|&t| rule.conflicts(candidate, t))
                    })
                    .map(|at| (rule, at))
            })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::models::{Priority, TimeSlot, Weekdays, MS_PER_HOUR};
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;

    const PLATFORMS: [&str; 3] = ["linkedin", "twitter", "instagram"];
    const PRIORITIES: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    fn platforms(mask: u8) -> Vec<String> {
        (0..PLATFORMS.len())
            .filter(|i| mask & (1u8 << i) != 0)
            .map(|i| PLATFORMS[i].to_string())
            .collect()
    }

    type RuleSpec = (u8, Vec<(u32, u32)>, u8, u32, bool);

    fn build(
        item_specs: &[(usize, u8)],
        rule_specs: &[RuleSpec],
    ) -> (Vec<ContentItem>, Vec<SchedulingRule>) {
        let items = item_specs
            .iter()
            .enumerate()
            .map(|(i, &(p, mask))| {
                let mut item = ContentItem::new(format!("i{i}")).with_priority(PRIORITIES[p]);
                item.platforms = platforms(mask);
                item
            })
            .collect();

        let rules = rule_specs
            .iter()
            .enumerate()
            .map(|(i, (mask, slots, days, spacing, enabled))| {
                let mut rule = SchedulingRule::new(format!("r{i}"))
                    .with_days(
                        Weekdays::from_days((0..7).filter(|d| days & (1u8 << d) != 0)).unwrap(),
                    )
                    .with_spacing_hours(f64::from(*spacing))
                    .with_enabled(*enabled);
                rule.platforms = platforms(*mask);
                rule.time_slots = slots
                    .iter()
                    .map(|&(h, q)| TimeSlot::new(h, q * 15).unwrap())
                    .collect();
                rule
            })
            .collect();

        (items, rules)
    }

    proptest! {
        #[test]
        fn prop_schedule_invariants(
            item_specs in prop::collection::vec((0usize..4, 1u8..8), 0..12),
            rule_specs in prop::collection::vec(
                (1u8..8, prop::collection::vec((0u32..24, 0u32..4), 0..4), 0u8..128, 0u32..72, any::<bool>()),
                0..4,
            ),
            day in 1u32..28,
            minute_of_day in 0u32..1440,
        ) {
            let (items, rules) = build(&item_specs, &rule_specs);
            let now = NaiveDate::from_ymd_opt(2024, 2, day)
                .unwrap()
                .and_hms_opt(minute_of_day / 60, minute_of_day % 60, 0)
                .unwrap();
            let scheduler = BulkScheduler::new();
            let schedule = scheduler.assign(&items, &rules, now);

            // determinism
            prop_assert_eq!(&schedule, &scheduler.assign(&items, &rules, now));

            // coverage: exactly one assignment per item
            prop_assert_eq!(schedule.assignment_count(), items.len());
            for item in &items {
                prop_assert_eq!(
                    schedule.assignments.iter().filter(|a| a.content_id == item.id).count(),
                    1
                );
            }

            let fallback = now.date().and_hms_opt(9, 0, 0).unwrap() + Duration::days(1);
            for a in &schedule.assignments {
                match a.rule_id() {
                    // future-only
                    Some(_) => prop_assert!(a.scheduled_at > now),
                    // fallback determinism
                    None => prop_assert_eq!(a.scheduled_at, fallback),
                }
            }

            // spacing within each rule
            for rule in &rules {
                let times: Vec<_> = schedule
                    .assignments_for_rule(&rule.id)
                    .iter()
                    .map(|a| a.scheduled_at)
                    .collect();
                for (i, t1) in times.iter().enumerate() {
                    for t2 in &times[i + 1..] {
                        let gap = (*t1 - *t2).num_milliseconds().abs() as f64;
                        prop_assert!(gap >= rule.spacing_hours * MS_PER_HOUR);
                    }
                }
            }
        }
    }
}
