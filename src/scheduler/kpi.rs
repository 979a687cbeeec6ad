//! Schedule quality metrics.
//!
//! Summarizes a computed schedule: how much of it came from rules versus
//! the fallback, how it is spread over time, and whether every rule's
//! spacing holds between the assignments it produced.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Rule-based | Assignments accepted from a rule slot |
//! | Fallback | Assignments given the default slot |
//! | Span | Latest minus earliest posting time |
//! | Min gap | Smallest gap between consecutive posting times |
//! | Spacing violations | Same-rule pairs closer than the rule's spacing |

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::models::{BulkSchedule, SchedulingRule};

/// Schedule summary.
///
/// Time values are in milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleSummary {
    /// Number of assignments.
    pub total: usize,
    /// Assignments accepted from rule slots.
    pub rule_based: usize,
    /// Assignments given the fallback slot.
    pub fallback: usize,
    /// Assignments from recurring patterns.
    pub recurring: usize,
    /// Assignments per rule ID.
    pub by_rule: HashMap<String, usize>,
    /// Earliest posting time.
    pub earliest: Option<NaiveDateTime>,
    /// Latest posting time.
    pub latest: Option<NaiveDateTime>,
    /// Smallest gap between consecutive posting times (ms).
    pub min_gap_ms: Option<i64>,
    /// Same-rule assignment pairs closer than the rule's spacing.
    pub spacing_violations: usize,
}

impl ScheduleSummary {
    /// Computes the summary.
    ///
    /// # Arguments
    /// * `schedule` - The computed schedule.
    /// * `rules` - Rules the schedule was computed with (for spacing).
    pub fn calculate(schedule: &BulkSchedule, rules: &[SchedulingRule]) -> Self {
        let mut by_rule: HashMap<String, usize> = HashMap::new();
        let mut rule_based = 0;
        for rule_id in schedule.assignments.iter().filter_map(|a| a.rule_id()) {
            rule_based += 1;
            *by_rule.entry(rule_id.to_string()).or_insert(0) += 1;
        }
        let fallback = schedule.fallback_count();
        let recurring = schedule.assignment_count() - rule_based - fallback;

        let mut times: Vec<NaiveDateTime> = schedule.times().collect();
        times.sort();
        let min_gap_ms = times
            .windows(2)
            .map(|w| (w[1] - w[0]).num_milliseconds())
            .min();

        let spacing_violations = rules
            .iter()
            .map(|rule| {
                let produced: Vec<NaiveDateTime> = schedule
                    .assignments_for_rule(&rule.id)
                    .iter()
                    .map(|a| a.scheduled_at)
                    .collect();
                produced
                    .iter()
                    .enumerate()
                    .flat_map(|(i, t1)| produced[i + 1..].iter().map(move |t2| (*t1, *t2)))
                    .filter(|&(t1, t2)| rule.conflicts(t1, t2))
                    .count()
            })
            .sum();

        Self {
            total: schedule.assignment_count(),
            rule_based,
            fallback,
            recurring,
            by_rule,
            earliest: times.first().copied(),
            latest: times.last().copied(),
            min_gap_ms,
            spacing_violations,
        }
    }

    /// Latest minus earliest posting time (ms). Zero for fewer than two.
    pub fn span_ms(&self) -> i64 {
        match (self.earliest, self.latest) {
            (Some(first), Some(last)) => (last - first).num_milliseconds(),
            _ => 0,
        }
    }

    /// Fraction of assignments that came from rules (0.0..1.0).
    pub fn rule_coverage(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.rule_based as f64 / self.total as f64
    }

    /// Whether every rule's spacing holds.
    pub fn meets_spacing(&self) -> bool {
        self.spacing_violations == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ScheduledAssignment, TimeSlot, Weekdays};
    use chrono::NaiveDate;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn rule(id: &str, spacing: f64) -> SchedulingRule {
        SchedulingRule::new(id)
            .with_platform("linkedin")
            .with_time_slot(TimeSlot::new(9, 0).unwrap())
            .with_days(Weekdays::all())
            .with_spacing_hours(spacing)
    }

    #[test]
    fn test_summary_counts() {
        let mut s = BulkSchedule::new();
        s.add_assignment(ScheduledAssignment::from_rule("a", at(8, 9), "r1"));
        s.add_assignment(ScheduledAssignment::from_rule("b", at(9, 9), "r1"));
        s.add_assignment(ScheduledAssignment::from_rule("c", at(8, 17), "r2"));
        s.add_assignment(ScheduledAssignment::fallback("d", at(9, 9)));

        let summary = ScheduleSummary::calculate(&s, &[rule("r1", 4.0), rule("r2", 4.0)]);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.rule_based, 3);
        assert_eq!(summary.fallback, 1);
        assert_eq!(summary.recurring, 0);
        assert_eq!(summary.by_rule["r1"], 2);
        assert_eq!(summary.by_rule["r2"], 1);
        assert_eq!(summary.earliest, Some(at(8, 9)));
        assert_eq!(summary.latest, Some(at(9, 9)));
        assert_eq!(summary.span_ms(), 24 * 3_600_000);
        assert_eq!(summary.min_gap_ms, Some(0)); // b and d share a time
        assert!((summary.rule_coverage() - 0.75).abs() < 1e-10);
        assert!(summary.meets_spacing());
    }

    #[test]
    fn test_spacing_violation_detected() {
        let mut s = BulkSchedule::new();
        s.add_assignment(ScheduledAssignment::from_rule("a", at(8, 9), "r1"));
        s.add_assignment(ScheduledAssignment::from_rule("b", at(8, 11), "r1"));

        let summary = ScheduleSummary::calculate(&s, &[rule("r1", 4.0)]);
        assert_eq!(summary.spacing_violations, 1);
        assert!(!summary.meets_spacing());
        assert_eq!(summary.min_gap_ms, Some(2 * 3_600_000));
    }

    #[test]
    fn test_empty_summary() {
        let summary = ScheduleSummary::calculate(&BulkSchedule::new(), &[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.span_ms(), 0);
        assert_eq!(summary.min_gap_ms, None);
        assert_eq!(summary.rule_coverage(), 1.0);
        assert!(summary.meets_spacing());
    }
}
