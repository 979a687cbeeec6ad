//! Schedule (solution) model.
//!
//! A schedule is the set of posting times produced by one scheduling run.
//! It is derived output: recomputed on every invocation and never persisted
//! by this crate.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::ContentItem;

/// How an assignment was produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AssignmentSource {
    /// Accepted slot of a scheduling rule.
    Rule {
        /// The rule that produced the slot.
        #[serde(rename = "ruleId")]
        rule_id: String,
    },
    /// No rule produced a slot; default next-day slot.
    Fallback,
    /// Occurrence of a recurring pattern.
    Recurring,
}

/// A content-time assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledAssignment {
    /// Assigned content ID.
    pub content_id: String,
    /// Posting time (local wall clock).
    pub scheduled_at: NaiveDateTime,
    /// How the time was chosen.
    pub source: AssignmentSource,
}

impl ScheduledAssignment {
    /// Creates a rule-based assignment.
    pub fn from_rule(
        content_id: impl Into<String>,
        scheduled_at: NaiveDateTime,
        rule_id: impl Into<String>,
    ) -> Self {
        Self {
            content_id: content_id.into(),
            scheduled_at,
            source: AssignmentSource::Rule {
                rule_id: rule_id.into(),
            },
        }
    }

    /// Creates a fallback assignment.
    pub fn fallback(content_id: impl Into<String>, scheduled_at: NaiveDateTime) -> Self {
        Self {
            content_id: content_id.into(),
            scheduled_at,
            source: AssignmentSource::Fallback,
        }
    }

    /// Creates a recurring-occurrence assignment.
    pub fn recurring(content_id: impl Into<String>, scheduled_at: NaiveDateTime) -> Self {
        Self {
            content_id: content_id.into(),
            scheduled_at,
            source: AssignmentSource::Recurring,
        }
    }

    /// The producing rule, if rule-based.
    pub fn rule_id(&self) -> Option<&str> {
        match &self.source {
            AssignmentSource::Rule { rule_id } => Some(rule_id),
            _ => None,
        }
    }

    /// Whether this assignment used the fallback slot.
    #[inline]
    pub fn is_fallback(&self) -> bool {
        self.source == AssignmentSource::Fallback
    }
}

/// The outcome of one scheduling run.
///
/// Assignments are kept in the order they were made.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkSchedule {
    /// Assignments in assignment order.
    pub assignments: Vec<ScheduledAssignment>,
}

impl BulkSchedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an assignment.
    pub fn add_assignment(&mut self, assignment: ScheduledAssignment) {
        self.assignments.push(assignment);
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Whether nothing was scheduled.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Finds the first assignment for a content item.
    pub fn assignment_for(&self, content_id: &str) -> Option<&ScheduledAssignment> {
        self.assignments.iter().find(|a| a.content_id == content_id)
    }

    /// Returns all assignments produced by a rule.
    pub fn assignments_for_rule(&self, rule_id: &str) -> Vec<&ScheduledAssignment> {
        self.assignments
            .iter()
            .filter(|a| a.rule_id() == Some(rule_id))
            .collect()
    }

    /// Number of fallback assignments.
    pub fn fallback_count(&self) -> usize {
        self.assignments.iter().filter(|a| a.is_fallback()).count()
    }

    /// Posting times in assignment order.
    pub fn times(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        self.assignments.iter().map(|a| a.scheduled_at)
    }

    /// Applies this schedule to a collection by content ID.
    ///
    /// Matched items get `scheduled_at` set and status `Scheduled`;
    /// unmatched items are returned unchanged, in their original order.
    pub fn merge_into(&self, items: Vec<ContentItem>) -> Vec<ContentItem> {
        let by_id: HashMap<&str, NaiveDateTime> = self
            .assignments
            .iter()
            .rev()
            .map(|a| (a.content_id.as_str(), a.scheduled_at))
            .collect();

        items
            .into_iter()
            .map(|mut item| {
                if let Some(&at) = by_id.get(item.id.as_str()) {
                    item.schedule_at(at);
                }
                item
            })
            .collect()
    }
}
