//! Rule engine for placement ordering.
//!
//! Rules are consulted in the order they were added; a later rule only
//! decides between items that tie on every earlier one. The sort is stable,
//! so items that tie on all rules keep their input order.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, DispatchingRule};
use crate::models::ContentItem;

/// Scores closer than this are treated as equal.
const SCORE_EPSILON: f64 = 1e-9;

/// A lexicographic chain of dispatching rules.
///
/// # Example
/// ```
/// use u_social_schedule::dispatching::{rules, RuleEngine};
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::PriorityRank)
///     .with_rule(rules::FewestPlatforms);
/// assert_eq!(engine.rule_names(), vec!["PRIORITY", "FEWEST_PLATFORMS"]);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    chain: Vec<Arc<dyn DispatchingRule>>,
}

impl RuleEngine {
    /// An engine with no rules: every item ties, so input order is kept.
    pub fn new() -> Self {
        Self { chain: Vec::new() }
    }

    /// Engine used by the bulk scheduler: highest priority rank first,
    /// input order on ties.
    pub fn priority() -> Self {
        Self::new().with_rule(rules::PriorityRank)
    }

    /// Appends a rule consulted after all rules added so far.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.chain.push(Arc::new(rule));
        self
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.chain.iter().map(|rule| rule.name()).collect()
    }

    /// Placement order as indices into `items`.
    pub fn sort_indices(&self, items: &[ContentItem]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..items.len()).collect();
        if self.chain.is_empty() || items.len() < 2 {
            return order;
        }

        // One score row per item, so each rule runs once per item.
        let scores: Vec<Vec<f64>> = items
            .iter()
            .map(|item| self.chain.iter().map(|rule| rule.evaluate(item)).collect())
            .collect();
        order.sort_by(|&a, &b| compare_rows(&scores[a], &scores[b]));
        order
    }
}

fn compare_rows(a: &[f64], b: &[f64]) -> Ordering {
    a.iter()
        .zip(b)
        .find(|(x, y)| (*x - *y).abs() > SCORE_EPSILON)
        .and_then(|(x, y)| x.partial_cmp(y))
        .unwrap_or(Ordering::Equal)
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::priority()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .finish()
    }
}
