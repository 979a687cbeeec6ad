//! Built-in dispatching rules.
//!
//! # Score Convention
//! All rules return lower scores for items that should be placed first.
//! Sorting is stable, so a rule that returns a constant keeps input order.

use super::{DispatchingRule, RuleScore};
use crate::models::ContentItem;

/// Highest priority first.
///
/// Score is the negated priority rank (urgent 4, high 3, medium 2, low 1).
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityRank;

impl DispatchingRule for PriorityRank {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, item: &ContentItem) -> RuleScore {
        -f64::from(item.priority.rank())
    }

    fn description(&self) -> &'static str {
        "Highest priority rank first"
    }
}

/// First In First Out.
///
/// Every item scores the same; the stable sort keeps input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fifo;

impl DispatchingRule for Fifo {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn evaluate(&self, _item: &ContentItem) -> RuleScore {
        0.0
    }

    fn description(&self) -> &'static str {
        "First In First Out"
    }
}

/// Fewest target platforms first.
///
/// Single-platform items have fewer matching rules, so placing them first
/// leaves broad items to absorb later slots.
#[derive(Debug, Clone, Copy, Default)]
pub struct FewestPlatforms;

impl DispatchingRule for FewestPlatforms {
    fn name(&self) -> &'static str {
        "FEWEST_PLATFORMS"
    }

    fn evaluate(&self, item: &ContentItem) -> RuleScore {
        item.platforms.len() as f64
    }

    fn description(&self) -> &'static str {
        "Fewest target platforms first"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;

    #[test]
    fn test_priority_rank_scores() {
        let urgent = ContentItem::new("u").with_priority(Priority::Urgent);
        let low = ContentItem::new("l").with_priority(Priority::Low);
        assert!(PriorityRank.evaluate(&urgent) < PriorityRank.evaluate(&low));
        assert_eq!(PriorityRank.evaluate(&urgent), -4.0);
    }

    #[test]
    fn test_fewest_platforms_scores() {
        let one = ContentItem::new("a").with_platform("linkedin");
        let two = ContentItem::new("b").with_platform("linkedin").with_platform("twitter");
        assert!(FewestPlatforms.evaluate(&one) < FewestPlatforms.evaluate(&two));
    }

    #[test]
    fn test_fifo_is_constant() {
        let a = ContentItem::new("a").with_priority(Priority::Urgent);
        let b = ContentItem::new("b");
        assert_eq!(Fifo.evaluate(&a), Fifo.evaluate(&b));
        assert_eq!(Fifo.description(), "First In First Out");
    }
}
