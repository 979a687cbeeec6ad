//! Dispatching rules and rule engine for ordering content before placement.
//!
//! The slot assigner is first-fit, so the order in which items are visited
//! decides who gets contested slots. Ordering is expressed as composable
//! rules; the default engine ranks by priority.
//!
//! # Usage
//!
//! ```
//! use u_social_schedule::dispatching::{rules, RuleEngine};
//! use u_social_schedule::models::{ContentItem, Priority};
//!
//! let items = vec![
//!     ContentItem::new("a").with_priority(Priority::Low),
//!     ContentItem::new("b").with_priority(Priority::Urgent),
//! ];
//! let engine = RuleEngine::new()
//!     .with_rule(rules::PriorityRank)
//!     .with_rule(rules::FewestPlatforms);
//!
//! assert_eq!(engine.sort_indices(&items), vec![1, 0]);
//! ```

mod engine;
pub mod rules;

pub use engine::RuleEngine;

use crate::models::ContentItem;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = visited first.
pub type RuleScore = f64;

/// A dispatching rule that evaluates how early an item should be placed.
///
/// # Score Convention
/// **Lower score = placed earlier.** Rules should return smaller values
/// for items that should win contested slots.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "PRIORITY", "FIFO").
    fn name(&self) -> &'static str;

    /// Evaluates the placement order score of an item.
    fn evaluate(&self, item: &ContentItem) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
