//! Input validation for content scheduling.
//!
//! Scheduling itself is total: malformed input still yields a schedule,
//! with unplaceable items on the fallback slot. Validation is advisory and
//! lets callers surface problems before a run. Detects:
//! - Duplicate item and rule IDs
//! - Items and rules without platforms
//! - Enabled rules that can never produce a slot
//! - Negative or non-finite spacing
//! - Items that no enabled rule matches (they will fall back)

use std::collections::HashSet;

use crate::models::{ContentItem, SchedulingRule};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// An item or rule lists no platforms.
    NoPlatforms,
    /// An enabled rule has no time slots or no weekdays.
    UnreachableRule,
    /// A rule's spacing is negative, NaN, or infinite.
    InvalidSpacing,
    /// No enabled rule shares a platform with the item.
    NoMatchingRule,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a scheduling run.
///
/// Checks:
/// 1. No duplicate item IDs
/// 2. No duplicate rule IDs
/// 3. Every item and rule lists at least one platform
/// 4. Every enabled rule has time slots and weekdays
/// 5. Spacing is finite and non-negative
/// 6. Every item with platforms is matched by some enabled rule
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(items: &[ContentItem], rules: &[SchedulingRule]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut rule_ids = HashSet::new();
    for rule in rules {
        if !rule_ids.insert(rule.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate rule ID: {}", rule.id),
            ));
        }

        if rule.platforms.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NoPlatforms,
                format!("Rule '{}' has no platforms", rule.id),
            ));
        }

        if rule.enabled && !rule.has_candidates() {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnreachableRule,
                format!("Rule '{}' has no time slots or no weekdays", rule.id),
            ));
        }

        if !rule.spacing_hours.is_finite() || rule.spacing_hours < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSpacing,
                format!(
                    "Rule '{}' has invalid spacing {} hours",
                    rule.id, rule.spacing_hours
                ),
            ));
        }
    }

    let mut item_ids = HashSet::new();
    for item in items {
        if !item_ids.insert(item.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate content ID: {}", item.id),
            ));
        }

        if item.platforms.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NoPlatforms,
                format!("Content '{}' has no platforms", item.id),
            ));
        } else if !rules.iter().any(|r| r.enabled && r.matches(item)) {
            errors.push(ValidationError::new(
                ValidationErrorKind::NoMatchingRule,
                format!(
                    "Content '{}' matches no enabled rule and will use the fallback slot",
                    item.id
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
