//! Content item model.
//!
//! A content item is a single post draft targeting one or more social
//! platforms. It is the unit the schedulers assign posting times to.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Scheduling priority of a content item.
///
/// Ordered `Low < Medium < High < Urgent`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Rank 1.
    Low,
    /// Rank 2.
    #[default]
    Medium,
    /// Rank 3.
    High,
    /// Rank 4.
    Urgent,
}

impl Priority {
    /// Fixed numeric rank: urgent 4, high 3, medium 2, low 1.
    #[inline]
    pub fn rank(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
            Priority::Urgent => 4,
        }
    }
}

/// Lifecycle status of a content item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    /// Being written.
    #[default]
    Draft,
    /// Passed through platform optimization.
    Optimized,
    /// Has a posting time.
    Scheduled,
    /// Posted to every target platform.
    Published,
    /// Publishing failed on at least one platform.
    Failed,
}

/// A post draft to be scheduled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Unique content identifier.
    pub id: String,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Target platforms (e.g. `"linkedin"`, `"twitter"`).
    pub platforms: Vec<String>,
    /// Scheduling priority.
    #[serde(default)]
    pub priority: Priority,
    /// Lifecycle status.
    #[serde(default)]
    pub status: ContentStatus,
    /// Assigned posting time, if scheduled.
    #[serde(default)]
    pub scheduled_at: Option<NaiveDateTime>,
}

impl ContentItem {
    /// Creates a draft with the given ID and no platforms.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            platforms: Vec::new(),
            priority: Priority::default(),
            status: ContentStatus::Draft,
            scheduled_at: None,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Adds a target platform.
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platforms.push(platform.into());
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: ContentStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether this item targets the platform.
    pub fn targets(&self, platform: &str) -> bool {
        self.platforms.iter().any(|p| p == platform)
    }

    /// Whether this item targets at least one of the given platforms.
    pub fn shares_platform(&self, platforms: &[String]) -> bool {
        platforms.iter().any(|p| self.targets(p))
    }

    /// Whether a posting time has been assigned.
    pub fn is_scheduled(&self) -> bool {
        self.status == ContentStatus::Scheduled && self.scheduled_at.is_some()
    }

    /// Marks the item scheduled at the given time.
    pub fn schedule_at(&mut self, at: NaiveDateTime) {
        self.scheduled_at = Some(at);
        self.status = ContentStatus::Scheduled;
    }
}
