//! Multi-platform publishing job model.
//!
//! A job publishes one content item to several platforms. Each platform
//! reports its own status; the job's overall status is derived from them
//! on demand rather than stored.

use serde::{Deserialize, Serialize};

/// Status of one platform within a publishing job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformStatus {
    /// Queued.
    #[default]
    Pending,
    /// Request in flight.
    Publishing,
    /// Live on the platform.
    Published,
    /// The platform rejected or the request errored.
    Failed,
}

/// Overall status of a publishing job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Nothing in flight and not everything published.
    Pending,
    /// At least one platform in flight.
    Publishing,
    /// Every platform published.
    Completed,
    /// At least one platform failed and none in flight.
    Failed,
}

/// Publishing state for one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformPublication {
    /// Platform name.
    pub platform: String,
    /// Current status.
    pub status: PlatformStatus,
    /// Last error message, if failed.
    #[serde(default)]
    pub error: Option<String>,
    /// URL of the live post, if published.
    #[serde(default)]
    pub published_url: Option<String>,
    /// Number of publish attempts started.
    #[serde(default)]
    pub attempts: u32,
}

impl PlatformPublication {
    /// Creates a pending publication.
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            status: PlatformStatus::Pending,
            error: None,
            published_url: None,
            attempts: 0,
        }
    }

    /// Sets the status.
    pub fn with_status(mut self, status: PlatformStatus) -> Self {
        self.status = status;
        self
    }
}

/// A publishing job: one content item, one entry per target platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishJob {
    /// Job identifier.
    pub id: String,
    /// Content being published.
    pub content_id: String,
    /// Per-platform state.
    pub publications: Vec<PlatformPublication>,
}

impl PublishJob {
    /// Creates a job with every platform pending.
    pub fn new<I, S>(id: impl Into<String>, content_id: impl Into<String>, platforms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            content_id: content_id.into(),
            publications: platforms.into_iter().map(PlatformPublication::new).collect(),
        }
    }

    /// Derives the overall status. First match wins:
    ///
    /// 1. `Completed` if every platform is published
    /// 2. `Publishing` if any platform is publishing
    /// 3. `Failed` if any platform failed
    /// 4. `Pending` otherwise
    ///
    /// A job with no platforms counts as completed.
    pub fn overall_status(&self) -> JobStatus {
        let statuses = || self.publications.iter().map(|p| p.status);

        if statuses().all(|s| s == PlatformStatus::Published) {
            JobStatus::Completed
        } else if statuses().any(|s| s == PlatformStatus::Publishing) {
            JobStatus::Publishing
        } else if statuses().any(|s| s == PlatformStatus::Failed) {
            JobStatus::Failed
        } else {
            JobStatus::Pending
        }
    }

    /// Finds the publication for a platform.
    pub fn publication(&self, platform: &str) -> Option<&PlatformPublication> {
        self.publications.iter().find(|p| p.platform == platform)
    }

    /// Updates a platform's status. Returns `false` if the platform is not
    /// part of this job.
    pub fn set_status(&mut self, platform: &str, status: PlatformStatus) -> bool {
        match self.publications.iter_mut().find(|p| p.platform == platform) {
            Some(p) => {
                if status == PlatformStatus::Publishing {
                    p.attempts += 1;
                }
                if status != PlatformStatus::Failed {
                    p.error = None;
                }
                p.status = status;
                true
            }
            None => false,
        }
    }

    /// Marks a platform failed with an error message.
    pub fn mark_failed(&mut self, platform: &str, error: impl Into<String>) -> bool {
        if self.set_status(platform, PlatformStatus::Failed) {
            if let Some(p) = self.publications.iter_mut().find(|p| p.platform == platform) {
                p.error = Some(error.into());
            }
            true
        } else {
            false
        }
    }

    /// Marks a platform published with the live post URL.
    pub fn mark_published(&mut self, platform: &str, url: impl Into<String>) -> bool {
        if self.set_status(platform, PlatformStatus::Published) {
            if let Some(p) = self.publications.iter_mut().find(|p| p.platform == platform) {
                p.published_url = Some(url.into());
            }
            true
        } else {
            false
        }
    }

    /// Platforms currently failed.
    pub fn failed_platforms(&self) -> Vec<&str> {
        self.publications
            .iter()
            .filter(|p| p.status == PlatformStatus::Failed)
            .map(|p| p.platform.as_str())
            .collect()
    }

    /// Resets failed platforms to pending for a manual retry.
    ///
    /// Returns the number of platforms reset. Error messages are kept until
    /// the next attempt starts.
    pub fn retry_failed(&mut self) -> usize {
        let mut reset = 0;
        for p in &mut self.publications {
            if p.status == PlatformStatus::Failed {
                p.status = PlatformStatus::Pending;
                reset += 1;
            }
        }
        reset
    }

    /// Fraction of platforms published (0.0..1.0). An empty job is 1.0.
    pub fn progress(&self) -> f64 {
        if self.publications.is_empty() {
            return 1.0;
        }
        let done = self
            .publications
            .iter()
            .filter(|p| p.status == PlatformStatus::Published)
            .count();
        done as f64 / self.publications.len() as f64
    }
}
