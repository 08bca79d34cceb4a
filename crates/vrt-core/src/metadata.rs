//! Run metadata
//!
//! Aggregate counts and timing for one finished run, computed once from the
//! complete classification. There is no mutable accumulator shared across
//! the run; the metadata is a pure projection and recomputing it from the
//! same classification gives the same value.

use crate::classify::{Category, Classification};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Per-category entry counts for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub skipped: usize,
    pub unchanged: usize,
    pub removed: usize,
    pub added: usize,
    pub changed: usize,
}

impl CategoryCounts {
    /// Tally a finished classification
    #[must_use]
    pub fn tally(classification: &Classification) -> Self {
        let mut counts = Self::default();
        for entry in classification.iter() {
            match entry.category {
                Category::Skipped => counts.skipped += 1,
                Category::Unchanged => counts.unchanged += 1,
                Category::Removed => counts.removed += 1,
                Category::Added => counts.added += 1,
                Category::Changed => counts.changed += 1,
            }
        }
        counts
    }

    /// Total classified identities
    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.skipped + self.unchanged + self.removed + self.added + self.changed
    }

    /// Check whether anything needs review (changed/added/removed)
    #[inline]
    #[must_use]
    pub fn has_differences(&self) -> bool {
        self.changed + self.added + self.removed > 0
    }
}

/// Timing and counts for one finished run
///
/// Start and end times come from the caller (the orchestrating collaborator
/// owns the clock); counts are derived from the classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the run finished
    pub finished_at: DateTime<Utc>,
    /// Entry counts per category
    pub counts: CategoryCounts,
}

impl RunMetadata {
    /// Derive metadata from a finished classification
    #[must_use]
    pub fn from_classification(
        classification: &Classification,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            started_at,
            finished_at,
            counts: CategoryCounts::tally(classification),
        }
    }

    /// Wall-clock duration of the run
    #[inline]
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.finished_at - self.started_at
    }
}
