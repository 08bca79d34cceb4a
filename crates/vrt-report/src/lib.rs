//! VRT Report Assembly
//!
//! Turns a finished [`Classification`] plus [`RunMetadata`] into a
//! serializable [`Report`] for the HTML/JSON renderers. Read-only with
//! respect to the core's data; assembling a report never changes a
//! classification or a manifest.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vrt_core::{Category, CategoryCounts, Classification, DiffSummary, RunMetadata};
use vrt_golden::ImageHash;

/// One rendered row of the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Rendered identity (`page@agent`)
    pub identity: String,
    /// Outcome category
    pub category: Category,
    /// Baseline image URL, when one existed
    pub before_url: Option<String>,
    /// Captured image URL, when the capture completed
    pub after_url: Option<String>,
    /// Short baseline hash for display
    pub before_hash: Option<String>,
    /// Short capture hash for display
    pub after_hash: Option<String>,
    /// Fraction of differing pixels, for changed entries
    pub diff_ratio: Option<f64>,
}

/// Full renderable report for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the run finished
    pub finished_at: DateTime<Utc>,
    /// Run duration in milliseconds
    pub duration_ms: i64,
    /// Aggregate counts per category
    pub counts: CategoryCounts,
    /// Per-identity rows in identity order
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// Assemble a report from the core's output
    #[must_use]
    pub fn assemble(classification: &Classification, metadata: &RunMetadata) -> Self {
        let rows = classification
            .iter()
            .map(|entry| ReportRow {
                identity: entry.identity.to_string(),
                category: entry.category,
                before_url: entry.before.as_ref().map(|e| e.url.clone()),
                after_url: entry.after.as_ref().map(|e| e.url.clone()),
                before_hash: entry.before.as_ref().map(|e| e.hash.short()),
                after_hash: entry.after.as_ref().map(|e| e.hash.short()),
                diff_ratio: entry.diff.as_ref().map(DiffSummary::ratio),
            })
            .collect();

        Self {
            started_at: metadata.started_at,
            finished_at: metadata.finished_at,
            duration_ms: metadata.duration().num_milliseconds(),
            counts: metadata.counts,
            rows,
        }
    }

    /// One-line summary for log output
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "{} screenshots: {} changed, {} added, {} removed, {} unchanged, {} skipped ({} ms)",
            self.counts.total(),
            self.counts.changed,
            self.counts.added,
            self.counts.removed,
            self.counts.unchanged,
            self.counts.skipped,
            self.duration_ms,
        )
    }

    /// Serialize to pretty JSON for the external renderer
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Shorten a hash for display contexts that build rows by hand
#[inline]
#[must_use]
pub fn short_hash(hash: &ImageHash) -> String {
    hash.short()
}
