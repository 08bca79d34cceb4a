//! Per-screenshot capture outcomes
//!
//! Provides [`CaptureOutcome`], the fully-resolved result of one attempted
//! screenshot capture, and [`CaptureSet`], the materialized identity →
//! outcome snapshot the classifier consumes. Outcomes exist for one run and
//! are never persisted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use vrt_golden::{ImageHash, ScreenshotIdentity};

/// Result of one attempted screenshot capture
///
/// Every identity requested from a capture provider resolves to exactly one
/// outcome before classification begins; there is no in-flight state visible
/// to the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Screenshot was taken and uploaded
    Captured {
        /// Encoded image bytes
        bytes: Vec<u8>,
        /// Content hash of `bytes`
        hash: ImageHash,
        /// Public URL of the uploaded capture
        url: String,
    },

    /// Capture was attempted and did not complete
    Failed(CaptureFailure),

    /// Capture was deliberately not attempted this run
    NotAttempted,
}

impl CaptureOutcome {
    /// Build a successful outcome, computing the hash from the bytes
    #[inline]
    #[must_use]
    pub fn captured(bytes: Vec<u8>, url: impl Into<String>) -> Self {
        let hash = ImageHash::compute(&bytes);
        Self::Captured {
            bytes,
            hash,
            url: url.into(),
        }
    }

    /// Check whether the capture completed successfully
    #[inline]
    #[must_use]
    pub fn is_captured(&self) -> bool {
        matches!(self, Self::Captured { .. })
    }

    /// Content hash, if captured
    #[inline]
    #[must_use]
    pub fn hash(&self) -> Option<&ImageHash> {
        match self {
            Self::Captured { hash, .. } => Some(hash),
            _ => None,
        }
    }
}

/// Why a capture attempt did not complete
///
/// Per-identity and recoverable: the classifier maps every failure to the
/// `skipped` category rather than aborting the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CaptureFailure {
    /// Remote browser session did not produce a screenshot in time
    #[error("capture timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// No browser matching the user-agent alias was available
    #[error("browser unavailable for agent '{agent}'")]
    BrowserUnavailable { agent: String },

    /// Page navigation failed before the screenshot could be taken
    #[error("navigation failed: {reason}")]
    Navigation { reason: String },

    /// Browser produced no usable screenshot
    #[error("screenshot failed: {reason}")]
    Screenshot { reason: String },

    /// Screenshot was taken but could not be uploaded
    #[error("upload failed: {reason}")]
    Upload { reason: String },
}

/// Materialized capture snapshot for one run
///
/// Complete and immutable by the time the classifier sees it: every
/// requested identity maps to exactly one resolved [`CaptureOutcome`].
/// Iteration is in identity order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureSet {
    outcomes: BTreeMap<ScreenshotIdentity, CaptureOutcome>,
}

impl CaptureSet {
    /// Create an empty capture set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome for an identity
    ///
    /// A later outcome for the same identity replaces the earlier one; the
    /// provider owns retries, the set only keeps the final word.
    #[inline]
    pub fn record(&mut self, identity: ScreenshotIdentity, outcome: CaptureOutcome) {
        self.outcomes.insert(identity, outcome);
    }

    /// Outcome for an identity, if any was recorded
    #[inline]
    #[must_use]
    pub fn get(&self, identity: &ScreenshotIdentity) -> Option<&CaptureOutcome> {
        self.outcomes.get(identity)
    }

    /// Number of recorded outcomes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Check if no outcomes were recorded
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Iterate outcomes in identity order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&ScreenshotIdentity, &CaptureOutcome)> {
        self.outcomes.iter()
    }

    /// Iterate recorded identities in lexical order
    #[inline]
    pub fn identities(&self) -> impl Iterator<Item = &ScreenshotIdentity> {
        self.outcomes.keys()
    }
}

impl FromIterator<(ScreenshotIdentity, CaptureOutcome)> for CaptureSet {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (ScreenshotIdentity, CaptureOutcome)>,
    {
        Self {
            outcomes: iter.into_iter().collect(),
        }
    }
}
