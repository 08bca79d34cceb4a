//! Error types for VRT Core
//!
//! Three failure classes with distinct handling:
//! - per-identity capture failures are absorbed into the classification as
//!   `skipped` entries and never surface here
//! - invariant violations (malformed inputs) are fatal and abort the run
//! - persistence failures leave the approval batch uncommitted; the caller
//!   retries the whole batch

use vrt_golden::{ManifestError, ScreenshotIdentity};

/// Main VRT error type
#[derive(Debug, thiserror::Error)]
pub enum VrtError {
    /// Classification rejected malformed input
    #[error("classification failed: {0}")]
    Classify(#[from] ClassifyError),

    /// Baseline manifest was malformed
    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// Approval batch could not be persisted
    #[error("persistence failed: {0}")]
    Persistence(#[from] PersistenceError),
}

impl VrtError {
    /// Check if the operation can be retried as a whole
    ///
    /// Persistence failures are transient (retry the full approval batch);
    /// invariant violations are programmer errors and retrying cannot help.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}

/// Classification errors
///
/// Classification is total over well-formed inputs; the only failure is a
/// structurally malformed input, which is surfaced to the caller and never
/// retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    /// Capture set contains an identity that nothing requested
    ///
    /// Every recorded outcome must belong to the target set or the prior
    /// manifest; a correct capture provider cannot produce anything else.
    #[error("invariant violation: capture outcome for unrequested identity {0}")]
    InvariantViolation(ScreenshotIdentity),
}

/// Errors raised by the manifest and asset store collaborators
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backend could not be reached
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// Backend refused the operation
    #[error("operation rejected: {0}")]
    Rejected(String),
}

/// Approval commit failures
///
/// The new manifest is not considered committed when any variant is
/// returned: uploads and the manifest save are all-or-nothing per batch.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// Uploading an approved image failed
    #[error("asset upload failed for {identity}: {source}")]
    UploadFailed {
        identity: ScreenshotIdentity,
        #[source]
        source: StoreError,
    },

    /// Saving the new manifest failed after uploads succeeded
    #[error("manifest save failed: {0}")]
    SaveFailed(#[source] StoreError),

    /// An approved entry has no captured bytes to upload
    ///
    /// Happens only when the capture set handed to the commit is not the one
    /// the classification was computed from.
    #[error("no captured bytes for approved identity {0}")]
    AssetMissing(ScreenshotIdentity),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(page: &str, agent: &str) -> ScreenshotIdentity {
        ScreenshotIdentity::new(page, agent).unwrap()
    }

    #[test]
    fn classify_error_display() {
        let err = ClassifyError::InvariantViolation(id("stray", "chrome"));
        assert!(err.to_string().contains("invariant violation"));
        assert!(err.to_string().contains("stray@chrome"));
    }

    #[test]
    fn persistence_is_retryable() {
        let err = VrtError::from(PersistenceError::SaveFailed(StoreError::Unavailable(
            "git remote down".to_string(),
        )));
        assert!(err.is_retryable());
    }

    #[test]
    fn invariant_violation_is_not_retryable() {
        let err = VrtError::from(ClassifyError::InvariantViolation(id("stray", "chrome")));
        assert!(!err.is_retryable());
    }
}
