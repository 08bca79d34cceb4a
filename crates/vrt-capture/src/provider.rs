//! Capture provider boundary
//!
//! The browser automation layer lives behind [`CaptureProvider`]. It may run
//! many browser sessions concurrently and owns its own concurrency limit,
//! retries, and timeouts; the contract here is only that every requested
//! identity comes back with a fully-resolved outcome.

use crate::outcome::{CaptureOutcome, CaptureSet};
use async_trait::async_trait;
use std::collections::BTreeSet;
use vrt_golden::ScreenshotIdentity;

/// Boundary trait for the browser automation collaborator
///
/// # Contract
/// - Invoked once per run with the full target set
/// - Must return an outcome for every requested identity within a bounded
///   time; a capture that never resolves surfaces as
///   [`CaptureFailure::Timeout`](crate::CaptureFailure::Timeout), never as a
///   missing key
/// - Outcomes for identities that were not requested are a provider bug and
///   are rejected downstream by the classifier
#[async_trait]
pub trait CaptureProvider: Send + Sync {
    /// Capture screenshots for every target identity
    async fn capture(&self, targets: &BTreeSet<ScreenshotIdentity>) -> CaptureSet;
}

/// Provider that attempts nothing
///
/// Returns [`CaptureOutcome::NotAttempted`] for every target. Useful for
/// dry runs (classify everything as skipped/removed without launching
/// browsers) and as a test double.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCaptureProvider;

#[async_trait]
impl CaptureProvider for NullCaptureProvider {
    async fn capture(&self, targets: &BTreeSet<ScreenshotIdentity>) -> CaptureSet {
        tracing::debug!("null provider: marking {} targets not attempted", targets.len());
        targets
            .iter()
            .map(|identity| (identity.clone(), CaptureOutcome::NotAttempted))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(page: &str, agent: &str) -> ScreenshotIdentity {
        ScreenshotIdentity::new(page, agent).unwrap()
    }

    #[tokio::test]
    async fn null_provider_resolves_every_target() {
        let targets: BTreeSet<_> = [id("pageA", "chrome"), id("pageB", "firefox")]
            .into_iter()
            .collect();

        let set = NullCaptureProvider.capture(&targets).await;

        assert_eq!(set.len(), 2);
        for identity in &targets {
            assert_eq!(set.get(identity), Some(&CaptureOutcome::NotAttempted));
        }
    }

    #[tokio::test]
    async fn null_provider_empty_targets() {
        let set = NullCaptureProvider.capture(&BTreeSet::new()).await;
        assert!(set.is_empty());
    }
}
