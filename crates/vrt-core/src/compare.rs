//! Image comparison boundary
//!
//! Pixel-level diffing is delegated to an external primitive behind
//! [`ImageComparer`]; the classifier only records the primitive's numeric
//! summary alongside the before/after references.

use serde::{Deserialize, Serialize};
use vrt_golden::GoldenEntry;

/// Numeric summary of one image comparison
///
/// Produced by the external image-diff primitive for every `changed` entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    /// Number of pixels that differ between baseline and capture
    pub differing_pixels: u64,
    /// Total number of compared pixels
    pub total_pixels: u64,
}

impl DiffSummary {
    /// Create a new summary
    #[inline]
    #[must_use]
    pub fn new(differing_pixels: u64, total_pixels: u64) -> Self {
        Self {
            differing_pixels,
            total_pixels,
        }
    }

    /// Fraction of pixels that differ, in `[0.0, 1.0]`
    ///
    /// Zero when no pixels were compared (dimension mismatch handled by the
    /// primitive as all-differing, not by this accessor).
    #[inline]
    #[must_use]
    pub fn ratio(&self) -> f64 {
        if self.total_pixels == 0 {
            0.0
        } else {
            self.differing_pixels as f64 / self.total_pixels as f64
        }
    }
}

/// Boundary trait for the external image-diff primitive
///
/// Invoked only for entries whose content hashes already differ, with the
/// baseline reference and the freshly captured bytes. Implementations fetch
/// the baseline image themselves (or work from a prefetched cache) and must
/// be deterministic for a given input pair, since classification output
/// embeds the summary verbatim.
pub trait ImageComparer: Send + Sync {
    /// Compare the baseline image against the captured bytes
    fn compare(&self, baseline: &GoldenEntry, captured_bytes: &[u8]) -> DiffSummary;
}

/// Comparer that reports no pixel data
///
/// For callers that only need hash-level classification (the category is
/// decided before the comparer runs); also the standard test double.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullComparer;

impl ImageComparer for NullComparer {
    fn compare(&self, _baseline: &GoldenEntry, _captured_bytes: &[u8]) -> DiffSummary {
        DiffSummary::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vrt_golden::ImageHash;

    #[test]
    fn diff_summary_ratio() {
        let summary = DiffSummary::new(25, 100);
        assert!((summary.ratio() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn diff_summary_ratio_empty() {
        assert_eq!(DiffSummary::default().ratio(), 0.0);
    }

    #[test]
    fn null_comparer_reports_nothing() {
        let baseline = GoldenEntry::new(ImageHash::compute(b"golden"), "https://img/golden");
        let summary = NullComparer.compare(&baseline, b"capture");
        assert_eq!(summary, DiffSummary::default());
    }
}
