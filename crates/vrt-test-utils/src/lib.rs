//! Testing utilities for the VRT workspace
//!
//! Shared fixture builders for identities, manifests, and capture sets.

#![allow(missing_docs)]

use std::collections::BTreeSet;
use vrt_capture::{CaptureOutcome, CaptureSet};
use vrt_golden::{GoldenEntry, GoldenManifest, ImageHash, ScreenshotIdentity};

pub fn identity(page: &str, agent: &str) -> ScreenshotIdentity {
    ScreenshotIdentity::new(page, agent).unwrap()
}

pub fn golden_entry(image_bytes: &[u8], url: &str) -> GoldenEntry {
    GoldenEntry::new(ImageHash::compute(image_bytes), url)
}

pub fn manifest_of<const N: usize>(
    entries: [(ScreenshotIdentity, GoldenEntry); N],
) -> GoldenManifest {
    GoldenManifest::from_entries(entries).unwrap()
}

pub fn captured(image_bytes: &[u8], url: &str) -> CaptureOutcome {
    CaptureOutcome::captured(image_bytes.to_vec(), url)
}

pub fn capture_set<const N: usize>(
    outcomes: [(ScreenshotIdentity, CaptureOutcome); N],
) -> CaptureSet {
    outcomes.into_iter().collect()
}

pub fn target_set<const N: usize>(
    identities: [ScreenshotIdentity; N],
) -> BTreeSet<ScreenshotIdentity> {
    identities.into_iter().collect()
}
