//! Screenshot diff classification
//!
//! [`classify`] assigns every screenshot identity of a run to exactly one
//! [`Category`], comparing the fresh capture snapshot against the prior
//! golden manifest. It is a pure function of its inputs: capture arrival
//! order never influences the output, and the resulting entries are sorted
//! by identity.

use crate::compare::{DiffSummary, ImageComparer};
use crate::error::ClassifyError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use vrt_capture::{CaptureOutcome, CaptureSet};
use vrt_golden::{GoldenEntry, GoldenManifest, ScreenshotIdentity};

/// Outcome category of one screenshot identity
///
/// Every identity in the run lands in exactly one category. The decision
/// order is fixed (see [`classify`]); in particular `Removed` takes
/// precedence over `Skipped` when an identity was dropped from the target
/// set and a stray failed capture exists for it: an identity intentionally
/// dropped from scope is not a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Capture was not attempted or did not complete; never compared
    Skipped,
    /// Present in both runs with equal content hashes
    Unchanged,
    /// Present in the prior manifest, dropped from this run's target set
    Removed,
    /// Captured this run with no prior baseline
    Added,
    /// Present in both runs with differing content hashes
    Changed,
}

impl Category {
    /// Check whether entries of this category can be approved into the
    /// baseline
    #[inline]
    #[must_use]
    pub fn is_approvable(&self) -> bool {
        matches!(self, Self::Changed | Self::Added | Self::Removed)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Skipped => "skipped",
            Self::Unchanged => "unchanged",
            Self::Removed => "removed",
            Self::Added => "added",
            Self::Changed => "changed",
        };
        f.write_str(name)
    }
}

/// Classification of one screenshot identity
///
/// # Invariants
/// - `before` is present iff the identity had a prior baseline and the
///   category is not `Added`
/// - `after` is present iff the capture completed (`Added`, `Changed`,
///   `Unchanged`)
/// - `diff` is present iff the category is `Changed`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationEntry {
    /// The screenshot this entry classifies
    pub identity: ScreenshotIdentity,
    /// Assigned outcome category
    pub category: Category,
    /// Prior baseline reference, when one existed
    pub before: Option<GoldenEntry>,
    /// Fresh capture reference, when the capture completed
    pub after: Option<GoldenEntry>,
    /// Pixel-difference summary from the image-diff primitive
    pub diff: Option<DiffSummary>,
}

/// Complete classification of one run
///
/// Entries are sorted by identity and cover the union of the target set and
/// the prior manifest exactly once each. Immutable once produced; read by
/// the report assembler and the approval engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    entries: Vec<ClassificationEntry>,
}

// Deserialization restores the sorted-entries invariant instead of trusting
// the wire order; `get` binary-searches and must never see unsorted entries.
impl<'de> serde::Deserialize<'de> for Classification {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            entries: Vec<ClassificationEntry>,
        }
        let raw = Raw::deserialize(deserializer)?;
        Ok(Self::new(raw.entries))
    }
}

impl Classification {
    fn new(mut entries: Vec<ClassificationEntry>) -> Self {
        entries.sort_by(|a, b| a.identity.cmp(&b.identity));
        Self { entries }
    }

    /// All entries in identity order
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[ClassificationEntry] {
        &self.entries
    }

    /// Iterate entries in identity order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &ClassificationEntry> {
        self.entries.iter()
    }

    /// Entry for a specific identity
    #[inline]
    #[must_use]
    pub fn get(&self, identity: &ScreenshotIdentity) -> Option<&ClassificationEntry> {
        self.entries
            .binary_search_by(|entry| entry.identity.cmp(identity))
            .ok()
            .map(|index| &self.entries[index])
    }

    /// Iterate entries of one category
    #[inline]
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &ClassificationEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.category == category)
    }

    /// Number of entries in one category
    #[inline]
    #[must_use]
    pub fn count(&self, category: Category) -> usize {
        self.by_category(category).count()
    }

    /// Total number of classified identities
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the run classified nothing
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Classify every identity of a run
///
/// Covers `targets ∪ keys(prior)`; each identity is assigned by the first
/// matching rule:
///
/// 1. not in `targets` → [`Category::Removed`]
/// 2. capture absent, not attempted, or failed → [`Category::Skipped`]
/// 3. captured with no prior baseline → [`Category::Added`]
/// 4. captured, baseline exists, hashes equal → [`Category::Unchanged`]
/// 5. otherwise → [`Category::Changed`], with the comparer's diff summary
///
/// A target identity missing from the capture set is treated as not
/// attempted: it classifies as `Skipped` rather than disappearing from the
/// output.
///
/// # Errors
/// Returns [`ClassifyError::InvariantViolation`] if the capture set records
/// an outcome for an identity outside `targets ∪ keys(prior)`: nothing
/// requested it, so the inputs are inconsistent.
pub fn classify(
    prior: &GoldenManifest,
    captures: &CaptureSet,
    targets: &BTreeSet<ScreenshotIdentity>,
    comparer: &dyn ImageComparer,
) -> Result<Classification, ClassifyError> {
    for identity in captures.identities() {
        if !targets.contains(identity) && !prior.contains(identity) {
            return Err(ClassifyError::InvariantViolation(identity.clone()));
        }
    }

    let universe: BTreeSet<&ScreenshotIdentity> =
        targets.iter().chain(prior.identities()).collect();

    let mut entries = Vec::with_capacity(universe.len());
    for identity in universe {
        let baseline = prior.lookup(identity);
        let in_target = targets.contains(identity);
        let outcome = captures.get(identity);
        entries.push(classify_one(identity, baseline, in_target, outcome, comparer));
    }

    let classification = Classification::new(entries);
    tracing::debug!(
        total = classification.len(),
        changed = classification.count(Category::Changed),
        added = classification.count(Category::Added),
        removed = classification.count(Category::Removed),
        skipped = classification.count(Category::Skipped),
        "classified run"
    );
    Ok(classification)
}

// One identity through the decision table. Rule order is the contract;
// reordering the arms changes observable behavior.
fn classify_one(
    identity: &ScreenshotIdentity,
    baseline: Option<&GoldenEntry>,
    in_target: bool,
    outcome: Option<&CaptureOutcome>,
    comparer: &dyn ImageComparer,
) -> ClassificationEntry {
    let entry = |category, before: Option<&GoldenEntry>, after, diff| ClassificationEntry {
        identity: identity.clone(),
        category,
        before: before.cloned(),
        after,
        diff,
    };

    if !in_target {
        return entry(Category::Removed, baseline, None, None);
    }

    let (bytes, hash, url) = match outcome {
        None | Some(CaptureOutcome::NotAttempted) | Some(CaptureOutcome::Failed(_)) => {
            return entry(Category::Skipped, baseline, None, None);
        }
        Some(CaptureOutcome::Captured { bytes, hash, url }) => (bytes, hash, url),
    };
    let after = GoldenEntry::new(*hash, url.clone());

    match baseline {
        None => entry(Category::Added, None, Some(after), None),
        Some(golden) if golden.hash == *hash => {
            entry(Category::Unchanged, baseline, Some(after), None)
        }
        Some(golden) => {
            let summary = comparer.compare(golden, bytes);
            entry(Category::Changed, baseline, Some(after), Some(summary))
        }
    }
}
