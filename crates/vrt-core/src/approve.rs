//! Baseline approval
//!
//! [`approve`] promotes a user-selected subset of a run's changed, added,
//! and removed entries into a new golden manifest. Unapproved entries keep
//! their prior baseline bit-for-bit; approving the same selection twice is a
//! no-op the second time.

use crate::classify::{Category, Classification};
use std::collections::BTreeSet;
use vrt_golden::{GoldenManifest, ScreenshotIdentity};

/// Which classified entries to promote into the baseline
///
/// `All` approves every approvable entry (changed/added/removed); `Only`
/// approves the named identities. Identities in the selection whose entries
/// are unchanged or skipped are ignored silently; a selector superset is
/// not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApprovalSelector {
    /// Approve every changed, added, and removed entry
    All,
    /// Approve only the named identities
    Only(BTreeSet<ScreenshotIdentity>),
}

impl ApprovalSelector {
    /// Build a selector from an explicit identity list
    #[inline]
    #[must_use]
    pub fn only<I>(identities: I) -> Self
    where
        I: IntoIterator<Item = ScreenshotIdentity>,
    {
        Self::Only(identities.into_iter().collect())
    }

    /// Check whether an identity is in the selection
    #[inline]
    #[must_use]
    pub fn selects(&self, identity: &ScreenshotIdentity) -> bool {
        match self {
            Self::All => true,
            Self::Only(identities) => identities.contains(identity),
        }
    }
}

/// Produce the post-approval golden manifest
///
/// For every selected entry: changed and added entries replace (or insert)
/// their baseline with the captured reference, removed entries drop out of
/// the manifest. Entries that are unchanged or skipped are never touched
/// regardless of selection, and unselected entries keep their prior
/// baseline exactly: partial approval causes no golden drift.
///
/// Approval is idempotent: approving the same selection against the
/// resulting manifest changes nothing further.
#[must_use]
pub fn approve(
    classification: &Classification,
    prior: &GoldenManifest,
    selector: &ApprovalSelector,
) -> GoldenManifest {
    let mut updates = Vec::new();
    let mut removals = Vec::new();

    for entry in classification.iter() {
        if !selector.selects(&entry.identity) {
            continue;
        }
        match entry.category {
            Category::Changed | Category::Added => {
                // `after` is always present for these categories
                if let Some(after) = &entry.after {
                    updates.push((entry.identity.clone(), after.clone()));
                }
            }
            Category::Removed => removals.push(&entry.identity),
            Category::Unchanged | Category::Skipped => {}
        }
    }

    tracing::info!(
        updated = updates.len(),
        removed = removals.len(),
        "approval applied"
    );
    prior.with_updated(updates).with_removed(removals)
}
