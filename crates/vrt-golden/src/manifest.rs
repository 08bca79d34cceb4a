//! Golden baseline manifest
//!
//! Provides [`GoldenManifest`], the versioned mapping from screenshot
//! identity to its approved baseline image, and [`GoldenEntry`], one
//! baseline reference. The manifest is an immutable value: every mutation
//! operation returns a new manifest and leaves the receiver untouched, so an
//! approval that fails to persist can never corrupt the prior baseline.

use crate::hash::ImageHash;
use crate::identity::ScreenshotIdentity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One approved baseline image reference
///
/// Pairs the content hash of the approved screenshot with the public URL it
/// was uploaded to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldenEntry {
    /// Content hash of the approved image bytes
    pub hash: ImageHash,
    /// Public URL of the approved image
    pub url: String,
}

impl GoldenEntry {
    /// Create a new entry
    #[inline]
    #[must_use]
    pub fn new(hash: ImageHash, url: impl Into<String>) -> Self {
        Self {
            hash,
            url: url.into(),
        }
    }
}

/// The golden baseline: identity → approved image reference
///
/// Keys are unique; iteration and serialization order is the identity's
/// lexical order so persisted manifests are byte-for-byte reproducible.
///
/// # Invariants
/// - At most one entry per identity (duplicate sources are rejected)
/// - `with_updated` / `with_removed` never mutate the receiver
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoldenManifest {
    entries: BTreeMap<ScreenshotIdentity, GoldenEntry>,
}

impl GoldenManifest {
    /// Create an empty manifest
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a manifest from (identity, entry) pairs
    ///
    /// # Errors
    /// Returns [`ManifestError::DuplicateIdentity`] if the source yields the
    /// same identity twice. A baseline with two entries for one screenshot
    /// is malformed and must not be silently deduplicated.
    pub fn from_entries<I>(entries: I) -> Result<Self, ManifestError>
    where
        I: IntoIterator<Item = (ScreenshotIdentity, GoldenEntry)>,
    {
        let mut map = BTreeMap::new();
        for (identity, entry) in entries {
            if map.insert(identity.clone(), entry).is_some() {
                return Err(ManifestError::DuplicateIdentity(identity));
            }
        }
        Ok(Self { entries: map })
    }

    /// Look up the baseline entry for an identity
    #[inline]
    #[must_use]
    pub fn lookup(&self, identity: &ScreenshotIdentity) -> Option<&GoldenEntry> {
        self.entries.get(identity)
    }

    /// Check whether an identity has a baseline
    #[inline]
    #[must_use]
    pub fn contains(&self, identity: &ScreenshotIdentity) -> bool {
        self.entries.contains_key(identity)
    }

    /// Number of baseline entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the manifest has no entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in identity order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&ScreenshotIdentity, &GoldenEntry)> {
        self.entries.iter()
    }

    /// Iterate identities in lexical order
    #[inline]
    pub fn identities(&self) -> impl Iterator<Item = &ScreenshotIdentity> {
        self.entries.keys()
    }

    /// Return a new manifest with the given entries replaced or inserted
    ///
    /// Identities not mentioned keep their prior entry. The receiver is not
    /// modified. Later duplicates in the update set win (the update set is a
    /// map-like sequence, not a persisted source, so duplicates are the
    /// caller's last word rather than corruption).
    #[must_use]
    pub fn with_updated<I>(&self, updates: I) -> Self
    where
        I: IntoIterator<Item = (ScreenshotIdentity, GoldenEntry)>,
    {
        let mut entries = self.entries.clone();
        for (identity, entry) in updates {
            entries.insert(identity, entry);
        }
        Self { entries }
    }

    /// Return a new manifest with the given identities absent
    ///
    /// Removing an identity that has no entry is a no-op. The receiver is
    /// not modified.
    #[must_use]
    pub fn with_removed<'a, I>(&self, identities: I) -> Self
    where
        I: IntoIterator<Item = &'a ScreenshotIdentity>,
    {
        let mut entries = self.entries.clone();
        for identity in identities {
            entries.remove(identity);
        }
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a GoldenManifest {
    type Item = (&'a ScreenshotIdentity, &'a GoldenEntry);
    type IntoIter = std::collections::btree_map::Iter<'a, ScreenshotIdentity, GoldenEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Errors related to manifest construction
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// Source contained the same identity twice
    #[error("duplicate identity in manifest: {0}")]
    DuplicateIdentity(ScreenshotIdentity),

    /// Manifest could not be decoded
    #[error("malformed manifest: {0}")]
    Malformed(#[from] serde_json::Error),
}
