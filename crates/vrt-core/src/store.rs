//! Persistence boundary and approval commit
//!
//! The golden manifest lives in version control and approved images live in
//! object storage; both sit behind async boundary traits here. The commit
//! sequence is an explicit two-phase protocol: compute the new manifest
//! (pure), upload every approved image, then save the manifest. Until the
//! save succeeds nothing observable changes, so a failed batch is retried
//! whole.

use crate::approve::{approve, ApprovalSelector};
use crate::classify::{Category, Classification};
use crate::error::{PersistenceError, StoreError};
use async_trait::async_trait;
use futures::future::try_join_all;
use vrt_capture::{CaptureOutcome, CaptureSet};
use vrt_golden::{GoldenManifest, ScreenshotIdentity};

/// Boundary trait for the versioned manifest store
///
/// Backed by a version-control client in production. `save` is called only
/// with a complete post-approval manifest, never a partial update.
#[async_trait]
pub trait ManifestStore: Send + Sync {
    /// Load the prior baseline manifest
    async fn load(&self) -> Result<GoldenManifest, StoreError>;

    /// Persist a new baseline manifest
    async fn save(&self, manifest: &GoldenManifest) -> Result<(), StoreError>;
}

/// Boundary trait for the approved-image object store
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Upload the approved image for one identity
    async fn upload(&self, identity: &ScreenshotIdentity, bytes: &[u8]) -> Result<(), StoreError>;
}

/// Commit an approval batch: compute, upload, persist
///
/// Phases, in order:
/// 1. compute the post-approval manifest from the classification (pure)
/// 2. upload the image bytes of every approved changed/added entry; all
///    uploads must succeed
/// 3. save the new manifest
///
/// # Errors
/// Returns [`PersistenceError`] if any upload or the save fails. The new
/// manifest is not committed in that case and the caller must retry the
/// whole batch (uploads are content-addressed on the store side, so
/// re-uploading already-transferred images is harmless).
pub async fn commit_approval(
    prior: &GoldenManifest,
    classification: &Classification,
    selector: &ApprovalSelector,
    captures: &CaptureSet,
    manifest_store: &dyn ManifestStore,
    asset_store: &dyn AssetStore,
) -> Result<GoldenManifest, PersistenceError> {
    let new_manifest = approve(classification, prior, selector);

    let assets = approved_assets(classification, selector, captures)?;
    tracing::info!(uploads = assets.len(), "committing approval batch");

    let uploads = assets.iter().map(|&(identity, bytes)| async move {
        asset_store
            .upload(identity, bytes)
            .await
            .map_err(|source| PersistenceError::UploadFailed {
                identity: identity.clone(),
                source,
            })
    });
    try_join_all(uploads).await?;

    manifest_store
        .save(&new_manifest)
        .await
        .map_err(PersistenceError::SaveFailed)?;

    tracing::info!(entries = new_manifest.len(), "baseline manifest saved");
    Ok(new_manifest)
}

// Image bytes for every approved changed/added entry. Removed entries need
// no upload; their images simply stop being referenced.
fn approved_assets<'a>(
    classification: &'a Classification,
    selector: &ApprovalSelector,
    captures: &'a CaptureSet,
) -> Result<Vec<(&'a ScreenshotIdentity, &'a [u8])>, PersistenceError> {
    let mut assets = Vec::new();
    for entry in classification.iter() {
        if !selector.selects(&entry.identity) {
            continue;
        }
        if !matches!(entry.category, Category::Changed | Category::Added) {
            continue;
        }
        match captures.get(&entry.identity) {
            Some(CaptureOutcome::Captured { bytes, .. }) => {
                assets.push((&entry.identity, bytes.as_slice()));
            }
            _ => return Err(PersistenceError::AssetMissing(entry.identity.clone())),
        }
    }
    Ok(assets)
}
