//! VRT Core: diff classification and baseline approval
//!
//! The engine of a visual regression run: given the prior golden manifest
//! and a fully-resolved capture snapshot, assign every screenshot identity
//! to exactly one outcome category, then selectively promote captures into a
//! new baseline.
//!
//! # Core Concepts
//!
//! - [`classify`]: pure decision table producing a [`Classification`]
//! - [`Category`]: skipped / unchanged / removed / added / changed
//! - [`approve`] + [`ApprovalSelector`]: promote selected entries into a new
//!   [`GoldenManifest`](vrt_golden::GoldenManifest) without drifting the rest
//! - [`RunMetadata`]: counts and timing, derived once from the finished
//!   classification
//! - [`ManifestStore`] / [`AssetStore`] / [`commit_approval`]: two-phase
//!   persistence of an approval batch (upload images, then save manifest)
//!
//! # Example
//!
//! ```rust,ignore
//! let classification = classify(&prior, &captures, &targets, &comparer)?;
//! let metadata = RunMetadata::from_classification(&classification, started, finished);
//! let new_manifest = commit_approval(
//!     &prior, &classification, &ApprovalSelector::All,
//!     &captures, &manifest_store, &asset_store,
//! ).await?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod approve;
mod classify;
mod compare;
mod error;
mod metadata;
mod store;

pub use approve::{approve, ApprovalSelector};
pub use classify::{classify, Category, Classification, ClassificationEntry};
pub use compare::{DiffSummary, ImageComparer, NullComparer};
pub use error::{ClassifyError, PersistenceError, StoreError, VrtError};
pub use metadata::{CategoryCounts, RunMetadata};
pub use store::{commit_approval, AssetStore, ManifestStore};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
