//! VRT Golden Baseline Model
//!
//! Typed, versioned representation of the golden baseline for visual
//! regression runs.
//!
//! # Core Concepts
//!
//! - [`ScreenshotIdentity`]: (page path, user-agent alias) key for one
//!   expected screenshot
//! - [`ImageHash`]: 32-byte Blake3 hash of the encoded screenshot
//! - [`GoldenEntry`]: approved baseline reference (hash + public URL)
//! - [`GoldenManifest`]: immutable identity → entry mapping with persistent
//!   update/remove operations
//!
//! # Example
//!
//! ```rust,ignore
//! use vrt_golden::{GoldenEntry, GoldenManifest, ImageHash, ScreenshotIdentity};
//!
//! let identity = ScreenshotIdentity::new("components/button", "chrome-win")?;
//! let entry = GoldenEntry::new(ImageHash::compute(&png_bytes), url);
//! let manifest = GoldenManifest::from_entries([(identity, entry)])?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod hash;
mod identity;
mod manifest;

pub use hash::{HashError, ImageHash};
pub use identity::{IdentityError, ScreenshotIdentity};
pub use manifest::{GoldenEntry, GoldenManifest, ManifestError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_identity() -> impl Strategy<Value = ScreenshotIdentity> {
        ("[a-z]{1,8}(/[a-z]{1,8}){0,2}", "[a-z]{1,6}-[a-z]{1,5}")
            .prop_map(|(page, agent)| ScreenshotIdentity::new(page, agent).unwrap())
    }

    proptest! {
        #[test]
        fn identity_display_parse_round_trip(id in arb_identity()) {
            let parsed: ScreenshotIdentity = id.to_string().parse().unwrap();
            prop_assert_eq!(id, parsed);
        }

        #[test]
        fn updated_then_lookup_returns_update(
            id in arb_identity(),
            bytes in proptest::collection::vec(any::<u8>(), 1..64),
        ) {
            let manifest = GoldenManifest::empty();
            let entry = GoldenEntry::new(ImageHash::compute(&bytes), "https://img/x");
            let updated = manifest.with_updated([(id.clone(), entry.clone())]);
            prop_assert_eq!(updated.lookup(&id), Some(&entry));
        }

        #[test]
        fn update_does_not_disturb_other_entries(
            a in arb_identity(),
            b in arb_identity(),
        ) {
            prop_assume!(a != b);
            let entry_a = GoldenEntry::new(ImageHash::compute(b"a"), "ua");
            let manifest = GoldenManifest::from_entries([(a.clone(), entry_a.clone())]).unwrap();
            let updated = manifest.with_updated([(
                b.clone(),
                GoldenEntry::new(ImageHash::compute(b"b"), "ub"),
            )]);
            prop_assert_eq!(updated.lookup(&a), Some(&entry_a));
        }
    }
}
