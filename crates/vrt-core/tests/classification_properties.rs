//! Property tests for classification and approval.

use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use vrt_capture::{CaptureFailure, CaptureOutcome, CaptureSet};
use vrt_core::{approve, classify, ApprovalSelector, Category, Classification, NullComparer};
use vrt_golden::{GoldenEntry, GoldenManifest, ImageHash, ScreenshotIdentity};

/// What one generated identity does in the run.
#[derive(Debug, Clone, Copy)]
enum Fate {
    CapturedSameHash,
    CapturedNewHash,
    FailedCapture,
    NotAttempted,
    MissingFromCaptureSet,
}

#[derive(Debug, Clone)]
struct GeneratedRun {
    prior: GoldenManifest,
    captures: CaptureSet,
    targets: BTreeSet<ScreenshotIdentity>,
}

fn identity(index: usize) -> ScreenshotIdentity {
    ScreenshotIdentity::new(format!("page{index:02}"), "chrome").unwrap()
}

fn arb_fate() -> impl Strategy<Value = Fate> {
    prop_oneof![
        Just(Fate::CapturedSameHash),
        Just(Fate::CapturedNewHash),
        Just(Fate::FailedCapture),
        Just(Fate::NotAttempted),
        Just(Fate::MissingFromCaptureSet),
    ]
}

/// Generate a run: per identity, membership in prior/target plus a capture
/// fate. Outcomes are only recorded for identities something requested, so
/// inputs are always well-formed.
fn arb_run() -> impl Strategy<Value = GeneratedRun> {
    proptest::collection::btree_map(0usize..16, ((any::<bool>(), any::<bool>()), arb_fate()), 0..16)
        .prop_map(|plan| {
            let mut prior_entries = Vec::new();
            let mut outcomes: BTreeMap<ScreenshotIdentity, CaptureOutcome> = BTreeMap::new();
            let mut targets = BTreeSet::new();

            for (index, ((in_prior, in_target), fate)) in plan {
                if !in_prior && !in_target {
                    continue;
                }
                let id = identity(index);
                let prior_bytes = format!("prior-{index}").into_bytes();
                if in_prior {
                    prior_entries.push((
                        id.clone(),
                        GoldenEntry::new(ImageHash::compute(&prior_bytes), format!("u{index}")),
                    ));
                }
                if in_target {
                    targets.insert(id.clone());
                }
                let outcome = match fate {
                    Fate::CapturedSameHash => {
                        Some(CaptureOutcome::captured(prior_bytes, format!("u{index}-new")))
                    }
                    Fate::CapturedNewHash => Some(CaptureOutcome::captured(
                        format!("new-{index}").into_bytes(),
                        format!("u{index}-new"),
                    )),
                    Fate::FailedCapture => Some(CaptureOutcome::Failed(CaptureFailure::Timeout {
                        seconds: 30,
                    })),
                    Fate::NotAttempted => Some(CaptureOutcome::NotAttempted),
                    Fate::MissingFromCaptureSet => None,
                };
                if let Some(outcome) = outcome {
                    outcomes.insert(id, outcome);
                }
            }

            GeneratedRun {
                prior: GoldenManifest::from_entries(prior_entries).unwrap(),
                captures: outcomes.into_iter().collect(),
                targets,
            }
        })
}

fn run_classify(run: &GeneratedRun) -> Classification {
    classify(&run.prior, &run.captures, &run.targets, &NullComparer).unwrap()
}

proptest! {
    /// Every identity in targets ∪ prior appears in exactly one entry.
    #[test]
    fn totality_and_exclusivity(run in arb_run()) {
        let classification = run_classify(&run);

        let universe: BTreeSet<_> = run
            .targets
            .iter()
            .chain(run.prior.identities())
            .cloned()
            .collect();

        prop_assert_eq!(classification.len(), universe.len());
        let classified: BTreeSet<_> = classification
            .iter()
            .map(|entry| entry.identity.clone())
            .collect();
        prop_assert_eq!(classified, universe);
    }

    /// The same inputs classify identically, including when the capture set
    /// is rebuilt from reversed insertion order.
    #[test]
    fn classification_is_deterministic(run in arb_run()) {
        let first = run_classify(&run);
        let second = run_classify(&run);
        prop_assert_eq!(&first, &second);

        let mut pairs: Vec<_> = run
            .captures
            .iter()
            .map(|(id, outcome)| (id.clone(), outcome.clone()))
            .collect();
        pairs.reverse();
        let shuffled_run = GeneratedRun { captures: pairs.into_iter().collect(), ..run };
        prop_assert_eq!(first, run_classify(&shuffled_run));
    }

    /// Entries come out sorted by identity.
    #[test]
    fn entries_are_sorted(run in arb_run()) {
        let classification = run_classify(&run);
        let ids: Vec<_> = classification.iter().map(|e| e.identity.clone()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        prop_assert_eq!(ids, sorted);
    }

    /// Diff summaries appear exactly on changed entries.
    #[test]
    fn diff_present_iff_changed(run in arb_run()) {
        let classification = run_classify(&run);
        for entry in classification.iter() {
            prop_assert_eq!(entry.diff.is_some(), entry.category == Category::Changed);
        }
    }

    /// Approving the same selection twice is a no-op the second time.
    #[test]
    fn approval_is_idempotent(run in arb_run(), select_all in any::<bool>(), mask in any::<u16>()) {
        let classification = run_classify(&run);
        let selector = if select_all {
            ApprovalSelector::All
        } else {
            ApprovalSelector::only(
                classification
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1u16 << (i % 16)) != 0)
                    .map(|(_, entry)| entry.identity.clone()),
            )
        };

        let once = approve(&classification, &run.prior, &selector);
        let twice = approve(&classification, &once, &selector);
        prop_assert_eq!(once, twice);
    }

    /// Approving in two disjoint steps lands on the same manifest as one
    /// step, and unapproved entries never drift.
    #[test]
    fn partial_approval_does_not_drift(run in arb_run(), mask in any::<u16>()) {
        let classification = run_classify(&run);
        let approvable: Vec<_> = classification
            .iter()
            .filter(|entry| entry.category.is_approvable())
            .map(|entry| entry.identity.clone())
            .collect();

        let (first_half, second_half): (Vec<_>, Vec<_>) = approvable
            .iter()
            .cloned()
            .enumerate()
            .partition(|(i, _)| mask & (1u16 << (i % 16)) != 0);

        let one_step = approve(
            &classification,
            &run.prior,
            &ApprovalSelector::only(approvable.clone()),
        );

        let step_one = approve(
            &classification,
            &run.prior,
            &ApprovalSelector::only(first_half.into_iter().map(|(_, id)| id)),
        );
        let step_two = approve(
            &classification,
            &step_one,
            &ApprovalSelector::only(second_half.into_iter().map(|(_, id)| id)),
        );

        prop_assert_eq!(one_step, step_two);
    }

    /// With nothing approved, the manifest is untouched.
    #[test]
    fn empty_approval_preserves_manifest(run in arb_run()) {
        let classification = run_classify(&run);
        let approved = approve(
            &classification,
            &run.prior,
            &ApprovalSelector::only(std::iter::empty()),
        );
        prop_assert_eq!(approved, run.prior);
    }
}
