//! VRT Capture Model
//!
//! Per-run capture outcomes and the browser automation boundary.
//!
//! # Core Concepts
//!
//! - [`CaptureOutcome`]: fully-resolved result of one capture attempt
//!   (captured / failed / not attempted)
//! - [`CaptureFailure`]: structured per-identity failure reason
//! - [`CaptureSet`]: the complete, immutable identity → outcome snapshot
//!   handed to the classifier
//! - [`CaptureProvider`]: async boundary to the remote-browser collaborator

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod outcome;
mod provider;

pub use outcome::{CaptureFailure, CaptureOutcome, CaptureSet};
pub use provider::{CaptureProvider, NullCaptureProvider};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
