// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Comparison harness.
//!
//! Runs the centralized topology and then the distributed one over freshly
//! generated input, measuring each run, and reports which was faster and
//! which used less memory.

mod harness;
mod output;
mod report;

pub use harness::Experiment;
pub use output::{format_triples, print_triples, save_triples};
pub use report::{ComparisonReport, RunOutcome};
