// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the comparison harness.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Comparison started.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ExperimentStarted {
    pub num_triples: usize,
    pub threshold: i64,
    pub seed: Option<u64>,
}

impl Display for ExperimentStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting comparison over {} raw triples (threshold={}, seed={:?})",
            self.num_triples, self.threshold, self.seed
        )
    }
}

impl StructuredLog for ExperimentStarted {
    fn log(&self) {
        tracing::info!(
            num_triples = self.num_triples,
            threshold = self.threshold,
            seed = ?self.seed,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "experiment",
            span_name = name,
            num_triples = self.num_triples,
            threshold = self.threshold,
        )
    }
}

/// No seed was configured, so one was drawn for both topologies to share.
///
/// # Log Level
/// `info!` - Needed to reproduce the run
pub struct SeedDrawn {
    pub seed: u64,
}

impl Display for SeedDrawn {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "No seed configured; drew seed {}", self.seed)
    }
}

impl StructuredLog for SeedDrawn {
    fn log(&self) {
        tracing::info!(seed = self.seed, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("seed_drawn", span_name = name, seed = self.seed)
    }
}

/// A single measured topology run.
///
/// # Log Level
/// `info!` - Important operational event
pub struct RunMeasured<'a> {
    pub topology: &'a str,
    pub duration: Duration,
    pub peak_memory_bytes: usize,
}

impl Display for RunMeasured<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} run measured: duration={:?}, peak_memory={} bytes",
            self.topology, self.duration, self.peak_memory_bytes
        )
    }
}

impl StructuredLog for RunMeasured<'_> {
    fn log(&self) {
        tracing::info!(
            topology = self.topology,
            duration_ms = self.duration.as_millis() as u64,
            peak_memory_bytes = self.peak_memory_bytes,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "run_measured",
            span_name = name,
            topology = self.topology,
            duration = ?self.duration,
            peak_memory_bytes = self.peak_memory_bytes,
        )
    }
}

/// Comparison finished.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ComparisonCompleted<'a> {
    pub faster: &'a str,
    pub lower_memory: &'a str,
    pub improvement_percent: f64,
}

impl Display for ComparisonCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Comparison completed: faster={}, lower_memory={}, improvement={:.1}%",
            self.faster, self.lower_memory, self.improvement_percent
        )
    }
}

impl StructuredLog for ComparisonCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            faster = self.faster,
            lower_memory = self.lower_memory,
            improvement_percent = self.improvement_percent,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "comparison",
            span_name = name,
            faster = self.faster,
            lower_memory = self.lower_memory,
        )
    }
}
