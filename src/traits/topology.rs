// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::{TopologyKind, TopologyReport};
use crate::errors::ExecutionError;
use crate::model::TripleStream;

pub trait Topology: Send + Sync {
    /// Run the two-stage pipeline over `input` on one producer and one
    /// consumer thread, joining both before returning.
    ///
    /// Returns a `Result` containing either:
    /// - Ok(TopologyReport): stage-2 output plus transfer statistics
    /// - Err(ExecutionError): which stage or thread failed
    fn run(&self, input: TripleStream) -> Result<TopologyReport, ExecutionError>;

    fn kind(&self) -> TopologyKind;

    /// Bus slot count this topology runs with.
    fn capacity(&self) -> usize;

    /// Cutoff handed to stage 2.
    fn threshold(&self) -> i64;
}
