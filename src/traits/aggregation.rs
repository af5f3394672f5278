// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Seams for the two aggregation collaborators.
//!
//! Topologies treat both stages as opaque: they only move triples between
//! them and never interpret what the stages compute.

use crate::errors::AggregationError;
use crate::model::{Triple, TripleStream};

/// Stage 1: derive observation triples from raw input triples.
///
/// Called once per topology run, from the producer thread.
pub trait ObservationAggregator: Send + Sync {
    fn observe(&self, input: TripleStream) -> Result<Vec<Triple>, AggregationError>;

    fn name(&self) -> &'static str;
}

/// Stage 2: derive situation triples from every accumulated observation.
///
/// Called exactly once per topology run, from the consumer thread, after the
/// bus has been closed and fully drained.
pub trait SituationRefiner: Send + Sync {
    fn refine(&self, observations: &[Triple], threshold: i64)
        -> Result<Vec<Triple>, AggregationError>;

    fn name(&self) -> &'static str;
}
