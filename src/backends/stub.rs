// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::AggregationError;
use crate::model::{Triple, TripleStream};
use crate::traits::{ObservationAggregator, SituationRefiner};

/// Stage 1 that forwards its input unchanged, in order.
pub struct PassthroughObserver;

impl ObservationAggregator for PassthroughObserver {
    fn observe(&self, input: TripleStream) -> Result<Vec<Triple>, AggregationError> {
        Ok(input.collect())
    }

    fn name(&self) -> &'static str {
        "passthrough"
    }
}

/// Stage 2 that returns every accumulated observation, in store order.
pub struct CollectingRefiner;

impl SituationRefiner for CollectingRefiner {
    fn refine(&self, observations: &[Triple], _threshold: i64) -> Result<Vec<Triple>, AggregationError> {
        Ok(observations.to_vec())
    }

    fn name(&self) -> &'static str {
        "collecting"
    }
}

/// Stage 1 that always fails, for testing failure scenarios
pub struct FailingObserver;

impl ObservationAggregator for FailingObserver {
    fn observe(&self, _input: TripleStream) -> Result<Vec<Triple>, AggregationError> {
        Err(AggregationError::Failed {
            stage: "stage-1",
            message: "Simulated observation failure".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Stage 2 that always fails, for testing failure scenarios
pub struct FailingRefiner;

impl SituationRefiner for FailingRefiner {
    fn refine(&self, _observations: &[Triple], _threshold: i64) -> Result<Vec<Triple>, AggregationError> {
        Err(AggregationError::Failed {
            stage: "stage-2",
            message: "Simulated refinement failure".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}
