// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for topology run lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Topology run start, completion and failure
//! * Producer and consumer thread progress
//! * Simulated consumer resource pressure

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Topology run started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use jdl_bench::observability::messages::engine::TopologyStarted;
///
/// let msg = TopologyStarted {
///     topology: "centralized",
///     capacity: 100,
///     threshold: 100,
///     observer: "vehicle-count",
///     refiner: "traffic-jam",
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct TopologyStarted<'a> {
    pub topology: &'a str,
    pub capacity: usize,
    pub threshold: i64,
    pub observer: &'a str,
    pub refiner: &'a str,
}

impl Display for TopologyStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting {} topology: bus capacity={}, threshold={}, observer={}, refiner={}",
            self.topology, self.capacity, self.threshold, self.observer, self.refiner
        )
    }
}

impl StructuredLog for TopologyStarted<'_> {
    fn log(&self) {
        tracing::info!(
            topology = self.topology,
            capacity = self.capacity,
            threshold = self.threshold,
            observer = self.observer,
            refiner = self.refiner,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "topology",
            span_name = name,
            topology = self.topology,
            capacity = self.capacity,
            threshold = self.threshold,
            observer = self.observer,
            refiner = self.refiner,
        )
    }
}

/// Topology run completed successfully.
///
/// # Log Level
/// `info!` - Important operational event
pub struct TopologyCompleted<'a> {
    pub topology: &'a str,
    pub accumulated: usize,
    pub situations: usize,
    pub transfer_time: Duration,
}

impl Display for TopologyCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} topology completed: {} observations accumulated, {} situation triples, transfer={:?}",
            self.topology, self.accumulated, self.situations, self.transfer_time
        )
    }
}

impl StructuredLog for TopologyCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            topology = self.topology,
            accumulated = self.accumulated,
            situations = self.situations,
            transfer_ms = self.transfer_time.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "topology_completed",
            span_name = name,
            topology = self.topology,
            accumulated = self.accumulated,
            situations = self.situations,
            transfer_time = ?self.transfer_time,
        )
    }
}

/// Topology run failed with error.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use jdl_bench::observability::messages::engine::TopologyFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "test error");
/// let msg = TopologyFailed {
///     topology: "distributed",
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct TopologyFailed<'a> {
    pub topology: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for TopologyFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} topology failed: {}", self.topology, self.error)
    }
}

impl StructuredLog for TopologyFailed<'_> {
    fn log(&self) {
        tracing::error!(
            topology = self.topology,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "topology_failed",
            span_name = name,
            topology = self.topology,
            error = %self.error,
        )
    }
}

/// Producer finished emitting stage-1 output and closed the bus.
///
/// # Log Level
/// `debug!` - Per-run progress
pub struct ProducerFinished<'a> {
    pub topology: &'a str,
    pub emitted: usize,
}

impl Display for ProducerFinished<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} producer finished: {} observation triples emitted",
            self.topology, self.emitted
        )
    }
}

impl StructuredLog for ProducerFinished<'_> {
    fn log(&self) {
        tracing::debug!(
            topology = self.topology,
            emitted = self.emitted,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "producer_finished",
            span_name = name,
            topology = self.topology,
            emitted = self.emitted,
        )
    }
}

/// Consumer observed the bus closed and empty.
///
/// # Log Level
/// `debug!` - Per-run progress
pub struct ConsumerDrained<'a> {
    pub topology: &'a str,
    pub accumulated: usize,
    pub batches: usize,
}

impl Display for ConsumerDrained<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} consumer drained bus: {} observations in {} batches",
            self.topology, self.accumulated, self.batches
        )
    }
}

impl StructuredLog for ConsumerDrained<'_> {
    fn log(&self) {
        tracing::debug!(
            topology = self.topology,
            accumulated = self.accumulated,
            batches = self.batches,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "consumer_drained",
            span_name = name,
            topology = self.topology,
            accumulated = self.accumulated,
            batches = self.batches,
        )
    }
}

/// The simulated memory ballast could not be allocated. Non-fatal.
///
/// # Log Level
/// `debug!` - Best-effort knob
pub struct BallastUnavailable {
    pub requested_bytes: usize,
}

impl Display for BallastUnavailable {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Consumer memory ballast of {} bytes unavailable, continuing without it",
            self.requested_bytes
        )
    }
}

impl StructuredLog for BallastUnavailable {
    fn log(&self) {
        tracing::debug!(requested_bytes = self.requested_bytes, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "ballast_unavailable",
            span_name = name,
            requested_bytes = self.requested_bytes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::traffic::{TrafficJamRefiner, VehicleCountObserver};
    use crate::traits::{ObservationAggregator, SituationRefiner};

    #[test]
    fn test_topology_started_names_its_collaborators() {
        let msg = TopologyStarted {
            topology: "distributed",
            capacity: 1_000,
            threshold: 100,
            observer: VehicleCountObserver.name(),
            refiner: TrafficJamRefiner.name(),
        };

        assert_eq!(
            msg.to_string(),
            "Starting distributed topology: bus capacity=1000, threshold=100, \
             observer=vehicle-count, refiner=traffic-jam"
        );
    }
}
