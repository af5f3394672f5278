// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized topology: small bus, item-at-a-time hand-off, slow consumer.
//!
//! The producer runs stage 1 and `put`s every observation individually into a
//! bus only a few slots wide, so it spends most of the run blocked on
//! backpressure. The consumer drains whatever is queued (falling back to a
//! single polled `get`), pays the configured [`ConsumerPressure`] cost for each
//! triple, and folds triples into its store one at a time. Stage 2 runs once,
//! on the consumer thread, after the bus is closed and empty.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use jdl_bench::backends::stub::{CollectingRefiner, PassthroughObserver};
//! use jdl_bench::engine::{CentralizedOptions, CentralizedTopology};
//! use jdl_bench::model::Triple;
//! use jdl_bench::traits::Topology;
//!
//! let topology = CentralizedTopology::new(
//!     CentralizedOptions { capacity: 2, ..CentralizedOptions::default() },
//!     Arc::new(PassthroughObserver),
//!     Arc::new(CollectingRefiner),
//! );
//!
//! let input: Vec<Triple> = (0..5).map(|n| Triple::new("s", "p", n.to_string())).collect();
//! let report = topology.run(Box::new(input.into_iter())).unwrap();
//!
//! assert_eq!(report.transfer.accumulated, 5);
//! assert_eq!(report.situations.len(), 5);
//! ```

use crate::bus::BoundedBus;
use crate::engine::pressure::HeavyConsumerProfile;
use crate::engine::store::ObservationStore;
use crate::engine::threads::run_pair;
use crate::engine::{TopologyKind, TopologyReport, TransferStats};
use crate::errors::{ExecutionError, Role};
use crate::model::{Triple, TripleStream};
use crate::observability::messages::bus::PutRejected;
use crate::observability::messages::engine::{
    ConsumerDrained, ProducerFinished, TopologyCompleted, TopologyFailed, TopologyStarted,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{ConsumerPressure, ObservationAggregator, SituationRefiner, Topology};
use std::sync::Arc;
use std::time::Duration;

const KIND: TopologyKind = TopologyKind::Centralized;

#[derive(Debug, Clone, PartialEq)]
pub struct CentralizedOptions {
    /// Bus slot count. Must be positive.
    pub capacity: usize,
    /// Cutoff passed to stage 2.
    pub threshold: i64,
    pub profile: HeavyConsumerProfile,
}

impl Default for CentralizedOptions {
    fn default() -> Self {
        Self {
            capacity: 100,
            threshold: 100,
            profile: HeavyConsumerProfile::default(),
        }
    }
}

pub struct CentralizedTopology {
    options: CentralizedOptions,
    observer: Arc<dyn ObservationAggregator>,
    refiner: Arc<dyn SituationRefiner>,
    pressure: Arc<dyn ConsumerPressure>,
}

impl CentralizedTopology {
    /// Build a topology whose consumer pays the cost described by
    /// `options.profile`.
    pub fn new(
        options: CentralizedOptions,
        observer: Arc<dyn ObservationAggregator>,
        refiner: Arc<dyn SituationRefiner>,
    ) -> Self {
        let pressure: Arc<dyn ConsumerPressure> = Arc::new(options.profile.clone());
        Self {
            options,
            observer,
            refiner,
            pressure,
        }
    }

    /// Replace the consumer pressure. The profile's poll interval still applies.
    pub fn with_pressure(mut self, pressure: Arc<dyn ConsumerPressure>) -> Self {
        self.pressure = pressure;
        self
    }

    fn execute(&self, input: TripleStream) -> Result<TopologyReport, ExecutionError> {
        let bus = Arc::new(
            BoundedBus::new(self.options.capacity)
                .map_err(|source| ExecutionError::Setup { topology: KIND, source })?,
        );

        let producer = {
            let bus = Arc::clone(&bus);
            let observer = Arc::clone(&self.observer);
            move || produce(&bus, observer.as_ref(), input)
        };
        let consumer = {
            let bus = Arc::clone(&bus);
            let refiner = Arc::clone(&self.refiner);
            let pressure = Arc::clone(&self.pressure);
            let poll_interval = self.options.profile.poll_interval;
            let threshold = self.options.threshold;
            move || {
                consume(
                    &bus,
                    refiner.as_ref(),
                    pressure.as_ref(),
                    poll_interval,
                    threshold,
                )
            }
        };

        let (emitted, (situations, transfer)) = run_pair(KIND, &bus, producer, consumer)?;
        Ok(TopologyReport {
            kind: KIND,
            situations,
            emitted,
            transfer,
        })
    }
}

impl Topology for CentralizedTopology {
    fn run(&self, input: TripleStream) -> Result<TopologyReport, ExecutionError> {
        let started = TopologyStarted {
            topology: KIND.as_str(),
            capacity: self.options.capacity,
            threshold: self.options.threshold,
            observer: self.observer.name(),
            refiner: self.refiner.name(),
        };
        let span = started.span("topology_run");
        let _entered = span.enter();
        started.log();

        match self.execute(input) {
            Ok(report) => {
                TopologyCompleted {
                    topology: KIND.as_str(),
                    accumulated: report.transfer.accumulated,
                    situations: report.situations.len(),
                    transfer_time: report.transfer.transfer_time,
                }
                .log();
                Ok(report)
            }
            Err(err) => {
                TopologyFailed {
                    topology: KIND.as_str(),
                    error: &err,
                }
                .log();
                Err(err)
            }
        }
    }

    fn kind(&self) -> TopologyKind {
        KIND
    }

    fn capacity(&self) -> usize {
        self.options.capacity
    }

    fn threshold(&self) -> i64 {
        self.options.threshold
    }
}

/// Producer: stage 1, then one blocking `put` per observation.
fn produce(
    bus: &BoundedBus,
    observer: &dyn ObservationAggregator,
    input: TripleStream,
) -> Result<usize, ExecutionError> {
    let _close = bus.close_on_drop();

    let observations = observer
        .observe(input)
        .map_err(|source| ExecutionError::Stage1 { topology: KIND, source })?;

    let mut emitted = 0usize;
    for triple in observations {
        if let Err(source) = bus.put(triple) {
            PutRejected {
                topology: KIND.as_str(),
                enqueued: emitted,
            }
            .log();
            return Err(ExecutionError::Bus {
                topology: KIND,
                role: Role::Producer,
                source,
            });
        }
        emitted += 1;
    }

    ProducerFinished {
        topology: KIND.as_str(),
        emitted,
    }
    .log();
    Ok(emitted)
}

/// Consumer: drain or poll until the bus is closed and empty, paying the
/// pressure cost per triple, then run stage 2 once.
fn consume(
    bus: &BoundedBus,
    refiner: &dyn SituationRefiner,
    pressure: &dyn ConsumerPressure,
    poll_interval: Duration,
    threshold: i64,
) -> Result<(Vec<Triple>, TransferStats), ExecutionError> {
    let _close = bus.close_on_drop();
    let _ballast = pressure.ballast();

    let mut store = ObservationStore::new();
    let mut batch_sizes = Vec::new();
    loop {
        let mut batch = bus.drain_all();
        if batch.is_empty() {
            match bus.get(Some(poll_interval)) {
                Some(triple) => batch.push(triple),
                None if bus.is_drained() => break,
                None => continue,
            }
        }

        batch_sizes.push(batch.len());
        for triple in batch {
            pressure.throttle();
            store.append(triple);
        }
    }

    ConsumerDrained {
        topology: KIND.as_str(),
        accumulated: store.len(),
        batches: batch_sizes.len(),
    }
    .log();

    let situations = refiner
        .refine(store.triples(), threshold)
        .map_err(|source| ExecutionError::Stage2 { topology: KIND, source })?;

    Ok((
        situations,
        TransferStats {
            transfer_time: store.transfer_time(),
            accumulated: store.len(),
            batch_sizes,
        },
    ))
}
