// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Distributed topology: large bus, batched enqueue and dequeue, no slowdown.
//!
//! "Distributed" names a second single-process threading layout tuned for
//! throughput, not multi-machine execution. The producer groups stage-1
//! output into `worker_batch_size` chunks and hands each chunk to
//! [`BoundedBus::put_many`]. The consumer blocks for one triple, then keeps
//! calling [`BoundedBus::drain_all`] until it holds `master_batch_size`
//! triples or the bus runs dry, and appends the whole batch in one call.
//! Batch boundaries on the two sides are independent; only overall FIFO
//! order is preserved.

use crate::bus::BoundedBus;
use crate::engine::store::ObservationStore;
use crate::engine::threads::run_pair;
use crate::engine::{TopologyKind, TopologyReport, TransferStats};
use crate::errors::{BusError, ExecutionError, Role};
use crate::model::{Triple, TripleStream};
use crate::observability::messages::bus::PutRejected;
use crate::observability::messages::engine::{
    ConsumerDrained, ProducerFinished, TopologyCompleted, TopologyFailed, TopologyStarted,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{ObservationAggregator, SituationRefiner, Topology};
use std::sync::Arc;
use std::time::Duration;

const KIND: TopologyKind = TopologyKind::Distributed;

/// Upper bound on batch storage reserved up front.
const BATCH_PREALLOCATE_LIMIT: usize = 16_384;

#[derive(Debug, Clone, PartialEq)]
pub struct DistributedOptions {
    /// Bus slot count; `None` selects the unlimited sentinel.
    pub capacity: Option<usize>,
    /// Cutoff passed to stage 2.
    pub threshold: i64,
    /// Producer-side batch size. Values below 1 are treated as 1.
    pub worker_batch_size: usize,
    /// Consumer-side target batch size. Values below 1 are treated as 1.
    pub master_batch_size: usize,
    pub poll_interval: Duration,
}

impl Default for DistributedOptions {
    fn default() -> Self {
        Self {
            capacity: None,
            threshold: 100,
            worker_batch_size: 1000,
            master_batch_size: 5000,
            poll_interval: Duration::from_millis(1),
        }
    }
}

pub struct DistributedTopology {
    options: DistributedOptions,
    observer: Arc<dyn ObservationAggregator>,
    refiner: Arc<dyn SituationRefiner>,
}

impl DistributedTopology {
    pub fn new(
        mut options: DistributedOptions,
        observer: Arc<dyn ObservationAggregator>,
        refiner: Arc<dyn SituationRefiner>,
    ) -> Self {
        options.worker_batch_size = options.worker_batch_size.max(1);
        options.master_batch_size = options.master_batch_size.max(1);
        Self {
            options,
            observer,
            refiner,
        }
    }

    fn build_bus(&self) -> Result<BoundedBus, BusError> {
        match self.options.capacity {
            Some(capacity) => BoundedBus::new(capacity),
            None => Ok(BoundedBus::unlimited()),
        }
    }

    fn execute(&self, input: TripleStream) -> Result<TopologyReport, ExecutionError> {
        let bus = Arc::new(
            self.build_bus()
                .map_err(|source| ExecutionError::Setup { topology: KIND, source })?,
        );

        let producer = {
            let bus = Arc::clone(&bus);
            let observer = Arc::clone(&self.observer);
            let worker_batch_size = self.options.worker_batch_size;
            move || produce(&bus, observer.as_ref(), input, worker_batch_size)
        };
        let consumer = {
            let bus = Arc::clone(&bus);
            let refiner = Arc::clone(&self.refiner);
            let master_batch_size = self.options.master_batch_size;
            let poll_interval = self.options.poll_interval;
            let threshold = self.options.threshold;
            move || {
                consume(
                    &bus,
                    refiner.as_ref(),
                    master_batch_size,
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

impl Topology for DistributedTopology {
    fn run(&self, input: TripleStream) -> Result<TopologyReport, ExecutionError> {
        let started = TopologyStarted {
            topology: KIND.as_str(),
            capacity: self.capacity(),
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
        self.options
            .capacity
            .unwrap_or(crate::bus::UNLIMITED_CAPACITY)
    }

    fn threshold(&self) -> i64 {
        self.options.threshold
    }
}

fn flush(bus: &BoundedBus, batch: Vec<Triple>, emitted: &mut usize) -> Result<(), ExecutionError> {
    let size = batch.len();
    bus.put_many(batch).map_err(|source| {
        PutRejected {
            topology: KIND.as_str(),
            enqueued: *emitted,
        }
        .log();
        ExecutionError::Bus {
            topology: KIND,
            role: Role::Producer,
            source,
        }
    })?;
    *emitted += size;
    Ok(())
}

/// Producer: stage 1, then `put_many` per full local batch plus the remainder.
fn produce(
    bus: &BoundedBus,
    observer: &dyn ObservationAggregator,
    input: TripleStream,
    worker_batch_size: usize,
) -> Result<usize, ExecutionError> {
    let _close = bus.close_on_drop();

    let observations = observer
        .observe(input)
        .map_err(|source| ExecutionError::Stage1 { topology: KIND, source })?;

    let reserve = worker_batch_size.min(BATCH_PREALLOCATE_LIMIT);
    let mut emitted = 0usize;
    let mut batch = Vec::with_capacity(reserve);
    for triple in observations {
        batch.push(triple);
        if batch.len() >= worker_batch_size {
            let full = std::mem::replace(&mut batch, Vec::with_capacity(reserve));
            flush(bus, full, &mut emitted)?;
        }
    }
    if !batch.is_empty() {
        flush(bus, batch, &mut emitted)?;
    }

    ProducerFinished {
        topology: KIND.as_str(),
        emitted,
    }
    .log();
    Ok(emitted)
}

/// Consumer: wait for one triple, top the batch up with repeated drains,
/// append it in one call; stage 2 once the bus is closed and empty.
fn consume(
    bus: &BoundedBus,
    refiner: &dyn SituationRefiner,
    master_batch_size: usize,
    poll_interval: Duration,
    threshold: i64,
) -> Result<(Vec<Triple>, TransferStats), ExecutionError> {
    let _close = bus.close_on_drop();

    let mut store = ObservationStore::new();
    let mut batch_sizes = Vec::new();
    loop {
        let first = match bus.get(Some(poll_interval)) {
            Some(triple) => triple,
            None if bus.is_drained() => break,
            None => continue,
        };

        let mut batch = vec![first];
        while batch.len() < master_batch_size {
            let more = bus.drain_all();
            if more.is_empty() {
                break;
            }
            batch.extend(more);
        }

        batch_sizes.push(batch.len());
        store.extend(batch);
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
