// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Spawning, joining and error settlement shared by both topologies.

use crate::bus::BoundedBus;
use crate::engine::TopologyKind;
use crate::errors::{ExecutionError, Role};
use std::thread::{self, JoinHandle};

type RoleHandle<T> = JoinHandle<Result<T, ExecutionError>>;

fn spawn_role<T, F>(topology: TopologyKind, role: Role, work: F) -> Result<RoleHandle<T>, ExecutionError>
where
    F: FnOnce() -> Result<T, ExecutionError> + Send + 'static,
    T: Send + 'static,
{
    thread::Builder::new()
        .name(format!("{}-{}", topology, role))
        .spawn(work)
        .map_err(|source| ExecutionError::ThreadSpawn {
            topology,
            role,
            source,
        })
}

fn join_role<T>(topology: TopologyKind, role: Role, handle: RoleHandle<T>) -> Result<T, ExecutionError> {
    handle
        .join()
        .map_err(|_| ExecutionError::ThreadPanicked { topology, role })?
}

/// Pick the error to report when one or both sides failed.
///
/// A closed-bus error is only ever a symptom of the peer shutting down, so
/// the peer's error wins over it.
fn settle<P, C>(
    producer: Result<P, ExecutionError>,
    consumer: Result<C, ExecutionError>,
) -> Result<(P, C), ExecutionError> {
    match (producer, consumer) {
        (Ok(produced), Ok(consumed)) => Ok((produced, consumed)),
        (Err(err), Ok(_)) | (Ok(_), Err(err)) => Err(err),
        (Err(producer_err), Err(consumer_err)) => {
            if producer_err.is_closed_bus() {
                Err(consumer_err)
            } else {
                Err(producer_err)
            }
        }
    }
}

/// Run `producer` and `consumer` on their own threads and block until both
/// have finished.
///
/// Both closures are expected to close `bus` on every exit path. If the
/// consumer cannot be spawned the bus is closed here so the producer can
/// exit, and the producer is joined before returning.
pub(crate) fn run_pair<P, C, PF, CF>(
    topology: TopologyKind,
    bus: &BoundedBus,
    producer: PF,
    consumer: CF,
) -> Result<(P, C), ExecutionError>
where
    PF: FnOnce() -> Result<P, ExecutionError> + Send + 'static,
    CF: FnOnce() -> Result<C, ExecutionError> + Send + 'static,
    P: Send + 'static,
    C: Send + 'static,
{
    let producer = spawn_role(topology, Role::Producer, producer)?;
    let consumer = match spawn_role(topology, Role::Consumer, consumer) {
        Ok(handle) => handle,
        Err(err) => {
            bus.close();
            let _ = producer.join();
            return Err(err);
        }
    };

    let produced = join_role(topology, Role::Producer, producer);
    let consumed = join_role(topology, Role::Consumer, consumer);
    settle(produced, consumed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{AggregationError, BusError};

    fn closed_bus(role: Role) -> ExecutionError {
        ExecutionError::Bus {
            topology: TopologyKind::Centralized,
            role,
            source: BusError::Closed,
        }
    }

    #[test]
    fn test_settle_prefers_root_cause_over_closed_bus() {
        let consumer_err = ExecutionError::ThreadPanicked {
            topology: TopologyKind::Centralized,
            role: Role::Consumer,
        };
        let result: Result<((), ()), _> = settle(Err(closed_bus(Role::Producer)), Err(consumer_err));
        assert!(matches!(
            result,
            Err(ExecutionError::ThreadPanicked {
                role: Role::Consumer,
                ..
            })
        ));
    }

    #[test]
    fn test_settle_keeps_producer_collaborator_error() {
        let producer_err = ExecutionError::Stage1 {
            topology: TopologyKind::Distributed,
            source: AggregationError::Failed {
                stage: "stage-1",
                message: "boom".to_string(),
            },
        };
        let result: Result<((), ()), _> = settle(Err(producer_err), Err(closed_bus(Role::Consumer)));
        assert!(matches!(result, Err(ExecutionError::Stage1 { .. })));
    }

    #[test]
    fn test_run_pair_joins_both_threads() {
        let bus = BoundedBus::new(1).unwrap();
        let (produced, consumed) = run_pair(
            TopologyKind::Distributed,
            &bus,
            || Ok::<_, ExecutionError>(thread::current().name().map(String::from)),
            || Ok::<_, ExecutionError>(thread::current().name().map(String::from)),
        )
        .unwrap();
        assert_eq!(produced.as_deref(), Some("distributed-producer"));
        assert_eq!(consumed.as_deref(), Some("distributed-consumer"));
    }

    #[test]
    fn test_run_pair_reports_panicking_consumer() {
        let bus = BoundedBus::new(1).unwrap();
        let result = run_pair(
            TopologyKind::Centralized,
            &bus,
            || Ok::<_, ExecutionError>(()),
            || -> Result<(), ExecutionError> { panic!("consumer failure") },
        );
        assert!(matches!(
            result,
            Err(ExecutionError::ThreadPanicked {
                role: Role::Consumer,
                ..
            })
        ));
    }
}
