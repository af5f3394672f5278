// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors produced by a single topology run.

use crate::engine::TopologyKind;
use crate::errors::{AggregationError, BusError};
use std::fmt;
use thiserror::Error;

/// Which side of a topology run a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Producer,
    Consumer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Producer => write!(f, "producer"),
            Role::Consumer => write!(f, "consumer"),
        }
    }
}

/// A topology run failed. Every variant names the topology so the harness
/// can report which run aborted the comparison.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// The bus could not be constructed from the configured capacity.
    #[error("{topology} topology: {source}")]
    Setup {
        topology: TopologyKind,
        #[source]
        source: BusError,
    },

    #[error("{topology} topology: stage-1 observation failed: {source}")]
    Stage1 {
        topology: TopologyKind,
        #[source]
        source: AggregationError,
    },

    #[error("{topology} topology: stage-2 situation refinement failed: {source}")]
    Stage2 {
        topology: TopologyKind,
        #[source]
        source: AggregationError,
    },

    #[error("{topology} topology: {role} bus operation failed: {source}")]
    Bus {
        topology: TopologyKind,
        role: Role,
        #[source]
        source: BusError,
    },

    #[error("{topology} topology: failed to spawn {role} thread: {source}")]
    ThreadSpawn {
        topology: TopologyKind,
        role: Role,
        #[source]
        source: std::io::Error,
    },

    #[error("{topology} topology: {role} thread panicked")]
    ThreadPanicked { topology: TopologyKind, role: Role },
}

impl ExecutionError {
    pub fn topology(&self) -> TopologyKind {
        match self {
            ExecutionError::Setup { topology, .. }
            | ExecutionError::Stage1 { topology, .. }
            | ExecutionError::Stage2 { topology, .. }
            | ExecutionError::Bus { topology, .. }
            | ExecutionError::ThreadSpawn { topology, .. }
            | ExecutionError::ThreadPanicked { topology, .. } => *topology,
        }
    }

    /// True for failures that are a consequence of the peer closing the bus
    /// rather than a root cause.
    pub fn is_closed_bus(&self) -> bool {
        matches!(
            self,
            ExecutionError::Bus {
                source: BusError::Closed,
                ..
            }
        )
    }
}
