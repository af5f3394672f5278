// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::TopologyKind;
use crate::errors::{ConfigError, ExecutionError};
use thiserror::Error;

/// A comparison run was aborted. Metrics are never reported for a failed run.
#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("comparison aborted: {0}")]
    Topology(#[from] ExecutionError),

    /// The blocking task hosting a topology run could not be joined.
    #[error("comparison aborted: {topology} run task failed: {message}")]
    Join {
        topology: TopologyKind,
        message: String,
    },

    #[error("failed to write triples to '{path}': {source}")]
    Output {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ExperimentError {
    /// The topology whose run aborted the comparison, if any.
    pub fn failed_topology(&self) -> Option<TopologyKind> {
        match self {
            ExperimentError::Topology(err) => Some(err.topology()),
            ExperimentError::Join { topology, .. } => Some(*topology),
            _ => None,
        }
    }
}
