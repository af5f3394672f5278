// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::model::Triple;
use std::fmt;
use std::time::Duration;

/// The two producer/consumer scheduling configurations under comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopologyKind {
    Centralized,
    Distributed,
}

impl TopologyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopologyKind::Centralized => "centralized",
            TopologyKind::Distributed => "distributed",
        }
    }

    /// Capitalised name used in human-facing reports.
    pub fn title(&self) -> &'static str {
        match self {
            TopologyKind::Centralized => "Centralized",
            TopologyKind::Distributed => "Distributed",
        }
    }
}

impl fmt::Display for TopologyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the consumer thread observed while folding triples into its store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferStats {
    /// Cumulative time spent appending to the accumulation store.
    pub transfer_time: Duration,
    /// Triples in the store when stage 2 ran.
    pub accumulated: usize,
    /// Size of each batch the consumer took off the bus, in order.
    pub batch_sizes: Vec<usize>,
}

/// Result of one successful topology run.
#[derive(Debug, Clone)]
pub struct TopologyReport {
    pub kind: TopologyKind,
    /// Stage-2 output.
    pub situations: Vec<Triple>,
    /// Stage-1 triples the producer enqueued.
    pub emitted: usize,
    pub transfer: TransferStats,
}
