// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for stream bus lifecycle events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// The bus transitioned from open to closed.
///
/// # Log Level
/// `debug!` - Emitted once per bus, on the first `close()`
pub struct BusClosed {
    pub capacity: usize,
    pub pending: usize,
}

impl Display for BusClosed {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Bus closed: capacity={}, {} items still pending",
            self.capacity, self.pending
        )
    }
}

impl StructuredLog for BusClosed {
    fn log(&self) {
        tracing::debug!(
            capacity = self.capacity,
            pending = self.pending,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "bus_closed",
            span_name = name,
            capacity = self.capacity,
            pending = self.pending,
        )
    }
}

/// A put was rejected because the bus had been closed by another party.
///
/// # Log Level
/// `warn!` - The producer stops early
pub struct PutRejected<'a> {
    pub topology: &'a str,
    pub enqueued: usize,
}

impl Display for PutRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} producer stopped: bus closed after {} items were enqueued",
            self.topology, self.enqueued
        )
    }
}

impl StructuredLog for PutRejected<'_> {
    fn log(&self) {
        tracing::warn!(
            topology = self.topology,
            enqueued = self.enqueued,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "put_rejected",
            span_name = name,
            topology = self.topology,
            enqueued = self.enqueued,
        )
    }
}
