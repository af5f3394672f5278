// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! [`StructuredLog`] to emit the same event with structured fields at the
//! level documented on the type.
//!
//! # Organization
//!
//! * `bus` - Stream bus lifecycle events
//! * `engine` - Topology run lifecycle events
//! * `experiment` - Comparison harness events

use tracing::Span;

pub mod bus;
pub mod engine;
pub mod experiment;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog {
    /// Emit the event at the message's level.
    fn log(&self);

    /// Open a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
