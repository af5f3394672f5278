// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for all diagnostic and operational
//! logging in the benchmark. Message types follow a struct-based pattern with `Display`
//! trait implementation to:
//!
//! * Eliminate magic strings scattered throughout the codebase
//! * Keep field names consistent between the human-readable line and structured fields
//! * Provide consistent, structured logging output
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::bus` - Stream bus lifecycle events
//! * `messages::engine` - Topology run lifecycle events
//! * `messages::experiment` - Comparison harness events
//!
//! # Usage
//!
//! ```rust
//! use jdl_bench::observability::messages::engine::ProducerFinished;
//! use jdl_bench::observability::messages::StructuredLog;
//!
//! let msg = ProducerFinished {
//!     topology: "centralized",
//!     emitted: 16,
//! };
//!
//! msg.log();
//! ```

pub mod messages;
