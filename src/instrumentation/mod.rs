// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Wall-clock and peak-memory measurement for a bracketed block of work.
//!
//! Peak memory is traced by [`TrackingAllocator`], which the crate installs
//! as the global allocator. A [`RunProbe`] records the live heap size when it
//! starts and reports the highest live size seen while it is alive, so
//! sequential and nested probes are independent of each other.

mod alloc;
mod probe;

pub use alloc::TrackingAllocator;
pub use probe::{measure_run, RunMetrics, RunProbe};
