// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;        // stage collaborators
pub mod bus;             // bounded triple bus
pub mod config;          // config + runtime builder
pub mod engine;          // topologies
pub mod errors;          // error handling
pub mod experiment;      // comparison harness
pub mod instrumentation; // duration + peak memory
pub mod model;
pub mod observability;
pub mod traits;          // unified abstractions

/// Every allocation in a process linking this crate is traced, so run
/// probes see memory used by both topology threads.
#[global_allocator]
static ALLOCATOR: instrumentation::TrackingAllocator = instrumentation::TrackingAllocator;
