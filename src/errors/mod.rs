// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod aggregation;
mod bus;
mod config;
mod execution;
mod experiment;

pub use aggregation::AggregationError;
pub use bus::BusError;
pub use config::ConfigError;
pub use execution::{ExecutionError, Role};
pub use experiment::ExperimentError;
