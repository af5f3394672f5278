// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{
    BYTES_PER_MB, DEFAULT_CENTRAL_CAPACITY, DEFAULT_CENTRAL_DELAY_MS, DEFAULT_CENTRAL_MEMORY_MB,
    DEFAULT_CENTRAL_POLL_MS, DEFAULT_DISTRIBUTED_POLL_MS, DEFAULT_MASTER_BATCH_SIZE,
    DEFAULT_NUM_TRIPLES, DEFAULT_THRESHOLD, DEFAULT_WORKER_BATCH_SIZE, MIN_POLL_INTERVAL_MS,
    UNLIMITED_CAPACITY_FLAG,
};
use crate::config::validate_config;
use crate::engine::{CentralizedOptions, DistributedOptions, HeavyConsumerProfile};
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Complete configuration for one centralized-vs-distributed comparison.
///
/// Every field is optional in YAML; missing fields take the defaults in
/// [`crate::config::consts`].
///
/// # Example
/// ```yaml
/// num_triples: 30000
/// threshold: 100
/// seed: 42
/// centralized:
///   capacity: 100
///   per_item_delay_ms: 1000
///   extra_memory_mb: 500
///   poll_interval_ms: 1
/// distributed:
///   capacity: ~          # unlimited
///   worker_batch_size: 15000
///   master_batch_size: 60000
///   poll_interval_ms: 5
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExperimentConfig {
    #[serde(default = "default_num_triples")]
    pub num_triples: usize,
    #[serde(default = "default_threshold")]
    pub threshold: i64,
    /// Fixed generator seed; `None` draws from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub centralized: CentralizedConfig,
    #[serde(default)]
    pub distributed: DistributedConfig,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            num_triples: DEFAULT_NUM_TRIPLES,
            threshold: DEFAULT_THRESHOLD,
            seed: None,
            centralized: CentralizedConfig::default(),
            distributed: DistributedConfig::default(),
        }
    }
}

impl ExperimentConfig {
    pub fn centralized_options(&self) -> CentralizedOptions {
        CentralizedOptions {
            capacity: self.centralized.capacity,
            threshold: self.threshold,
            profile: HeavyConsumerProfile {
                extra_memory_bytes: self.centralized.extra_memory_mb.saturating_mul(BYTES_PER_MB),
                per_item_delay: Duration::from_millis(self.centralized.per_item_delay_ms),
                poll_interval: poll_interval(self.centralized.poll_interval_ms),
            },
        }
    }

    pub fn distributed_options(&self) -> DistributedOptions {
        DistributedOptions {
            capacity: self.distributed.capacity,
            threshold: self.threshold,
            worker_batch_size: self.distributed.worker_batch_size.max(1),
            master_batch_size: self.distributed.master_batch_size.max(1),
            poll_interval: poll_interval(self.distributed.poll_interval_ms),
        }
    }
}

/// Centralized topology knobs.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CentralizedConfig {
    #[serde(default = "default_central_capacity")]
    pub capacity: usize,
    #[serde(default = "default_central_delay_ms")]
    pub per_item_delay_ms: u64,
    #[serde(default = "default_central_memory_mb")]
    pub extra_memory_mb: usize,
    #[serde(default = "default_central_poll_ms")]
    pub poll_interval_ms: u64,
}

impl Default for CentralizedConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CENTRAL_CAPACITY,
            per_item_delay_ms: DEFAULT_CENTRAL_DELAY_MS,
            extra_memory_mb: DEFAULT_CENTRAL_MEMORY_MB,
            poll_interval_ms: DEFAULT_CENTRAL_POLL_MS,
        }
    }
}

/// Distributed topology knobs. A missing `capacity` means unlimited.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DistributedConfig {
    #[serde(default)]
    pub capacity: Option<usize>,
    #[serde(default = "default_worker_batch_size")]
    pub worker_batch_size: usize,
    #[serde(default = "default_master_batch_size")]
    pub master_batch_size: usize,
    #[serde(default = "default_distributed_poll_ms")]
    pub poll_interval_ms: u64,
}

impl Default for DistributedConfig {
    fn default() -> Self {
        Self {
            capacity: None,
            worker_batch_size: DEFAULT_WORKER_BATCH_SIZE,
            master_batch_size: DEFAULT_MASTER_BATCH_SIZE,
            poll_interval_ms: DEFAULT_DISTRIBUTED_POLL_MS,
        }
    }
}

impl DistributedConfig {
    /// Interpret a command-line capacity: `-1` is unlimited, anything else
    /// must be positive.
    pub fn capacity_from_flag(value: i64) -> Result<Option<usize>, ConfigError> {
        if value == UNLIMITED_CAPACITY_FLAG {
            return Ok(None);
        }
        match usize::try_from(value) {
            Ok(capacity) if capacity > 0 => Ok(Some(capacity)),
            _ => Err(ConfigError::Invalid {
                field: "distributed.capacity",
                reason: format!("expected a positive slot count or -1 for unlimited, got {value}"),
            }),
        }
    }
}

fn poll_interval(millis: u64) -> Duration {
    Duration::from_millis(millis.max(MIN_POLL_INTERVAL_MS))
}

fn default_num_triples() -> usize {
    DEFAULT_NUM_TRIPLES
}

fn default_threshold() -> i64 {
    DEFAULT_THRESHOLD
}

fn default_central_capacity() -> usize {
    DEFAULT_CENTRAL_CAPACITY
}

fn default_central_delay_ms() -> u64 {
    DEFAULT_CENTRAL_DELAY_MS
}

fn default_central_memory_mb() -> usize {
    DEFAULT_CENTRAL_MEMORY_MB
}

fn default_central_poll_ms() -> u64 {
    DEFAULT_CENTRAL_POLL_MS
}

fn default_worker_batch_size() -> usize {
    DEFAULT_WORKER_BATCH_SIZE
}

fn default_master_batch_size() -> usize {
    DEFAULT_MASTER_BATCH_SIZE
}

fn default_distributed_poll_ms() -> u64 {
    DEFAULT_DISTRIBUTED_POLL_MS
}

/// Load a config from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ExperimentConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let cfg: ExperimentConfig = serde_yaml::from_str(&content)?;
    Ok(cfg)
}

/// Load a config from a YAML file and reject values no topology can run with.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<ExperimentConfig, ConfigError> {
    let cfg = load_config(path)?;
    validate_config(&cfg)?;
    Ok(cfg)
}
