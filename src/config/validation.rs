// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration validation.
//!
//! Rejects values that would make a topology fail at bus construction.
//! Values that can be safely raised to a minimum (batch sizes, poll
//! intervals) are clamped when options are built instead of rejected here.

use crate::config::ExperimentConfig;
use crate::errors::ConfigError;

pub fn validate_config(cfg: &ExperimentConfig) -> Result<(), ConfigError> {
    if cfg.centralized.capacity == 0 {
        return Err(ConfigError::Invalid {
            field: "centralized.capacity",
            reason: "bus capacity must be positive".to_string(),
        });
    }
    if cfg.distributed.capacity == Some(0) {
        return Err(ConfigError::Invalid {
            field: "distributed.capacity",
            reason: "bus capacity must be positive; omit it for an unlimited bus".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&ExperimentConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_centralized_capacity() {
        let mut cfg = ExperimentConfig::default();
        cfg.centralized.capacity = 0;
        let err = validate_config(&cfg).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "centralized.capacity", .. }));
    }

    #[test]
    fn test_zero_distributed_capacity() {
        let mut cfg = ExperimentConfig::default();
        cfg.distributed.capacity = Some(0);
        let err = validate_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("distributed.capacity"));
    }

    #[test]
    fn test_zero_batches_are_not_rejected() {
        let mut cfg = ExperimentConfig::default();
        cfg.distributed.worker_batch_size = 0;
        cfg.distributed.master_batch_size = 0;
        assert!(validate_config(&cfg).is_ok());
    }
}
