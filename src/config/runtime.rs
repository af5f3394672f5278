// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::backends::traffic::{SyntheticTrafficGenerator, TrafficJamRefiner, VehicleCountObserver};
use crate::config::{validate_config, ExperimentConfig};
use crate::engine::{TopologyFactory, TopologyKind};
use crate::errors::ConfigError;
use crate::observability::messages::experiment::SeedDrawn;
use crate::observability::messages::StructuredLog;
use crate::traits::{ObservationAggregator, SituationRefiner, Topology};
use std::sync::Arc;

/// Everything one comparison needs: the input generator and both topologies,
/// sharing the same traffic collaborators.
pub struct Runtime {
    pub generator: SyntheticTrafficGenerator,
    pub centralized: Box<dyn Topology>,
    pub distributed: Box<dyn Topology>,
}

/// Comparison runtime builder - orchestrates generator and topology creation from configuration.
///
/// # Examples
///
/// ```
/// use jdl_bench::config::{ExperimentConfig, RuntimeBuilder};
/// use jdl_bench::engine::TopologyKind;
///
/// let runtime = RuntimeBuilder::from_config(&ExperimentConfig::default()).unwrap();
///
/// assert_eq!(runtime.centralized.kind(), TopologyKind::Centralized);
/// assert_eq!(runtime.centralized.capacity(), 100);
/// assert_eq!(runtime.distributed.kind(), TopologyKind::Distributed);
/// assert!(runtime.generator.seed().is_some());
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Validate `cfg` and build the traffic runtime it describes.
    pub fn from_config(cfg: &ExperimentConfig) -> Result<Runtime, ConfigError> {
        validate_config(cfg)?;

        // Both topologies must see the same input, so an unseeded run still
        // gets exactly one seed.
        let seed = cfg.seed.unwrap_or_else(|| {
            let seed = rand::random::<u64>();
            SeedDrawn { seed }.log();
            seed
        });
        let generator = SyntheticTrafficGenerator::new(cfg.num_triples).with_seed(seed);

        let observer: Arc<dyn ObservationAggregator> = Arc::new(VehicleCountObserver);
        let refiner: Arc<dyn SituationRefiner> = Arc::new(TrafficJamRefiner);
        let centralized = TopologyFactory::from_config(
            cfg,
            TopologyKind::Centralized,
            Arc::clone(&observer),
            Arc::clone(&refiner),
        );
        let distributed =
            TopologyFactory::from_config(cfg, TopologyKind::Distributed, observer, refiner);

        Ok(Runtime {
            generator,
            centralized,
            distributed,
        })
    }
}
