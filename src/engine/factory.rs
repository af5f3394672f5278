// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::ExperimentConfig;
use crate::engine::centralized::CentralizedTopology;
use crate::engine::distributed::DistributedTopology;
use crate::engine::TopologyKind;
use crate::traits::{ObservationAggregator, SituationRefiner, Topology};
use std::sync::Arc;

/// Factory for creating topologies from configuration
pub struct TopologyFactory;

impl TopologyFactory {
    /// Create the requested topology, wired to the given stage collaborators
    pub fn from_config(
        cfg: &ExperimentConfig,
        kind: TopologyKind,
        observer: Arc<dyn ObservationAggregator>,
        refiner: Arc<dyn SituationRefiner>,
    ) -> Box<dyn Topology> {
        match kind {
            TopologyKind::Centralized => Box::new(CentralizedTopology::new(
                cfg.centralized_options(),
                observer,
                refiner,
            )),
            TopologyKind::Distributed => Box::new(DistributedTopology::new(
                cfg.distributed_options(),
                observer,
                refiner,
            )),
        }
    }
}
