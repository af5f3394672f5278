// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::backends::traffic::SyntheticTrafficGenerator;
use crate::config::{ExperimentConfig, Runtime, RuntimeBuilder};
use crate::engine::TopologyKind;
use crate::errors::ExperimentError;
use crate::experiment::{ComparisonReport, RunOutcome};
use crate::instrumentation::measure_run;
use crate::observability::messages::experiment::{
    ComparisonCompleted, ExperimentStarted, RunMeasured,
};
use crate::observability::messages::StructuredLog;
use crate::traits::Topology;
use std::sync::Arc;
use tracing::Instrument;

/// Centralized-vs-distributed comparison over one synthetic workload.
///
/// Topology runs block on OS threads, so each one is moved onto tokio's
/// blocking pool and bracketed by a memory/time probe there.
pub struct Experiment {
    generator: SyntheticTrafficGenerator,
    centralized: Arc<dyn Topology>,
    distributed: Arc<dyn Topology>,
}

impl Experiment {
    pub fn new(runtime: Runtime) -> Self {
        Self {
            generator: runtime.generator,
            centralized: Arc::from(runtime.centralized),
            distributed: Arc::from(runtime.distributed),
        }
    }

    pub fn from_config(cfg: &ExperimentConfig) -> Result<Self, ExperimentError> {
        Ok(Self::new(RuntimeBuilder::from_config(cfg)?))
    }

    /// Seed the synthetic input is generated from, shared by both runs.
    pub fn seed(&self) -> Option<u64> {
        self.generator.seed()
    }

    fn topology(&self, kind: TopologyKind) -> Arc<dyn Topology> {
        match kind {
            TopologyKind::Centralized => Arc::clone(&self.centralized),
            TopologyKind::Distributed => Arc::clone(&self.distributed),
        }
    }

    /// Run centralized, then distributed. The first failure aborts the
    /// comparison and no metrics are reported.
    pub async fn run(&self) -> Result<ComparisonReport, ExperimentError> {
        let started = ExperimentStarted {
            num_triples: self.generator.num_triples(),
            threshold: self.centralized.threshold(),
            seed: self.generator.seed(),
        };
        started.log();

        let report = async {
            let centralized = self.run_topology(TopologyKind::Centralized).await?;
            let distributed = self.run_topology(TopologyKind::Distributed).await?;
            Ok::<_, ExperimentError>(ComparisonReport::new(centralized, distributed))
        }
        .instrument(started.span("comparison"))
        .await?;

        ComparisonCompleted {
            faster: report.faster().as_str(),
            lower_memory: report.lower_memory().as_str(),
            improvement_percent: report.improvement_percent(),
        }
        .log();
        Ok(report)
    }

    /// One measured run of `kind` over a fresh input stream.
    pub async fn run_topology(&self, kind: TopologyKind) -> Result<RunOutcome, ExperimentError> {
        let topology = self.topology(kind);
        let capacity = topology.capacity();
        let input = self.generator.stream();

        let (result, metrics) =
            tokio::task::spawn_blocking(move || measure_run(|| topology.run(input)))
                .await
                .map_err(|err| ExperimentError::Join {
                    topology: kind,
                    message: err.to_string(),
                })?;
        let report = result?;

        RunMeasured {
            topology: kind.as_str(),
            duration: metrics.duration,
            peak_memory_bytes: metrics.peak_memory_bytes,
        }
        .log();

        Ok(RunOutcome {
            kind,
            capacity,
            metrics,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::{CollectingRefiner, FailingRefiner, PassthroughObserver};
    use crate::backends::traffic::TRAFFIC_NS;
    use crate::engine::{
        CentralizedOptions, CentralizedTopology, DistributedOptions, DistributedTopology,
        HeavyConsumerProfile,
    };
    use std::time::Duration;

    fn quick_config(num_triples: usize) -> ExperimentConfig {
        let mut cfg = ExperimentConfig::default();
        cfg.num_triples = num_triples;
        cfg.seed = Some(3);
        cfg.centralized.capacity = 8;
        cfg.centralized.per_item_delay_ms = 0;
        cfg.centralized.extra_memory_mb = 0;
        cfg.distributed.worker_batch_size = 100;
        cfg.distributed.master_batch_size = 400;
        cfg
    }

    #[tokio::test]
    async fn test_topologies_agree_on_situations() {
        let mut cfg = quick_config(12_000);
        cfg.threshold = 10;
        let experiment = Experiment::from_config(&cfg).unwrap();

        let report = experiment.run().await.unwrap();

        assert_eq!(report.centralized.kind, TopologyKind::Centralized);
        assert_eq!(report.distributed.kind, TopologyKind::Distributed);
        assert_eq!(report.distributed.capacity_label(), "unlimited");
        // 1000 sightings over 4 locations: every location is above 10.
        assert_eq!(report.centralized.situations().len(), 12);
        assert_eq!(report.centralized.situations(), report.distributed.situations());
        assert!(report
            .centralized
            .situations()
            .iter()
            .all(|t| t.subject().starts_with(&format!("{TRAFFIC_NS}situation/traffic_jam_"))));
    }

    #[test]
    fn test_unseeded_config_gives_both_runs_the_same_input() {
        let mut cfg = quick_config(600);
        cfg.seed = None;
        let experiment = Experiment::from_config(&cfg).unwrap();
        assert!(experiment.seed().is_some());

        let sightings = || -> Vec<(String, String)> {
            experiment
                .generator
                .stream()
                .filter(|t| t.predicate().ends_with("atLocation"))
                .map(|t| (t.subject().to_string(), t.object().to_string()))
                .collect()
        };
        let centralized_input = sightings();
        let distributed_input = sightings();
        assert_eq!(centralized_input.len(), 50);
        assert_eq!(centralized_input, distributed_input);
    }

    #[tokio::test]
    async fn test_slow_consumer_makes_centralized_slower() {
        let mut cfg = quick_config(240);
        cfg.centralized.per_item_delay_ms = 20;
        let experiment = Experiment::from_config(&cfg).unwrap();

        let report = experiment.run().await.unwrap();

        assert_eq!(report.faster(), TopologyKind::Distributed);
        assert!(report.time_difference() > 0.0);
        assert!(report.improvement_percent() > 0.0);
    }

    #[tokio::test]
    async fn test_failed_run_aborts_comparison() {
        let runtime = Runtime {
            generator: SyntheticTrafficGenerator::new(120).with_seed(1),
            centralized: Box::new(CentralizedTopology::new(
                CentralizedOptions {
                    capacity: 4,
                    threshold: 0,
                    profile: HeavyConsumerProfile::default(),
                },
                Arc::new(PassthroughObserver),
                Arc::new(FailingRefiner),
            )),
            distributed: Box::new(DistributedTopology::new(
                DistributedOptions::default(),
                Arc::new(PassthroughObserver),
                Arc::new(CollectingRefiner),
            )),
        };
        let experiment = Experiment::new(runtime);

        let err = experiment.run().await.unwrap_err();
        assert_eq!(err.failed_topology(), Some(TopologyKind::Centralized));
    }

    #[tokio::test]
    async fn test_run_topology_measures_ballast() {
        let runtime = Runtime {
            generator: SyntheticTrafficGenerator::new(24).with_seed(1),
            centralized: Box::new(CentralizedTopology::new(
                CentralizedOptions {
                    capacity: 4,
                    threshold: 0,
                    profile: HeavyConsumerProfile {
                        extra_memory_bytes: 8 * 1024 * 1024,
                        per_item_delay: Duration::ZERO,
                        poll_interval: Duration::from_millis(1),
                    },
                },
                Arc::new(PassthroughObserver),
                Arc::new(CollectingRefiner),
            )),
            distributed: Box::new(DistributedTopology::new(
                DistributedOptions::default(),
                Arc::new(PassthroughObserver),
                Arc::new(CollectingRefiner),
            )),
        };
        let experiment = Experiment::new(runtime);

        let outcome = experiment.run_topology(TopologyKind::Centralized).await.unwrap();
        assert_eq!(outcome.report.emitted, 24);
        assert_eq!(outcome.situations().len(), 24);
        assert!(outcome.metrics.peak_memory_bytes >= 4 * 1024 * 1024);
    }
}
