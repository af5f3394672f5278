// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::Context;
use clap::Parser;
use jdl_bench::config::{load_and_validate_config, validate_config, DistributedConfig, ExperimentConfig};
use jdl_bench::experiment::{print_triples, save_triples, Experiment, RunOutcome};
use std::path::{Path, PathBuf};

/// Run the centralized and distributed topologies over the same synthetic
/// traffic workload and compare them.
#[derive(Parser, Debug)]
#[command(name = "jdl-bench", version)]
#[command(about = "Run centralized and distributed modes and show outputs")]
struct Cli {
    /// YAML experiment config; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of raw triples to generate
    #[arg(long)]
    num: Option<usize>,

    /// Seed for the synthetic generator
    #[arg(long)]
    seed: Option<u64>,

    /// Stage-2 situation refinement threshold
    #[arg(long, allow_negative_numbers = true)]
    threshold: Option<i64>,

    /// Bus capacity for the centralized topology
    #[arg(long)]
    central_bus: Option<usize>,

    /// Bus capacity for the distributed topology: -1 means unlimited, any other value must be positive
    #[arg(long, allow_negative_numbers = true)]
    distrib_bus: Option<i64>,

    /// Delay paid by the centralized consumer per stored triple
    #[arg(long)]
    central_q2_delay_ms: Option<u64>,

    /// Extra memory (MB) held by the centralized consumer
    #[arg(long)]
    central_q2_mem_mb: Option<usize>,

    /// Centralized consumer poll interval in ms
    #[arg(long)]
    central_master_poll_ms: Option<u64>,

    /// Distributed producer batch size for bus puts
    #[arg(long)]
    worker_batch: Option<usize>,

    /// Distributed consumer batch size per drain
    #[arg(long)]
    master_batch: Option<usize>,

    /// Distributed consumer poll interval in ms
    #[arg(long)]
    master_poll_ms: Option<u64>,

    /// Print resulting triples to the console
    #[arg(long = "print")]
    print: bool,

    /// Max triples to print per topology (<= 0 for all)
    #[arg(long, default_value_t = 50, allow_negative_numbers = true)]
    print_limit: i64,

    /// Path to save centralized output triples
    #[arg(long)]
    save_central: Option<PathBuf>,

    /// Path to save distributed output triples
    #[arg(long)]
    save_distrib: Option<PathBuf>,
}

impl Cli {
    fn resolve_config(&self) -> anyhow::Result<ExperimentConfig> {
        let mut cfg = match &self.config {
            Some(path) => load_and_validate_config(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => ExperimentConfig::default(),
        };

        if let Some(num) = self.num {
            cfg.num_triples = num;
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        if let Some(threshold) = self.threshold {
            cfg.threshold = threshold;
        }
        if let Some(capacity) = self.central_bus {
            cfg.centralized.capacity = capacity;
        }
        if let Some(delay) = self.central_q2_delay_ms {
            cfg.centralized.per_item_delay_ms = delay;
        }
        if let Some(mb) = self.central_q2_mem_mb {
            cfg.centralized.extra_memory_mb = mb;
        }
        if let Some(poll) = self.central_master_poll_ms {
            cfg.centralized.poll_interval_ms = poll;
        }
        if let Some(flag) = self.distrib_bus {
            cfg.distributed.capacity = DistributedConfig::capacity_from_flag(flag)?;
        }
        if let Some(batch) = self.worker_batch {
            cfg.distributed.worker_batch_size = batch;
        }
        if let Some(batch) = self.master_batch {
            cfg.distributed.master_batch_size = batch;
        }
        if let Some(poll) = self.master_poll_ms {
            cfg.distributed.poll_interval_ms = poll;
        }

        validate_config(&cfg)?;
        Ok(cfg)
    }
}

fn show_outcome(cli: &Cli, outcome: &RunOutcome, save_to: Option<&Path>) -> anyhow::Result<()> {
    println!("✅ {}", outcome);
    if cli.print {
        print_triples(
            &format!("{} output", outcome.kind.title()),
            outcome.situations(),
            cli.print_limit,
        );
    }
    if let Some(path) = save_to {
        save_triples(path, outcome.situations())?;
        println!("💾 Saved {} output to {}", outcome.kind, path.display());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cfg = cli.resolve_config()?;
    let distributed_bus = cfg
        .distributed
        .capacity
        .map_or_else(|| "unlimited".to_string(), |capacity| capacity.to_string());

    let experiment = Experiment::from_config(&cfg)?;

    println!("🚦 JDL topology benchmark");
    println!("═══════════════════════════");
    println!(
        "Raw triples: {} (threshold={}, seed={})",
        cfg.num_triples,
        cfg.threshold,
        experiment
            .seed()
            .map_or_else(|| "random".to_string(), |seed| seed.to_string())
    );
    println!(
        "Centralized: bus={}, delay={}ms, mem={}MB, poll={}ms",
        cfg.centralized.capacity,
        cfg.centralized.per_item_delay_ms,
        cfg.centralized.extra_memory_mb,
        cfg.centralized.poll_interval_ms
    );
    println!(
        "Distributed: bus={}, worker-batch={}, master-batch={}, poll={}ms",
        distributed_bus,
        cfg.distributed.worker_batch_size,
        cfg.distributed.master_batch_size,
        cfg.distributed.poll_interval_ms
    );
    println!();

    let report = match experiment.run().await {
        Ok(report) => report,
        Err(err) => {
            if let Some(topology) = err.failed_topology() {
                eprintln!("❌ {} run failed", topology.title());
            }
            return Err(err.into());
        }
    };

    show_outcome(&cli, &report.centralized, cli.save_central.as_deref())?;
    show_outcome(&cli, &report.distributed, cli.save_distrib.as_deref())?;

    println!();
    println!("{}", report);
    Ok(())
}
