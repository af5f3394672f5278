// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::bus::UNLIMITED_CAPACITY;
use crate::engine::{TopologyKind, TopologyReport};
use crate::instrumentation::RunMetrics;
use crate::model::Triple;
use std::fmt::{self, Display, Formatter};
use std::time::Duration;

/// One measured topology run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub kind: TopologyKind,
    /// Bus slot count the run used.
    pub capacity: usize,
    pub metrics: RunMetrics,
    pub report: TopologyReport,
}

impl RunOutcome {
    /// Bus capacity for display; the unlimited sentinel reads "unlimited".
    pub fn capacity_label(&self) -> String {
        if self.capacity == UNLIMITED_CAPACITY {
            "unlimited".to_string()
        } else {
            self.capacity.to_string()
        }
    }

    pub fn transfer_time(&self) -> Duration {
        self.report.transfer.transfer_time
    }

    pub fn situations(&self) -> &[Triple] {
        &self.report.situations
    }
}

impl Display for RunOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} done: duration={:.3}s, transfer={:.3}s, peak_mem={:.2}MB, triples={}",
            self.kind.title(),
            self.metrics.duration_seconds(),
            self.transfer_time().as_secs_f64(),
            self.metrics.peak_memory_mb(),
            self.report.situations.len()
        )
    }
}

/// Both runs of a comparison plus the derived verdicts.
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    pub centralized: RunOutcome,
    pub distributed: RunOutcome,
}

impl ComparisonReport {
    pub fn new(centralized: RunOutcome, distributed: RunOutcome) -> Self {
        Self {
            centralized,
            distributed,
        }
    }

    /// Ties go to the centralized topology.
    pub fn faster(&self) -> TopologyKind {
        if self.distributed.metrics.duration < self.centralized.metrics.duration {
            TopologyKind::Distributed
        } else {
            TopologyKind::Centralized
        }
    }

    /// Ties go to the centralized topology.
    pub fn lower_memory(&self) -> TopologyKind {
        if self.distributed.metrics.peak_memory_bytes < self.centralized.metrics.peak_memory_bytes {
            TopologyKind::Distributed
        } else {
            TopologyKind::Centralized
        }
    }

    /// Centralized minus distributed duration, in seconds. Negative when the
    /// centralized run was quicker.
    pub fn time_difference(&self) -> f64 {
        self.centralized.metrics.duration_seconds() - self.distributed.metrics.duration_seconds()
    }

    /// Time difference as a percentage of the centralized duration.
    pub fn improvement_percent(&self) -> f64 {
        let baseline = self.centralized.metrics.duration_seconds();
        if baseline > 0.0 {
            self.time_difference() / baseline * 100.0
        } else {
            0.0
        }
    }
}

impl Display for ComparisonReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Comparison ===")?;
        writeln!(f, "Faster: {}", self.faster().title())?;
        writeln!(f, "Lower memory: {}", self.lower_memory().title())?;
        writeln!(
            f,
            "BUS usage: Centralized={}, Distributed={}",
            self.centralized.capacity_label(),
            self.distributed.capacity_label()
        )?;
        write!(
            f,
            "Time difference: {:.3}s ({:.1}% improvement)",
            self.time_difference(),
            self.improvement_percent()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TransferStats;

    fn outcome(kind: TopologyKind, capacity: usize, millis: u64, peak: usize) -> RunOutcome {
        RunOutcome {
            kind,
            capacity,
            metrics: RunMetrics {
                duration: Duration::from_millis(millis),
                peak_memory_bytes: peak,
            },
            report: TopologyReport {
                kind,
                situations: vec![Triple::new("s", "p", "o")],
                emitted: 1,
                transfer: TransferStats::default(),
            },
        }
    }

    #[test]
    fn test_distributed_wins_both() {
        let report = ComparisonReport::new(
            outcome(TopologyKind::Centralized, 100, 4_000, 600_000_000),
            outcome(TopologyKind::Distributed, UNLIMITED_CAPACITY, 1_000, 10_000_000),
        );

        assert_eq!(report.faster(), TopologyKind::Distributed);
        assert_eq!(report.lower_memory(), TopologyKind::Distributed);
        assert!((report.time_difference() - 3.0).abs() < 1e-9);
        assert!((report.improvement_percent() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_ties_go_to_centralized() {
        let report = ComparisonReport::new(
            outcome(TopologyKind::Centralized, 10, 500, 1_000),
            outcome(TopologyKind::Distributed, 10, 500, 1_000),
        );
        assert_eq!(report.faster(), TopologyKind::Centralized);
        assert_eq!(report.lower_memory(), TopologyKind::Centralized);
    }

    #[test]
    fn test_zero_baseline_has_no_improvement() {
        let report = ComparisonReport::new(
            outcome(TopologyKind::Centralized, 10, 0, 0),
            outcome(TopologyKind::Distributed, 10, 0, 0),
        );
        assert_eq!(report.improvement_percent(), 0.0);
    }

    #[test]
    fn test_display_blocks() {
        let report = ComparisonReport::new(
            outcome(TopologyKind::Centralized, 100, 2_000, 2_000_000),
            outcome(TopologyKind::Distributed, UNLIMITED_CAPACITY, 1_000, 1_000_000),
        );
        let text = report.to_string();
        assert!(text.contains("Faster: Distributed"));
        assert!(text.contains("BUS usage: Centralized=100, Distributed=unlimited"));
        assert!(text.contains("Time difference: 1.000s (50.0% improvement)"));

        let line = report.centralized.to_string();
        assert!(line.starts_with("Centralized done: duration=2.000s"));
        assert!(line.contains("peak_mem=2.00MB"));
        assert!(line.ends_with("triples=1"));
    }
}
