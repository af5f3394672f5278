// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::instrumentation::alloc;
use std::time::{Duration, Instant};

/// Wall-clock duration and peak traced heap growth of one measured run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunMetrics {
    pub duration: Duration,
    /// Highest live heap size above the starting baseline.
    pub peak_memory_bytes: usize,
}

impl RunMetrics {
    pub fn duration_seconds(&self) -> f64 {
        self.duration.as_secs_f64()
    }

    /// Peak memory in megabytes (10^6 bytes).
    pub fn peak_memory_mb(&self) -> f64 {
        self.peak_memory_bytes as f64 / 1e6
    }
}

/// Scoped measurement guard.
///
/// Starting a probe starts the clock and begins peak tracing; dropping it
/// stops tracing on every exit path, including unwinding. Call
/// [`metrics`](Self::metrics) any time before that for a snapshot.
///
/// # Example
/// ```
/// use jdl_bench::instrumentation::RunProbe;
///
/// let probe = RunProbe::start();
/// let buffer = std::hint::black_box(vec![0u8; 1 << 20]);
/// let metrics = probe.metrics();
/// drop(buffer);
///
/// assert!(metrics.peak_memory_bytes >= 1 << 20);
/// ```
pub struct RunProbe {
    started: Instant,
    baseline: usize,
    slot: Option<usize>,
}

impl RunProbe {
    pub fn start() -> Self {
        let slot = alloc::acquire_slot();
        Self {
            started: Instant::now(),
            baseline: alloc::live_bytes(),
            slot,
        }
    }

    /// Whether this probe holds its own peak slot. Without one, peak memory
    /// falls back to the process-wide high-water mark.
    pub fn is_traced(&self) -> bool {
        self.slot.is_some()
    }

    pub fn metrics(&self) -> RunMetrics {
        let peak = match self.slot {
            Some(slot) => alloc::slot_peak(slot),
            None => alloc::global_peak(),
        };
        RunMetrics {
            duration: self.started.elapsed(),
            peak_memory_bytes: peak.saturating_sub(self.baseline),
        }
    }
}

impl Drop for RunProbe {
    fn drop(&mut self) {
        if let Some(slot) = self.slot.take() {
            alloc::release_slot(slot);
        }
    }
}

/// Run `work` inside a [`RunProbe`] and return its value with the metrics.
pub fn measure_run<T, F>(work: F) -> (T, RunMetrics)
where
    F: FnOnce() -> T,
{
    let probe = RunProbe::start();
    let value = work();
    let metrics = probe.metrics();
    (value, metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hint::black_box;
    use std::thread;

    const MIB: usize = 1 << 20;

    #[test]
    fn test_measures_duration_and_peak() {
        let (len, metrics) = measure_run(|| {
            let block = black_box(vec![1u8; 4 * MIB]);
            thread::sleep(Duration::from_millis(10));
            block.len()
        });

        assert_eq!(len, 4 * MIB);
        assert!(metrics.duration >= Duration::from_millis(10));
        assert!(metrics.peak_memory_bytes >= 4 * MIB);
        assert!(metrics.peak_memory_mb() >= 4.0);
    }

    #[test]
    fn test_peak_survives_deallocation() {
        let probe = RunProbe::start();
        drop(black_box(vec![0u8; 2 * MIB]));
        assert!(probe.metrics().peak_memory_bytes >= 2 * MIB);
    }

    #[test]
    fn test_nested_probes_are_independent() {
        let outer = RunProbe::start();
        let first = black_box(vec![1u8; 3 * MIB]);

        let inner = RunProbe::start();
        let second = black_box(vec![1u8; 2 * MIB]);
        let inner_metrics = inner.metrics();
        drop(inner);

        let outer_metrics = outer.metrics();
        drop((first, second));

        assert!(inner_metrics.peak_memory_bytes >= 2 * MIB);
        assert!(outer_metrics.peak_memory_bytes >= 5 * MIB);
        assert!(outer_metrics.duration >= inner_metrics.duration);
    }

    #[test]
    fn test_slots_released_on_every_exit_path() {
        for _ in 0..200 {
            let probe = RunProbe::start();
            assert!(probe.is_traced());
        }
        for _ in 0..100 {
            let outcome = std::panic::catch_unwind(|| {
                let _probe = RunProbe::start();
                panic!("measured work failed");
            });
            assert!(outcome.is_err());
        }
        assert!(RunProbe::start().is_traced());
    }
}
