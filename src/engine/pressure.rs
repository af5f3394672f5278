// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Simulated heavy-consumer cost for the centralized topology.

use crate::observability::messages::engine::BallastUnavailable;
use crate::observability::messages::StructuredLog;
use crate::traits::ConsumerPressure;
use std::thread;
use std::time::Duration;

/// Heavy-consumer knobs: a memory block held by the consumer, a sleep before
/// each triple, and the poll interval used when the bus is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct HeavyConsumerProfile {
    pub extra_memory_bytes: usize,
    pub per_item_delay: Duration,
    pub poll_interval: Duration,
}

impl Default for HeavyConsumerProfile {
    fn default() -> Self {
        Self {
            extra_memory_bytes: 0,
            per_item_delay: Duration::ZERO,
            poll_interval: Duration::from_millis(1),
        }
    }
}

impl ConsumerPressure for HeavyConsumerProfile {
    fn ballast(&self) -> Ballast {
        Ballast::allocate(self.extra_memory_bytes)
    }

    fn throttle(&self) {
        if !self.per_item_delay.is_zero() {
            thread::sleep(self.per_item_delay);
        }
    }
}

/// Pressure profile that costs nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPressure;

impl ConsumerPressure for NoPressure {
    fn ballast(&self) -> Ballast {
        Ballast::empty()
    }

    fn throttle(&self) {}
}

/// A zero-filled memory block held only to occupy memory.
#[derive(Debug, Default)]
pub struct Ballast {
    block: Vec<u8>,
}

impl Ballast {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Allocate and touch `bytes` bytes. If the allocator refuses, logs and
    /// returns an empty ballast instead of failing.
    pub fn allocate(bytes: usize) -> Self {
        if bytes == 0 {
            return Self::empty();
        }
        let mut block = Vec::new();
        if block.try_reserve_exact(bytes).is_err() {
            BallastUnavailable {
                requested_bytes: bytes,
            }
            .log();
            return Self::empty();
        }
        block.resize(bytes, 0u8);
        Self { block }
    }

    pub fn len(&self) -> usize {
        self.block.len()
    }

    pub fn is_empty(&self) -> bool {
        self.block.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_ballast_allocates_requested_bytes() {
        let ballast = Ballast::allocate(1024 * 1024);
        assert_eq!(ballast.len(), 1024 * 1024);
        assert!(Ballast::allocate(0).is_empty());
    }

    #[test]
    fn test_impossible_ballast_is_ignored() {
        let ballast = Ballast::allocate(usize::MAX);
        assert!(ballast.is_empty());
    }

    #[test]
    fn test_heavy_profile_throttles() {
        let profile = HeavyConsumerProfile {
            per_item_delay: Duration::from_millis(10),
            ..HeavyConsumerProfile::default()
        };
        let start = Instant::now();
        profile.throttle();
        profile.throttle();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_no_pressure_is_free() {
        assert!(NoPressure.ballast().is_empty());
        let start = Instant::now();
        NoPressure.throttle();
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
