// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::model::Triple;
use std::time::{Duration, Instant};

/// Append-only accumulation of observation triples.
///
/// A store is created and owned by one consumer thread; every write takes
/// `&mut self`, so a second writer cannot exist. Each append is timed and
/// the total is reported as the run's transfer time.
#[derive(Debug, Default)]
pub struct ObservationStore {
    triples: Vec<Triple>,
    transfer_time: Duration,
}

impl ObservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, triple: Triple) {
        let started = Instant::now();
        self.triples.push(triple);
        self.transfer_time += started.elapsed();
    }

    pub fn extend(&mut self, batch: Vec<Triple>) {
        let started = Instant::now();
        self.triples.extend(batch);
        self.transfer_time += started.elapsed();
    }

    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn transfer_time(&self) -> Duration {
        self.transfer_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_extend_preserve_order() {
        let mut store = ObservationStore::new();
        assert!(store.is_empty());

        store.append(Triple::new("s", "p", "0"));
        store.extend(vec![Triple::new("s", "p", "1"), Triple::new("s", "p", "2")]);

        let objects: Vec<&str> = store.triples().iter().map(|t| t.object()).collect();
        assert_eq!(objects, vec!["0", "1", "2"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_empty_extend_keeps_store_empty() {
        let mut store = ObservationStore::new();
        store.extend(Vec::new());
        assert!(store.is_empty());
        assert!(store.transfer_time() < Duration::from_secs(1));
    }
}
