// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Capacity-bounded stream bus built on a single mutex/condition-variable pair.
//!
//! The bus is the only state shared between the producer and consumer of a
//! topology run. Every operation takes the one lock, and every state change
//! is broadcast with `notify_all`, so each woken caller re-checks its own
//! predicate (space available, item available, or closed).
//!
//! # Guarantees
//!
//! - **Capacity**: while open, the number of queued triples never exceeds `capacity`
//! - **FIFO**: `get` and `drain_all` return triples in exactly the order they were
//!   enqueued, whichever of `put`, `try_put` or `put_many` enqueued them
//! - **Monotonic close**: once closed the bus stays closed; blocked callers wake
//!   immediately and `put` fails with [`BusError::Closed`]
//!
//! Nothing here assumes a single producer or a single consumer.
//!
//! # Examples
//!
//! ```rust
//! use std::time::Duration;
//! use jdl_bench::bus::BoundedBus;
//! use jdl_bench::model::Triple;
//!
//! let bus = BoundedBus::new(2).unwrap();
//! bus.put(Triple::new("s", "p", "1")).unwrap();
//! assert!(bus.try_put(Triple::new("s", "p", "2")));
//! assert!(!bus.try_put(Triple::new("s", "p", "3"))); // full
//!
//! assert_eq!(bus.get(Some(Duration::from_millis(1))).unwrap().object(), "1");
//! assert_eq!(bus.drain_all().len(), 1);
//!
//! bus.close();
//! assert!(bus.is_drained());
//! assert!(bus.get(None).is_none());
//! ```

use crate::errors::BusError;
use crate::model::Triple;
use crate::observability::messages::bus::BusClosed;
use crate::observability::messages::StructuredLog;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Slot count used when a caller asks for an "unlimited" bus.
pub const UNLIMITED_CAPACITY: usize = 1_000_000_000;

/// Upper bound on the queue storage reserved up front.
const PREALLOCATE_LIMIT: usize = 4096;

struct BusState {
    queue: VecDeque<Triple>,
    closed: bool,
}

/// A bounded, closable FIFO of [`Triple`]s.
pub struct BoundedBus {
    capacity: usize,
    state: Mutex<BusState>,
    changed: Condvar,
}

impl BoundedBus {
    /// Create an open bus holding at most `capacity` triples.
    ///
    /// # Errors
    /// [`BusError::InvalidCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, BusError> {
        if capacity == 0 {
            return Err(BusError::InvalidCapacity { capacity });
        }
        Ok(Self {
            capacity,
            state: Mutex::new(BusState {
                queue: VecDeque::with_capacity(capacity.min(PREALLOCATE_LIMIT)),
                closed: false,
            }),
            changed: Condvar::new(),
        })
    }

    /// Create a bus with the [`UNLIMITED_CAPACITY`] sentinel.
    pub fn unlimited() -> Self {
        Self {
            capacity: UNLIMITED_CAPACITY,
            state: Mutex::new(BusState {
                queue: VecDeque::with_capacity(PREALLOCATE_LIMIT),
                closed: false,
            }),
            changed: Condvar::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Enqueue one triple, blocking while the bus is open and full.
    ///
    /// There is no timeout: only a `get`/`drain_all` freeing space or a
    /// `close()` from another thread unblocks the caller.
    ///
    /// # Errors
    /// [`BusError::Closed`] if the bus is closed before the triple is enqueued.
    pub fn put(&self, triple: Triple) -> Result<(), BusError> {
        let mut state = self.state.lock();
        while !state.closed && state.queue.len() >= self.capacity {
            self.changed.wait(&mut state);
        }
        if state.closed {
            return Err(BusError::Closed);
        }
        state.queue.push_back(triple);
        self.changed.notify_all();
        Ok(())
    }

    /// Enqueue without blocking. Returns `false` if the bus is closed or full.
    pub fn try_put(&self, triple: Triple) -> bool {
        let mut state = self.state.lock();
        if state.closed || state.queue.len() >= self.capacity {
            return false;
        }
        state.queue.push_back(triple);
        self.changed.notify_all();
        true
    }

    /// Enqueue every triple in order, with the same blocking behavior as
    /// repeated [`put`](Self::put) calls.
    ///
    /// Waiters are woken whenever the batch has to wait for space and once
    /// more when it has been fully enqueued.
    ///
    /// # Errors
    /// [`BusError::Closed`] if the bus closes partway. Triples enqueued
    /// before that point stay enqueued; the rest are dropped.
    pub fn put_many(&self, triples: Vec<Triple>) -> Result<(), BusError> {
        let mut state = self.state.lock();
        let mut enqueued = 0usize;
        for triple in triples {
            while !state.closed && state.queue.len() >= self.capacity {
                self.changed.notify_all();
                self.changed.wait(&mut state);
            }
            if state.closed {
                if enqueued > 0 {
                    self.changed.notify_all();
                }
                return Err(BusError::Closed);
            }
            state.queue.push_back(triple);
            enqueued += 1;
        }
        if enqueued > 0 {
            self.changed.notify_all();
        }
        Ok(())
    }

    /// Dequeue the oldest triple.
    ///
    /// Returns immediately if one is queued. Otherwise waits up to `timeout`
    /// (forever when `None`) for a triple to arrive or the bus to close, and
    /// returns `None` if the bus is still empty when the wait ends.
    pub fn get(&self, timeout: Option<Duration>) -> Option<Triple> {
        let mut state = self.state.lock();
        let deadline = timeout.and_then(|timeout| Instant::now().checked_add(timeout));
        while !state.closed && state.queue.is_empty() {
            match deadline {
                Some(deadline) => {
                    if self.changed.wait_until(&mut state, deadline).timed_out() {
                        break;
                    }
                }
                None => self.changed.wait(&mut state),
            }
        }
        let item = state.queue.pop_front();
        if item.is_some() {
            self.changed.notify_all();
        }
        item
    }

    /// Atomically remove and return every queued triple, oldest first.
    /// Never blocks; returns an empty vector when nothing is queued.
    pub fn drain_all(&self) -> Vec<Triple> {
        let mut state = self.state.lock();
        if state.queue.is_empty() {
            return Vec::new();
        }
        let items: Vec<Triple> = state.queue.drain(..).collect();
        self.changed.notify_all();
        items
    }

    /// Mark the bus closed and wake every blocked caller. Idempotent.
    pub fn close(&self) {
        let mut state = self.state.lock();
        let first_close = !state.closed;
        state.closed = true;
        let pending = state.queue.len();
        self.changed.notify_all();
        drop(state);

        if first_close {
            BusClosed {
                capacity: self.capacity,
                pending,
            }
            .log();
        }
    }

    /// Point-in-time count of queued triples.
    pub fn size(&self) -> usize {
        self.state.lock().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().queue.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Closed and empty, checked under one lock acquisition. Once true it
    /// stays true, since a closed bus accepts nothing new.
    pub fn is_drained(&self) -> bool {
        let state = self.state.lock();
        state.closed && state.queue.is_empty()
    }

    /// Guard that closes this bus when dropped, on every exit path
    /// including unwinding.
    pub fn close_on_drop(&self) -> CloseOnDrop<'_> {
        CloseOnDrop { bus: self }
    }
}

impl std::fmt::Debug for BoundedBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("BoundedBus")
            .field("capacity", &self.capacity)
            .field("pending", &state.queue.len())
            .field("closed", &state.closed)
            .finish()
    }
}

/// Closes the borrowed bus on drop. See [`BoundedBus::close_on_drop`].
pub struct CloseOnDrop<'a> {
    bus: &'a BoundedBus,
}

impl Drop for CloseOnDrop<'_> {
    fn drop(&mut self) {
        self.bus.close();
    }
}
