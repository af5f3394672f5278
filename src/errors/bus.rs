// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised synchronously by [`BoundedBus`](crate::bus::BoundedBus) calls.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BusError {
    /// The bus was constructed with zero slots.
    #[error("invalid bus capacity {capacity}: capacity must be greater than zero")]
    InvalidCapacity { capacity: usize },

    /// A `put` observed the bus closed before it could enqueue.
    /// Producers treat this as "stop producing".
    #[error("bus is closed")]
    Closed,
}
