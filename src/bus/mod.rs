// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Thread-safe bounded FIFO connecting a topology's producer and consumer.

mod bounded;

pub use bounded::{BoundedBus, CloseOnDrop, UNLIMITED_CAPACITY};
