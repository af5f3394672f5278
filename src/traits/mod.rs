// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod aggregation;
pub mod pressure;
pub mod topology;

pub use aggregation::{ObservationAggregator, SituationRefiner};
pub use pressure::ConsumerPressure;
pub use topology::Topology;
