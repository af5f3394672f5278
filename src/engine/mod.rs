// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod centralized;
pub mod distributed;
pub mod factory;
pub mod pressure;
pub mod report;
pub mod store;
mod threads;

pub use centralized::{CentralizedOptions, CentralizedTopology};
pub use distributed::{DistributedOptions, DistributedTopology};
pub use factory::TopologyFactory;
pub use pressure::{Ballast, HeavyConsumerProfile, NoPressure};
pub use report::{TopologyKind, TopologyReport, TransferStats};
pub use store::ObservationStore;
