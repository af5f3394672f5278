// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::pressure::Ballast;

/// Simulated cost injected into a consumer thread.
///
/// The centralized topology takes one of these so tests can swap the heavy
/// profile for [`NoPressure`](crate::engine::pressure::NoPressure).
pub trait ConsumerPressure: Send + Sync {
    /// Memory held for the whole lifetime of the consumer thread.
    /// Allocation is best-effort; failure yields an empty ballast.
    fn ballast(&self) -> Ballast;

    /// Called once before each triple is folded into the store.
    fn throttle(&self);
}
