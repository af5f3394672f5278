// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Concrete aggregation collaborators.
//!
//! * `traffic` - synthetic traffic triples, vehicle-count observations (stage 1)
//!   and traffic-jam situation refinement (stage 2)
//! * `stub` - trivial and failing collaborators for tests

pub mod stub;
pub mod traffic;
