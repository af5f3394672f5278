// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod triple;

pub use triple::{Triple, TripleStream};
