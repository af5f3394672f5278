// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors reported by stage-1 and stage-2 aggregation collaborators.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregationError {
    /// A literal that must be an integer could not be parsed.
    #[error("malformed literal '{value}' for <{subject}> <{predicate}>: expected an integer")]
    MalformedLiteral {
        subject: String,
        predicate: String,
        value: String,
    },

    /// Any other collaborator failure.
    #[error("{stage} aggregation failed: {message}")]
    Failed { stage: &'static str, message: String },
}
