// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::fmt;

/// A `(subject, predicate, object)` statement, the unit of data flowing
/// through both topologies.
///
/// Fields are private so a triple cannot change after construction;
/// equality, ordering and hashing are structural.
///
/// # Example
/// ```
/// use jdl_bench::model::Triple;
///
/// let t = Triple::new("ex:vehicle/1", "rdf:type", "ex:Vehicle");
/// assert_eq!(t.predicate(), "rdf:type");
/// assert_eq!(t, Triple::new("ex:vehicle/1", "rdf:type", "ex:Vehicle"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    subject: String,
    predicate: String,
    object: String,
}

impl Triple {
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    pub fn object(&self) -> &str {
        &self.object
    }

    /// Consume the triple and hand back its three parts.
    pub fn into_parts(self) -> (String, String, String) {
        (self.subject, self.predicate, self.object)
    }
}

impl<S, P, O> From<(S, P, O)> for Triple
where
    S: Into<String>,
    P: Into<String>,
    O: Into<String>,
{
    fn from((subject, predicate, object): (S, P, O)) -> Self {
        Self::new(subject, predicate, object)
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)
    }
}

/// A lazily produced, thread-transferable sequence of triples.
///
/// Producers receive their input as a `TripleStream` so the synthetic
/// generator can be moved onto the producer thread without materialising it.
pub type TripleStream = Box<dyn Iterator<Item = Triple> + Send>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_structural_equality_and_hash() {
        let a = Triple::new("s", "p", "o");
        let b = Triple::from(("s", "p", "o"));
        assert_eq!(a, b);

        let set: HashSet<Triple> = [a.clone(), b].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert_ne!(a, Triple::new("s", "p", "other"));
    }

    #[test]
    fn test_into_parts_and_display() {
        let t = Triple::new("s", "p", "o");
        assert_eq!(t.to_string(), "s p o");
        assert_eq!(
            t.into_parts(),
            ("s".to_string(), "p".to_string(), "o".to_string())
        );
    }
}
