// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Traffic-monitoring collaborators.
//!
//! Raw triples describe vehicles seen by roadside sensors at a handful of
//! locations. Stage 1 counts vehicles per location; stage 2 sums those counts
//! and reports a traffic jam wherever the total exceeds the threshold.

mod generator;
mod observation;
mod situation;

pub use generator::SyntheticTrafficGenerator;
pub use observation::VehicleCountObserver;
pub use situation::TrafficJamRefiner;

pub const TRAFFIC_NS: &str = "http://example.org/traffic#";
pub const CITY_NS: &str = "http://example.org/cityOnto#";

/// Compact type predicate emitted by the generator and stage 1.
pub const RDF_TYPE: &str = "rdf:type";
const RDF_TYPE_IRI: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

pub(crate) fn is_rdf_type(predicate: &str) -> bool {
    predicate == RDF_TYPE || predicate == RDF_TYPE_IRI
}

/// Final path segment of an IRI, used to name derived resources.
pub(crate) fn last_segment(iri: &str) -> &str {
    iri.rsplit_once('/').map(|(_, tail)| tail).unwrap_or(iri)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_segment() {
        assert_eq!(last_segment("http://example.org/traffic#location/INT1"), "INT1");
        assert_eq!(last_segment("INT1"), "INT1");
    }

    #[test]
    fn test_rdf_type_forms() {
        assert!(is_rdf_type("rdf:type"));
        assert!(is_rdf_type(RDF_TYPE_IRI));
        assert!(!is_rdf_type("http://example.org/traffic#atLocation"));
    }
}
