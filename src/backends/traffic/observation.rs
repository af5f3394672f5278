// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::backends::traffic::{is_rdf_type, last_segment, RDF_TYPE, TRAFFIC_NS};
use crate::errors::AggregationError;
use crate::model::{Triple, TripleStream};
use crate::traits::ObservationAggregator;
use std::collections::{BTreeMap, HashSet};

/// Stage 1: count distinct vehicles per location.
///
/// A vehicle counts once per location it was seen at, no matter how many
/// sightings repeat. Each location with at least one vehicle yields four
/// triples describing a `VehicleCount` observation, in location order.
pub struct VehicleCountObserver;

impl ObservationAggregator for VehicleCountObserver {
    fn observe(&self, input: TripleStream) -> Result<Vec<Triple>, AggregationError> {
        let vehicle_class = format!("{TRAFFIC_NS}Vehicle");
        let at_location = format!("{TRAFFIC_NS}atLocation");

        let mut vehicles: HashSet<String> = HashSet::new();
        let mut placements: HashSet<(String, String)> = HashSet::new();
        for triple in input {
            let (subject, predicate, object) = triple.into_parts();
            if is_rdf_type(&predicate) && object == vehicle_class {
                vehicles.insert(subject);
            } else if predicate == at_location {
                placements.insert((subject, object));
            }
        }

        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for (vehicle, location) in placements {
            if vehicles.contains(&vehicle) {
                *counts.entry(location).or_default() += 1;
            }
        }

        let mut observations = Vec::with_capacity(counts.len() * 4);
        for (location, count) in counts {
            let observation = format!(
                "{TRAFFIC_NS}observation/vehicle_count_{}",
                last_segment(&location)
            );
            observations.push(Triple::new(
                &observation,
                RDF_TYPE,
                format!("{TRAFFIC_NS}Observation"),
            ));
            observations.push(Triple::new(
                &observation,
                format!("{TRAFFIC_NS}hasObservationType"),
                "VehicleCount",
            ));
            observations.push(Triple::new(&observation, &at_location, location));
            observations.push(Triple::new(
                &observation,
                format!("{TRAFFIC_NS}hasVehicleCount"),
                count.to_string(),
            ));
        }
        Ok(observations)
    }

    fn name(&self) -> &'static str {
        "vehicle-count"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sighting(vehicle: &str, location: &str) -> Vec<Triple> {
        let vehicle = format!("{TRAFFIC_NS}vehicle/{vehicle}");
        vec![
            Triple::new(&vehicle, RDF_TYPE, format!("{TRAFFIC_NS}Vehicle")),
            Triple::new(
                &vehicle,
                format!("{TRAFFIC_NS}atLocation"),
                format!("{TRAFFIC_NS}location/{location}"),
            ),
        ]
    }

    fn observe(triples: Vec<Triple>) -> Vec<Triple> {
        VehicleCountObserver
            .observe(Box::new(triples.into_iter()))
            .unwrap()
    }

    fn count_for(observations: &[Triple], location: &str) -> Option<String> {
        let subject = format!("{TRAFFIC_NS}observation/vehicle_count_{location}");
        observations
            .iter()
            .find(|t| t.subject() == subject && t.predicate().ends_with("hasVehicleCount"))
            .map(|t| t.object().to_string())
    }

    #[test]
    fn test_counts_distinct_vehicles_per_location() {
        let mut input = Vec::new();
        input.extend(sighting("VEH_1", "INT1"));
        input.extend(sighting("VEH_1", "INT1"));
        input.extend(sighting("VEH_2", "INT1"));
        input.extend(sighting("VEH_1", "HWY1"));

        let observations = observe(input);
        assert_eq!(observations.len(), 8);
        assert_eq!(count_for(&observations, "INT1").as_deref(), Some("2"));
        assert_eq!(count_for(&observations, "HWY1").as_deref(), Some("1"));
        // HWY1 sorts before INT1
        assert!(observations[0].subject().ends_with("vehicle_count_HWY1"));
    }

    #[test]
    fn test_untyped_subjects_are_ignored() {
        let input = vec![Triple::new(
            format!("{TRAFFIC_NS}vehicle/VEH_9"),
            format!("{TRAFFIC_NS}atLocation"),
            format!("{TRAFFIC_NS}location/INT2"),
        )];
        assert!(observe(input).is_empty());
    }

    #[test]
    fn test_observation_shape() {
        let observations = observe(sighting("VEH_3", "INT2"));
        let subject = format!("{TRAFFIC_NS}observation/vehicle_count_INT2");
        assert!(observations.iter().all(|t| t.subject() == subject));
        assert!(observations
            .iter()
            .any(|t| t.predicate() == RDF_TYPE && t.object() == format!("{TRAFFIC_NS}Observation")));
        assert!(observations.iter().any(|t| t.object() == "VehicleCount"));
        assert!(observations
            .iter()
            .any(|t| t.object() == format!("{TRAFFIC_NS}location/INT2")));
    }

    #[test]
    fn test_empty_input() {
        assert!(observe(Vec::new()).is_empty());
    }
}
