// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::backends::traffic::{is_rdf_type, last_segment, TRAFFIC_NS};
use crate::errors::AggregationError;
use crate::model::Triple;
use crate::traits::SituationRefiner;
use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Default)]
struct ObservationFacts<'a> {
    is_observation: bool,
    is_vehicle_count: bool,
    locations: Vec<&'a str>,
    counts: Vec<&'a Triple>,
}

/// Stage 2: sum vehicle-count observations per location and report a
/// `TrafficJam` situation wherever the total exceeds the threshold.
///
/// Duplicate triples count once. Counts that are not integers fail the
/// stage with [`AggregationError::MalformedLiteral`].
pub struct TrafficJamRefiner;

impl SituationRefiner for TrafficJamRefiner {
    fn refine(&self, observations: &[Triple], threshold: i64) -> Result<Vec<Triple>, AggregationError> {
        let observation_class = format!("{TRAFFIC_NS}Observation");
        let observation_type = format!("{TRAFFIC_NS}hasObservationType");
        let at_location = format!("{TRAFFIC_NS}atLocation");
        let vehicle_count = format!("{TRAFFIC_NS}hasVehicleCount");

        let distinct: HashSet<&Triple> = observations.iter().collect();
        let mut facts: HashMap<&str, ObservationFacts<'_>> = HashMap::new();
        for triple in distinct {
            let entry = facts.entry(triple.subject()).or_default();
            let predicate = triple.predicate();
            if is_rdf_type(predicate) && triple.object() == observation_class {
                entry.is_observation = true;
            } else if predicate == observation_type && triple.object() == "VehicleCount" {
                entry.is_vehicle_count = true;
            } else if predicate == at_location {
                entry.locations.push(triple.object());
            } else if predicate == vehicle_count {
                entry.counts.push(triple);
            }
        }

        let mut totals: BTreeMap<&str, i64> = BTreeMap::new();
        for subject in facts.values() {
            if !(subject.is_observation && subject.is_vehicle_count) {
                continue;
            }
            for count in &subject.counts {
                let value = parse_count(count)?;
                for location in &subject.locations {
                    let total = totals.entry(*location).or_insert(0);
                    *total = total.saturating_add(value);
                }
            }
        }

        let mut situations = Vec::new();
        for (location, total) in totals {
            if total <= threshold {
                continue;
            }
            let situation = format!(
                "{TRAFFIC_NS}situation/traffic_jam_{}",
                last_segment(location)
            );
            situations.push(Triple::new(
                &situation,
                format!("{TRAFFIC_NS}hasSituationType"),
                "TrafficJam",
            ));
            situations.push(Triple::new(&situation, &at_location, location));
            situations.push(Triple::new(&situation, &vehicle_count, total.to_string()));
        }
        Ok(situations)
    }

    fn name(&self) -> &'static str {
        "traffic-jam"
    }
}

fn parse_count(triple: &Triple) -> Result<i64, AggregationError> {
    triple
        .object()
        .trim()
        .parse::<i64>()
        .map_err(|_| AggregationError::MalformedLiteral {
            subject: triple.subject().to_string(),
            predicate: triple.predicate().to_string(),
            value: triple.object().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::traffic::RDF_TYPE;

    fn observation(id: &str, location: &str, count: &str) -> Vec<Triple> {
        let subject = format!("{TRAFFIC_NS}observation/{id}");
        vec![
            Triple::new(&subject, RDF_TYPE, format!("{TRAFFIC_NS}Observation")),
            Triple::new(&subject, format!("{TRAFFIC_NS}hasObservationType"), "VehicleCount"),
            Triple::new(
                &subject,
                format!("{TRAFFIC_NS}atLocation"),
                format!("{TRAFFIC_NS}location/{location}"),
            ),
            Triple::new(&subject, format!("{TRAFFIC_NS}hasVehicleCount"), count),
        ]
    }

    fn total_for(situations: &[Triple], location: &str) -> Option<String> {
        let subject = format!("{TRAFFIC_NS}situation/traffic_jam_{location}");
        situations
            .iter()
            .find(|t| t.subject() == subject && t.predicate().ends_with("hasVehicleCount"))
            .map(|t| t.object().to_string())
    }

    #[test]
    fn test_sums_observations_across_batches() {
        let mut input = observation("a", "INT1", "60");
        input.extend(observation("b", "INT1", "50"));
        input.extend(observation("c", "HWY2", "30"));

        let situations = TrafficJamRefiner.refine(&input, 100).unwrap();
        assert_eq!(situations.len(), 3);
        assert_eq!(total_for(&situations, "INT1").as_deref(), Some("110"));
        assert_eq!(total_for(&situations, "HWY2"), None);
        assert!(situations.iter().any(|t| t.object() == "TrafficJam"));
    }

    #[test]
    fn test_threshold_is_strict() {
        let input = observation("a", "INT1", "100");
        assert!(TrafficJamRefiner.refine(&input, 100).unwrap().is_empty());
        assert_eq!(TrafficJamRefiner.refine(&input, 99).unwrap().len(), 3);
    }

    #[test]
    fn test_duplicate_triples_count_once() {
        let mut input = observation("a", "INT1", "70");
        input.extend(observation("a", "INT1", "70"));
        assert!(TrafficJamRefiner.refine(&input, 100).unwrap().is_empty());
    }

    #[test]
    fn test_negative_threshold_reports_every_location() {
        let mut input = observation("a", "INT1", "0");
        input.extend(observation("b", "INT2", "3"));
        let situations = TrafficJamRefiner.refine(&input, -1).unwrap();
        assert_eq!(situations.len(), 6);
    }

    #[test]
    fn test_malformed_count_fails() {
        let input = observation("a", "INT1", "lots");
        let err = TrafficJamRefiner.refine(&input, 100).unwrap_err();
        assert!(matches!(
            err,
            AggregationError::MalformedLiteral { ref value, .. } if value == "lots"
        ));
    }

    #[test]
    fn test_non_observations_are_ignored() {
        let input = vec![Triple::new(
            format!("{TRAFFIC_NS}vehicle/VEH_1"),
            format!("{TRAFFIC_NS}hasVehicleCount"),
            "not-a-number",
        )];
        assert!(TrafficJamRefiner.refine(&input, 0).unwrap().is_empty());
    }
}
