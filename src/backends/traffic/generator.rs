// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::backends::traffic::{CITY_NS, RDF_TYPE, TRAFFIC_NS};
use crate::model::{Triple, TripleStream};
use chrono::{Local, NaiveDateTime, Timelike};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

const TRIPLES_PER_RECORD: usize = 12;
const NUM_VEHICLES: u32 = 3000;
const NUM_SENSORS: u32 = 20;
const SIMULATION_MINUTES: i64 = 15;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

struct Location {
    id: &'static str,
    lat: f64,
    lon: f64,
}

static LOCATIONS: [Location; 4] = [
    Location { id: "INT1", lat: 35.6895, lon: 51.3890 },
    Location { id: "INT2", lat: 35.7000, lon: 51.4000 },
    Location { id: "HWY1", lat: 35.7100, lon: 51.4100 },
    Location { id: "HWY2", lat: 35.7200, lon: 51.4200 },
];

const RUSH_HOUR_EVENTS: [(&str, f64); 3] = [("Normal", 0.3), ("Congestion", 0.6), ("Incident", 0.1)];
const OFF_PEAK_EVENTS: [(&str, f64); 3] = [("Normal", 0.7), ("Congestion", 0.2), ("Incident", 0.1)];

/// Synthetic traffic sensor feed.
///
/// Produces `max(1, num_triples / 12)` vehicle sightings of exactly 12
/// triples each, or nothing when `num_triples` is zero. Timestamps fall in
/// the 15 minutes before the stream was created; speeds and event types
/// skew towards congestion during rush hours (07-09 and 16-18).
///
/// # Example
/// ```
/// use jdl_bench::backends::traffic::SyntheticTrafficGenerator;
///
/// let generator = SyntheticTrafficGenerator::new(120).with_seed(7);
/// assert_eq!(generator.stream().count(), 120);
/// assert_eq!(SyntheticTrafficGenerator::new(5).stream().count(), 12);
/// ```
#[derive(Debug, Clone)]
pub struct SyntheticTrafficGenerator {
    num_triples: usize,
    seed: Option<u64>,
}

impl SyntheticTrafficGenerator {
    pub fn new(num_triples: usize) -> Self {
        Self {
            num_triples,
            seed: None,
        }
    }

    /// Make every stream reproducible. Timestamps still follow the clock.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn num_triples(&self) -> usize {
        self.num_triples
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn record_count(&self) -> usize {
        if self.num_triples == 0 {
            0
        } else {
            (self.num_triples / TRIPLES_PER_RECORD).max(1)
        }
    }

    /// A fresh lazy stream of raw triples.
    pub fn stream(&self) -> TripleStream {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let window_start =
            Local::now().naive_local() - chrono::Duration::minutes(SIMULATION_MINUTES);
        Box::new(TrafficRecords {
            rng,
            remaining: self.record_count(),
            window_start,
            pending: VecDeque::with_capacity(TRIPLES_PER_RECORD),
        })
    }
}

struct TrafficRecords {
    rng: StdRng,
    remaining: usize,
    window_start: NaiveDateTime,
    pending: VecDeque<Triple>,
}

impl TrafficRecords {
    fn speed_and_event(&mut self, hour: u32) -> (f64, &'static str) {
        let rush_hour = (7..=9).contains(&hour) || (16..=18).contains(&hour);
        let (speed, events) = if rush_hour {
            (self.rng.gen_range(10.0..50.0), &RUSH_HOUR_EVENTS)
        } else {
            (self.rng.gen_range(30.0..100.0), &OFF_PEAK_EVENTS)
        };
        let event = events
            .choose_weighted(&mut self.rng, |(_, weight)| *weight)
            .map(|(event, _)| *event)
            .unwrap_or("Normal");
        (speed, event)
    }

    fn push_record(&mut self) {
        let vehicle_id = format!("VEH_{}", self.rng.gen_range(1..=NUM_VEHICLES));
        let offset = self.rng.gen_range(0..=SIMULATION_MINUTES * 60);
        let seen_at = self.window_start + chrono::Duration::seconds(offset);
        let timestamp = seen_at.format(TIMESTAMP_FORMAT).to_string();
        let location = &LOCATIONS[self.rng.gen_range(0..LOCATIONS.len())];
        let (speed, event_type) = self.speed_and_event(seen_at.hour());
        let sensor_id = format!("SENSOR_{}", self.rng.gen_range(1..=NUM_SENSORS));

        let vehicle = format!("{TRAFFIC_NS}vehicle/{vehicle_id}");
        let sensor = format!("{TRAFFIC_NS}sensor/{sensor_id}");
        let place = format!("{TRAFFIC_NS}location/{}", location.id);
        let event = format!("{TRAFFIC_NS}event/{vehicle_id}_{}", timestamp.replace(':', "-"));

        let record = [
            Triple::new(&vehicle, RDF_TYPE, format!("{TRAFFIC_NS}Vehicle")),
            Triple::new(&vehicle, format!("{TRAFFIC_NS}hasSpeed"), format!("{speed:.2}")),
            Triple::new(&vehicle, format!("{TRAFFIC_NS}atLocation"), &place),
            Triple::new(&vehicle, format!("{TRAFFIC_NS}detectedBy"), &sensor),
            Triple::new(&vehicle, format!("{TRAFFIC_NS}hasTimestamp"), timestamp),
            Triple::new(&vehicle, format!("{TRAFFIC_NS}hasEventType"), event_type),
            Triple::new(&sensor, RDF_TYPE, format!("{TRAFFIC_NS}Sensor")),
            Triple::new(&place, RDF_TYPE, format!("{TRAFFIC_NS}Location")),
            Triple::new(&place, format!("{CITY_NS}hasLatitude"), location.lat.to_string()),
            Triple::new(&place, format!("{CITY_NS}hasLongitude"), location.lon.to_string()),
            Triple::new(&event, RDF_TYPE, format!("{TRAFFIC_NS}Event")),
            Triple::new(&event, format!("{TRAFFIC_NS}occursAt"), &vehicle),
        ];
        self.pending.extend(record);
    }
}

impl Iterator for TrafficRecords {
    type Item = Triple;

    fn next(&mut self) -> Option<Triple> {
        if self.pending.is_empty() {
            if self.remaining == 0 {
                return None;
            }
            self.remaining -= 1;
            self.push_record();
        }
        self.pending.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_count_rounding() {
        assert_eq!(SyntheticTrafficGenerator::new(0).record_count(), 0);
        assert_eq!(SyntheticTrafficGenerator::new(1).record_count(), 1);
        assert_eq!(SyntheticTrafficGenerator::new(25).record_count(), 2);
        assert_eq!(SyntheticTrafficGenerator::new(30_000).record_count(), 2500);
    }

    #[test]
    fn test_empty_stream_for_zero() {
        assert_eq!(SyntheticTrafficGenerator::new(0).stream().count(), 0);
    }

    #[test]
    fn test_record_shape() {
        let triples: Vec<Triple> = SyntheticTrafficGenerator::new(12).with_seed(1).stream().collect();
        assert_eq!(triples.len(), 12);

        let vehicle = triples[0].subject();
        assert!(vehicle.starts_with(&format!("{TRAFFIC_NS}vehicle/VEH_")));
        assert_eq!(triples[0].object(), format!("{TRAFFIC_NS}Vehicle"));
        assert!(triples[..6].iter().all(|t| t.subject() == vehicle));

        let location = triples[2].object();
        assert!(LOCATIONS
            .iter()
            .any(|l| location == format!("{TRAFFIC_NS}location/{}", l.id)));
        assert_eq!(triples[7].subject(), location);

        let speed: f64 = triples[1].object().parse().unwrap();
        assert!((10.0..100.0).contains(&speed));
        assert_eq!(triples[1].object().split('.').nth(1).map(str::len), Some(2));

        assert!(NaiveDateTime::parse_from_str(triples[4].object(), TIMESTAMP_FORMAT).is_ok());
        assert!(["Normal", "Congestion", "Incident"].contains(&triples[5].object()));
        assert_eq!(triples[11].object(), vehicle);
    }

    #[test]
    fn test_seeded_streams_repeat_vehicles_and_locations() {
        let generator = SyntheticTrafficGenerator::new(600).with_seed(99);
        let pick = |t: &Triple| (t.subject().to_string(), t.object().to_string());
        let first: Vec<_> = generator.stream().filter(|t| t.predicate().ends_with("atLocation")).map(|t| pick(&t)).collect();
        let second: Vec<_> = generator.stream().filter(|t| t.predicate().ends_with("atLocation")).map(|t| pick(&t)).collect();
        assert_eq!(first.len(), 50);
        assert_eq!(first, second);
    }
}
