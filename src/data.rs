use indexmap::IndexMap;
use itertools::Itertools;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use crate::error::{ProcessingError, Result};
use crate::gtfs;

/// Rider-facing line identifier, `route_short_name` in GTFS.
pub type LineId = String;
/// Public stop code printed on the stop signage, or the stop_id when the feed
/// leaves it blank.
pub type StopCode = String;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Stop {
    pub id: StopCode,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Lines serving this stop, in the order they were discovered.
    pub lines: Vec<LineId>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Line {
    pub id: LineId,
    pub name: String,
    /// Sorted, no duplicates.
    pub stops: Vec<StopCode>,
}

/// One direction of a line, as listed in `routes.txt`.
#[derive(Debug)]
struct RouteVariant {
    line_id: LineId,
    name: String,
    stops: BTreeSet<StopCode>,
}

/// Counts of stop_times rows applied to the network or skipped for a
/// dangling reference.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct JoinStats {
    pub applied: usize,
    pub unknown_trip: usize,
    pub unknown_route: usize,
    pub unknown_stop: usize,
}

impl JoinStats {
    pub fn skipped(&self) -> usize {
        self.unknown_trip + self.unknown_route + self.unknown_stop
    }
}

/// Stops annotated with their lines and lines annotated with their stops.
/// Stops keep `stops.txt` order, lines the order their first route appears in.
#[derive(Serialize, Debug, Default)]
pub struct Network {
    pub lines: IndexMap<LineId, Line>,
    pub stops: IndexMap<StopCode, Stop>,
    #[serde(skip)]
    pub stats: JoinStats,
}

impl TryFrom<&gtfs::Timetable> for Network {
    type Error = ProcessingError;

    fn try_from(timetable: &gtfs::Timetable) -> Result<Self> {
        // A repeated key replaces the earlier entry in place.
        let mut stops: IndexMap<StopCode, Stop> = IndexMap::new();
        let mut code_by_stop_id: HashMap<&str, StopCode> = HashMap::new();
        for raw in &timetable.stops {
            let stop = Stop::try_from(raw)?;
            if let Some(previous) = code_by_stop_id.insert(&raw.stop_id, stop.id.to_owned()) {
                log::warn!(
                    "Duplicate stop_id {:?}, stop {:?} replaces {:?}",
                    raw.stop_id,
                    stop.id,
                    previous
                );
            }
            if let Some(previous) = stops.insert(stop.id.to_owned(), stop) {
                log::warn!("Duplicate stop code {:?}, keeping the last entry", previous.id);
            }
        }

        // Kept in routes.txt order, which decides the name of a merged line.
        let mut variants: Vec<RouteVariant> = Vec::with_capacity(timetable.routes.len());
        let mut variant_by_route_id: HashMap<&str, usize> = HashMap::new();
        for raw in &timetable.routes {
            let variant = RouteVariant {
                line_id: raw.route_short_name.to_owned(),
                name: raw.route_long_name.to_owned(),
                stops: BTreeSet::new(),
            };
            match variant_by_route_id.get(raw.route_id.as_str()) {
                Some(&idx) => {
                    log::warn!("Duplicate route_id {:?}, keeping the last entry", raw.route_id);
                    variants[idx] = variant;
                }
                None => {
                    variant_by_route_id.insert(&raw.route_id, variants.len());
                    variants.push(variant);
                }
            }
        }

        let route_by_trip_id: HashMap<&str, &str> = timetable
            .trips
            .iter()
            .map(|trip| (trip.trip_id.as_str(), trip.route_id.as_str()))
            .collect();

        let mut stats = JoinStats::default();
        for stop_time in &timetable.stop_times {
            let Some(route_id) = route_by_trip_id.get(stop_time.trip_id.as_str()) else {
                stats.unknown_trip += 1;
                continue;
            };
            let Some(&variant_idx) = variant_by_route_id.get(route_id) else {
                stats.unknown_route += 1;
                continue;
            };
            let Some(stop_code) = code_by_stop_id.get(stop_time.stop_id.as_str()) else {
                stats.unknown_stop += 1;
                continue;
            };

            let variant = &mut variants[variant_idx];
            variant.stops.insert(stop_code.to_owned());

            if let Some(stop) = stops.get_mut(stop_code.as_str()) {
                if !stop.lines.contains(&variant.line_id) {
                    stop.lines.push(variant.line_id.to_owned());
                }
            }
            stats.applied += 1;
        }

        Ok(Self {
            lines: merge_variants(variants),
            stops,
            stats,
        })
    }
}

/// Folds every variant sharing a line id into one line. The first variant
/// names the line; stop sets are unioned.
fn merge_variants(variants: Vec<RouteVariant>) -> IndexMap<LineId, Line> {
    let mut grouped: IndexMap<LineId, Vec<RouteVariant>> = IndexMap::new();
    for variant in variants {
        grouped
            .entry(variant.line_id.to_owned())
            .or_default()
            .push(variant);
    }

    grouped
        .into_iter()
        .map(|(line_id, group)| {
            let name = group
                .first()
                .map(|variant| variant.name.to_owned())
                .unwrap_or_default();
            let stops = group
                .iter()
                .map(|variant| variant.stops.iter().cloned())
                .kmerge()
                .dedup()
                .collect();

            (
                line_id.to_owned(),
                Line {
                    id: line_id,
                    name,
                    stops,
                },
            )
        })
        .collect()
}

impl TryFrom<&gtfs::Stop> for Stop {
    type Error = ProcessingError;

    fn try_from(raw: &gtfs::Stop) -> Result<Self> {
        Ok(Self {
            id: raw.public_code().to_owned(),
            name: raw.stop_name.to_owned(),
            lat: parse_coordinate(raw, "stop_lat", &raw.stop_lat, 90.0)?,
            lon: parse_coordinate(raw, "stop_lon", &raw.stop_lon, 180.0)?,
            lines: Vec::new(),
        })
    }
}

fn parse_coordinate(
    stop: &gtfs::Stop,
    field: &'static str,
    value: &str,
    limit: f64,
) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|coordinate| coordinate.is_finite() && coordinate.abs() <= limit)
        .ok_or_else(|| ProcessingError::InvalidCoordinate {
            stop_id: stop.stop_id.to_owned(),
            field,
            value: value.to_owned(),
        })
}
