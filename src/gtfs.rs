use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

use serde::{de::DeserializeOwned, Deserialize};

use crate::error::{ProcessingError, Result};

const UTF8_BOM: &[u8] = &[0xef, 0xbb, 0xbf];

pub const STOPS_FILE: &str = "stops.txt";
pub const ROUTES_FILE: &str = "routes.txt";
pub const TRIPS_FILE: &str = "trips.txt";
pub const STOP_TIMES_FILE: &str = "stop_times.txt";

/// A row of `stops.txt`. Coordinates stay textual until the join parses them.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Stop {
    pub stop_id: String,
    pub stop_code: String,
    pub stop_name: String,
    #[serde(default)]
    pub stop_desc: Option<String>,
    pub stop_lat: String,
    pub stop_lon: String,
}

impl Stop {
    /// `stop_code` is optional in GTFS; stops without one are known by their
    /// `stop_id`.
    pub fn public_code(&self) -> &str {
        if self.stop_code.trim().is_empty() {
            &self.stop_id
        } else {
            &self.stop_code
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Route {
    pub route_id: String,
    pub route_short_name: String,
    pub route_long_name: String,
    #[serde(default)]
    pub route_url: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Trip {
    pub route_id: String,
    pub trip_id: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct StopTime {
    pub trip_id: String,
    pub stop_id: String,
}

#[derive(Debug, Default)]
pub struct Timetable {
    pub stops: Vec<Stop>,
    pub routes: Vec<Route>,
    pub trips: Vec<Trip>,
    pub stop_times: Vec<StopTime>,
}

impl Timetable {
    /// Loads the four tables the stop/line join needs. Every file is checked
    /// for existence before any of them is parsed.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        require_files(dir, &[STOPS_FILE, ROUTES_FILE, TRIPS_FILE, STOP_TIMES_FILE])?;

        log::info!("Loading stops");
        let stops = deserialize_from_path(dir, STOPS_FILE)?;

        log::info!("Loading routes");
        let routes = deserialize_from_path(dir, ROUTES_FILE)?;

        log::info!("Loading trips");
        let trips = deserialize_from_path(dir, TRIPS_FILE)?;

        log::info!("Loading stop_times (this may take a while)");
        let stop_times = deserialize_from_path(dir, STOP_TIMES_FILE)?;

        Ok(Self {
            stops,
            routes,
            trips,
            stop_times,
        })
    }
}

pub fn require_files(dir: &Path, file_names: &[&str]) -> Result<()> {
    for file_name in file_names {
        let path = dir.join(file_name);
        if !path.is_file() {
            return Err(ProcessingError::MissingFile(path));
        }
    }
    Ok(())
}

pub fn deserialize_from_path<T: DeserializeOwned>(dir: &Path, file_name: &str) -> Result<Vec<T>> {
    let path = dir.join(file_name);
    if !path.is_file() {
        return Err(ProcessingError::MissingFile(path));
    }
    deserialize_into(File::open(path)?, file_name)
}

pub fn deserialize_into<T: DeserializeOwned, R: Read>(reader: R, file_name: &str) -> Result<Vec<T>> {
    let mut reader = BufReader::new(reader);
    if reader.fill_buf()?.starts_with(UTF8_BOM) {
        reader.consume(UTF8_BOM.len());
    }

    csv::Reader::from_reader(reader)
        .deserialize()
        .map(|parse_result| {
            parse_result.map_err(|source| ProcessingError::Csv {
                file_name: file_name.to_owned(),
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_stops_ignoring_extra_columns() {
        let input = "stop_id,stop_code,stop_name,stop_lat,stop_lon,wheelchair_boarding\n\
                     s1,0012,Plaza Moyúa,43.2630,-2.9350,1\n";
        let stops: Vec<Stop> = deserialize_into(input.as_bytes(), STOPS_FILE).unwrap();

        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].stop_code, "0012");
        assert_eq!(stops[0].stop_name, "Plaza Moyúa");
        assert_eq!(stops[0].stop_lat, "43.2630");
        assert_eq!(stops[0].stop_desc, None);
    }

    #[test]
    fn strips_byte_order_mark() {
        let input = "\u{feff}trip_id,stop_id,stop_sequence\nT1,s1,1\n";
        let stop_times: Vec<StopTime> =
            deserialize_into(input.as_bytes(), STOP_TIMES_FILE).unwrap();

        assert_eq!(
            stop_times,
            vec![StopTime {
                trip_id: "T1".to_owned(),
                stop_id: "s1".to_owned(),
            }]
        );
    }

    #[test]
    fn optional_route_url_defaults_to_none() {
        let input = "route_id,route_short_name,route_long_name\nR1,1,Txurdinaga - Miribilla\n";
        let routes: Vec<Route> = deserialize_into(input.as_bytes(), ROUTES_FILE).unwrap();

        assert_eq!(routes[0].route_url, None);
    }

    #[test]
    fn missing_required_column_is_a_csv_error() {
        let input = "route_id\nR1\n";
        let result: Result<Vec<Trip>> = deserialize_into(input.as_bytes(), TRIPS_FILE);

        match result {
            Err(ProcessingError::Csv { file_name, .. }) => assert_eq!(file_name, TRIPS_FILE),
            other => panic!("Expected a csv error, got {other:?}"),
        }
    }

    #[test]
    fn missing_directory_reports_first_missing_file() {
        let dir = std::env::temp_dir().join("bilbobus-data-no-such-gtfs-dir");
        match Timetable::from_dir(&dir) {
            Err(ProcessingError::MissingFile(path)) => assert!(path.ends_with(STOPS_FILE)),
            other => panic!("Expected a missing file error, got {other:?}"),
        }
    }
}
