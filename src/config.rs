use std::path::PathBuf;

/// Input and output locations shared by the three jobs. Paths are relative to
/// the working directory the job is started from.
#[derive(Debug, Clone)]
pub struct Config {
    /// directory holding stops.txt, routes.txt, trips.txt and stop_times.txt
    pub gtfs_dir: PathBuf,
    /// municipal stops API dump, a JSON array
    pub municipal_stops_input: PathBuf,
    /// combined `{"lines", "stops"}` document
    pub network_output: PathBuf,
    /// flat stops array, from GTFS or from the municipal dump
    pub stops_output: PathBuf,
    pub routes_output: PathBuf,
    /// MUNICIPIO code kept by the municipal filter
    pub municipality: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gtfs_dir: PathBuf::from("data/gtfs"),
            municipal_stops_input: PathBuf::from("data/paradas_api.json"),
            network_output: PathBuf::from("data/bilbobus-data.json"),
            stops_output: PathBuf::from("data/bilbobus-stops.json"),
            routes_output: PathBuf::from("data/bilbobus-routes.json"),
            municipality: "020".to_owned(),
        }
    }
}

/// Sets up `env_logger` at `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_data_directory() {
        let config = Config::default();

        assert_eq!(config.gtfs_dir, PathBuf::from("data/gtfs"));
        assert_eq!(config.stops_output, PathBuf::from("data/bilbobus-stops.json"));
        assert_eq!(config.municipality, "020");
    }
}
