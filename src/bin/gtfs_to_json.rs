use bilbobus_data::{config, error::Result, exit_on_error, export, gtfs, output};

fn run(config: &config::Config) -> Result<()> {
    gtfs::require_files(&config.gtfs_dir, &[gtfs::STOPS_FILE, gtfs::ROUTES_FILE])?;

    log::info!("Processing {}", gtfs::STOPS_FILE);
    let stops: Vec<gtfs::Stop> = gtfs::deserialize_from_path(&config.gtfs_dir, gtfs::STOPS_FILE)?;
    let stops = export::flat_stops(&stops);

    log::info!("Processing {}", gtfs::ROUTES_FILE);
    let routes: Vec<gtfs::Route> =
        gtfs::deserialize_from_path(&config.gtfs_dir, gtfs::ROUTES_FILE)?;
    let routes = export::flat_routes(&routes);

    log::info!("Total stops: {}", stops.len());
    output::write_json(&config.stops_output, &stops, 4)?;

    log::info!("Total routes: {}", routes.len());
    output::write_json(&config.routes_output, &routes, 4)?;

    log::info!("Done!");
    Ok(())
}

fn main() {
    config::init_logging();
    exit_on_error(run(&config::Config::default()));
}
