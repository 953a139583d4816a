use bilbobus_data::{config, error::Result, exit_on_error, municipal, output};

fn run(config: &config::Config) -> Result<()> {
    log::info!("Reading {:?}", config.municipal_stops_input);
    let stops = municipal::read_stops_from_path(&config.municipal_stops_input)?;

    log::info!("Filtering stops for MUNICIPIO {}", config.municipality);
    let stops = municipal::filter_by_municipality(stops, &config.municipality);
    log::info!("Found {} stops", stops.len());

    output::write_json(&config.stops_output, &stops, 4)?;
    log::info!("Done! Wrote {:?}", config.stops_output);
    Ok(())
}

fn main() {
    config::init_logging();
    exit_on_error(run(&config::Config::default()));
}
