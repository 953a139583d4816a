use bilbobus_data::{config, data::Network, error::Result, exit_on_error, gtfs, output};

fn run(config: &config::Config) -> Result<()> {
    let timetable = gtfs::Timetable::from_dir(&config.gtfs_dir)?;

    log::info!("Joining stops and lines");
    let network = Network::try_from(&timetable)?;
    log::debug!(
        "Applied {} stop_times, skipped {} (unknown trip: {}, unknown route: {}, unknown stop: {})",
        network.stats.applied,
        network.stats.skipped(),
        network.stats.unknown_trip,
        network.stats.unknown_route,
        network.stats.unknown_stop,
    );

    log::info!("Stops processed: {}", network.stops.len());
    log::info!("Lines processed: {}", network.lines.len());

    output::write_json(&config.network_output, &network, 2)?;
    log::info!("Done! Wrote {:?}", config.network_output);
    Ok(())
}

fn main() {
    config::init_logging();
    exit_on_error(run(&config::Config::default()));
}
