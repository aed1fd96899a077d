use clap::Parser;
use routes_sweep::{
    sdk::config::{resolve_api_key, RoutesConfig, API_KEY_ENV},
    sdk::routing::{Coordinate, RemoteRoutesProvider, RequestDefaults, RouteModifiers, TravelMode},
    sdk::sweep::{ErrorPolicy, Sweep, SweepWindow},
    sdk::util::log::init_logging,
};
use std::{error::Error, io, time::Duration};

/// Sweep departure times to find the shortest trip between two points
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Routes API key
    #[arg(long = "api_key", alias = "api-key", env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    /// Source, as a lat,long
    #[arg(long, allow_hyphen_values = true)]
    source: String,

    /// Destination, as a lat,long
    #[arg(long, allow_hyphen_values = true)]
    destination: String,

    /// Travel mode, see https://developers.google.com/maps/documentation/routes/vehicles
    #[arg(long, value_enum, ignore_case = true, default_value_t = TravelMode::Transit)]
    mode: TravelMode,

    /// Keep sweeping when a slice fails instead of aborting the run
    #[arg(long)]
    keep_going: bool,

    /// Minutes after launch of the first departure
    #[arg(long, default_value_t = 1)]
    offset_minutes: u32,

    /// Length of the departure window in hours
    #[arg(long, default_value_t = 24)]
    span_hours: u32,

    /// Minutes between departures
    #[arg(long, default_value_t = 10)]
    step_minutes: u32,

    /// Routes API endpoint
    #[arg(long, default_value = routes_sweep::sdk::config::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// [Optional] Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// BCP-47 language code for the response
    #[arg(long, default_value = "en-US")]
    language: String,

    /// METRIC or IMPERIAL
    #[arg(long, default_value = "METRIC")]
    units: String,

    /// Avoid toll roads
    #[arg(long)]
    avoid_tolls: bool,

    /// Avoid highways
    #[arg(long)]
    avoid_highways: bool,

    /// Avoid ferries
    #[arg(long)]
    avoid_ferries: bool,

    /// Ask for a single route only
    #[arg(long)]
    no_alternatives: bool,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("routes-sweep: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // --- 1. Inputs ---
    let origin: Coordinate = cli.source.parse()?;
    let destination: Coordinate = cli.destination.parse()?;
    let window = SweepWindow::from_minutes(cli.offset_minutes, cli.span_hours, cli.step_minutes)?;
    let defaults = RequestDefaults::default()
        .with_language(cli.language)
        .with_units(cli.units)
        .with_alternatives(!cli.no_alternatives)
        .with_route_modifiers(RouteModifiers {
            avoid_tolls: cli.avoid_tolls,
            avoid_highways: cli.avoid_highways,
            avoid_ferries: cli.avoid_ferries,
        });
    let policy = if cli.keep_going {
        ErrorPolicy::KeepGoing
    } else {
        ErrorPolicy::Abort
    };

    // --- 2. Provider ---
    let config = RoutesConfig::new(resolve_api_key(cli.api_key)?)
        .with_endpoint(cli.endpoint)
        .with_timeout(cli.timeout_secs.map(Duration::from_secs));
    let provider = RemoteRoutesProvider::new(config)?;

    // --- 3. Sweep ---
    log::info!(
        "Sweeping {} trips from {} to {}",
        cli.mode,
        origin,
        destination
    );
    let sweep = Sweep::new(origin, destination, cli.mode)
        .with_defaults(defaults)
        .with_window(window)
        .with_policy(policy);
    let outcome = sweep.run(&provider, chrono::Utc::now(), &mut io::stdout().lock())?;

    // --- 4. Summary ---
    if let Some(best) = outcome.best() {
        log::info!(
            "Shortest trip departs at {} and takes {}",
            best.departure,
            best.duration
        );
    }
    outcome.into_result()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    #[rstest]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[rstest]
    fn defaults_match_original_sweep() {
        let cli = Cli::try_parse_from([
            "routes-sweep",
            "--api_key",
            "k",
            "--source",
            "51.5,-0.1",
            "--destination",
            "-33.9,151.2",
        ])
        .expect("should parse");

        assert_eq!(cli.mode, TravelMode::Transit);
        assert_eq!(
            (cli.offset_minutes, cli.span_hours, cli.step_minutes),
            (1, 24, 10)
        );
        assert_eq!(cli.destination, "-33.9,151.2");
        assert!(!cli.keep_going);
    }

    #[rstest]
    #[case("DRIVE", TravelMode::Drive)]
    #[case("drive", TravelMode::Drive)]
    #[case("TWO_WHEELER", TravelMode::TwoWheeler)]
    fn mode_flag_accepts_wire_names(#[case] flag: &str, #[case] expected: TravelMode) {
        let cli = Cli::try_parse_from([
            "routes-sweep",
            "--source",
            "1,2",
            "--destination",
            "3,4",
            "--mode",
            flag,
        ])
        .expect("should parse");

        assert_eq!(cli.mode, expected);
    }

    #[rstest]
    fn api_key_flag_reads_environment() {
        let command = Cli::command();
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_id() == "api_key")
            .expect("api_key argument");

        assert_eq!(arg.get_env(), Some(std::ffi::OsStr::new(API_KEY_ENV)));
    }
}
