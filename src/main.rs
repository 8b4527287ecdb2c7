use std::{fs, process::ExitCode, sync::Arc};

use clap::{Args, Parser, Subcommand, ValueEnum};
use journey_rs::{
    routing::route,
    services::{
        build::build_graph,
        directions::render_directions,
        kml::render_kml,
        persistence::{load_graph, save_graph},
    },
    structures::{Config, LatLng, ObjectiveKind, RouteQuery},
    web::app::server,
};
use tracing::error;

#[derive(Parser)]
#[command(version, about = "Multimodal journey planner")]
struct Cli {
    #[arg(short, long, default_value = "config.yml")]
    config: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ingest the configured inputs and save the graph
    Build,
    /// Serve the GraphQL API over a saved graph
    Serve,
    /// Plan a single journey and write directions and KML
    Plan(PlanArgs),
}

#[derive(Args)]
struct PlanArgs {
    /// LAT,LON
    #[arg(long, value_parser = parse_lat_lng, allow_hyphen_values = true)]
    from: LatLng,
    /// LAT,LON
    #[arg(long, value_parser = parse_lat_lng, allow_hyphen_values = true)]
    to: LatLng,
    #[arg(long, value_enum)]
    objective: ObjectiveArg,
    /// HH:MM, defaults to the configured start time
    #[arg(long)]
    start: Option<String>,
    /// HH:MM, required by the deadline objective
    #[arg(long)]
    deadline: Option<String>,
    /// Prefix of the written `<out>_directions.txt` and `<out>.kml`
    #[arg(long, default_value = "plan")]
    out: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum ObjectiveArg {
    Distance,
    Fare,
    Fastest,
    Deadline,
}

impl From<ObjectiveArg> for ObjectiveKind {
    fn from(o: ObjectiveArg) -> Self {
        match o {
            ObjectiveArg::Distance => ObjectiveKind::ShortestDistance,
            ObjectiveArg::Fare => ObjectiveKind::CheapestFare,
            ObjectiveArg::Fastest => ObjectiveKind::EarliestArrival,
            ObjectiveArg::Deadline => ObjectiveKind::CheapestByDeadline,
        }
    }
}

fn parse_lat_lng(s: &str) -> Result<LatLng, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("Expected LAT,LON, got '{s}'"))?;
    let lat = lat.trim().parse::<f64>().map_err(|e| format!("Bad latitude: {e}"))?;
    let lon = lon.trim().parse::<f64>().map_err(|e| format!("Bad longitude: {e}"))?;
    Ok(LatLng::new(lat, lon))
}

fn plan(config: &Config, args: &PlanArgs) -> Result<(), String> {
    let graph = load_graph(&config.build.output)?;
    let query = RouteQuery::parse(
        args.from,
        args.to,
        args.objective.into(),
        args.start.as_deref(),
        args.deadline.as_deref(),
        config.default_routing.start_minutes()?,
    )?;

    let itinerary = route(&graph, &query).map_err(|e| e.to_string())?;
    let directions = render_directions(&itinerary, &config.default_routing.currency);
    print!("{directions}");

    let txt = format!("{}_directions.txt", args.out);
    let kml = format!("{}.kml", args.out);
    fs::write(&txt, &directions).map_err(|e| format!("Failed to write {txt}: {e}"))?;
    fs::write(&kml, render_kml(&itinerary)?).map_err(|e| format!("Failed to write {kml}: {e}"))?;
    println!(
        "Objective ({}): {:.2}\nFiles created: {kml}, {txt}",
        query.objective.name(),
        itinerary.objective_value
    );
    Ok(())
}

fn serve(config: Config) -> Result<(), String> {
    let graph = Arc::new(load_graph(&config.build.output)?);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start runtime: {e}"))?;
    runtime
        .block_on(server(graph, config.default_routing, &config.server.bind))
        .map_err(|e| format!("Server failed: {e}"))
}

fn run(cli: Cli) -> Result<(), String> {
    let config = Config::load(&cli.config)?;

    match cli.command {
        Command::Build => {
            let graph = build_graph(&config.build)?;
            save_graph(&graph, &config.build.output)
        }
        Command::Serve => serve(config),
        Command::Plan(args) => plan(&config, &args),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
