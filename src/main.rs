use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use recharge_router::utils::init_map::Scenario;
use recharge_router::utils::render::{render_route, RenderOptions};
use recharge_router::{default_scenario, load_scenario, Itinerary, RouteError, RouteEvent};
use serde_json::json;
use tracing::info;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Scenario JSON file; the built-in warehouse scenario is used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Destination waypoint; asked for interactively when omitted
    #[arg(short = 't', long)]
    destination: Option<String>,

    /// Plan a route to every destination
    #[arg(long, conflicts_with = "destination")]
    all: bool,

    /// Print itineraries as JSON
    #[arg(long)]
    json: bool,

    /// Draw the route to an .svg or .png file
    #[arg(long, conflicts_with = "all")]
    render: Option<PathBuf>,

    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();

    let config = match &cli.config {
        Some(path) => load_scenario(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        None => default_scenario()?,
    };
    let scenario = config.build()?;

    if cli.all {
        return plan_all(&scenario, cli.json);
    }

    let destination = match cli.destination {
        Some(destination) => destination,
        None => prompt_destination(&scenario)?,
    };
    if !scenario.graph.contains(&destination) {
        bail!("{destination} is not a valid destination");
    }

    let simulator = scenario.simulator()?;
    let itinerary = match simulator.simulate(&scenario.start, &destination, scenario.robot.clone())
    {
        Ok(itinerary) => itinerary,
        Err(e) => bail!(describe(&e)),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&itinerary)?);
    } else {
        print_report(&scenario, &itinerary);
    }

    if let Some(path) = cli.render {
        render_route(&scenario.graph, &itinerary, &path, RenderOptions::default())?;
        info!(path = %path.display(), "route rendered");
        if !cli.json {
            println!("Route drawing saved to {}", path.display());
        }
    }

    Ok(())
}

fn plan_all(scenario: &Scenario, as_json: bool) -> Result<(), anyhow::Error> {
    let simulator = scenario.simulator()?;
    let plans = simulator.plan_all(&scenario.start, &scenario.robot);

    if as_json {
        let entries: Vec<_> = plans
            .iter()
            .map(|(destination, result)| match result {
                Ok(itinerary) => json!({ "destination": destination, "itinerary": itinerary }),
                Err(e) => json!({ "destination": destination, "error": describe(e) }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for (destination, result) in &plans {
        println!("== {destination}");
        match result {
            Ok(itinerary) => print_report(scenario, itinerary),
            Err(e) => println!("{}", describe(e)),
        }
        println!();
    }
    Ok(())
}

fn prompt_destination(scenario: &Scenario) -> Result<String, anyhow::Error> {
    print!(
        "Enter the destination ({}): ",
        scenario.destinations().join(", ")
    );
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn print_report(scenario: &Scenario, itinerary: &Itinerary) {
    println!(
        "Starting at {} with {}% battery.",
        scenario.start,
        scenario.robot.battery()
    );

    for event in itinerary.events() {
        match event {
            RouteEvent::Travel {
                from,
                to,
                distance,
                energy,
                battery_after,
            } => println!(
                "{from} -> {to}: {distance:.2} km, battery used {energy:.2}%, remaining {battery_after:.2}%"
            ),
            RouteEvent::Recharge { path, distance, .. } => println!(
                "Low battery, recharging via {} ({distance:.2} km)",
                path.join(" -> ")
            ),
        }
    }

    println!();
    println!("Route: {}", itinerary.waypoints().join(" -> "));
    println!("Total distance: {:.2} km", itinerary.total_distance());
    println!("Trip cost: ${:.2}", itinerary.total_cost());
}

fn describe(error: &RouteError) -> String {
    match error {
        RouteError::UnknownWaypoint { name } => format!("{name} is not a known waypoint."),
        RouteError::NoPathExists { from, to } => format!("No path connects {from} and {to}."),
        RouteError::DestinationUnreachable { destination, .. } => {
            format!("Sorry, there is no route available to {destination}.")
        }
        RouteError::Stranded { at, battery } => format!(
            "The robot is stranded at {at} with {battery:.2}% battery and no way to recharge."
        ),
        other => other.to_string(),
    }
}
