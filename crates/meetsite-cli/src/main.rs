// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Meetsite Contributors

mod report;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use meetsite_core::config::ScenarioConfig;
use meetsite_core::schedule::{parse_date, MeetingWindow, DEFAULT_FLEXIBILITY_DAYS};
use meetsite_core::{
    flights_for_candidate, generate_flights, rank_catalog, Catalog, OptimizationMode,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Scenario file (attendees, mode, dates). Defaults to the user config dir.
    #[arg(short, long, env = "MEETSITE_SCENARIO")]
    scenario: Option<PathBuf>,

    /// Replacement office/hub catalog (JSON)
    #[arg(short, long, env = "MEETSITE_CATALOG")]
    catalog: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// List offices and their attendee counts
    Offices {
        /// Attendees per office, e.g. LHR=10 (repeatable)
        #[arg(short, long = "attend", value_parser = parse_attendance)]
        attend: Vec<(String, u32)>,
    },
    /// List external meeting hubs
    Hubs,
    /// Rank every office and hub as a meeting site
    Rank {
        #[arg(short, long = "attend", value_parser = parse_attendance)]
        attend: Vec<(String, u32)>,
        /// carbon (alias co2), distance (alias fairness) or balanced
        #[arg(short, long)]
        mode: Option<OptimizationMode>,
        /// How many sites to show
        #[arg(short, long)]
        limit: Option<usize>,
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Simulated flight offers for one route
    Flights {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Travel date, YYYY-MM-DD
        #[arg(short, long)]
        date: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Rank, pick the best site and list flights for every travelling office
    Plan {
        #[arg(short, long = "attend", value_parser = parse_attendance)]
        attend: Vec<(String, u32)>,
        /// carbon (alias co2), distance (alias fairness) or balanced
        #[arg(short, long)]
        mode: Option<OptimizationMode>,
        /// First meeting day, YYYY-MM-DD
        #[arg(long)]
        start: Option<String>,
        /// Last meeting day, YYYY-MM-DD
        #[arg(long)]
        end: Option<String>,
        /// Days of travel flexibility (0-14)
        #[arg(long)]
        flex: Option<u8>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

/// `CODE=N`. Counts that are not a non-negative integer become 0.
fn parse_attendance(s: &str) -> Result<(String, u32), String> {
    let (code, count) = s
        .split_once('=')
        .ok_or_else(|| format!("expected CODE=N, got '{}'", s))?;
    let code = code.trim();
    if code.is_empty() {
        return Err(format!("missing airport code in '{}'", s));
    }
    Ok((code.to_uppercase(), normalize_attendees(count)))
}

fn normalize_attendees(raw: &str) -> u32 {
    raw.trim().parse::<i64>().map_or(0, |n| n.clamp(0, u32::MAX as i64) as u32)
}

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn load_catalog(scenario: &ScenarioConfig, attend: &[(String, u32)]) -> Result<Catalog> {
    let mut catalog = scenario
        .build_catalog()
        .context("Failed to build the office catalog for this scenario")?;
    for (code, count) in attend {
        catalog.set_attendees(code, *count)?;
    }
    Ok(catalog)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let scenario_path = cli
        .scenario
        .clone()
        .unwrap_or_else(ScenarioConfig::default_path);
    let mut scenario = ScenarioConfig::load(&scenario_path)
        .with_context(|| format!("Failed to read scenario {}", scenario_path.display()))?;
    if let Some(path) = &cli.catalog {
        scenario.catalog = Some(path.clone());
    }

    match &cli.command {
        Commands::Offices { attend } => {
            let catalog = load_catalog(&scenario, attend)?;
            report::print_offices(&catalog);
        }
        Commands::Hubs => {
            let catalog = load_catalog(&scenario, &[])?;
            report::print_hubs(&catalog);
        }
        Commands::Rank {
            attend,
            mode,
            limit,
            format,
        } => {
            let catalog = load_catalog(&scenario, attend)?;
            let mode = mode.unwrap_or(scenario.mode);
            let limit = limit.unwrap_or(scenario.limit);

            let mut results = rank_catalog(&catalog, mode);
            if results.is_empty() {
                println!("No attendees yet. Use --attend CODE=N to add some.");
                return Ok(());
            }
            results.truncate(limit);
            match format {
                Format::Text => report::print_ranking(&catalog, mode, &results),
                Format::Json => println!("{}", serde_json::to_string_pretty(&results)?),
                Format::Csv => report::write_ranking_csv(std::io::stdout(), &results)?,
            }
        }
        Commands::Flights {
            from,
            to,
            date,
            seed,
            format,
        } => {
            let catalog = load_catalog(&scenario, &[])?;
            let origin = catalog
                .find(from)
                .ok_or_else(|| anyhow!("Unknown airport code '{}'", from))?;
            let destination = catalog
                .find(to)
                .ok_or_else(|| anyhow!("Unknown airport code '{}'", to))?;
            if origin.same_site(destination) {
                bail!("Origin and destination are the same site");
            }
            let date = match date {
                Some(d) => parse_date(d)?,
                None => scenario
                    .window
                    .map(|w| w.departure_date())
                    .ok_or_else(|| anyhow!("No travel date given. Use --date YYYY-MM-DD."))?,
            };

            let mut rng = make_rng(seed.or(scenario.seed));
            let offers = generate_flights(origin, destination, date, &mut rng);
            match format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&offers)?),
                Format::Csv => report::write_offers_csv(std::io::stdout(), &offers)?,
                Format::Text => report::print_offers(origin, destination, &offers),
            }
        }
        Commands::Plan {
            attend,
            mode,
            start,
            end,
            flex,
            seed,
            format,
        } => {
            let catalog = load_catalog(&scenario, attend)?;
            let mode = mode.unwrap_or(scenario.mode);

            let window = match start {
                Some(start) => MeetingWindow::parse(
                    start,
                    end.as_deref(),
                    flex.unwrap_or(DEFAULT_FLEXIBILITY_DAYS),
                )?,
                None => scenario
                    .window
                    .ok_or_else(|| anyhow!("No meeting dates given. Use --start YYYY-MM-DD."))?,
            };

            let results = rank_catalog(&catalog, mode);
            let best = results
                .first()
                .ok_or_else(|| anyhow!("No attendees yet. Use --attend CODE=N to add some."))?;

            let mut rng = make_rng(seed.or(scenario.seed));
            let itinerary = flights_for_candidate(best, window.departure_date(), &mut rng);
            match format {
                Format::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "window": window,
                        "site": best,
                        "flights": itinerary,
                    }))?
                ),
                Format::Csv => {
                    let offers: Vec<_> = itinerary.iter().flat_map(|r| r.offers.clone()).collect();
                    report::write_offers_csv(std::io::stdout(), &offers)?;
                }
                Format::Text => report::print_plan(mode, &window, best, &itinerary),
            }
        }
    }

    Ok(())
}
