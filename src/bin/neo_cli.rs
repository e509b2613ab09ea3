//! Close-approach query CLI
//!
//! Explore close approaches of near-Earth objects from the NASA data set.
//!
//! # Usage
//!
//! ```bash
//! # Inspect one NEO by designation or by name
//! neo_cli inspect --pdes "2020 FK"
//! neo_cli inspect --name "Big Rock" --verbose
//!
//! # Query close approaches matching all given criteria
//! neo_cli query --start-date 2020-01-01 --max-distance 0.1 --hazardous true
//!
//! # Write results to a file (format picked by extension)
//! neo_cli query --min-velocity 30 --limit 100 --outfile results.csv
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use neodb::extract::{load_approaches, load_neos};
use neodb::filters::{create_filters, QuerySpec};
use neodb::write::{write_to_csv, write_to_json, ApproachRecord};
use neodb::{limit, NeoDatabase};

/// Matches printed to stdout when no outfile and no limit are given
const DEFAULT_STDOUT_LIMIT: usize = 10;

#[derive(Parser)]
#[command(name = "neo_cli")]
#[command(version = "0.1.0")]
#[command(about = "Explore close approaches of near-Earth objects")]
struct Cli {
    /// Path to the NEO catalog CSV file
    #[arg(long, env = "NEO_CSV_PATH", default_value = "data/neos.csv", global = true)]
    neofile: PathBuf,

    /// Path to the close-approach JSON file
    #[arg(long, env = "CAD_JSON_PATH", default_value = "data/cad.json", global = true)]
    cadfile: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect a single NEO by designation or by name
    Inspect {
        /// Primary designation to look up
        #[arg(long, short = 'p', conflicts_with = "name")]
        pdes: Option<String>,

        /// IAU name to look up (exact, case-sensitive)
        #[arg(long, short = 'n')]
        name: Option<String>,

        /// Also list the NEO's close approaches
        #[arg(long, short)]
        verbose: bool,
    },

    /// Query close approaches matching all given criteria
    Query {
        /// Exact approach date (YYYY-MM-DD)
        #[arg(long, short = 'd')]
        date: Option<String>,

        /// Earliest approach date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<String>,

        /// Latest approach date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<String>,

        /// Minimum approach distance, in au
        #[arg(long = "min-distance")]
        distance_min: Option<String>,

        /// Maximum approach distance, in au
        #[arg(long = "max-distance")]
        distance_max: Option<String>,

        /// Minimum relative velocity, in km/s
        #[arg(long = "min-velocity")]
        velocity_min: Option<String>,

        /// Maximum relative velocity, in km/s
        #[arg(long = "max-velocity")]
        velocity_max: Option<String>,

        /// Minimum NEO diameter, in km
        #[arg(long = "min-diameter")]
        diameter_min: Option<String>,

        /// Maximum NEO diameter, in km
        #[arg(long = "max-diameter")]
        diameter_max: Option<String>,

        /// Match only (not-)hazardous NEOs: true or false
        #[arg(long)]
        hazardous: Option<String>,

        /// Maximum number of results (0 means unlimited)
        #[arg(long, short)]
        limit: Option<usize>,

        /// Write results to this .csv or .json file instead of stdout
        #[arg(long, short)]
        outfile: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let neos = load_neos(&cli.neofile)
        .with_context(|| format!("failed to load NEO catalog from {}", cli.neofile.display()))?;
    let approaches = load_approaches(&cli.cadfile).with_context(|| {
        format!(
            "failed to load close approaches from {}",
            cli.cadfile.display()
        )
    })?;
    let db = NeoDatabase::new(neos, approaches);

    match cli.command {
        Commands::Inspect {
            pdes,
            name,
            verbose,
        } => inspect(&db, pdes.as_deref(), name.as_deref(), verbose),
        Commands::Query {
            date,
            start_date,
            end_date,
            distance_min,
            distance_max,
            velocity_min,
            velocity_max,
            diameter_min,
            diameter_max,
            hazardous,
            limit,
            outfile,
        } => {
            let mut spec = QuerySpec::default();
            let criteria = [
                ("date", date),
                ("start_date", start_date),
                ("end_date", end_date),
                ("distance_min", distance_min),
                ("distance_max", distance_max),
                ("velocity_min", velocity_min),
                ("velocity_max", velocity_max),
                ("diameter_min", diameter_min),
                ("diameter_max", diameter_max),
                ("hazardous", hazardous),
            ];
            for (name, raw) in criteria {
                if let Some(raw) = raw {
                    spec.set(name, &raw)?;
                }
            }
            query(&db, &spec, limit, outfile.as_deref())
        }
    }
}

fn inspect(db: &NeoDatabase, pdes: Option<&str>, name: Option<&str>, verbose: bool) -> Result<()> {
    let neo = match (pdes, name) {
        (Some(pdes), _) => db.get_neo_by_designation(pdes),
        (None, Some(name)) => db.get_neo_by_name(name),
        (None, None) => bail!("pass --pdes or --name to pick an NEO"),
    };
    let Some(neo) = neo else {
        println!("{}", "No matching NEO found in the catalog.".yellow());
        return Ok(());
    };

    println!("{}", neo.to_string().bold());
    if verbose {
        for &id in neo.approaches() {
            println!("- {}", db.approach(id));
        }
    }
    Ok(())
}

fn query(
    db: &NeoDatabase,
    spec: &QuerySpec,
    max_results: Option<usize>,
    outfile: Option<&std::path::Path>,
) -> Result<()> {
    let filters = create_filters(spec);

    // Unbounded stdout output of a large data set helps nobody; writing to a
    // file keeps whatever the caller asked for.
    let cap = match (outfile, max_results) {
        (None, None) => Some(DEFAULT_STDOUT_LIMIT),
        (_, n) => n,
    };
    let matches = limit(db.query(&filters), cap);

    match outfile {
        None => {
            let mut shown = 0usize;
            for approach in matches {
                match db.neo_for(approach) {
                    Some(neo) => println!(
                        "At {}, '{}' approaches Earth at a distance of {} au and a velocity of {} km/s.",
                        approach.time_str(),
                        neo.fullname(),
                        approach.distance().map_or("unknown".to_string(), |v| v.to_string()),
                        approach.velocity().map_or("unknown".to_string(), |v| v.to_string()),
                    ),
                    None => println!("{approach}"),
                }
                shown += 1;
            }
            if shown == 0 {
                println!("{}", "No close approaches match the given criteria.".yellow());
            }
            Ok(())
        }
        Some(path) => {
            let records: Vec<ApproachRecord> = matches
                .map(|approach| ApproachRecord::for_approach(db, approach))
                .collect();
            let count = records.len();
            match path.extension().and_then(|e| e.to_str()) {
                Some("csv") => write_to_csv(&records, path)?,
                Some("json") => write_to_json(&records, path)?,
                _ => bail!(
                    "unsupported output format for {} (expected .csv or .json)",
                    path.display()
                ),
            }
            println!(
                "Wrote {} close approach(es) to {}.",
                count.to_string().green(),
                path.display()
            );
            Ok(())
        }
    }
}
