use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use neows::criteria::{Criteria, create_filters};
use neows::database::NeoDatabase;
use neows::extract::{OnMalformed, load_approaches, load_neos};
use neows::limit::limit;
use neows::model::LinkedApproach;
use neows::settings::Settings;
use neows::write::{write_to_csv, write_to_json};
use neows::{NeowsError, Result};

/// Explore past and future close approaches of near-Earth objects
#[derive(Parser, Debug)]
#[command(name = "neows")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Path to the csv file of near-Earth objects
    #[arg(long, global = true)]
    neofile: Option<PathBuf>,
    /// Path to the json file of close approaches
    #[arg(long, global = true)]
    cadfile: Option<PathBuf>,
    /// Skip rows of the data files that cannot be parsed instead of failing
    #[arg(long, global = true)]
    skip_malformed: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Inspect a single near-Earth object
    Inspect {
        #[command(flatten)]
        target: InspectTarget,
        /// Also list the close approaches of the object
        #[arg(short, long)]
        verbose: bool,
    },
    /// Query close approaches matching the given criteria
    Query(QueryArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct InspectTarget {
    /// Primary designation of the object
    #[arg(short, long)]
    pdes: Option<String>,
    /// IAU name of the object
    #[arg(short, long)]
    name: Option<String>,
}

#[derive(Args, Debug)]
struct QueryArgs {
    /// Only approaches on this date (YYYY-MM-DD)
    #[arg(short, long)]
    date: Option<NaiveDate>,
    /// Only approaches on or after this date (YYYY-MM-DD)
    #[arg(short, long)]
    start_date: Option<NaiveDate>,
    /// Only approaches on or before this date (YYYY-MM-DD)
    #[arg(short, long)]
    end_date: Option<NaiveDate>,
    /// Minimum approach distance in au
    #[arg(long = "min-distance")]
    distance_min: Option<f64>,
    /// Maximum approach distance in au
    #[arg(long = "max-distance")]
    distance_max: Option<f64>,
    /// Minimum relative velocity in km/s
    #[arg(long = "min-velocity")]
    velocity_min: Option<f64>,
    /// Maximum relative velocity in km/s
    #[arg(long = "max-velocity")]
    velocity_max: Option<f64>,
    /// Minimum diameter of the object in km
    #[arg(long = "min-diameter")]
    diameter_min: Option<f64>,
    /// Maximum diameter of the object in km
    #[arg(long = "max-diameter")]
    diameter_max: Option<f64>,
    /// Only potentially hazardous objects
    #[arg(long, conflicts_with = "not_hazardous")]
    hazardous: bool,
    /// Only objects that are not potentially hazardous
    #[arg(long)]
    not_hazardous: bool,
    /// Maximum number of results, 0 for no limit
    #[arg(short, long)]
    limit: Option<usize>,
    /// Write results to a .csv or .json file instead of printing them
    #[arg(short, long)]
    outfile: Option<PathBuf>,
}

impl QueryArgs {
    fn criteria(&self) -> Criteria {
        Criteria {
            date: self.date,
            start_date: self.start_date,
            end_date: self.end_date,
            distance_min: self.distance_min,
            distance_max: self.distance_max,
            velocity_min: self.velocity_min,
            velocity_max: self.velocity_max,
            diameter_min: self.diameter_min,
            diameter_max: self.diameter_max,
            hazardous: match (self.hazardous, self.not_hazardous) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
        }
    }
    // --limit wins, printed results fall back to the configured default
    fn printed_limit(&self, default_limit: usize) -> Option<usize> {
        self.limit.or(Some(default_limit))
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    init_tracing(&settings.log_filter);
    if let Some(neofile) = cli.neofile {
        settings.neo_file = neofile;
    }
    if let Some(cadfile) = cli.cadfile {
        settings.cad_file = cadfile;
    }
    let on_malformed = if cli.skip_malformed || settings.skip_malformed {
        OnMalformed::Skip
    } else {
        OnMalformed::Fail
    };

    let database = NeoDatabase::new(
        load_neos(&settings.neo_file, on_malformed)?,
        load_approaches(&settings.cad_file, on_malformed)?,
    )?;
    match cli.command {
        Command::Inspect { target, verbose } => {
            inspect(&database, &target, verbose);
            Ok(())
        }
        Command::Query(args) => query(&database, &args, settings.default_limit),
    }
}

fn inspect(database: &NeoDatabase, target: &InspectTarget, verbose: bool) {
    let neo = match (&target.pdes, &target.name) {
        (Some(pdes), _) => database.get_neo_by_designation(pdes),
        (None, Some(name)) => database.get_neo_by_name(name),
        (None, None) => None,
    };
    let Some(neo) = neo else {
        println!("No matching NEOs exist in the database.");
        return;
    };
    println!("{neo}");
    if verbose {
        for linked in database.approaches_of(neo.designation()).into_iter().flatten() {
            println!("- {linked}");
        }
    }
}

enum Output {
    Csv(PathBuf),
    Json(PathBuf),
}

fn output_for(path: PathBuf) -> Result<Output> {
    let suffix = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match suffix.as_deref() {
        Some("csv") => Ok(Output::Csv(path)),
        Some("json") => Ok(Output::Json(path)),
        _ => Err(NeowsError::OutputFormat(path.display().to_string())),
    }
}

fn query(database: &NeoDatabase, args: &QueryArgs, default_limit: usize) -> Result<()> {
    // fail on a bad suffix before doing any work
    let output = args.outfile.clone().map(output_for).transpose()?;
    let filters = create_filters(&args.criteria());

    let Some(output) = output else {
        let mut printed = 0;
        for linked in limit(database.query(&filters), args.printed_limit(default_limit)) {
            println!("{}", linked?);
            printed += 1;
        }
        if printed == 0 {
            println!("No matching close approaches.");
        }
        return Ok(());
    };

    let results: Vec<LinkedApproach> = limit(database.query(&filters), args.limit).collect::<Result<_>>()?;
    let written = match output {
        Output::Csv(path) => write_to_csv(results, path)?,
        Output::Json(path) => write_to_json(results, path)?,
    };
    info!(written, "query complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_args(args: &[&str]) -> QueryArgs {
        let cli = Cli::try_parse_from(["neows", "query"].iter().chain(args)).unwrap();
        match cli.command {
            Command::Query(args) => args,
            other => panic!("expected a query, got {other:?}"),
        }
    }

    #[test]
    fn hazard_flags_map_to_three_states() {
        assert_eq!(query_args(&[]).criteria().hazardous, None);
        assert_eq!(query_args(&["--hazardous"]).criteria().hazardous, Some(true));
        assert_eq!(query_args(&["--not-hazardous"]).criteria().hazardous, Some(false));
        assert!(Cli::try_parse_from(["neows", "query", "--hazardous", "--not-hazardous"]).is_err());
    }

    #[test]
    fn query_options_fill_the_criteria() {
        let criteria = query_args(&["-s", "2020-01-01", "--max-distance", "0.1", "--min-diameter", "1.5"]).criteria();
        assert_eq!(
            criteria,
            Criteria {
                start_date: NaiveDate::from_ymd_opt(2020, 1, 1),
                distance_max: Some(0.1),
                diameter_min: Some(1.5),
                ..Default::default()
            }
        );
        assert!(Cli::try_parse_from(["neows", "query", "-d", "2020-Jan-01"]).is_err(), "dates are YYYY-MM-DD");
    }

    #[test]
    fn explicit_limit_wins_over_default() {
        assert_eq!(query_args(&[]).printed_limit(10), Some(10));
        assert_eq!(query_args(&["-l", "3"]).printed_limit(10), Some(3));
        assert_eq!(query_args(&["--limit", "0"]).printed_limit(10), Some(0), "0 disables limiting");
    }

    #[test]
    fn output_format_follows_suffix() {
        assert!(matches!(output_for(PathBuf::from("out.csv")), Ok(Output::Csv(_))));
        assert!(matches!(output_for(PathBuf::from("OUT.CSV")), Ok(Output::Csv(_))));
        assert!(matches!(output_for(PathBuf::from("out.Json")), Ok(Output::Json(_))));
        assert!(matches!(output_for(PathBuf::from("out.txt")), Err(NeowsError::OutputFormat(_))));
        assert!(matches!(output_for(PathBuf::from("out")), Err(NeowsError::OutputFormat(_))));
    }

    #[test]
    fn inspect_needs_exactly_one_target() {
        assert!(Cli::try_parse_from(["neows", "inspect"]).is_err());
        assert!(Cli::try_parse_from(["neows", "inspect", "-p", "433", "-n", "Eros"]).is_err());
        let cli = Cli::try_parse_from(["neows", "inspect", "--name", "Eros", "-v"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Inspect { target: InspectTarget { name: Some(ref n), pdes: None }, verbose: true } if n == "Eros"
        ));
    }
}
