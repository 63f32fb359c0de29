use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Days, NaiveDate};
use rounds_core::model::{AddOutcome, TopicCatalog};
use rounds_core::time::{Clock, parse_iso_date};
use storage::json::DEFAULT_FILE_NAME;
use storage::repository::Storage;

#[derive(Debug, Clone)]
struct Args {
    data_file: PathBuf,
    days: u32,
    rounds_per_day: u32,
    today: Option<NaiveDate>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDataFile { raw: String },
    InvalidDays { raw: String },
    InvalidRounds { raw: String },
    InvalidToday { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDataFile { raw } => write!(f, "invalid --data value: {raw}"),
            ArgsError::InvalidDays { raw } => write!(f, "invalid --days value: {raw}"),
            ArgsError::InvalidRounds { raw } => write!(f, "invalid --rounds value: {raw}"),
            ArgsError::InvalidToday { raw } => {
                write!(f, "invalid --today value (expected YYYY-MM-DD): {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut data_file = std::env::var("ROUNDS_DATA_FILE")
            .map_or_else(|_| PathBuf::from(DEFAULT_FILE_NAME), PathBuf::from);
        let mut days = std::env::var("ROUNDS_SEED_DAYS")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(7);
        let mut rounds_per_day = 2;
        let mut today = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data" => {
                    let value = require_value(&mut args, "--data")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDataFile { raw: value });
                    }
                    data_file = PathBuf::from(value);
                }
                "--days" => {
                    let value = require_value(&mut args, "--days")?;
                    days = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidDays { raw: value.clone() })?;
                }
                "--rounds" => {
                    let value = require_value(&mut args, "--rounds")?;
                    rounds_per_day = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidRounds { raw: value.clone() })?;
                }
                "--today" => {
                    let value = require_value(&mut args, "--today")?;
                    let parsed = parse_iso_date(&value)
                        .map_err(|_| ArgsError::InvalidToday { raw: value.clone() })?;
                    today = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            data_file,
            days,
            rounds_per_day,
            today,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --data <path>             Progress file (default: progress.json)");
    eprintln!("  --days <n>                Number of past days to fill (default: 7)");
    eprintln!("  --rounds <n>              Rounds recorded per day (default: 2)");
    eprintln!("  --today <YYYY-MM-DD>      Fixed current date for deterministic seeding");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  ROUNDS_DATA_FILE, ROUNDS_SEED_DAYS");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let catalog = Arc::new(TopicCatalog::default());
    let storage = Storage::json_file(&args.data_file, Arc::clone(&catalog));
    let today = args.today.unwrap_or_else(|| Clock::default_clock().today());

    let mut state = storage.progress.load().await?;
    let span = u64::from(args.days.saturating_sub(1));
    let start = today.checked_sub_days(Days::new(span)).unwrap_or(today);
    let mut clock = Clock::fixed(start);
    let mut recorded = 0u32;
    for day in 0..args.days {
        // Walk the catalog with a stride so a short seed still touches several areas.
        let topic = &catalog.topics()[(day as usize * 5) % catalog.len()];
        let outcome =
            state.add_rounds(&catalog, topic, i64::from(args.rounds_per_day), clock.today())?;
        if matches!(outcome, AddOutcome::Applied { .. }) {
            recorded += 1;
        }
        clock.advance_days(1);
    }
    storage.progress.save(&state).await?;

    println!(
        "Seeded {} log entries ({} rounds total) into {}",
        recorded,
        state.total_rounds(),
        args.data_file.display()
    );

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
