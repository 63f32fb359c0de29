use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;
use rounds_core::model::{ResetPolicy, SettingsError, TrackerSettings, TrackerSettingsDraft};
use rounds_core::time::parse_iso_date;
use storage::json::DEFAULT_FILE_NAME;

pub const DATA_FILE_ENV: &str = "ROUNDS_DATA_FILE";
pub const MIN_BAR_PCT_ENV: &str = "ROUNDS_MIN_BAR_PCT";
pub const CLEAR_LOG_ENV: &str = "ROUNDS_CLEAR_LOG_ON_RESET";

/// Entries printed by `log` when `--limit` is not given.
pub const DEFAULT_LOG_LIMIT: usize = 20;

#[derive(Debug)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    MissingArgument { command: &'static str, name: &'static str },
    UnexpectedArgument { command: &'static str, raw: String },
    UnknownArg(String),
    UnknownCommand(String),
    FlagNotAllowed { command: &'static str, flag: &'static str },
    InvalidDataFile { raw: String },
    InvalidDelta { raw: String },
    InvalidDate { raw: String },
    InvalidLimit { raw: String },
    InvalidEnv { var: &'static str, raw: String },
    Settings(SettingsError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingArgument { command, name } => {
                write!(f, "{command}: missing <{name}>")
            }
            ArgsError::UnexpectedArgument { command, raw } => {
                write!(f, "{command}: unexpected argument: {raw}")
            }
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::FlagNotAllowed { command, flag } => {
                write!(f, "{flag} is not valid for {command}")
            }
            ArgsError::InvalidDataFile { raw } => write!(f, "invalid --data value: {raw}"),
            ArgsError::InvalidDelta { raw } => {
                write!(f, "invalid <delta> (expected a whole number): {raw}")
            }
            ArgsError::InvalidDate { raw } => {
                write!(f, "invalid --date value (expected YYYY-MM-DD): {raw}")
            }
            ArgsError::InvalidLimit { raw } => write!(f, "invalid --limit value: {raw}"),
            ArgsError::InvalidEnv { var, raw } => write!(f, "invalid {var} value: {raw}"),
            ArgsError::Settings(err) => write!(f, "invalid settings: {err}"),
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

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ui,
    Add {
        topic: String,
        delta: i64,
        date: Option<NaiveDate>,
    },
    Reset {
        clear_log: bool,
    },
    Show,
    Log {
        limit: usize,
    },
    Export {
        path: PathBuf,
        bom: bool,
        csv: bool,
    },
    Import {
        path: PathBuf,
    },
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandKind {
    Ui,
    Add,
    Reset,
    Show,
    Log,
    Export,
    Import,
}

impl CommandKind {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "add" => Some(Self::Add),
            "reset" => Some(Self::Reset),
            "show" => Some(Self::Show),
            "log" => Some(Self::Log),
            "export" => Some(Self::Export),
            "import" => Some(Self::Import),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Ui => "ui",
            Self::Add => "add",
            Self::Reset => "reset",
            Self::Show => "show",
            Self::Log => "log",
            Self::Export => "export",
            Self::Import => "import",
        }
    }

    fn allows(self, flag: &'static str) -> bool {
        matches!(
            (self, flag),
            (Self::Add, "--date")
                | (Self::Reset, "--clear-log")
                | (Self::Log, "--limit")
                | (Self::Export, "--bom" | "--csv")
        )
    }
}

/// Subcommand-specific flags gathered before the command is assembled.
#[derive(Default)]
struct Flags {
    date: Option<String>,
    clear_log: bool,
    limit: Option<String>,
    bom: bool,
    csv: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub data_file: PathBuf,
    pub settings: TrackerSettings,
    pub command: Command,
}

impl Args {
    /// Parse command-line arguments (without the program name).
    ///
    /// `env` looks up configuration variables; flags take precedence over it.
    ///
    /// # Errors
    ///
    /// Returns `ArgsError` for unknown, missing or malformed arguments and for
    /// invalid environment values.
    pub fn parse(
        argv: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut data_file = env(DATA_FILE_ENV)
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_FILE_NAME), PathBuf::from);
        let settings = settings_from_env(&env)?;

        let mut args = argv.into_iter().peekable();

        // Default behavior: launching UI when no subcommand is provided.
        let kind = match args.peek().map(String::as_str) {
            None => CommandKind::Ui,
            Some(first) if first.starts_with('-') => CommandKind::Ui,
            Some(first) => {
                let kind = CommandKind::from_arg(first)
                    .ok_or_else(|| ArgsError::UnknownCommand(first.to_string()))?;
                args.next();
                kind
            }
        };

        let mut flags = Flags::default();
        let mut positional = Vec::new();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--help" | "-h" => {
                    return Ok(Self {
                        data_file,
                        settings,
                        command: Command::Help,
                    });
                }
                "--data" => {
                    let value = require_value(&mut args, "--data")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDataFile { raw: value });
                    }
                    data_file = PathBuf::from(value);
                }
                "--date" => {
                    ensure_allowed(kind, "--date")?;
                    flags.date = Some(require_value(&mut args, "--date")?);
                }
                "--limit" => {
                    ensure_allowed(kind, "--limit")?;
                    flags.limit = Some(require_value(&mut args, "--limit")?);
                }
                "--clear-log" => {
                    ensure_allowed(kind, "--clear-log")?;
                    flags.clear_log = true;
                }
                "--bom" => {
                    ensure_allowed(kind, "--bom")?;
                    flags.bom = true;
                }
                "--csv" => {
                    ensure_allowed(kind, "--csv")?;
                    flags.csv = true;
                }
                // Negative deltas such as `-1` are positional.
                other if other.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ => positional.push(arg),
            }
        }

        let command = build_command(kind, positional, flags)?;
        Ok(Self {
            data_file,
            settings,
            command,
        })
    }
}

fn ensure_allowed(kind: CommandKind, flag: &'static str) -> Result<(), ArgsError> {
    if kind.allows(flag) {
        Ok(())
    } else {
        Err(ArgsError::FlagNotAllowed {
            command: kind.name(),
            flag,
        })
    }
}

fn build_command(
    kind: CommandKind,
    positional: Vec<String>,
    flags: Flags,
) -> Result<Command, ArgsError> {
    let command = kind.name();
    let mut positional = positional.into_iter();
    let mut take = |name: &'static str| {
        positional
            .next()
            .ok_or(ArgsError::MissingArgument { command, name })
    };

    let parsed = match kind {
        CommandKind::Ui => Command::Ui,
        CommandKind::Show => Command::Show,
        CommandKind::Reset => Command::Reset {
            clear_log: flags.clear_log,
        },
        CommandKind::Add => {
            let topic = take("topic")?;
            let raw_delta = take("delta")?;
            let delta = raw_delta
                .trim()
                .parse::<i64>()
                .map_err(|_| ArgsError::InvalidDelta { raw: raw_delta.clone() })?;
            let date = flags
                .date
                .map(|raw| parse_iso_date(&raw).map_err(|_| ArgsError::InvalidDate { raw }))
                .transpose()?;
            Command::Add { topic, delta, date }
        }
        CommandKind::Log => {
            let limit = match flags.limit {
                Some(raw) => raw
                    .parse::<usize>()
                    .map_err(|_| ArgsError::InvalidLimit { raw })?,
                None => DEFAULT_LOG_LIMIT,
            };
            Command::Log { limit }
        }
        CommandKind::Export => Command::Export {
            path: PathBuf::from(take("path")?),
            bom: flags.bom,
            csv: flags.csv,
        },
        CommandKind::Import => Command::Import {
            path: PathBuf::from(take("path")?),
        },
    };

    if let Some(extra) = positional.next() {
        return Err(ArgsError::UnexpectedArgument {
            command,
            raw: extra,
        });
    }
    Ok(parsed)
}

fn settings_from_env(env: &impl Fn(&str) -> Option<String>) -> Result<TrackerSettings, ArgsError> {
    let mut draft = TrackerSettingsDraft::new();
    if let Some(raw) = env(MIN_BAR_PCT_ENV) {
        let pct = raw.trim().parse::<f64>().map_err(|_| ArgsError::InvalidEnv {
            var: MIN_BAR_PCT_ENV,
            raw: raw.clone(),
        })?;
        draft.min_nonzero_pct = Some(pct);
    }
    if let Some(raw) = env(CLEAR_LOG_ENV) {
        let policy = raw.parse::<ResetPolicy>().map_err(|_| ArgsError::InvalidEnv {
            var: CLEAR_LOG_ENV,
            raw: raw.clone(),
        })?;
        draft.reset_policy = Some(policy);
    }
    draft.validate().map_err(ArgsError::Settings)
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [ui]                              # desktop UI (default)");
    eprintln!("  cargo run -p app -- add <topic> <delta> [--date YYYY-MM-DD]");
    eprintln!("  cargo run -p app -- reset [--clear-log]");
    eprintln!("  cargo run -p app -- show");
    eprintln!("  cargo run -p app -- log [--limit <n>]");
    eprintln!("  cargo run -p app -- export <path> [--bom] [--csv]");
    eprintln!("  cargo run -p app -- import <path>");
    eprintln!();
    eprintln!("Global options:");
    eprintln!("  --data <path>    Progress file (default: {DEFAULT_FILE_NAME})");
    eprintln!("  -h, --help       Show this help");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {DATA_FILE_ENV}, {MIN_BAR_PCT_ENV}, {CLEAR_LOG_ENV}, RUST_LOG");
}
