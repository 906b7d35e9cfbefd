use std::path::PathBuf;

use thiserror::Error;
use tracing::level_filters::LevelFilter;

pub const DEFAULT_CSV_FILE: &str = "online_retail_II.csv";
pub const DEFAULT_DATABASE_FILE: &str = "customer_analytics.db";
pub const BATCH_SIZE: usize = 1000;
pub const ERROR_REPORT_LIMIT: usize = 10;

pub const USAGE: &str = "Usage: retail-import [input.csv] [database.db] [log_level]\n\
    Defaults: input.csv = online_retail_II.csv, database.db = customer_analytics.db\n\
    Available log levels: error, warn, info, debug, trace (default: error)";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Expected at most 3 arguments but received {0}")]
    TooManyArguments(usize)
}

/// Connection parameters for the target database.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub path: PathBuf
}

/// Everything a single import run needs, resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportConfig {
    pub csv_path: PathBuf,
    pub database: DatabaseConfig,
    /// Records per insert, a value of 0 is treated as 1.
    pub batch_size: usize,
    /// Rejected rows whose reason is printed, the rest are only logged.
    pub error_report_limit: usize,
    pub log_level: LevelFilter
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV_FILE),
            database: DatabaseConfig { path: PathBuf::from(DEFAULT_DATABASE_FILE) },
            batch_size: BATCH_SIZE,
            error_report_limit: ERROR_REPORT_LIMIT,
            log_level: LevelFilter::ERROR
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Command {
    Import(ImportConfig),
    Help
}

/// Resolves positional arguments (program name excluded) into a command.
pub fn parse_args<I>(args: I) -> Result<Command, ConfigError>
where
    I: IntoIterator<Item = String>,
{
    //NOTE: Three optional positionals do not warrant pulling in a full argument parser
    let args: Vec<String> = args.into_iter().collect();

    if args.iter().any(|arg| arg == "-h" || arg == "--help") {
        return Ok(Command::Help);
    }

    if args.len() > 3 {
        return Err(ConfigError::TooManyArguments(args.len()));
    }

    let mut config = ImportConfig::default();
    let mut args = args.into_iter();

    if let Some(csv_path) = args.next() {
        config.csv_path = PathBuf::from(csv_path);
    }

    if let Some(database_path) = args.next() {
        config.database.path = PathBuf::from(database_path);
    }

    if let Some(level) = args.next() {
        config.log_level = parse_log_level(&level);
    }

    Ok(Command::Import(config))
}

pub fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}
