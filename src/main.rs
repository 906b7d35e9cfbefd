mod config;
mod engine;
mod models;
mod normalize;
mod storage;
mod types;

use std::io::{stderr, stdin, stdout, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::config::{parse_args, Command, ImportConfig, USAGE};
use crate::engine::{ImportError, Importer};

const RULE: &str = "============================================================";

fn main() -> ExitCode {
    let config = match parse_args(std::env::args().skip(1)) {
        Ok(Command::Import(config)) => config,
        Ok(Command::Help) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(error) => {
            eprintln!("{error}");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    setup_logging(config.log_level);

    let mut output = stdout().lock();

    match run(&config, &mut output) {
        Ok(exit_code) => exit_code,
        Err(error) => {
            error!("Import failed: {error}");
            report_failure(&mut output, &error);
            ExitCode::FAILURE
        }
    }
}

fn run<W: Write>(config: &ImportConfig, output: &mut W) -> Result<ExitCode, ImportError> {
    writeln!(output, "{RULE}")?;
    writeln!(output, "Customer Analytics - CSV Data Import Script")?;
    writeln!(output, "{RULE}")?;
    writeln!(output)?;

    if !config.csv_path.exists() {
        return Err(ImportError::InputNotFound(config.csv_path.clone()));
    }

    //NOTE: A closed stdin reads as an empty answer, so EOF declines and exits 0 rather than aborting
    if !confirm_import(stdin().lock(), output, &config.csv_path)? {
        writeln!(output, "Import cancelled.")?;
        return Ok(ExitCode::SUCCESS);
    }

    let timer = Instant::now();
    let summary = Importer::new(config.clone()).run(output)?;
    let duration = timer.elapsed();

    info!("Imported {} rows with {} errors in: {duration:?}", summary.imported, summary.errors);

    writeln!(output, "\nNext steps:")?;
    writeln!(output, "1. Run the ETL script: sqlite3 {} < 02_etl_data_preparation.sql", config.database.path.display())?;
    writeln!(output, "2. Calculate RFM: run the RFM pipeline against the raw_transactions table")?;
    output.flush()?;

    Ok(ExitCode::SUCCESS)
}

/// Asks for confirmation, only an answer of `y` (any case) proceeds.
fn confirm_import<R: BufRead, W: Write>(mut input: R, output: &mut W, csv_path: &Path) -> Result<bool, ImportError> {
    write!(output, "Import data from '{}'? (y/n): ", csv_path.display())?;
    output.flush()?;

    let mut response = String::new();
    input.read_line(&mut response)?;

    Ok(response.trim_end_matches(['\r', '\n']).eq_ignore_ascii_case("y"))
}

fn report_failure<W: Write>(output: &mut W, error: &ImportError) {
    let report = match error {
        ImportError::InputNotFound(_) => format!("Error: {error}\nPlease ensure the file is in the current directory."),
        ImportError::Storage(error) => format!("Database error: {error}"),
        _ => format!("Unexpected error: {error}")
    };

    //NOTE: If stdout itself is broken there is nowhere left to report to, the log line above still reaches stderr
    let _ = writeln!(output, "{report}").and_then(|_| output.flush());
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the import report and the confirmation prompt, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}
