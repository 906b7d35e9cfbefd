use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use anyhow::{anyhow, Result};
use rusqlite::Connection;
use tempfile::TempDir;

const HEADER: &str = "Invoice,StockCode,Description,Quantity,InvoiceDate,Price,Customer ID,Country";

fn run_import(csv_path: &Path, database_path: &Path, answer: &str) -> Result<Output> {
    let binary_path = env!("CARGO_BIN_EXE_retail-import");

    let mut child = Command::new(binary_path)
        .arg(csv_path)
        .arg(database_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let mut stdin = child.stdin.take().ok_or_else(|| anyhow!("child stdin unavailable"))?;

    //NOTE: The binary may exit before reading the answer (missing input), a broken pipe is expected then
    let _ = stdin.write_all(answer.as_bytes());
    drop(stdin);

    Ok(child.wait_with_output()?)
}

fn write_csv(directory: &TempDir, rows: &[&[u8]]) -> Result<PathBuf> {
    let path = directory.path().join("online_retail_II.csv");
    let mut contents = format!("{HEADER}\n").into_bytes();

    for row in rows {
        contents.extend_from_slice(row);
        contents.push(b'\n');
    }

    fs::write(&path, contents)?;

    Ok(path)
}

fn stored_rows(database_path: &Path) -> Result<i64> {
    let connection = Connection::open(database_path)?;

    Ok(connection.query_row("SELECT COUNT(*) FROM raw_transactions", [], |row| row.get(0))?)
}

#[test]
fn test_cli_imports_sample_file() -> Result<()> {
    let directory = TempDir::new()?;
    let database_path = directory.path().join("analytics.db");
    let sample_path = Path::new("samples").join("sample.csv");

    let output = run_import(&sample_path, &database_path, "y\n")?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.contains("Customer Analytics - CSV Data Import Script"));
    assert!(stdout.contains("Import completed!"));
    assert!(stdout.contains("Total rows imported: 9"));
    assert!(stdout.contains("Errors encountered: 0"));
    assert!(stdout.contains("Total records in database: 9"));
    assert!(stdout.contains("Next steps:"));
    assert_eq!(stored_rows(&database_path)?, 9);

    let connection = Connection::open(&database_path)?;
    let minimum_price: f64 = connection.query_row("SELECT MIN(price) FROM raw_transactions", [], |row| row.get(0))?;
    let customer_id: String = connection.query_row(
        "SELECT customer_id FROM raw_transactions WHERE stock_code = '85048'",
        [],
        |row| row.get(0)
    )?;
    let day_first_date: String = connection.query_row(
        "SELECT invoice_date FROM raw_transactions WHERE stock_code = '48173C'",
        [],
        |row| row.get(0)
    )?;

    assert!((minimum_price - 0.01).abs() < f64::EPSILON);
    assert_eq!(customer_id, "13085");
    assert!(day_first_date.starts_with("2009-12-13 09:06:00"));

    Ok(())
}

#[test]
fn test_cli_counts_undecodable_rows_as_errors() -> Result<()> {
    let directory = TempDir::new()?;
    let database_path = directory.path().join("analytics.db");
    let csv_path = write_csv(&directory, &[
        b"536365,85123A,WHITE HANGING HEART T-LIGHT HOLDER,6,12/1/2010 8:26,2.55,17850.0,United Kingdom",
        b"536365,71053,WHITE METAL \xff LANTERN,6,12/1/2010 8:26,3.39,17850.0,United Kingdom",
        b"536366,22633,HAND WARMER UNION JACK,6,12/1/2010 8:28,1.85,17850.0,United Kingdom"
    ])?;

    let output = run_import(&csv_path, &database_path, "y\n")?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.contains("Error processing row:"));
    assert!(stdout.contains("Total rows imported: 2"));
    assert!(stdout.contains("Errors encountered: 1"));
    assert_eq!(stored_rows(&database_path)?, 2);

    Ok(())
}

#[test]
fn test_cli_reimport_duplicates_rows() -> Result<()> {
    let directory = TempDir::new()?;
    let database_path = directory.path().join("analytics.db");
    let csv_path = write_csv(&directory, &[
        b"536365,85123A,WHITE HANGING HEART T-LIGHT HOLDER,6,12/1/2010 8:26,2.55,17850.0,United Kingdom"
    ])?;

    assert!(run_import(&csv_path, &database_path, "y\n")?.status.success());
    assert!(run_import(&csv_path, &database_path, "Y\n")?.status.success());

    assert_eq!(stored_rows(&database_path)?, 2);

    Ok(())
}

#[test]
fn test_cli_fails_fast_on_missing_input() -> Result<()> {
    let directory = TempDir::new()?;
    let database_path = directory.path().join("analytics.db");

    let output = run_import(&directory.path().join("missing.csv"), &database_path, "y\n")?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8(output.stdout)?.contains("not found!"));
    assert!(!database_path.exists());

    Ok(())
}

#[test]
fn test_cli_cancels_when_not_confirmed() -> Result<()> {
    let directory = TempDir::new()?;
    let database_path = directory.path().join("analytics.db");
    let csv_path = write_csv(&directory, &[
        b"536365,85123A,WHITE HANGING HEART T-LIGHT HOLDER,6,12/1/2010 8:26,2.55,17850.0,United Kingdom"
    ])?;

    for answer in ["n\n", "yes\n", ""] {
        let output = run_import(&csv_path, &database_path, answer)?;

        assert_eq!(output.status.code(), Some(0));
        assert!(String::from_utf8(output.stdout)?.contains("Import cancelled."));
        assert!(!database_path.exists());
    }

    Ok(())
}

#[test]
fn test_cli_reports_database_errors() -> Result<()> {
    let directory = TempDir::new()?;
    let database_path = directory.path().join("missing").join("analytics.db");
    let csv_path = write_csv(&directory, &[
        b"536365,85123A,WHITE HANGING HEART T-LIGHT HOLDER,6,12/1/2010 8:26,2.55,17850.0,United Kingdom"
    ])?;

    let output = run_import(&csv_path, &database_path, "y\n")?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8(output.stdout)?.contains("Database error:"));

    Ok(())
}

#[test]
fn test_cli_rejects_too_many_arguments() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_retail-import");

    let output = Command::new(binary_path)
        .args(["a.csv", "b.db", "info", "extra"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8(output.stderr)?.contains("Usage:"));

    Ok(())
}
