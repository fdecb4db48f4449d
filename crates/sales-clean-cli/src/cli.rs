//! CLI argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use sales_clean::{DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};

/// Clean a raw sales CSV: normalize column names, trim text fields and drop
/// rows with missing or negative price/qty.
#[derive(Parser)]
#[command(name = "sales-clean")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the raw data file (CSV)
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_INPUT_PATH)]
    pub input: PathBuf,

    /// Output path for the cleaned data
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Also write a JSON report of what each stage did
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Number of cleaned rows to preview when done
    #[arg(long, default_value = "5")]
    pub preview_rows: usize,

    /// Run every stage but don't write the output file
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["sales-clean"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("data/raw/sales_data_raw.csv"));
        assert_eq!(cli.output, PathBuf::from("data/processed/sales_data_clean.csv"));
        assert_eq!(cli.preview_rows, 5);
        assert!(cli.report.is_none());
        assert!(!cli.dry_run);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "sales-clean",
            "-i",
            "in.csv",
            "--output",
            "out.csv",
            "--report",
            "report.json",
            "--preview-rows",
            "2",
            "--dry-run",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.input, PathBuf::from("in.csv"));
        assert_eq!(cli.output, PathBuf::from("out.csv"));
        assert_eq!(cli.report, Some(PathBuf::from("report.json")));
        assert_eq!(cli.preview_rows, 2);
        assert!(cli.dry_run);
        assert!(cli.verbose);
    }
}
