//! Clean command - run the pipeline and show what it did.

use std::io::Write;
use std::path::Path;

use colored::Colorize;
use sales_clean::{CleanConfig, CleanReport, Pipeline, Table};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::cli::Cli;

pub fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CleanConfig::new()
        .with_input(&cli.input)
        .with_output(&cli.output)
        .with_dry_run(cli.dry_run);
    debug!(?config, "starting clean");
    let pipeline = Pipeline::with_config(config);

    // Reserve the report before any output is written, so a bad report path
    // fails the run up front.
    let report_file = cli.report.as_deref().map(reserve_report).transpose()?;

    let report = pipeline.run_with_progress(|stage| {
        println!("{}", stage.label().cyan());
    })?;

    println!();
    print_summary(&report, cli.verbose);

    if let (Some(path), Some(mut file)) = (cli.report.as_deref(), report_file) {
        file.write_all(report.to_json()?.as_bytes())
            .map_err(|e| format!("Failed to write report '{}': {}", path.display(), e))?;
        file.persist(path)
            .map_err(|e| format!("Failed to write report '{}': {}", path.display(), e.error))?;
        println!(
            "{} {}",
            "Report saved to".green().bold(),
            path.display().to_string().white()
        );
    }

    println!();
    match report.output {
        Some(ref path) => println!(
            "{} First few rows of {}:",
            "Cleaning complete.".green().bold(),
            path.display().to_string().white()
        ),
        None => println!(
            "{} Nothing written. First few rows:",
            "Dry run complete.".yellow().bold()
        ),
    }
    print_preview(&report.table.head(cli.preview_rows));

    Ok(())
}

/// Temporary file next to the report path, persisted once the run succeeds.
fn reserve_report(path: &Path) -> Result<NamedTempFile, String> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    NamedTempFile::new_in(dir)
        .map_err(|e| format!("Failed to create report '{}': {}", path.display(), e))
}

/// Row counts per stage, plus dropped rows when verbose.
fn print_summary(report: &CleanReport, verbose: bool) {
    println!(
        "Read {} rows from {}",
        report.rows_in.to_string().white().bold(),
        report.source.file.white()
    );

    for summary in &report.stages {
        let dropped = summary.rows_dropped();
        let dropped_text = if dropped > 0 {
            format!("-{}", dropped).red()
        } else {
            "0".normal()
        };
        println!(
            "  {:20} {:>6} rows  dropped {:>5}  changed {}",
            summary.transform.name(),
            summary.rows_after,
            dropped_text,
            summary.values_changed.to_string().blue()
        );

        if verbose {
            for audit in &summary.row_audits {
                println!(
                    "    {} row {} ({:?} {} '{}')",
                    "•".dimmed(),
                    audit.row,
                    audit.reason,
                    audit.column.cyan(),
                    audit.value
                );
            }
        }
    }

    println!(
        "Kept {} of {} rows",
        report.rows_out.to_string().green().bold(),
        report.rows_in
    );
}

/// Print a table with aligned columns and each row's source index.
fn print_preview(table: &Table) {
    let rendered: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect();

    let index_width = table
        .source_rows()
        .iter()
        .map(|idx| idx.to_string().len())
        .max()
        .unwrap_or(1);
    let widths: Vec<usize> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            rendered
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = table
        .columns()
        .iter()
        .zip(&widths)
        .map(|(name, w)| format!("{:>w$}", name, w = *w))
        .collect();
    println!(
        "{:iw$}  {}",
        "",
        header.join("  ").yellow().bold(),
        iw = index_width
    );

    for (idx, row) in table.source_rows().iter().zip(&rendered) {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:>w$}", cell, w = *w))
            .collect();
        println!(
            "{:>iw$}  {}",
            idx.to_string().dimmed(),
            cells.join("  "),
            iw = index_width
        );
    }

    if table.is_empty() {
        println!("{}", "(no rows)".dimmed());
    }
}
