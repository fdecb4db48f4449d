//! Example: Run the cleaning pipeline on a raw sales file and print what each stage did.
//!
//! Usage:
//!   cargo run --example clean -- <input.csv> <output.csv>

use std::env;

use sales_clean::{CleanConfig, Pipeline, Writer};

fn main() -> sales_clean::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: cargo run --example clean -- <input.csv> <output.csv>");
        std::process::exit(1);
    }

    let config = CleanConfig::new()
        .with_input(&args[1])
        .with_output(&args[2]);
    let pipeline = Pipeline::with_config(config);

    let report = pipeline.run_with_progress(|stage| println!("{}", stage.label()))?;

    println!();
    println!("## Source");
    println!("  File: {}", report.source.file);
    println!("  Hash: {}", report.source.hash);
    println!("  Rows: {}", report.rows_in);
    println!();

    println!("## Stages");
    for summary in &report.stages {
        println!(
            "  {:20} {:>6} -> {:<6} changed={}",
            summary.transform.name(),
            summary.rows_before,
            summary.rows_after,
            summary.values_changed
        );
        for audit in &summary.row_audits {
            println!(
                "    row {:>5}: {:?} {} = '{}'",
                audit.row, audit.reason, audit.column, audit.value
            );
        }
    }
    println!();

    println!("## First rows");
    print!("{}", Writer::new().render(&report.table.head(5))?);

    Ok(())
}
