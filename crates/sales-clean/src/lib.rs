//! Batch cleaning pipeline for tabular sales records.
//!
//! A raw comma-delimited file is loaded into a [`Table`], passed through a
//! fixed sequence of cleaning transforms and written back out.
//!
//! # Stages
//!
//! 1. Load the raw file
//! 2. Normalize column names (trimmed, lowercase, underscores)
//! 3. Strip whitespace from `prodname` and `category`
//! 4. Drop rows missing `price` or `qty`
//! 5. Drop rows with a negative `price` or `qty`
//! 6. Save the cleaned file
//!
//! # Example
//!
//! ```no_run
//! use sales_clean::{CleanConfig, Pipeline};
//!
//! let config = CleanConfig::new()
//!     .with_input("data/raw/sales_data_raw.csv")
//!     .with_output("data/processed/sales_data_clean.csv");
//! let report = Pipeline::with_config(config).run().unwrap();
//!
//! println!("Kept {} of {} rows", report.rows_out, report.rows_in);
//! ```

pub mod error;
pub mod input;
pub mod output;
pub mod table;
pub mod transform;

mod pipeline;

pub use crate::pipeline::{
    load, save, CleanConfig, CleanReport, Pipeline, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH,
};
pub use error::{CleanError, ErrorKind, Result};
pub use input::{Parser, ParserConfig, SourceMetadata};
pub use output::{Writer, WriterConfig};
pub use table::{Table, Value};
pub use transform::{
    drop_missing, normalize_column_names, remove_invalid_rows, trim_text_fields, CleaningEngine,
    DropReason, RowAudit, Stage, StageSummary, Transform,
};
