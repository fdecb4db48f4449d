//! Cleaning transforms applied between load and save.

mod engine;
mod operations;
mod stages;

pub use engine::{normalize_column_name, CleaningEngine, REQUIRED_COLUMNS, TEXT_COLUMNS};
pub use operations::{DropReason, RowAudit, Stage, StageSummary, Transform};
pub use stages::{drop_missing, normalize_column_names, remove_invalid_rows, trim_text_fields};
