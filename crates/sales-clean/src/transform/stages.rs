//! The cleaning stages as plain `Table -> Table` functions.
//!
//! Each function consumes its input and returns a new table. Use
//! [`CleaningEngine`] directly when the per-stage summary is needed.

use crate::error::Result;
use crate::table::Table;

use super::engine::CleaningEngine;
use super::operations::Transform;

fn run(transform: Transform, table: Table) -> Result<Table> {
    CleaningEngine::new()
        .apply(transform, table)
        .map(|(table, _)| table)
}

/// Trim, lowercase and underscore every column name.
///
/// Fails with [`CleanError::ColumnCollision`](crate::CleanError::ColumnCollision)
/// when two columns end up with the same name.
pub fn normalize_column_names(table: Table) -> Result<Table> {
    run(Transform::NormalizeColumns, table)
}

/// Strip whitespace from `prodname` and `category` if present.
///
/// Numbers in those columns become text; missing values stay missing.
pub fn trim_text_fields(table: Table) -> Table {
    CleaningEngine::new().trim_text(table).0
}

/// Keep only rows where both `price` and `qty` are present.
pub fn drop_missing(table: Table) -> Result<Table> {
    run(Transform::DropMissing, table)
}

/// Keep only rows where `price >= 0` and `qty >= 0`.
///
/// Non-numeric values in either column are a type error.
pub fn remove_invalid_rows(table: Table) -> Result<Table> {
    run(Transform::RemoveInvalid, table)
}
