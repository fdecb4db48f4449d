//! Engine that applies cleaning transforms to a table.

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::error::{CleanError, Result};
use crate::table::{Table, Value};

use super::operations::{DropReason, RowAudit, StageSummary, Transform};

/// Columns whose values are stripped of surrounding whitespace.
pub const TEXT_COLUMNS: [&str; 2] = ["prodname", "category"];

/// Columns that must be present, non-missing and non-negative.
pub const REQUIRED_COLUMNS: [&str; 2] = ["price", "qty"];

/// Engine for applying transforms and recording what they changed.
pub struct CleaningEngine;

impl CleaningEngine {
    /// Create a new cleaning engine.
    pub fn new() -> Self {
        Self
    }

    /// Apply one transform, consuming the input table.
    pub fn apply(&self, transform: Transform, table: Table) -> Result<(Table, StageSummary)> {
        let summary = StageSummary::new(transform, table.row_count());

        let (table, mut summary) = match transform {
            Transform::NormalizeColumns => self.apply_normalize(table, summary)?,
            Transform::TrimText => self.apply_trim(table, summary),
            Transform::DropMissing => self.apply_drop_missing(table, summary)?,
            Transform::RemoveInvalid => self.apply_remove_invalid(table, summary)?,
        };
        summary.rows_after = table.row_count();

        info!(
            stage = %transform,
            rows_before = summary.rows_before,
            rows_after = summary.rows_after,
            values_changed = summary.values_changed,
            "applied transform"
        );
        Ok((table, summary))
    }

    /// [`Transform::TrimText`] on its own; it has no failure mode.
    pub fn trim_text(&self, table: Table) -> (Table, StageSummary) {
        let summary = StageSummary::new(Transform::TrimText, table.row_count());
        self.apply_trim(table, summary)
    }

    /// Rename every column to its normalized form.
    fn apply_normalize(
        &self,
        table: Table,
        mut summary: StageSummary,
    ) -> Result<(Table, StageSummary)> {
        // normalized name -> original names, in first-seen order
        let mut seen: IndexMap<String, Vec<String>> = IndexMap::new();
        for original in table.columns() {
            seen.entry(normalize_column_name(original))
                .or_default()
                .push(original.clone());
        }

        if let Some((name, sources)) = seen.iter().find(|(_, sources)| sources.len() > 1) {
            return Err(CleanError::ColumnCollision {
                name: name.clone(),
                sources: sources.clone(),
            });
        }

        summary.values_changed = seen
            .iter()
            .filter(|(name, sources)| sources[0] != **name)
            .count();

        let columns = seen.into_keys().collect();
        Ok((table.with_columns(columns), summary))
    }

    /// Strip whitespace from the text columns that are present.
    fn apply_trim(&self, mut table: Table, mut summary: StageSummary) -> (Table, StageSummary) {
        for column in TEXT_COLUMNS {
            let Some(col_idx) = table.column_index(column) else {
                debug!(column, "text column not present, skipping");
                continue;
            };

            let mut changed = 0;
            table = table.map_column(col_idx, |value| {
                let trimmed = trim_value(&value);
                if trimmed != value {
                    changed += 1;
                }
                trimmed
            });
            summary.values_changed += changed;
        }

        (table, summary)
    }

    /// Drop rows where any required column is missing.
    fn apply_drop_missing(
        &self,
        table: Table,
        mut summary: StageSummary,
    ) -> Result<(Table, StageSummary)> {
        let indices = required_indices(&table, Transform::DropMissing)?;

        let table = table.retain_rows(|source_row, row| -> Result<bool> {
            let missing = indices
                .iter()
                .find(|(_, col_idx)| row[*col_idx].is_missing());

            match missing {
                Some((column, _)) => {
                    debug!(row = source_row, column, "dropping row with missing value");
                    summary.add_drop(RowAudit {
                        row: source_row,
                        column: column.to_string(),
                        value: String::new(),
                        reason: DropReason::Missing,
                    });
                    Ok(false)
                }
                None => Ok(true),
            }
        })?;

        Ok((table, summary))
    }

    /// Drop rows where any required column is below zero.
    fn apply_remove_invalid(
        &self,
        table: Table,
        mut summary: StageSummary,
    ) -> Result<(Table, StageSummary)> {
        let indices = required_indices(&table, Transform::RemoveInvalid)?;

        let table = table.retain_rows(|source_row, row| -> Result<bool> {
            let mut negative = None;
            for (column, col_idx) in &indices {
                let value = &row[*col_idx];
                let n = value.as_number().ok_or_else(|| CleanError::NonNumeric {
                    stage: Transform::RemoveInvalid,
                    column: column.to_string(),
                    row: source_row,
                    value: match value {
                        Value::Missing => "<missing>".to_string(),
                        other => other.to_string(),
                    },
                })?;
                if n < 0.0 && negative.is_none() {
                    negative = Some((*column, value));
                }
            }

            match negative {
                Some((column, value)) => {
                    debug!(row = source_row, column, %value, "dropping row with negative value");
                    summary.add_drop(RowAudit {
                        row: source_row,
                        column: column.to_string(),
                        value: value.to_string(),
                        reason: DropReason::Negative,
                    });
                    Ok(false)
                }
                None => Ok(true),
            }
        })?;

        Ok((table, summary))
    }
}

impl Default for CleaningEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Canonical form of a column name: trimmed, lowercase, spaces as underscores.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Source text of a value with surrounding whitespace removed. Missing stays missing.
fn trim_value(value: &Value) -> Value {
    match value {
        Value::Missing => Value::Missing,
        Value::Text(s) => Value::Text(s.trim().to_string()),
        Value::Number { raw, .. } => Value::Text(raw.trim().to_string()),
    }
}

/// Look up the required columns, failing on the first one absent.
fn required_indices(table: &Table, stage: Transform) -> Result<Vec<(&'static str, usize)>> {
    REQUIRED_COLUMNS
        .iter()
        .map(|&column| {
            table
                .column_index(column)
                .map(|idx| (column, idx))
                .ok_or_else(|| CleanError::MissingColumn {
                    stage,
                    column: column.to_string(),
                })
        })
        .collect()
}
