//! Pipeline stages and the records produced when applying them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A table-to-table cleaning step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    /// Trim, lowercase and underscore column names.
    NormalizeColumns,
    /// Strip whitespace from the text columns.
    TrimText,
    /// Drop rows missing a required value.
    DropMissing,
    /// Drop rows with a negative required value.
    RemoveInvalid,
}

impl Transform {
    /// All transforms in the order the pipeline runs them.
    pub const ORDER: [Transform; 4] = [
        Transform::NormalizeColumns,
        Transform::TrimText,
        Transform::DropMissing,
        Transform::RemoveInvalid,
    ];

    /// Short machine-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Transform::NormalizeColumns => "normalize_columns",
            Transform::TrimText => "trim_text",
            Transform::DropMissing => "drop_missing",
            Transform::RemoveInvalid => "remove_invalid",
        }
    }

    /// Get a human-readable description of the transform.
    pub fn description(&self) -> &'static str {
        match self {
            Transform::NormalizeColumns => "Cleaning column names...",
            Transform::TrimText => "Stripping whitespace from text fields...",
            Transform::DropMissing => "Handling missing values...",
            Transform::RemoveInvalid => "Removing invalid rows...",
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One step of a pipeline run, including the I/O boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Load,
    Transform(Transform),
    Save,
}

impl Stage {
    /// Progress line announcing the stage.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Load => "Loading raw data...",
            Stage::Transform(t) => t.description(),
            Stage::Save => "Saving cleaned data...",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Load => "load",
            Stage::Transform(t) => t.name(),
            Stage::Save => "save",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Transform> for Stage {
    fn from(t: Transform) -> Self {
        Stage::Transform(t)
    }
}

/// Why a row was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// A required value was missing.
    Missing,
    /// A required value was below zero.
    Negative,
}

/// Audit information for a single dropped row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowAudit {
    /// Data row index (0-based) in the source file.
    pub row: usize,

    /// Column that caused the drop.
    pub column: String,

    /// Rendered value of that column.
    pub value: String,

    pub reason: DropReason,
}

/// What a single transform did to the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageSummary {
    pub transform: Transform,

    /// Rows in the input table.
    pub rows_before: usize,

    /// Rows in the output table.
    pub rows_after: usize,

    /// Column names or cell values rewritten in place.
    pub values_changed: usize,

    /// One entry per dropped row.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub row_audits: Vec<RowAudit>,
}

impl StageSummary {
    /// Create an empty summary for a transform about to run.
    pub fn new(transform: Transform, rows_before: usize) -> Self {
        Self {
            transform,
            rows_before,
            rows_after: rows_before,
            values_changed: 0,
            row_audits: Vec::new(),
        }
    }

    /// Number of rows removed by the transform.
    pub fn rows_dropped(&self) -> usize {
        self.rows_before - self.rows_after
    }

    /// Record a dropped row.
    pub fn add_drop(&mut self, audit: RowAudit) {
        self.row_audits.push(audit);
    }
}
