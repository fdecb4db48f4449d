//! Pipeline driver and public entry point.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, info_span};

use crate::error::Result;
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::output::{Writer, WriterConfig};
use crate::table::Table;
use crate::transform::{CleaningEngine, Stage, StageSummary, Transform};

/// Default location of the raw input file.
pub const DEFAULT_INPUT_PATH: &str = "data/raw/sales_data_raw.csv";

/// Default location of the cleaned output file.
pub const DEFAULT_OUTPUT_PATH: &str = "data/processed/sales_data_clean.csv";

/// Configuration for a pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanConfig {
    /// Raw input file.
    pub input: PathBuf,
    /// Destination for the cleaned file.
    pub output: PathBuf,
    /// Parser configuration.
    #[serde(default)]
    pub parser: ParserConfig,
    /// Writer configuration.
    #[serde(default)]
    pub writer: WriterConfig,
    /// Run every stage but skip writing the output.
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_PATH),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            parser: ParserConfig::default(),
            writer: WriterConfig::default(),
            dry_run: false,
        }
    }
}

impl CleanConfig {
    /// Create a configuration with the default paths.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input path.
    pub fn with_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input = path.into();
        self
    }

    /// Set the output path.
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }

    /// Enable or disable dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Result of a pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct CleanReport {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// Where the cleaned file was written (`None` on a dry run).
    pub output: Option<PathBuf>,
    /// Column names of the cleaned table.
    pub columns: Vec<String>,
    /// Data rows read from the input.
    pub rows_in: usize,
    /// Data rows in the cleaned table.
    pub rows_out: usize,
    /// One summary per transform, in execution order.
    pub stages: Vec<StageSummary>,
    /// The cleaned table.
    #[serde(skip)]
    pub table: Table,
}

impl CleanReport {
    /// Total rows removed across all transforms.
    pub fn rows_dropped(&self) -> usize {
        self.rows_in - self.rows_out
    }

    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs load, the cleaning transforms and save in their fixed order.
pub struct Pipeline {
    config: CleanConfig,
    parser: Parser,
    writer: Writer,
    engine: CleaningEngine,
}

impl Pipeline {
    /// Create a pipeline with the default configuration.
    pub fn new() -> Self {
        Self::with_config(CleanConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: CleanConfig) -> Self {
        let parser = Parser::with_config(config.parser);
        let writer = Writer::with_config(config.writer);

        Self {
            config,
            parser,
            writer,
            engine: CleaningEngine::new(),
        }
    }

    pub fn config(&self) -> &CleanConfig {
        &self.config
    }

    /// The stages a run executes, in order.
    pub fn stages(&self) -> Vec<Stage> {
        let mut stages = vec![Stage::Load];
        stages.extend(Transform::ORDER.iter().copied().map(Stage::from));
        if !self.config.dry_run {
            stages.push(Stage::Save);
        }
        stages
    }

    /// Run the pipeline.
    pub fn run(&self) -> Result<CleanReport> {
        self.run_with_progress(|_| {})
    }

    /// Run the pipeline, calling `on_stage` before each stage starts.
    ///
    /// Any failure aborts the run. The output file is only touched by the
    /// final save, which replaces it atomically.
    pub fn run_with_progress(&self, mut on_stage: impl FnMut(Stage)) -> Result<CleanReport> {
        let span = info_span!("clean", input = %self.config.input.display());
        let _guard = span.enter();

        on_stage(Stage::Load);
        let (mut table, source) = self.load(&self.config.input)?;
        let rows_in = table.row_count();
        info!(rows = rows_in, columns = table.column_count(), "loaded input");

        let mut stages = Vec::with_capacity(Transform::ORDER.len());
        for transform in Transform::ORDER {
            on_stage(Stage::from(transform));
            let (next, summary) = self.engine.apply(transform, table)?;
            table = next;
            stages.push(summary);
        }

        let output = if self.config.dry_run {
            info!("dry run, not writing output");
            None
        } else {
            on_stage(Stage::Save);
            self.save(&table, &self.config.output)?;
            info!(path = %self.config.output.display(), rows = table.row_count(), "saved output");
            Some(self.config.output.clone())
        };

        Ok(CleanReport {
            source,
            output,
            columns: table.columns().to_vec(),
            rows_in,
            rows_out: table.row_count(),
            stages,
            table,
        })
    }

    /// Load a delimited file.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(Table, SourceMetadata)> {
        self.parser.parse_file(path)
    }

    /// Write a table as a delimited file.
    pub fn save(&self, table: &Table, path: impl AsRef<Path>) -> Result<()> {
        self.writer.write_file(table, path)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a delimited file with the default parser.
pub fn load(path: impl AsRef<Path>) -> Result<Table> {
    Parser::new().parse_file(path).map(|(table, _)| table)
}

/// Save a table with the default writer.
pub fn save(table: &Table, path: impl AsRef<Path>) -> Result<()> {
    Writer::new().write_file(table, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = CleanConfig::default();
        assert_eq!(config.input, PathBuf::from("data/raw/sales_data_raw.csv"));
        assert_eq!(
            config.output,
            PathBuf::from("data/processed/sales_data_clean.csv")
        );
        assert!(!config.dry_run);
    }

    #[test]
    fn test_stage_order() {
        let pipeline = Pipeline::new();
        let names: Vec<&str> = pipeline.stages().iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec![
                "load",
                "normalize_columns",
                "trim_text",
                "drop_missing",
                "remove_invalid",
                "save"
            ]
        );

        let dry = Pipeline::with_config(CleanConfig::new().with_dry_run(true));
        assert_eq!(dry.stages().last(), Some(&Stage::from(Transform::RemoveInvalid)));
    }
}
