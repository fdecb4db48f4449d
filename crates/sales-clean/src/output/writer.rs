//! Delimited-text writer with atomic replacement of the target file.

use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{CleanError, Result};
use crate::table::Table;

/// Writer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriterConfig {
    /// Field delimiter.
    pub delimiter: u8,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Writes a [`Table`] as a header row followed by one line per row.
///
/// No index column is written. Missing values become empty fields.
pub struct Writer {
    config: WriterConfig,
}

impl Writer {
    /// Create a writer with default configuration.
    pub fn new() -> Self {
        Self {
            config: WriterConfig::default(),
        }
    }

    /// Create a writer with custom configuration.
    pub fn with_config(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Write the table to `path`, creating or replacing the file.
    ///
    /// The data is written to a temporary file in the destination directory
    /// and renamed over `path` once complete, so a failure leaves any
    /// existing file untouched. The destination directory must exist.
    pub fn write_file(&self, table: &Table, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        if !dir.is_dir() {
            return Err(CleanError::io(
                dir,
                io::Error::new(
                    io::ErrorKind::NotFound,
                    "destination directory does not exist",
                ),
            ));
        }

        let mut temp = NamedTempFile::new_in(dir).map_err(|e| CleanError::io(dir, e))?;
        self.write(table, io::BufWriter::new(temp.as_file_mut()))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| CleanError::io(temp.path(), e))?;
        temp.persist(path).map_err(|e| CleanError::io(path, e.error))?;

        debug!(path = %path.display(), rows = table.row_count(), "wrote table");
        Ok(())
    }

    /// Write the table to any writer.
    pub fn write<W: Write>(&self, table: &Table, out: W) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.config.delimiter)
            .from_writer(out);

        writer.write_record(table.columns())?;
        for row in table.rows() {
            writer.write_record(row.iter().map(|v| v.to_string()))?;
        }
        writer.flush().map_err(csv::Error::from)?;

        Ok(())
    }

    /// Render the table to a string.
    pub fn render(&self, table: &Table) -> Result<String> {
        let mut buf = Vec::new();
        self.write(table, &mut buf)?;
        // Fields and headers are all valid UTF-8 already.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}
