//! Strict delimited-text loader.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use super::source::SourceMetadata;
use crate::error::{CleanError, Result};
use crate::table::{Table, Value};

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Field delimiter.
    pub delimiter: u8,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
        }
    }
}

/// Loads delimited files with a header row into a [`Table`].
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the table and its metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Table, SourceMetadata)> {
        let path = path.as_ref();

        let contents = fs::read(path).map_err(|e| CleanError::io(path, e))?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let table = self.parse_bytes(&contents, path)?;
        debug!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "parsed source file"
        );

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, metadata))
    }

    /// Parse bytes directly. `path` is only used for error context.
    pub fn parse_bytes(&self, bytes: &[u8], path: &Path) -> Result<Table> {
        if let Some(line) = unterminated_quote_line(bytes, self.config.delimiter, self.config.quote)
        {
            return Err(CleanError::Parse {
                path: path.to_path_buf(),
                line,
                message: "unterminated quoted field".to_string(),
            });
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .quote(self.config.quote)
            .has_headers(true)
            .flexible(false)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| parse_error(path, e))?
            .iter()
            .map(|s| s.to_string())
            .collect();

        if headers.is_empty() {
            return Err(CleanError::Parse {
                path: path.to_path_buf(),
                line: 1,
                message: "missing header row".to_string(),
            });
        }

        let mut rows: Vec<Vec<Value>> = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| parse_error(path, e))?;
            rows.push(record.iter().map(Value::parse).collect());
        }

        // The reader is not flexible, so a length mismatch has already failed above.
        Table::new(headers, rows).map_err(|ragged| CleanError::Parse {
            path: path.to_path_buf(),
            line: ragged.row as u64 + 2,
            message: format!(
                "expected {} fields, found {}",
                ragged.expected, ragged.found
            ),
        })
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a reader error into a parse error carrying the line number.
fn parse_error(path: &Path, err: csv::Error) -> CleanError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    let message = match err.kind() {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {} fields, found {}", expected_len, len),
        csv::ErrorKind::Utf8 { err, .. } => format!("invalid UTF-8: {}", err),
        _ => err.to_string(),
    };
    CleanError::Parse {
        path: path.to_path_buf(),
        line,
        message,
    }
}

/// Find a quoted field that is still open at end of input.
///
/// Returns the 1-based line on which the open quote started. A quote only
/// opens a field when it is the field's first byte; doubled quotes inside a
/// quoted field are escapes.
fn unterminated_quote_line(bytes: &[u8], delimiter: u8, quote: u8) -> Option<u64> {
    let mut line: u64 = 1;
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut opened_on = 0;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if in_quotes {
            if b == quote {
                if bytes.get(i + 1) == Some(&quote) {
                    i += 1;
                } else {
                    in_quotes = false;
                }
            }
        } else if b == quote && at_field_start {
            in_quotes = true;
            opened_on = line;
        }

        if b == b'\n' {
            line += 1;
        }
        at_field_start = !in_quotes && (b == delimiter || b == b'\n' || b == b'\r');
        i += 1;
    }

    in_quotes.then_some(opened_on)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(data: &[u8]) -> Result<Table> {
        Parser::new().parse_bytes(data, Path::new("test.csv"))
    }

    #[test]
    fn test_parse_csv() {
        let table = parse(b"name,age,city\nAlice,30,NYC\nBob,,LA").unwrap();

        assert_eq!(table.columns(), &["name", "age", "city"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(0, 0), Some(&Value::from("Alice")));
        assert_eq!(table.get(0, 1), Some(&Value::from(30.0)));
        assert_eq!(table.get(1, 1), Some(&Value::Missing));
    }

    #[test]
    fn test_header_only() {
        let table = parse(b"ProdName,Category,Price,Qty\n").unwrap();
        assert_eq!(table.column_count(), 4);
        assert!(table.is_empty());
    }

    #[test]
    fn test_quoted_fields() {
        let table = parse(b"prodname,price\n\"Widget, large\",5\n\"Say \"\"hi\"\"\",1\n").unwrap();
        assert_eq!(table.get(0, 0), Some(&Value::from("Widget, large")));
        assert_eq!(table.get(1, 0), Some(&Value::from("Say \"hi\"")));
    }

    #[test]
    fn test_ragged_row_is_parse_error() {
        let err = parse(b"a,b\n1,2\n3\n").unwrap_err();
        match err {
            CleanError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_unterminated_quote_is_parse_error() {
        let err = parse(b"a,b\n1,\"open\n2,3\n").unwrap_err();
        match err {
            CleanError::Parse { line, message, .. } => {
                assert_eq!(line, 2);
                assert!(message.contains("unterminated"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_input_is_parse_error() {
        assert!(matches!(parse(b""), Err(CleanError::Parse { .. })));
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        assert!(matches!(
            parse(b"a,b\n\xff\xfe,1\n"),
            Err(CleanError::Parse { .. })
        ));
    }

    #[test]
    fn test_quote_scan() {
        assert_eq!(unterminated_quote_line(b"a,\"b\"\n", b',', b'"'), None);
        assert_eq!(unterminated_quote_line(b"a,\"b\"\"c\"\n", b',', b'"'), None);
        assert_eq!(unterminated_quote_line(b"a,b\"c\n", b',', b'"'), None);
        assert_eq!(unterminated_quote_line(b"a\n\"b\n", b',', b'"'), Some(2));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Parser::new()
            .parse_file("definitely/not/here.csv")
            .unwrap_err();
        assert!(matches!(err, CleanError::Io { .. }));
    }
}
