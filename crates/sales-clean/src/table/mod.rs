//! In-memory table model.

mod value;

pub use value::{is_null_token, Value};

use indexmap::IndexMap;

/// Ordered rows sharing a fixed, ordered set of named columns.
///
/// Every row holds exactly one [`Value`] per column. Stages take a table by
/// value and hand back a new one; nothing hands out mutable access to rows.
/// Each row remembers its zero-based position in the source data, which
/// survives row filtering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    source_rows: Vec<usize>,
}

/// Returned by [`Table::new`] when a row does not match the column count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaggedRow {
    /// Zero-based row index.
    pub row: usize,
    pub expected: usize,
    pub found: usize,
}

impl Table {
    /// Create a table, checking that every row has one value per column.
    pub fn new(
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
    ) -> std::result::Result<Self, RaggedRow> {
        if let Some((row, r)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != columns.len())
        {
            return Err(RaggedRow {
                row,
                expected: columns.len(),
                found: r.len(),
            });
        }
        let source_rows = (0..rows.len()).collect();
        Ok(Self {
            columns,
            rows,
            source_rows,
        })
    }

    /// Create a table with columns and no rows.
    pub fn empty(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            source_rows: Vec::new(),
        }
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in order.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Source position of every row, in row order.
    pub fn source_rows(&self) -> &[usize] {
        &self.source_rows
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Get all values for a column by name.
    pub fn column_by_name(&self, name: &str) -> Option<Vec<&Value>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// A row keyed by column name, in column order.
    pub fn record(&self, row: usize) -> Option<IndexMap<&str, &Value>> {
        let values = self.rows.get(row)?;
        Some(
            self.columns
                .iter()
                .map(String::as_str)
                .zip(values.iter())
                .collect(),
        )
    }

    /// The first `n` rows as a new table.
    pub fn head(&self, n: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
            source_rows: self.source_rows.iter().take(n).copied().collect(),
        }
    }

    /// Replace the column names, keeping row data. Lengths must match.
    pub(crate) fn with_columns(self, columns: Vec<String>) -> Table {
        debug_assert_eq!(columns.len(), self.columns.len());
        Table { columns, ..self }
    }

    /// Rewrite every value of one column.
    pub(crate) fn map_column(mut self, col: usize, mut f: impl FnMut(Value) -> Value) -> Table {
        for row in &mut self.rows {
            let value = std::mem::take(&mut row[col]);
            row[col] = f(value);
        }
        self
    }

    /// Keep only the rows for which `keep` returns true, preserving order.
    ///
    /// The predicate sees the row's source position.
    pub(crate) fn retain_rows<E>(
        mut self,
        mut keep: impl FnMut(usize, &[Value]) -> std::result::Result<bool, E>,
    ) -> std::result::Result<Table, E> {
        let mut kept = Vec::with_capacity(self.rows.len());
        let mut kept_sources = Vec::with_capacity(self.rows.len());
        let rows = std::mem::take(&mut self.rows);
        for (row, source) in rows.into_iter().zip(self.source_rows.iter().copied()) {
            if keep(source, &row)? {
                kept.push(row);
                kept_sources.push(source);
            }
        }
        self.rows = kept;
        self.source_rows = kept_sources;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            vec!["name".into(), "price".into()],
            vec![
                vec!["Widget".into(), 5.0.into()],
                vec!["Gadget".into(), Value::Missing],
                vec!["Gizmo".into(), 7.0.into()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = Table::new(
            vec!["a".into(), "b".into()],
            vec![vec![1.0.into(), 2.0.into()], vec![1.0.into()]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_lookup() {
        let table = sample();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_index("price"), Some(1));
        assert_eq!(table.column_index("qty"), None);
        assert_eq!(table.get(2, 1), Some(&Value::from(7.0)));

        let record = table.record(0).unwrap();
        assert_eq!(record.keys().copied().collect::<Vec<_>>(), vec!["name", "price"]);
        assert_eq!(record["name"], &Value::from("Widget"));
    }

    #[test]
    fn test_retain_rows_preserves_order() {
        let table = sample()
            .retain_rows(|_, row| Ok::<_, ()>(!row[1].is_missing()))
            .unwrap();
        let names: Vec<String> = table
            .column_by_name("name")
            .unwrap()
            .iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(names, vec!["Widget", "Gizmo"]);
        assert_eq!(table.source_rows(), &[0, 2]);
    }

    #[test]
    fn test_retain_rows_sees_source_positions() {
        let mut seen = Vec::new();
        sample()
            .retain_rows(|source, _| Ok::<_, ()>(source != 0))
            .unwrap()
            .retain_rows(|source, _| {
                seen.push(source);
                Ok::<_, ()>(true)
            })
            .unwrap();
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn test_head() {
        let table = sample();
        assert_eq!(table.head(2).row_count(), 2);
        assert_eq!(table.head(10).row_count(), 3);
        assert_eq!(table.head(0).columns(), table.columns());
        assert_eq!(table.head(2).source_rows(), &[0, 1]);
    }
}
