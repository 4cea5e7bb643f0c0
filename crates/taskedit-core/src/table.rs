use serde::Serialize;
use std::collections::HashSet;

use crate::error::{Result, TableError};
use crate::range::RowRange;

/// An in-memory table of text cells with an ordered, unique header.
///
/// Rows are stored positionally: `rows[r][c]` is the value of column
/// `columns[c]` in row `r`. Every row has exactly `columns.len()` values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table (no columns, no rows)
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a header and already-split records.
    ///
    /// Fails if the header is empty or has duplicate names, or if any row
    /// has a different number of fields than the header.
    pub fn from_records(header: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if header.is_empty() {
            return Err(TableError::format("missing header row"));
        }

        let mut seen = HashSet::with_capacity(header.len());
        for name in &header {
            if !seen.insert(name.as_str()) {
                return Err(TableError::format(format!(
                    "duplicate column name '{}'",
                    name
                )));
            }
        }

        for (idx, row) in rows.iter().enumerate() {
            if row.len() != header.len() {
                return Err(TableError::Format {
                    // +1 for the header, +1 for 1-based lines
                    line: Some(idx as u64 + 2),
                    message: format!(
                        "expected {} fields, found {}",
                        header.len(),
                        row.len()
                    ),
                });
            }
        }

        Ok(Self {
            columns: header,
            rows,
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// True when the table has no rows (a header-only table is empty)
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row(&self, row: usize) -> Option<&[String]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// Index of the column with exactly this name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Index of the first column whose lowercase form equals `name` lowercased
    pub fn find_column_ignore_case(&self, name: &str) -> Option<usize> {
        let wanted = name.to_lowercase();
        self.columns.iter().position(|c| c.to_lowercase() == wanted)
    }

    pub fn get_cell(&self, row: usize, col: usize) -> Result<&str> {
        self.check_bounds(row, col)?;
        Ok(&self.rows[row][col])
    }

    /// Overwrite a single cell. Values are free text and never validated.
    pub fn set_cell(&mut self, row: usize, col: usize, value: impl Into<String>) -> Result<()> {
        self.check_bounds(row, col)?;
        self.rows[row][col] = value.into();
        Ok(())
    }

    /// Write `value` into column `col` for every row in `range`.
    ///
    /// Bounds are checked before anything is written.
    pub fn set_range(&mut self, range: RowRange, col: usize, value: &str) -> Result<usize> {
        range.check(self.row_count())?;
        self.check_column(col)?;

        for row in range.rows() {
            self.rows[row][col] = value.to_string();
        }
        Ok(range.len())
    }

    /// Write several columns at once for every row in `range`.
    ///
    /// All columns are checked before any row is touched, so either every
    /// `(col, value)` pair lands in every row or the table is unchanged.
    pub fn set_range_columns(&mut self, range: RowRange, values: &[(usize, &str)]) -> Result<usize> {
        range.check(self.row_count())?;
        for &(col, _) in values {
            self.check_column(col)?;
        }

        for row in range.rows() {
            let cells = &mut self.rows[row];
            for &(col, value) in values {
                cells[col] = value.to_string();
            }
        }
        Ok(range.len())
    }

    /// Replace the whole table with another one
    pub fn replace(&mut self, other: Table) {
        *self = other;
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows.len() {
            return Err(TableError::RowOutOfBounds {
                row,
                row_count: self.rows.len(),
            });
        }
        self.check_column(col)
    }

    fn check_column(&self, col: usize) -> Result<()> {
        if col >= self.columns.len() {
            return Err(TableError::ColumnOutOfBounds {
                col,
                col_count: self.columns.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> Table {
        Table::from_records(
            strings(&["Input", "Mode", "Note"]),
            vec![
                strings(&["1", "paypal", "a"]),
                strings(&["2", "paypal", "b"]),
                strings(&["3", "paypalpopnow", ""]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_new_table_is_empty() {
        let table = Table::new();
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn test_from_records() {
        let table = sample();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.columns(), &strings(&["Input", "Mode", "Note"])[..]);
        assert_eq!(table.get_cell(2, 1).unwrap(), "paypalpopnow");
        assert_eq!(table.get_cell(2, 2).unwrap(), "");
    }

    #[test]
    fn test_from_records_header_only() {
        let table = Table::from_records(strings(&["A", "B"]), vec![]).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn test_from_records_rejects_inconsistent_rows() {
        let err = Table::from_records(
            strings(&["A", "B"]),
            vec![strings(&["1", "2"]), strings(&["3"])],
        )
        .unwrap_err();
        match err {
            TableError::Format { line, .. } => assert_eq!(line, Some(3)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_records_rejects_bad_header() {
        assert!(matches!(
            Table::from_records(vec![], vec![]),
            Err(TableError::Format { .. })
        ));
        assert!(matches!(
            Table::from_records(strings(&["A", "A"]), vec![]),
            Err(TableError::Format { .. })
        ));
    }

    #[test]
    fn test_get_cell_out_of_bounds() {
        let table = sample();
        assert!(matches!(
            table.get_cell(3, 0),
            Err(TableError::RowOutOfBounds { row: 3, row_count: 3 })
        ));
        assert!(matches!(
            table.get_cell(0, 3),
            Err(TableError::ColumnOutOfBounds { col: 3, col_count: 3 })
        ));
    }

    #[test]
    fn test_set_cell() {
        let mut table = sample();
        table.set_cell(1, 2, "edited, with comma").unwrap();
        assert_eq!(table.get_cell(1, 2).unwrap(), "edited, with comma");

        let before = table.clone();
        assert!(table.set_cell(5, 0, "x").is_err());
        assert_eq!(table, before);
    }

    #[test]
    fn test_column_lookup() {
        let table = sample();
        assert_eq!(table.column_index("Note"), Some(2));
        assert_eq!(table.column_index("note"), None);
        assert_eq!(table.find_column_ignore_case("input"), Some(0));
        assert_eq!(table.find_column_ignore_case("MODE"), Some(1));
        assert_eq!(table.find_column_ignore_case("missing"), None);
    }

    #[test]
    fn test_set_range_is_all_or_nothing() {
        let mut table = sample();
        let before = table.clone();

        let range = RowRange::new(0, 1).unwrap();
        assert!(table.set_range(range, 7, "x").is_err());
        assert_eq!(table, before);

        let written = table.set_range_columns(range, &[(0, "9"), (9, "y")]);
        assert!(written.is_err());
        assert_eq!(table, before);

        let stale = RowRange::new(1, 5).unwrap();
        assert!(table.set_range(stale, 0, "x").is_err());
        assert_eq!(table, before);
    }

    #[test]
    fn test_set_range_columns() {
        let mut table = sample();
        let range = RowRange::new(1, 2).unwrap();
        let written = table.set_range_columns(range, &[(0, "50"), (1, "paypal")]).unwrap();
        assert_eq!(written, 2);
        assert_eq!(table.row(0).unwrap(), &strings(&["1", "paypal", "a"])[..]);
        assert_eq!(table.row(1).unwrap(), &strings(&["50", "paypal", "b"])[..]);
        assert_eq!(table.row(2).unwrap(), &strings(&["50", "paypal", ""])[..]);
    }
}
