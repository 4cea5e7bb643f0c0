use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};
use crate::quick_fill::{FillType, QuickFillMode, QuickFillTable};
use crate::range::{RangeInput, RowRange};
use crate::table::Table;

/// Column name (case-insensitive) receiving the looked-up quick-fill value
pub const INPUT_COLUMN: &str = "input";
/// Column name (case-insensitive) receiving the quick-fill mode
pub const MODE_COLUMN: &str = "mode";

/// A bulk fill request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FillSpec {
    /// Write `value` into `column` for every row in range
    Value {
        column: String,
        value: String,
        range: RangeInput,
    },
    /// Write the looked-up value and the mode into the input/mode columns
    Quick {
        mode: QuickFillMode,
        fill_type: FillType,
        range: RangeInput,
    },
}

impl FillSpec {
    pub fn range(&self) -> &RangeInput {
        match self {
            FillSpec::Value { range, .. } => range,
            FillSpec::Quick { range, .. } => range,
        }
    }
}

/// Resolve the spec's range against the table as it is now and apply it.
///
/// Returns the number of rows written.
pub fn apply(table: &mut Table, lookup: &QuickFillTable, spec: &FillSpec) -> Result<usize> {
    if table.is_empty() {
        return Err(TableError::EmptyTable);
    }
    let range = spec.range().resolve(table.row_count())?;

    match spec {
        FillSpec::Value { column, value, .. } => fill_value(table, column, value, range),
        FillSpec::Quick {
            mode, fill_type, ..
        } => quick_fill(table, lookup, *mode, *fill_type, range),
    }
}

/// Set `column` to `value` for every row in `range`.
pub fn fill_value(table: &mut Table, column: &str, value: &str, range: RowRange) -> Result<usize> {
    if table.is_empty() {
        return Err(TableError::EmptyTable);
    }
    let col = table
        .column_index(column)
        .ok_or_else(|| TableError::ColumnNotFound(column.to_string()))?;

    table.set_range(range, col, value)
}

/// Write `lookup[mode][fill_type]` into the "input" column and `mode` into the
/// "mode" column for every row in `range`.
///
/// Both columns are resolved before any write; a row never ends up with only
/// one of the two updated.
pub fn quick_fill(
    table: &mut Table,
    lookup: &QuickFillTable,
    mode: QuickFillMode,
    fill_type: FillType,
    range: RowRange,
) -> Result<usize> {
    if table.is_empty() {
        return Err(TableError::EmptyTable);
    }
    let (input_col, mode_col) = quick_fill_columns(table)?;
    let value = lookup.value(mode, fill_type);

    table.set_range_columns(range, &[(input_col, value), (mode_col, mode.as_str())])
}

/// Locate the input and mode columns, naming every one that is absent
pub fn quick_fill_columns(table: &Table) -> Result<(usize, usize)> {
    let input_col = table.find_column_ignore_case(INPUT_COLUMN);
    let mode_col = table.find_column_ignore_case(MODE_COLUMN);

    match (input_col, mode_col) {
        (Some(input), Some(mode)) => Ok((input, mode)),
        (input, mode) => {
            let mut missing = Vec::new();
            if input.is_none() {
                missing.push(INPUT_COLUMN.to_string());
            }
            if mode.is_none() {
                missing.push(MODE_COLUMN.to_string());
            }
            Err(TableError::MissingColumns(missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_csv_str(
            "Input,Mode,Note\n\
             1,paypal,a\n\
             2,paypal,b\n\
             3,paypalpopnow,c\n",
        )
        .unwrap()
    }

    fn range(start: &str, end: &str, table: &Table) -> RowRange {
        RangeInput::explicit(start, end)
            .resolve(table.row_count())
            .unwrap()
    }

    #[test]
    fn test_fill_value_in_range() {
        let mut table = sample();
        let rows = range("2", "3", &table);
        let written = fill_value(&mut table, "Note", "x", rows).unwrap();

        assert_eq!(written, 2);
        assert_eq!(table.get_cell(0, 2).unwrap(), "a");
        assert_eq!(table.get_cell(1, 2).unwrap(), "x");
        assert_eq!(table.get_cell(2, 2).unwrap(), "x");
    }

    #[test]
    fn test_fill_value_leaves_other_cells_untouched() {
        let mut table = sample();
        let before = table.clone();
        let rows = range("1", "2", &table);
        fill_value(&mut table, "Input", "", rows).unwrap();

        for row in 0..table.row_count() {
            for col in 0..table.column_count() {
                let expected = if col == 0 && rows.contains(row) {
                    ""
                } else {
                    before.get_cell(row, col).unwrap()
                };
                assert_eq!(table.get_cell(row, col).unwrap(), expected);
            }
        }
    }

    #[test]
    fn test_fill_value_unknown_column() {
        let mut table = sample();
        let before = table.clone();
        let rows = range("1", "3", &table);
        let err = fill_value(&mut table, "note", "x", rows).unwrap_err();

        assert!(matches!(err, TableError::ColumnNotFound(ref c) if c == "note"));
        assert_eq!(table, before);
    }

    #[test]
    fn test_fill_value_empty_table() {
        let mut table = Table::from_csv_str("Note\n").unwrap();
        let rows = RowRange::new(0, 0).unwrap();
        assert!(matches!(
            fill_value(&mut table, "Note", "x", rows),
            Err(TableError::EmptyTable)
        ));
    }

    #[test]
    fn test_fill_value_stale_range() {
        let mut table = sample();
        let rows = range("1", "3", &table);
        table.replace(Table::from_csv_str("Input,Mode,Note\n1,paypal,a\n").unwrap());

        let before = table.clone();
        let err = fill_value(&mut table, "Note", "x", rows).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(table, before);
    }

    #[test]
    fn test_quick_fill_paypal_has() {
        let mut table = sample();
        let rows = range("1", "2", &table);
        let lookup = QuickFillTable::default();
        let written =
            quick_fill(&mut table, &lookup, QuickFillMode::Paypal, FillType::Has, rows).unwrap();

        assert_eq!(written, 2);
        assert_eq!(table.row(0).unwrap(), &["1372", "paypal", "a"]);
        assert_eq!(table.row(1).unwrap(), &["1372", "paypal", "b"]);
        assert_eq!(table.row(2).unwrap(), &["3", "paypalpopnow", "c"]);
    }

    #[test]
    fn test_quick_fill_popnow_writes_mode() {
        let mut table = sample();
        let rows = range("1", "1", &table);
        let lookup = QuickFillTable::default();
        quick_fill(
            &mut table,
            &lookup,
            QuickFillMode::PaypalPopnow,
            FillType::Bie,
            rows,
        )
        .unwrap();

        assert_eq!(table.row(0).unwrap(), &["195", "paypalpopnow", "a"]);
    }

    #[test]
    fn test_quick_fill_matches_columns_ignoring_case() {
        let mut table = Table::from_csv_str("MODE,note,INPUT\npaypal,x,1\n").unwrap();
        let rows = RowRange::new(0, 0).unwrap();
        let lookup = QuickFillTable::default();
        quick_fill(&mut table, &lookup, QuickFillMode::Paypal, FillType::Mac, rows).unwrap();

        assert_eq!(table.row(0).unwrap(), &["paypal", "x", "675"]);
    }

    #[test]
    fn test_quick_fill_missing_columns() {
        let mut table = Table::from_csv_str("Input,Note\n1,a\n").unwrap();
        let before = table.clone();
        let rows = RowRange::new(0, 0).unwrap();
        let lookup = QuickFillTable::default();
        let err =
            quick_fill(&mut table, &lookup, QuickFillMode::Paypal, FillType::Has, rows).unwrap_err();

        match err {
            TableError::MissingColumns(missing) => assert_eq!(missing, vec!["mode"]),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(table, before);

        let table = Table::from_csv_str("A,B\n1,2\n").unwrap();
        match quick_fill_columns(&table) {
            Err(TableError::MissingColumns(missing)) => {
                assert_eq!(missing, vec!["input", "mode"])
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_apply_value_spec() {
        let mut table = sample();
        let spec = FillSpec::Value {
            column: "Note".into(),
            value: "done".into(),
            range: RangeInput::AllRows,
        };
        let written = apply(&mut table, &QuickFillTable::default(), &spec).unwrap();
        assert_eq!(written, 3);
        assert!(table.rows().iter().all(|r| r[2] == "done"));
    }

    #[test]
    fn test_apply_quick_spec_rejects_bad_range() {
        let mut table = sample();
        let before = table.clone();
        let spec = FillSpec::Quick {
            mode: QuickFillMode::Paypal,
            fill_type: FillType::Has,
            range: RangeInput::explicit("2", "9"),
        };
        let err = apply(&mut table, &QuickFillTable::default(), &spec).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(table, before);
    }

    #[test]
    fn test_apply_on_empty_table() {
        let mut table = Table::new();
        let spec = FillSpec::Quick {
            mode: QuickFillMode::Paypal,
            fill_type: FillType::Has,
            range: RangeInput::AllRows,
        };
        assert!(matches!(
            apply(&mut table, &QuickFillTable::default(), &spec),
            Err(TableError::EmptyTable)
        ));
    }

    #[test]
    fn test_fill_spec_serialization() {
        let spec = FillSpec::Quick {
            mode: QuickFillMode::PaypalPopnow,
            fill_type: FillType::Mac,
            range: RangeInput::AllRows,
        };
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["kind"], "quick");
        assert_eq!(json["mode"], "paypalpopnow");
        assert_eq!(json["fill_type"], "MAC");
        assert_eq!(json["range"]["type"], "all_rows");
    }
}
