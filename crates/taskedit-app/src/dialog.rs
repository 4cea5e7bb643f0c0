//! Fill dialogs as pure functions: (table snapshot, user input) -> FillSpec.
//!
//! The forms hold exactly what the user typed. Validation never touches the
//! table; the resulting spec is re-resolved against the table when applied.

use serde::{Deserialize, Serialize};
use taskedit_core::fill::quick_fill_columns;
use taskedit_core::{FillSpec, FillType, QuickFillMode, RangeInput, Result, Table, TableError};

/// Input of the "Fill Column" dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillColumnForm {
    pub column: String,
    pub value: String,
    pub start: String,
    pub end: String,
    pub all_rows: bool,
}

impl FillColumnForm {
    /// Initial dialog state: first column, rows 1 to the last row
    pub fn for_table(table: &Table) -> Self {
        Self {
            column: table.columns().first().cloned().unwrap_or_default(),
            value: String::new(),
            start: "1".to_string(),
            end: table.row_count().to_string(),
            all_rows: false,
        }
    }

    /// Columns offered in the column picker
    pub fn column_choices(table: &Table) -> &[String] {
        table.columns()
    }

    pub fn range_input(&self) -> RangeInput {
        range_input(self.all_rows, &self.start, &self.end)
    }

    pub fn validate(&self, table: &Table) -> Result<FillSpec> {
        if table.is_empty() {
            return Err(TableError::EmptyTable);
        }
        if table.column_index(&self.column).is_none() {
            return Err(TableError::ColumnNotFound(self.column.clone()));
        }
        let range = self.range_input();
        range.resolve(table.row_count())?;

        Ok(FillSpec::Value {
            column: self.column.clone(),
            value: self.value.clone(),
            range,
        })
    }
}

/// Input of the "Quick Fill" dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickFillForm {
    pub mode: String,
    pub fill_type: String,
    pub start: String,
    pub end: String,
    pub all_rows: bool,
}

impl QuickFillForm {
    /// Initial dialog state: paypal / HAS over every row
    pub fn for_table(table: &Table) -> Self {
        Self {
            mode: QuickFillMode::default().as_str().to_string(),
            fill_type: FillType::default().as_str().to_string(),
            start: "1".to_string(),
            end: table.row_count().to_string(),
            all_rows: false,
        }
    }

    pub fn mode_choices() -> [&'static str; 2] {
        QuickFillMode::ALL.map(|m| m.as_str())
    }

    pub fn type_choices() -> [&'static str; 3] {
        FillType::ALL.map(|t| t.as_str())
    }

    pub fn range_input(&self) -> RangeInput {
        range_input(self.all_rows, &self.start, &self.end)
    }

    pub fn validate(&self, table: &Table) -> Result<FillSpec> {
        if table.is_empty() {
            return Err(TableError::EmptyTable);
        }
        let mode: QuickFillMode = self.mode.parse()?;
        let fill_type: FillType = self.fill_type.parse()?;
        let range = self.range_input();
        range.resolve(table.row_count())?;
        quick_fill_columns(table)?;

        Ok(FillSpec::Quick {
            mode,
            fill_type,
            range,
        })
    }
}

fn range_input(all_rows: bool, start: &str, end: &str) -> RangeInput {
    if all_rows {
        RangeInput::AllRows
    } else {
        RangeInput::explicit(start, end)
    }
}
