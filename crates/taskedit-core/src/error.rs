use thiserror::Error;

/// Errors produced by table, range, fill and edit operations
#[derive(Error, Debug)]
pub enum TableError {
    /// Malformed delimited text or an inconsistent set of records
    #[error("{}", format_message(.line, .message))]
    Format { line: Option<u64>, message: String },

    #[error("Row {row} is out of bounds (table has {row_count} rows)")]
    RowOutOfBounds { row: usize, row_count: usize },

    #[error("Column {col} is out of bounds (table has {col_count} columns)")]
    ColumnOutOfBounds { col: usize, col_count: usize },

    /// The synthetic row-number column is not part of the table
    #[error("The row-number column cannot be edited")]
    ReservedColumn,

    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    #[error("Table must contain {} column(s)", quoted_list(.0))]
    MissingColumns(Vec<String>),

    #[error("{0}")]
    Validation(String),

    #[error("The table has no rows")]
    EmptyTable,

    #[error("No cell is being edited")]
    NotEditing,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_message(line: &Option<u64>, message: &str) -> String {
    match line {
        Some(line) => format!("CSV format error at line {}: {}", line, message),
        None => format!("CSV format error: {}", message),
    }
}

fn quoted_list(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("'{}'", n))
        .collect::<Vec<_>>()
        .join(" and ")
}

impl TableError {
    pub fn format(message: impl Into<String>) -> Self {
        TableError::Format {
            line: None,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        TableError::Validation(message.into())
    }

    /// Stable machine-readable code for the error kind
    pub fn code(&self) -> &'static str {
        match self {
            TableError::Format { .. } => "FORMAT_ERROR",
            TableError::RowOutOfBounds { .. }
            | TableError::ColumnOutOfBounds { .. }
            | TableError::ReservedColumn => "INDEX_ERROR",
            TableError::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            TableError::MissingColumns(_) => "MISSING_COLUMNS",
            TableError::Validation(_) => "VALIDATION_ERROR",
            TableError::EmptyTable => "EMPTY_TABLE",
            TableError::NotEditing => "NOT_EDITING",
            TableError::Io(_) => "IO_ERROR",
        }
    }

    pub fn is_index_error(&self) -> bool {
        self.code() == "INDEX_ERROR"
    }
}

impl From<csv::Error> for TableError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line());
        match err.into_kind() {
            csv::ErrorKind::Io(io) => TableError::Io(io),
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => TableError::Format {
                line,
                message: format!("expected {} fields, found {}", expected_len, len),
            },
            csv::ErrorKind::Utf8 { err, .. } => TableError::Format {
                line,
                message: format!("invalid UTF-8: {}", err),
            },
            other => TableError::Format {
                line,
                message: format!("{:?}", other),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, TableError>;
