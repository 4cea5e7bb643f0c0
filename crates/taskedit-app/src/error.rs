use serde::Serialize;
use std::path::PathBuf;
use taskedit_core::TableError;
use thiserror::Error;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error("Could not open {}: {source}", .path.display())]
    Open { path: PathBuf, source: TableError },

    #[error("Could not save {}: {source}", .path.display())]
    Save { path: PathBuf, source: TableError },

    #[error("No file is open")]
    NoDocument,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Stable machine-readable code, shared with the core error kinds
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Table(err) => err.code(),
            AppError::Open { source, .. } | AppError::Save { source, .. } => source.code(),
            AppError::NoDocument => "NO_DOCUMENT",
            AppError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Structured outcome for the presentation layer to display
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code().to_string(),
            title: self.title().to_string(),
            message: self.to_string(),
        }
    }

    fn title(&self) -> &'static str {
        match self {
            AppError::Open { .. } => "Open CSV",
            AppError::Save { .. } | AppError::NoDocument => "Save CSV",
            AppError::Config(_) => "Configuration",
            AppError::Table(err) => match err {
                TableError::MissingColumns(_) => "Missing columns",
                TableError::Validation(_) => "Invalid input",
                TableError::EmptyTable => "Empty table",
                _ => "Error",
            },
        }
    }
}

/// Error payload handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub code: String,
    pub title: String,
    pub message: String,
}

pub type Result<T> = std::result::Result<T, AppError>;
