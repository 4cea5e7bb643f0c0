use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use taskedit_core::QuickFillTable;

use crate::error::{AppError, Result};

pub const DEFAULT_TITLE: &str = "Make Task Editor";

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Window title shown before a file is opened
    pub title: String,
    /// Values written by quick fill, per (mode, type)
    pub quick_fill: QuickFillTable,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            quick_fill: QuickFillTable::default(),
        }
    }
}

impl EditorConfig {
    /// Parse configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| AppError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::Config("title cannot be empty".to_string()));
        }
        Ok(())
    }
}
