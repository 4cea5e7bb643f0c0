use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use taskedit_core::fill;
use taskedit_core::{
    CellPosition, DocumentStatus, EditSession, FillSpec, GridColumn, Table, TableError,
};

use crate::config::EditorConfig;
use crate::dialog::{FillColumnForm, QuickFillForm};
use crate::error::{AppError, Result};

/// Header of the synthetic row-number column
pub const ROW_NUMBER_HEADER: &str = "#";

/// A single-table CSV editor instance.
///
/// Owns the table; every component borrows it for one operation.
#[derive(Debug)]
pub struct Editor {
    table: Table,
    path: Option<PathBuf>,
    status: DocumentStatus,
    session: EditSession,
    config: EditorConfig,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            table: Table::new(),
            path: None,
            status: DocumentStatus::Unloaded,
            session: EditSession::new(),
            config,
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn status(&self) -> DocumentStatus {
        self.status
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Window title, with the file name once a file is open
    pub fn title(&self) -> String {
        match self.path.as_ref().and_then(|p| p.file_name()) {
            Some(name) => format!("{} – {}", self.config.title, name.to_string_lossy()),
            None => self.config.title.clone(),
        }
    }

    pub fn can_save(&self) -> bool {
        self.status.is_loaded()
    }

    pub fn can_fill(&self) -> bool {
        self.status.is_loaded()
    }

    /// Load a CSV file, replacing the current table.
    ///
    /// On failure the current table and path are kept.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let table = read_table(path).map_err(|source| {
            tracing::warn!("Failed to open {}: {}", path.display(), source);
            AppError::Open {
                path: path.to_path_buf(),
                source,
            }
        })?;

        // A pending edit belongs to the table being replaced
        self.session.cancel();
        self.session.reset();

        tracing::info!(
            "Opened {} ({} rows, {} columns)",
            path.display(),
            table.row_count(),
            table.column_count()
        );
        self.table.replace(table);
        self.path = Some(path.to_path_buf());
        self.status.mark_clean();
        Ok(())
    }

    /// Save to the current file. Returns `None` when no file is open.
    pub fn save(&mut self) -> Result<Option<PathBuf>> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => return Ok(None),
        };
        self.save_as(&path)?;
        Ok(Some(path))
    }

    /// Save to `path` and make it the current file
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if !self.status.is_loaded() {
            return Err(AppError::NoDocument);
        }
        self.finish_edit()?;

        write_table(&self.table, path).map_err(|source| {
            tracing::warn!("Failed to save {}: {}", path.display(), source);
            AppError::Save {
                path: path.to_path_buf(),
                source,
            }
        })?;

        tracing::info!("Saved {} rows to {}", self.table.row_count(), path.display());
        self.path = Some(path.to_path_buf());
        self.status.mark_clean();
        Ok(())
    }

    /// Start editing the cell at `row` and grid column `display_col`
    /// (column 0 is the row-number column).
    pub fn begin_edit(&mut self, row: usize, display_col: usize) -> Result<CellPosition> {
        let was_editing = self.session.is_editing();
        let position = self
            .session
            .begin(&mut self.table, row, GridColumn::from_display_index(display_col))?;
        if was_editing {
            self.status.mark_dirty();
        }
        tracing::debug!("Editing cell ({}, {})", position.row, position.col);
        Ok(position)
    }

    pub fn update_edit(&mut self, value: impl Into<String>) -> Result<()> {
        Ok(self.session.update_pending(value)?)
    }

    /// Commit the running edit, if any
    pub fn commit_edit(&mut self) -> Result<Option<CellPosition>> {
        let committed = self.session.commit(&mut self.table)?;
        if let Some(position) = committed {
            tracing::debug!("Committed cell ({}, {})", position.row, position.col);
            self.status.mark_dirty();
            self.session.reset();
        }
        Ok(committed)
    }

    /// Abandon the running edit, returning the cell's unchanged value
    pub fn cancel_edit(&mut self) -> Option<String> {
        let original = self.session.cancel();
        self.session.reset();
        original
    }

    /// Validate the "Fill Column" form and apply it
    pub fn fill_column(&mut self, form: &FillColumnForm) -> Result<usize> {
        let spec = form.validate(&self.table).map_err(rejected)?;
        self.apply_fill(&spec)
    }

    /// Validate the "Quick Fill" form and apply it
    pub fn quick_fill(&mut self, form: &QuickFillForm) -> Result<usize> {
        let spec = form.validate(&self.table).map_err(rejected)?;
        self.apply_fill(&spec)
    }

    /// Apply an already validated fill; the range is checked again first
    pub fn apply_fill(&mut self, spec: &FillSpec) -> Result<usize> {
        self.finish_edit()?;
        let written = fill::apply(&mut self.table, &self.config.quick_fill, spec).map_err(rejected)?;

        tracing::debug!("Filled {} rows", written);
        self.status.mark_dirty();
        Ok(written)
    }

    /// Grid headers with the row-number column first
    pub fn grid_headers(&self) -> Vec<&str> {
        std::iter::once(ROW_NUMBER_HEADER)
            .chain(self.table.columns().iter().map(String::as_str))
            .collect()
    }

    /// A grid row: its 1-based number followed by the cell values
    pub fn grid_row(&self, row: usize) -> Option<Vec<String>> {
        let cells = self.table.row(row)?;
        let mut values = Vec::with_capacity(cells.len() + 1);
        values.push((row + 1).to_string());
        values.extend(cells.iter().cloned());
        Some(values)
    }

    fn finish_edit(&mut self) -> Result<()> {
        self.commit_edit()?;
        Ok(())
    }
}

fn rejected(err: TableError) -> AppError {
    tracing::warn!("Fill rejected: {}", err);
    AppError::Table(err)
}

fn read_table(path: &Path) -> taskedit_core::Result<Table> {
    let file = File::open(path)?;
    Table::from_reader(BufReader::new(file))
}

fn write_table(table: &Table, path: &Path) -> taskedit_core::Result<()> {
    replace_file(path, |writer| table.write_to(writer))
}

/// Write into a temporary sibling of `path`, then rename it over `path`.
/// The existing file is untouched unless every write succeeds.
fn replace_file<F>(path: &Path, write: F) -> taskedit_core::Result<()>
where
    F: FnOnce(&mut BufWriter<&File>) -> taskedit_core::Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        write(&mut writer)?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
