use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};
use crate::table::Table;

/// A cell address inside the table (0-indexed)
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

impl CellPosition {
    pub const fn new(row: usize, col: usize) -> Self {
        CellPosition { row, col }
    }
}

/// A column as laid out in the grid view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridColumn {
    /// The synthetic "#" column showing 1-based row numbers
    RowNumber,
    /// A table column by index
    Field(usize),
}

impl GridColumn {
    /// Display column 0 is the row-number column, the rest map onto table columns
    pub fn from_display_index(index: usize) -> Self {
        match index {
            0 => GridColumn::RowNumber,
            n => GridColumn::Field(n - 1),
        }
    }
}

/// Where an edit session currently stands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditPhase {
    Idle,
    Editing {
        position: CellPosition,
        original: String,
        pending: String,
    },
    Committed {
        position: CellPosition,
    },
    Cancelled {
        position: CellPosition,
    },
}

impl Default for EditPhase {
    fn default() -> Self {
        Self::Idle
    }
}

impl EditPhase {
    pub fn is_editing(&self) -> bool {
        matches!(self, EditPhase::Editing { .. })
    }

    pub fn position(&self) -> Option<CellPosition> {
        match self {
            EditPhase::Idle => None,
            EditPhase::Editing { position, .. }
            | EditPhase::Committed { position }
            | EditPhase::Cancelled { position } => Some(*position),
        }
    }
}

/// In-place editing of a single cell.
///
/// The session never owns the table; each call borrows it for the duration
/// of that call only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditSession {
    phase: EditPhase,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing `row`/`column`, committing any session already in progress.
    ///
    /// The address is validated first: on error neither the table nor a
    /// running session is touched.
    pub fn begin(&mut self, table: &mut Table, row: usize, column: GridColumn) -> Result<CellPosition> {
        let col = match column {
            GridColumn::RowNumber => return Err(TableError::ReservedColumn),
            GridColumn::Field(col) => col,
        };
        table.get_cell(row, col)?;

        // Moving focus to another cell saves the one being edited
        if self.is_editing() {
            self.commit(table)?;
        }

        // Read after the commit; it may have written this very cell
        let current = table.get_cell(row, col)?.to_string();
        let position = CellPosition::new(row, col);
        self.phase = EditPhase::Editing {
            position,
            original: current.clone(),
            pending: current,
        };
        Ok(position)
    }

    /// Replace the pending text
    pub fn update_pending(&mut self, value: impl Into<String>) -> Result<()> {
        match &mut self.phase {
            EditPhase::Editing { pending, .. } => {
                *pending = value.into();
                Ok(())
            }
            _ => Err(TableError::NotEditing),
        }
    }

    /// Write the pending text into the table.
    ///
    /// Returns the committed position, or `None` when there was nothing to
    /// commit (a second commit after the first is a no-op). If the write
    /// fails the session keeps editing.
    pub fn commit(&mut self, table: &mut Table) -> Result<Option<CellPosition>> {
        let (position, pending) = match &self.phase {
            EditPhase::Editing {
                position, pending, ..
            } => (*position, pending.clone()),
            _ => return Ok(None),
        };

        table.set_cell(position.row, position.col, pending)?;
        self.phase = EditPhase::Committed { position };
        Ok(Some(position))
    }

    /// Drop the pending text and return the original value
    pub fn cancel(&mut self) -> Option<String> {
        match std::mem::take(&mut self.phase) {
            EditPhase::Editing {
                position, original, ..
            } => {
                self.phase = EditPhase::Cancelled { position };
                Some(original)
            }
            other => {
                self.phase = other;
                None
            }
        }
    }

    /// Return to idle after a commit or cancel
    pub fn reset(&mut self) {
        self.phase = EditPhase::Idle;
    }

    pub fn phase(&self) -> &EditPhase {
        &self.phase
    }

    pub fn is_editing(&self) -> bool {
        self.phase.is_editing()
    }

    pub fn position(&self) -> Option<CellPosition> {
        match &self.phase {
            EditPhase::Editing { position, .. } => Some(*position),
            _ => None,
        }
    }

    pub fn pending(&self) -> Option<&str> {
        match &self.phase {
            EditPhase::Editing { pending, .. } => Some(pending),
            _ => None,
        }
    }

    pub fn original(&self) -> Option<&str> {
        match &self.phase {
            EditPhase::Editing { original, .. } => Some(original),
            _ => None,
        }
    }
}
