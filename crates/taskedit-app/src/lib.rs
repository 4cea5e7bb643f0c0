//! The editor instance a presentation layer drives: file open/save, cell
//! editing, fill dialogs and error reporting on top of `taskedit-core`.

pub mod config;
pub mod dialog;
pub mod editor;
pub mod error;

pub use config::{EditorConfig, DEFAULT_TITLE};
pub use dialog::{FillColumnForm, QuickFillForm};
pub use editor::{Editor, ROW_NUMBER_HEADER};
pub use error::{AppError, ErrorReport, Result};
