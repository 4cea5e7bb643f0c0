pub mod codec;
pub mod error;
pub mod fill;
pub mod quick_fill;
pub mod range;
pub mod state;
pub mod table;

pub use error::{Result, TableError};
pub use fill::{FillSpec, INPUT_COLUMN, MODE_COLUMN};
pub use quick_fill::{FillType, LookupError, QuickFillMode, QuickFillTable};
pub use range::{resolve, RangeInput, RowRange};
pub use state::{CellPosition, DocumentStatus, EditPhase, EditSession, GridColumn};
pub use table::Table;
