pub mod document;
pub mod edit;

pub use document::DocumentStatus;
pub use edit::{CellPosition, EditPhase, EditSession, GridColumn};
