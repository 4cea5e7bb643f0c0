use serde::{Deserialize, Serialize};

/// Whether a file is loaded and whether it has unsaved changes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Nothing opened yet
    #[default]
    Unloaded,
    /// Matches the file on disk
    Clean,
    /// Modified since the last load or save
    Dirty,
}

impl DocumentStatus {
    pub fn is_loaded(&self) -> bool {
        !matches!(self, DocumentStatus::Unloaded)
    }

    pub fn is_dirty(&self) -> bool {
        matches!(self, DocumentStatus::Dirty)
    }

    /// A file was loaded or saved
    pub fn mark_clean(&mut self) {
        *self = DocumentStatus::Clean;
    }

    /// The table changed. Has no effect before anything is loaded.
    pub fn mark_dirty(&mut self) {
        if self.is_loaded() {
            *self = DocumentStatus::Dirty;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        let mut status = DocumentStatus::default();
        assert!(!status.is_loaded());

        status.mark_dirty();
        assert_eq!(status, DocumentStatus::Unloaded);

        status.mark_clean();
        assert!(status.is_loaded());
        assert!(!status.is_dirty());

        status.mark_dirty();
        assert!(status.is_dirty());

        status.mark_clean();
        assert_eq!(status, DocumentStatus::Clean);
    }
}
