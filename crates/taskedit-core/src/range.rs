use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

use crate::error::{Result, TableError};

/// An inclusive range of rows (0-indexed internally)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowRange {
    start: usize,
    end: usize,
}

impl RowRange {
    /// Create a range from 0-based inclusive bounds. Returns `None` if `end < start`.
    pub fn new(start: usize, end: usize) -> Option<Self> {
        if end < start {
            return None;
        }
        Some(RowRange { start, end })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of rows covered by the range
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// A range always covers at least one row
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, row: usize) -> bool {
        row >= self.start && row <= self.end
    }

    /// Iterate over the row indices in the range
    pub fn rows(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }

    /// Re-validate against the table's current row count.
    ///
    /// Ranges are resolved against a row count that may have changed since
    /// (the table can be reloaded between range entry and fill).
    pub fn check(&self, row_count: usize) -> Result<()> {
        if self.end >= row_count {
            return Err(TableError::validation(format!(
                "Row range {} exceeds available rows ({}).",
                self, row_count
            )));
        }
        Ok(())
    }
}

impl fmt::Display for RowRange {
    /// 1-based, as shown to the user
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "row {}", self.start + 1)
        } else {
            write!(f, "rows {}-{}", self.start + 1, self.end + 1)
        }
    }
}

impl IntoIterator for RowRange {
    type Item = usize;
    type IntoIter = RangeInclusive<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows()
    }
}

/// A row range as requested by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RangeInput {
    /// 1-based start/end exactly as typed
    Explicit { start: String, end: String },
    AllRows,
}

impl RangeInput {
    pub fn explicit(start: impl Into<String>, end: impl Into<String>) -> Self {
        RangeInput::Explicit {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Resolve against the given row count. See [`resolve`].
    pub fn resolve(&self, row_count: usize) -> Result<RowRange> {
        resolve(self, row_count)
    }
}

/// Validate a user range request and convert it to 0-based inclusive bounds.
///
/// Out-of-range requests are rejected, never clamped.
pub fn resolve(input: &RangeInput, row_count: usize) -> Result<RowRange> {
    match input {
        RangeInput::AllRows => {
            if row_count == 0 {
                return Err(TableError::EmptyTable);
            }
            Ok(RowRange {
                start: 0,
                end: row_count - 1,
            })
        }
        RangeInput::Explicit { start, end } => {
            let (start, end) = match (parse_row(start), parse_row(end)) {
                (Some(start), Some(end)) => (start, end),
                _ => return Err(invalid_bounds()),
            };
            if start < 1 || end < start {
                return Err(invalid_bounds());
            }

            if end as u64 > row_count as u64 {
                return Err(TableError::validation("Row range exceeds available rows."));
            }

            // 1 <= start <= end <= row_count
            Ok(RowRange {
                start: (start - 1) as usize,
                end: (end - 1) as usize,
            })
        }
    }
}

fn parse_row(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

fn invalid_bounds() -> TableError {
    TableError::validation("Start/end rows must be valid integers and start ≤ end.")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explicit(start: &str, end: &str) -> RangeInput {
        RangeInput::explicit(start, end)
    }

    #[test]
    fn test_all_rows() {
        let range = resolve(&RangeInput::AllRows, 5).unwrap();
        assert_eq!((range.start(), range.end()), (0, 4));
        assert_eq!(range.len(), 5);
    }

    #[test]
    fn test_all_rows_empty_table() {
        assert!(matches!(
            resolve(&RangeInput::AllRows, 0),
            Err(TableError::EmptyTable)
        ));
    }

    #[test]
    fn test_explicit_full_range() {
        let range = resolve(&explicit("1", "3"), 3).unwrap();
        assert_eq!((range.start(), range.end()), (0, 2));
    }

    #[test]
    fn test_explicit_single_row() {
        let range = resolve(&explicit(" 2 ", "2"), 3).unwrap();
        assert_eq!((range.start(), range.end()), (1, 1));
        assert_eq!(range.len(), 1);
    }

    #[test]
    fn test_rejects_start_zero() {
        let err = resolve(&explicit("0", "2"), 3).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_rejects_negative_start() {
        assert!(resolve(&explicit("-1", "2"), 3).is_err());
    }

    #[test]
    fn test_rejects_inverted() {
        assert!(resolve(&explicit("3", "2"), 3).is_err());
    }

    #[test]
    fn test_rejects_past_end() {
        let err = resolve(&explicit("1", "4"), 3).unwrap_err();
        assert_eq!(err.to_string(), "Row range exceeds available rows.");
    }

    #[test]
    fn test_rejects_non_integers() {
        assert!(resolve(&explicit("one", "2"), 3).is_err());
        assert!(resolve(&explicit("1", ""), 3).is_err());
        assert!(resolve(&explicit("1.5", "2"), 3).is_err());
    }

    #[test]
    fn test_explicit_on_empty_table() {
        assert!(resolve(&explicit("1", "1"), 0).is_err());
    }

    #[test]
    fn test_check_stale_range() {
        let range = resolve(&explicit("2", "3"), 3).unwrap();
        assert!(range.check(3).is_ok());
        assert!(range.check(2).is_err());
    }

    #[test]
    fn test_iteration_and_display() {
        let range = RowRange::new(1, 3).unwrap();
        assert_eq!(range.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(range.contains(2));
        assert!(!range.contains(0));
        assert_eq!(range.to_string(), "rows 2-4");
        assert_eq!(RowRange::new(0, 0).unwrap().to_string(), "row 1");
        assert!(RowRange::new(2, 1).is_none());
    }

    #[test]
    fn test_range_input_serialization() {
        let input = explicit("1", "2");
        let json = serde_json::to_string(&input).unwrap();
        assert_eq!(json, r#"{"type":"explicit","start":"1","end":"2"}"#);

        let back: RangeInput = serde_json::from_str(r#"{"type":"all_rows"}"#).unwrap();
        assert_eq!(back, RangeInput::AllRows);
    }
}
