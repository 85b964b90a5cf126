use serde::{Deserialize, Serialize};
use std::fmt;

/// A span of text between two positions, 1-based lines and columns.
///
/// Columns count characters; column `chars + 1` addresses the end of a
/// line. A range with equal start and end positions is a zero-width
/// point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl Range {
    /// Creates a new range.
    ///
    /// Panics when any coordinate is zero or the end position precedes
    /// the start position; malformed ranges are a programming error, not
    /// a recoverable condition.
    pub fn new(start_line: u32, start_column: u32, end_line: u32, end_column: u32) -> Self {
        assert!(
            start_line >= 1 && start_column >= 1 && end_line >= 1 && end_column >= 1,
            "positions are 1-based"
        );
        assert!(
            (start_line, start_column) <= (end_line, end_column),
            "range positions out of order: ({start_line},{start_column})..({end_line},{end_column})"
        );
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    /// A zero-width range at a single position.
    pub fn at(line: u32, column: u32) -> Self {
        Self::new(line, column, line, column)
    }

    pub fn is_empty(&self) -> bool {
        self.start_line == self.end_line && self.start_column == self.end_column
    }

    /// Shifts both positions by `delta` lines, keeping the columns.
    ///
    /// Panics when the shift would move a line below 1.
    pub fn delta_lines(&self, delta: i64) -> Self {
        let shift = |line: u32| -> u32 {
            let shifted = i64::from(line) + delta;
            assert!(shifted >= 1, "line shift out of range: {line} by {delta}");
            shifted as u32
        };
        Self {
            start_line: shift(self.start_line),
            start_column: self.start_column,
            end_line: shift(self.end_line),
            end_column: self.end_column,
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{})..({},{})",
            self.start_line, self.start_column, self.end_line, self.end_column
        )
    }
}
