//! Host document surface and an in-memory implementation.
//!
//! The engine only ever talks to a document through [`DocumentModel`];
//! the host editor owns the real buffer. [`InMemoryDocument`] backs the
//! demo binary and the test suite.

use crate::domain::Range;
use serde::{Deserialize, Serialize};

/// One edit in a batch handed to the host.
///
/// `text == None` deletes the range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEdit {
    pub range: Range,
    pub text: Option<String>,
    /// Ask the host to shift markers and decorations at the edit
    /// boundary instead of dropping them.
    pub force_move_markers: bool,
}

/// Minimum surface the engine needs from a host document.
///
/// Lines and columns are 1-based; `line_max_column` is the column one
/// past the last character of the line. A batch of edits is applied
/// atomically: either every edit lands or none do.
pub trait DocumentModel {
    fn line_count(&self) -> u32;

    /// Panics on an out-of-range line; reading a line that does not
    /// exist is a programming error.
    fn line_max_column(&self, line: u32) -> u32;

    fn text_in_range(&self, range: &Range) -> String;

    /// Line-break convention of the document.
    fn eol(&self) -> &str;

    /// Applies the batch, returning `false` when the host refuses it,
    /// e.g. for edits whose coordinates no longer fit the document.
    fn apply_edits(&mut self, edits: &[DocumentEdit]) -> bool;
}

/// Line-backed document for tests and the demo driver.
///
/// Rejects batches containing out-of-bounds or overlapping edits
/// without mutating anything; hosts that validate positions more
/// leniently may accept more.
#[derive(Debug, Clone)]
pub struct InMemoryDocument {
    id: String,
    lines: Vec<String>,
    eol: String,
}

impl InMemoryDocument {
    pub fn new(id: impl Into<String>, text: &str) -> Self {
        Self {
            id: id.into(),
            lines: text.split('\n').map(str::to_string).collect(),
            eol: "\n".to_string(),
        }
    }

    pub fn from_lines(id: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            id: id.into(),
            lines,
            eol: "\n".to_string(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn text(&self) -> String {
        self.lines.join(&self.eol)
    }

    fn position_is_valid(&self, line: u32, column: u32) -> bool {
        if line < 1 || line > self.lines.len() as u32 {
            return false;
        }
        column >= 1 && column <= self.max_column(line)
    }

    fn max_column(&self, line: u32) -> u32 {
        self.lines[(line - 1) as usize].chars().count() as u32 + 1
    }

    /// Byte offset of a position within [`Self::text`].
    fn byte_offset(&self, line: u32, column: u32) -> usize {
        let line_index = (line - 1) as usize;
        let mut offset = 0usize;
        for preceding in &self.lines[..line_index] {
            offset += preceding.len() + self.eol.len();
        }
        let content = &self.lines[line_index];
        let column_index = (column - 1) as usize;
        let within = content
            .char_indices()
            .nth(column_index)
            .map(|(i, _)| i)
            .unwrap_or(content.len());
        offset + within
    }
}

impl DocumentModel for InMemoryDocument {
    fn line_count(&self) -> u32 {
        self.lines.len() as u32
    }

    fn line_max_column(&self, line: u32) -> u32 {
        assert!(
            line >= 1 && line <= self.lines.len() as u32,
            "line {line} out of range"
        );
        self.max_column(line)
    }

    fn text_in_range(&self, range: &Range) -> String {
        let start = self.byte_offset(range.start_line, range.start_column);
        let end = self.byte_offset(range.end_line, range.end_column);
        self.text()[start..end].to_string()
    }

    fn eol(&self) -> &str {
        &self.eol
    }

    fn apply_edits(&mut self, edits: &[DocumentEdit]) -> bool {
        for edit in edits {
            if !self.position_is_valid(edit.range.start_line, edit.range.start_column)
                || !self.position_is_valid(edit.range.end_line, edit.range.end_column)
            {
                return false;
            }
        }

        // Resolve against the pre-edit text, then apply back to front so
        // earlier offsets stay stable.
        let mut resolved: Vec<(usize, usize, Option<&str>)> = edits
            .iter()
            .map(|edit| {
                (
                    self.byte_offset(edit.range.start_line, edit.range.start_column),
                    self.byte_offset(edit.range.end_line, edit.range.end_column),
                    edit.text.as_deref(),
                )
            })
            .collect();
        resolved.sort_by_key(|(start, end, _)| (*start, *end));
        for pair in resolved.windows(2) {
            if pair[0].1 > pair[1].0 {
                return false;
            }
        }

        let mut text = self.text();
        for (start, end, replacement) in resolved.iter().rev() {
            text.replace_range(*start..*end, replacement.unwrap_or(""));
        }
        self.lines = text.split('\n').map(str::to_string).collect();
        true
    }
}
