use crate::domain::{LineRange, Range};
use serde::{Deserialize, Serialize};

/// A sub-line correspondence inside a hunk.
///
/// Used for highlighting, not for edit application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeMapping {
    pub original_range: Range,
    pub modified_range: Range,
}

/// One contiguous region of difference between two line sequences.
///
/// Hunks are produced in ascending line order and never overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRangeMapping {
    pub original: LineRange,
    pub modified: LineRange,
    pub inner_changes: Option<Vec<RangeMapping>>,
}

/// Raw output of the line diff computer.
///
/// When `hit_timeout` is set the hunks are whatever the aborted search
/// produced and must not be trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffComputationResult {
    pub changes: Vec<LineRangeMapping>,
    pub hit_timeout: bool,
}

/// One reconciled change, ready for presentation or edit translation.
///
/// A pending-tail marker carries empty `removed_text_lines` and a
/// zero-width `removed_lines_original_range`: the original lines it may
/// eventually replace are not yet known to be superseded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedChange {
    pub removed_text_lines: Vec<String>,
    pub removed_lines_original_range: LineRange,
    /// Position of the added lines within the full reconciled text.
    pub added_range: LineRange,
    /// Inner changes with line numbers shifted so the hunk's own first
    /// line is line 1 on both sides.
    pub relative_inner_changes: Option<Vec<RangeMapping>>,
}

/// Result of folding a streamed accumulator against the original lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    /// Modified lines followed by any still-pending original tail lines.
    pub new_full_range_text_lines: Vec<String>,
    pub changes: Vec<NormalizedChange>,
    /// First pending line, when a tail is still streaming in.
    pub active_line: Option<u32>,
    /// Position of the pending tail within `new_full_range_text_lines`,
    /// or `[1, 1)` when there is none.
    pub pending_range: LineRange,
}
