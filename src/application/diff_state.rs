//! Reconciles a streamed accumulator against the original lines.
//!
//! Separates committed changes from the still-arriving tail: original
//! lines the stream may eventually overwrite are reported as pending
//! instead of removed, so the document does not flicker while the
//! generation is in flight.

use crate::domain::{
    DiffComputationResult, DiffResult, LineRange, LineRangeMapping, NormalizedChange, RangeMapping,
};
use crate::infra::line_diff::{LineDiffOptions, compute_line_diff};
use std::time::Duration;

/// Budget for one reconciliation diff, in milliseconds.
const MAX_COMPUTATION_TIME_MS: u64 = 200;

pub(crate) fn reconcile_options() -> LineDiffOptions {
    LineDiffOptions {
        ignore_trim_whitespace: false,
        max_computation_time: Duration::from_millis(MAX_COMPUTATION_TIME_MS),
        compute_moves: false,
    }
}

/// Diffs `original_lines` against `modified_lines` and normalizes the
/// hunks for presentation and edit translation.
///
/// With `is_legacy == false`, the hunk whose modified range touches the
/// very end of `modified_lines` is treated as still streaming: its
/// original lines come back as the pending tail, appended after the
/// modified lines in `new_full_range_text_lines`, and the hunk itself is
/// reported as a provisional insertion marker rather than a committed
/// replace. `swap_original_and_modified` diffs in the reverse direction
/// without duplicating the walk.
pub fn get_diff_state(
    original_lines: &[String],
    modified_lines: &[String],
    is_legacy: bool,
    swap_original_and_modified: bool,
) -> DiffResult {
    let (original_lines, modified_lines) = if swap_original_and_modified {
        (modified_lines, original_lines)
    } else {
        (original_lines, modified_lines)
    };

    let computation = compute_line_diff(original_lines, modified_lines, &reconcile_options());
    let computation = if computation.hit_timeout {
        log::warn!(
            "line diff hit its {MAX_COMPUTATION_TIME_MS}ms budget; falling back to a whole-range replace"
        );
        DiffComputationResult {
            changes: vec![whole_range_fallback(original_lines, modified_lines)],
            hit_timeout: true,
        }
    } else {
        computation
    };

    normalize(&computation.changes, original_lines, modified_lines, is_legacy)
}

/// Conservative substitute for untrusted hunks: one replace covering
/// both sequences entirely, with no inner changes.
fn whole_range_fallback(original_lines: &[String], modified_lines: &[String]) -> LineRangeMapping {
    LineRangeMapping {
        original: LineRange::new(1, original_lines.len() as u32 + 1),
        modified: LineRange::new(1, modified_lines.len() as u32 + 1),
        inner_changes: None,
    }
}

/// Walks the hunks in order, splitting off the pending tail and
/// assembling the normalized result.
fn normalize(
    changes: &[LineRangeMapping],
    original_lines: &[String],
    modified_lines: &[String],
    is_legacy: bool,
) -> DiffResult {
    let mut diff_changes = Vec::new();
    let mut pending_lines: Vec<String> = Vec::new();

    for change in changes {
        let touches_modified_end =
            change.modified.end_line_exclusive == modified_lines.len() as u32 + 1;
        if touches_modified_end && !is_legacy {
            pending_lines = line_slice(original_lines, change.original).to_vec();
            if change.modified.is_empty() {
                continue;
            }
            diff_changes.push(NormalizedChange {
                removed_text_lines: Vec::new(),
                removed_lines_original_range: LineRange::empty_at(change.original.start_line),
                added_range: change.modified,
                relative_inner_changes: None,
            });
        } else {
            diff_changes.push(NormalizedChange {
                removed_text_lines: line_slice(original_lines, change.original).to_vec(),
                removed_lines_original_range: change.original,
                added_range: change.modified,
                relative_inner_changes: change.inner_changes.as_ref().map(|inner| {
                    inner
                        .iter()
                        .map(|mapping| RangeMapping {
                            original_range: mapping
                                .original_range
                                .delta_lines(1 - i64::from(change.original.start_line)),
                            modified_range: mapping
                                .modified_range
                                .delta_lines(1 - i64::from(change.modified.start_line)),
                        })
                        .collect()
                }),
            });
        }
    }

    let mut new_full_range_text_lines = modified_lines.to_vec();
    new_full_range_text_lines.extend(pending_lines.iter().cloned());

    let (active_line, pending_range) = if pending_lines.is_empty() {
        (None, LineRange::new(1, 1))
    } else {
        let first_pending = modified_lines.len() as u32 + 1;
        (
            Some(first_pending),
            LineRange::new(first_pending, first_pending + pending_lines.len() as u32),
        )
    };

    DiffResult {
        new_full_range_text_lines,
        changes: diff_changes,
        active_line,
        pending_range,
    }
}

fn line_slice(lines: &[String], range: LineRange) -> &[String] {
    &lines[(range.start_line - 1) as usize..(range.end_line_exclusive - 1) as usize]
}
