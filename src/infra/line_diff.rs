//! Line-level diff computation with sub-line change detail.
//!
//! Wraps a Myers alignment over line slices and refines replace hunks
//! with a character-level pass, all under a polled wall-clock budget.

use crate::domain::{DiffComputationResult, LineRange, LineRangeMapping, Range, RangeMapping};
use similar::{Algorithm, DiffTag, TextDiff};
use std::time::{Duration, Instant};

/// Lines longer than this skip the character-level refinement pass.
const MAX_INNER_LEN: usize = 600;

/// Options for [`compute_line_diff`].
#[derive(Debug, Clone)]
pub struct LineDiffOptions {
    /// Treat lines as equal modulo leading/trailing whitespace.
    pub ignore_trim_whitespace: bool,
    /// Hard wall-clock budget for the whole computation.
    pub max_computation_time: Duration,
    /// Report block relocations as move hunks. Not supported by the
    /// current matcher; relocations always come back as delete/insert
    /// pairs and the flag is ignored.
    pub compute_moves: bool,
}

impl Default for LineDiffOptions {
    fn default() -> Self {
        Self {
            ignore_trim_whitespace: false,
            max_computation_time: Duration::from_millis(200),
            compute_moves: false,
        }
    }
}

/// Computes the minimal line edit script between `original` and
/// `modified`.
///
/// Hunks come back in ascending order on both sides and never overlap.
/// Replace hunks additionally carry character-level inner changes for
/// index-paired lines. When the time budget is exceeded the result is
/// flagged with `hit_timeout` and its hunks must not be trusted; the
/// check is a local poll, the function still returns promptly and
/// synchronously. Never panics for well-formed inputs, including empty
/// sequences.
pub fn compute_line_diff(
    original: &[String],
    modified: &[String],
    options: &LineDiffOptions,
) -> DiffComputationResult {
    let started = Instant::now();

    if options.compute_moves {
        log::debug!("move detection is not supported; reporting relocations as delete/insert");
    }

    let trim = options.ignore_trim_whitespace;
    let original_keys: Vec<&str> = original
        .iter()
        .map(|line| if trim { line.trim() } else { line.as_str() })
        .collect();
    let modified_keys: Vec<&str> = modified
        .iter()
        .map(|line| if trim { line.trim() } else { line.as_str() })
        .collect();

    let line_diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .timeout(options.max_computation_time)
        .diff_slices(&original_keys, &modified_keys);

    let mut hit_timeout = started.elapsed() >= options.max_computation_time;
    let mut changes = Vec::new();

    for op in line_diff.ops() {
        if op.tag() == DiffTag::Equal {
            continue;
        }
        let old = op.old_range();
        let new = op.new_range();
        let original_range = LineRange::new(old.start as u32 + 1, old.end as u32 + 1);
        let modified_range = LineRange::new(new.start as u32 + 1, new.end as u32 + 1);

        let inner_changes = if op.tag() == DiffTag::Replace && !hit_timeout {
            let inner = inner_changes_for_hunk(
                &original[old],
                &modified[new],
                original_range.start_line,
                modified_range.start_line,
                started,
                options.max_computation_time,
            );
            hit_timeout = started.elapsed() >= options.max_computation_time;
            inner
        } else {
            None
        };

        changes.push(LineRangeMapping {
            original: original_range,
            modified: modified_range,
            inner_changes,
        });
    }

    DiffComputationResult {
        changes,
        hit_timeout,
    }
}

/// Character-level refinement for one replace hunk.
///
/// Lines are paired by index; unpaired tail lines carry no inner
/// detail. Columns are 1-based character offsets.
fn inner_changes_for_hunk(
    removed: &[String],
    added: &[String],
    original_start_line: u32,
    modified_start_line: u32,
    started: Instant,
    budget: Duration,
) -> Option<Vec<RangeMapping>> {
    let mut mappings = Vec::new();

    for (offset, (old_line, new_line)) in removed.iter().zip(added.iter()).enumerate() {
        if started.elapsed() >= budget {
            break;
        }
        if old_line.len() > MAX_INNER_LEN || new_line.len() > MAX_INNER_LEN {
            continue;
        }

        let original_line = original_start_line + offset as u32;
        let modified_line = modified_start_line + offset as u32;
        let char_diff = TextDiff::configure()
            .timeout(budget.saturating_sub(started.elapsed()))
            .diff_chars(old_line.as_str(), new_line.as_str());

        for op in char_diff.ops() {
            if op.tag() == DiffTag::Equal {
                continue;
            }
            let old = op.old_range();
            let new = op.new_range();
            mappings.push(RangeMapping {
                original_range: Range::new(
                    original_line,
                    old.start as u32 + 1,
                    original_line,
                    old.end as u32 + 1,
                ),
                modified_range: Range::new(
                    modified_line,
                    new.start as u32 + 1,
                    modified_line,
                    new.end as u32 + 1,
                ),
            });
        }
    }

    if mappings.is_empty() {
        None
    } else {
        Some(mappings)
    }
}
