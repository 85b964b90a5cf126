//! Stateful inline-diff session handling and edit translation.
//!
//! Owns one [`InlineDiff`] session, folds streamed lines into it, and
//! translates normalized diff state into batch edits anchored at the
//! session's range in the host document. The document handle is an
//! explicit parameter on every operation; the handler never reads
//! ambient editor state.

use crate::application::diff_state::{get_diff_state, reconcile_options};
use crate::domain::{
    DiffResult, HandlerError, InlineDiff, LineRange, LineRangeMapping, Range,
};
use crate::infra::document::{DocumentEdit, DocumentModel};
use crate::infra::line_diff::compute_line_diff;

/// One translated edit, before it is lowered to the host's wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEditOp {
    /// New lines at a zero-width position. The text ends with a line
    /// break so it does not merge into the following line.
    Inserted { at: Range, text: String },
    /// Whole-line removal, including the trailing line break.
    Deleted { range: Range },
    /// Whole-line content replacement, no trailing line break.
    Replaced { range: Range, text: String },
}

impl DocumentEditOp {
    /// Lowers to the host edit record; absent text encodes deletion.
    fn into_document_edit(self) -> DocumentEdit {
        let (range, text) = match self {
            DocumentEditOp::Inserted { at, text } => (at, Some(text)),
            DocumentEditOp::Deleted { range } => (range, None),
            DocumentEditOp::Replaced { range, text } => (range, Some(text)),
        };
        DocumentEdit {
            range,
            text,
            force_move_markers: true,
        }
    }
}

/// Drives one streaming generation session.
///
/// Calls for one session must be strictly sequential; the handler holds
/// no lock because no concurrent access is contracted.
pub struct InlineDiffHandler {
    inline_diff: InlineDiff,
}

impl InlineDiffHandler {
    pub fn new(inline_diff: InlineDiff) -> Self {
        Self { inline_diff }
    }

    pub fn inline_diff(&self) -> &InlineDiff {
        &self.inline_diff
    }

    /// Appends streamed `lines` to the session accumulator and
    /// reconciles the result into `doc`.
    ///
    /// Lines must be single physical lines; embedded break characters
    /// are stripped with a warning.
    pub fn add_lines_to_diff(
        &mut self,
        doc: &mut dyn DocumentModel,
        lines: &[String],
        is_undo_redo: bool,
    ) -> Result<(), HandlerError> {
        let mut cleaned_lines = Vec::with_capacity(lines.len());
        for line in lines {
            if line.contains('\n') || line.contains('\r') {
                log::warn!(
                    "generation {}: streamed line contains embedded break characters; stripping",
                    self.inline_diff.generation_id
                );
            }
            cleaned_lines.push(line.replace(['\r', '\n'], ""));
        }

        let old_diff = self.inline_diff.snapshot();
        self.inline_diff.new_text_lines.extend(cleaned_lines);
        let diff_state = get_diff_state(
            &self.inline_diff.original_text_lines,
            &self.inline_diff.new_text_lines,
            false,
            self.inline_diff.is_hidden,
        );
        self.handle_diff_state(doc, &diff_state, &old_diff, is_undo_redo)
    }

    /// Translates `diff_state` into batch edits anchored at the
    /// session's current range and applies them to `doc` atomically.
    ///
    /// The anchor's live content is re-read from the host: it is the
    /// ground truth the edits are expressed against, and it may have
    /// changed since the session snapshot was taken. On success the
    /// session's change state and anchor extent are updated; on host
    /// rejection the session is left exactly as it was.
    pub fn handle_diff_state(
        &mut self,
        doc: &mut dyn DocumentModel,
        diff_state: &DiffResult,
        previous: &InlineDiff,
        is_undo_redo: bool,
    ) -> Result<(), HandlerError> {
        let current = self.inline_diff.current_range;
        let anchor = if !current.is_empty() {
            Range::new(
                current.start_line,
                1,
                current.end_line_exclusive - 1,
                doc.line_max_column(current.end_line_exclusive - 1),
            )
        } else {
            Range::at(current.start_line, 1)
        };

        let anchor_lines: Vec<String> = if anchor.is_empty() {
            Vec::new()
        } else {
            doc.text_in_range(&anchor)
                .split(doc.eol())
                .map(str::to_string)
                .collect()
        };

        let computation = compute_line_diff(
            &anchor_lines,
            &diff_state.new_full_range_text_lines,
            &reconcile_options(),
        );

        let edits: Vec<DocumentEdit> = computation
            .changes
            .iter()
            .map(|change| {
                translate_change(doc, &anchor, change, &diff_state.new_full_range_text_lines)
                    .into_document_edit()
            })
            .collect();

        if !doc.apply_edits(&edits) {
            return Err(HandlerError::ApplyRejected {
                generation_id: self.inline_diff.generation_id.clone(),
            });
        }

        if previous.active_line != diff_state.active_line {
            log::debug!(
                "generation {}: active line {:?} -> {:?}{}",
                self.inline_diff.generation_id,
                previous.active_line,
                diff_state.active_line,
                if is_undo_redo { " (undo/redo)" } else { "" }
            );
        }

        self.inline_diff.changes = diff_state.changes.clone();
        self.inline_diff.active_line = diff_state.active_line;
        self.inline_diff.pending_range = diff_state.pending_range;
        // The anchor region now holds exactly the reconciled lines.
        self.inline_diff.current_range = LineRange::new(
            current.start_line,
            current.start_line + diff_state.new_full_range_text_lines.len() as u32,
        );

        Ok(())
    }
}

/// Builds exactly one edit for a hunk of the anchor-vs-target diff.
fn translate_change(
    doc: &dyn DocumentModel,
    anchor: &Range,
    change: &LineRangeMapping,
    target_lines: &[String],
) -> DocumentEditOp {
    let added = &target_lines[(change.modified.start_line - 1) as usize
        ..(change.modified.end_line_exclusive - 1) as usize];
    let eol = doc.eol();

    if change.original.is_empty() {
        let line = anchor.start_line + change.original.start_line - 1;
        let mut text = added.join(eol);
        text.push_str(eol);
        DocumentEditOp::Inserted {
            at: Range::at(line, 1),
            text,
        }
    } else if change.modified.is_empty() {
        let mut start_line = anchor.start_line + change.original.start_line - 1;
        let mut start_column = 1;
        let mut end_line = anchor.start_line + change.original.end_line_exclusive - 1;
        let end_column;
        if end_line > doc.line_count() {
            // Deleting through the end of the document: absorb the
            // preceding line break instead of leaving a dangling empty
            // line.
            end_line = doc.line_count();
            if start_line > 1 {
                start_line -= 1;
                start_column = doc.line_max_column(start_line);
            }
            end_column = doc.line_max_column(end_line);
        } else {
            end_column = 1;
        }
        DocumentEditOp::Deleted {
            range: Range::new(start_line, start_column, end_line, end_column),
        }
    } else {
        let start_line = anchor.start_line + change.original.start_line - 1;
        let end_line = anchor.start_line + change.original.end_line_exclusive - 2;
        DocumentEditOp::Replaced {
            range: Range::new(start_line, 1, end_line, doc.line_max_column(end_line)),
            text: added.join(eol),
        }
    }
}
