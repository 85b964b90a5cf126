use crate::domain::{LineRange, NormalizedChange};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Configuration for a new [`InlineDiff`] session.
///
/// Every field has a documented default; callers set only what they
/// need. This replaces implicit merge-order construction with named,
/// validated fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineDiffOptions {
    /// Generation identifier. A fresh UUID when not supplied.
    pub generation_id: Option<String>,
    /// Prompt that produced the generation, if any.
    pub prompt: Option<String>,
    /// Diff in the reverse direction while the session is hidden.
    /// Default `false`.
    pub is_hidden: bool,
    /// Whether incremental updates participate in undo grouping.
    /// Default `true`; the bookkeeping itself is a host concern.
    pub can_undo_updates: bool,
    /// Default `false`.
    pub show_native_accept_reject: bool,
    /// Default `false`.
    pub hide_deletion_view_zones: bool,
    /// Default `false`.
    pub attached_to_prompt_bar: bool,
    /// Context lines rendered above the anchor. Default `0`.
    pub extra_context_lines_above: u32,
    /// Context lines rendered below the anchor. Default `0`.
    pub extra_context_lines_below: u32,
}

impl Default for InlineDiffOptions {
    fn default() -> Self {
        Self {
            generation_id: None,
            prompt: None,
            is_hidden: false,
            can_undo_updates: true,
            show_native_accept_reject: false,
            hide_deletion_view_zones: false,
            attached_to_prompt_bar: false,
            extra_context_lines_above: 0,
            extra_context_lines_below: 0,
        }
    }
}

/// State of one streaming generation session anchored to a document
/// range.
///
/// Created once per generation, mutated in place by every batch of
/// streamed lines, and discarded when the session ends. Exclusively
/// owned by one handler; never shared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineDiff {
    pub generation_id: String,
    pub document_id: String,
    #[serde(default)]
    pub prompt: Option<String>,
    /// Line span in the host document that `original_text_lines`
    /// corresponds to. Kept in step with the document as edits apply.
    pub current_range: LineRange,
    /// Immutable snapshot of the text being diffed against.
    pub original_text_lines: Vec<String>,
    /// Everything streamed in so far. Append-only.
    pub new_text_lines: Vec<String>,
    pub changes: Vec<NormalizedChange>,
    pub active_line: Option<u32>,
    pub pending_range: LineRange,
    pub is_hidden: bool,
    pub can_undo_updates: bool,
    pub show_native_accept_reject: bool,
    pub hide_deletion_view_zones: bool,
    pub attached_to_prompt_bar: bool,
    pub extra_context_lines_above: u32,
    pub extra_context_lines_below: u32,
    /// Creation timestamp in RFC3339 format.
    pub created_at: String,
}

impl InlineDiff {
    pub fn new(
        document_id: impl Into<String>,
        current_range: LineRange,
        original_text_lines: Vec<String>,
        options: InlineDiffOptions,
    ) -> Self {
        Self {
            generation_id: options
                .generation_id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            document_id: document_id.into(),
            prompt: options.prompt,
            pending_range: LineRange::new(1, current_range.len() + 1),
            current_range,
            original_text_lines,
            new_text_lines: Vec::new(),
            changes: Vec::new(),
            active_line: None,
            is_hidden: options.is_hidden,
            can_undo_updates: options.can_undo_updates,
            show_native_accept_reject: options.show_native_accept_reject,
            hide_deletion_view_zones: options.hide_deletion_view_zones,
            attached_to_prompt_bar: options.attached_to_prompt_bar,
            extra_context_lines_above: options.extra_context_lines_above,
            extra_context_lines_below: options.extra_context_lines_below,
            created_at: Utc::now().to_rfc3339(),
        }
    }

    /// Plain-value snapshot of the session.
    ///
    /// The record holds no handles or callbacks, so a clone is a
    /// complete snapshot.
    pub fn snapshot(&self) -> InlineDiff {
        self.clone()
    }
}
