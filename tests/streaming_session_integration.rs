//! Integration tests for the streaming reconciliation workflow.
//! These drive full sessions through the public API against an
//! in-memory document and check the document after every increment.

use redraft::application::diff_state::get_diff_state;
use redraft::application::handler::InlineDiffHandler;
use redraft::domain::{InlineDiff, InlineDiffOptions, LineRange};
use redraft::infra::document::InMemoryDocument;

fn lines(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn start_session(
    doc: &InMemoryDocument,
    anchor: LineRange,
    original: &[&str],
) -> InlineDiffHandler {
    InlineDiffHandler::new(InlineDiff::new(
        doc.id().to_string(),
        anchor,
        lines(original),
        InlineDiffOptions::default(),
    ))
}

#[test]
fn test_code_rewrite_streams_to_convergence() {
    let mut doc = InMemoryDocument::new(
        "main.rs",
        "fn main() {\n    println!(\"hello\");\n}\n",
    );
    let mut handler = start_session(
        &doc,
        LineRange::new(1, 4),
        &["fn main() {", "    println!(\"hello\");", "}"],
    );

    // The unchanged first line arrives: nothing to show yet, the rest of
    // the original block is merely pending.
    handler
        .add_lines_to_diff(&mut doc, &lines(&["fn main() {"]), false)
        .unwrap();
    assert_eq!(doc.text(), "fn main() {\n    println!(\"hello\");\n}\n");
    assert_eq!(handler.inline_diff().active_line, Some(2));

    // New lines surface above the pending original tail.
    handler
        .add_lines_to_diff(&mut doc, &lines(&["    let name = \"world\";"]), false)
        .unwrap();
    assert_eq!(
        doc.text(),
        "fn main() {\n    let name = \"world\";\n    println!(\"hello\");\n}\n"
    );

    handler
        .add_lines_to_diff(
            &mut doc,
            &lines(&["    println!(\"hello {name}\");"]),
            false,
        )
        .unwrap();
    assert_eq!(
        doc.text(),
        "fn main() {\n    let name = \"world\";\n    println!(\"hello {name}\");\n    println!(\"hello\");\n}\n"
    );
    assert_eq!(handler.inline_diff().active_line, Some(4));
    assert_eq!(handler.inline_diff().pending_range, LineRange::new(4, 6));

    // The closing brace matches the original tail: the superseded
    // original line is finally deleted and nothing stays pending.
    handler
        .add_lines_to_diff(&mut doc, &lines(&["}"]), false)
        .unwrap();
    assert_eq!(
        doc.text(),
        "fn main() {\n    let name = \"world\";\n    println!(\"hello {name}\");\n}\n"
    );
    assert_eq!(handler.inline_diff().active_line, None);
    assert_eq!(handler.inline_diff().pending_range, LineRange::new(1, 1));
    assert_eq!(handler.inline_diff().current_range, LineRange::new(1, 5));
    assert_eq!(handler.inline_diff().changes.len(), 1);
}

#[test]
fn test_session_state_tracks_each_increment() {
    let mut doc = InMemoryDocument::new("notes.txt", "ddddddd\nccccc\naaaaa\n");
    let mut handler = start_session(&doc, LineRange::new(1, 4), &["ddddddd", "ccccc", "aaaaa"]);

    handler
        .add_lines_to_diff(&mut doc, &lines(&["ddddddd"]), false)
        .unwrap();
    assert_eq!(handler.inline_diff().new_text_lines, lines(&["ddddddd"]));
    assert!(handler.inline_diff().changes.is_empty());
    assert_eq!(handler.inline_diff().pending_range, LineRange::new(2, 4));

    handler
        .add_lines_to_diff(&mut doc, &lines(&["aa"]), false)
        .unwrap();
    assert_eq!(doc.text(), "ddddddd\naa\nccccc\naaaaa\n");
    assert_eq!(handler.inline_diff().changes.len(), 1);
    let marker = &handler.inline_diff().changes[0];
    assert!(marker.removed_text_lines.is_empty());
    assert_eq!(marker.added_range, LineRange::new(2, 3));
    assert_eq!(handler.inline_diff().active_line, Some(3));

    handler
        .add_lines_to_diff(&mut doc, &lines(&["zzz"]), false)
        .unwrap();
    assert_eq!(doc.text(), "ddddddd\naa\nzzz\nccccc\naaaaa\n");
    assert_eq!(handler.inline_diff().active_line, Some(4));
    assert_eq!(handler.inline_diff().pending_range, LineRange::new(4, 6));
    assert_eq!(handler.inline_diff().current_range, LineRange::new(1, 6));
}

#[test]
fn test_session_record_serializes() {
    let mut doc = InMemoryDocument::new("a.txt", "one\ntwo\n");
    let mut handler = start_session(&doc, LineRange::new(1, 3), &["one", "two"]);
    handler
        .add_lines_to_diff(&mut doc, &lines(&["one", "2"]), false)
        .unwrap();

    let json = serde_json::to_string(handler.inline_diff()).unwrap();
    let restored: InlineDiff = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.new_text_lines, lines(&["one", "2"]));
    assert_eq!(restored.pending_range, handler.inline_diff().pending_range);
    assert_eq!(restored.generation_id, handler.inline_diff().generation_id);
}

#[test]
fn test_committed_shrink_clamps_at_document_end() {
    // No trailing newline: deleting the last lines has to absorb the
    // preceding line break instead of leaving an empty line behind.
    let mut doc = InMemoryDocument::new("a.txt", "alpha\nbravo\ncharlie");
    let mut handler = start_session(&doc, LineRange::new(1, 4), &["alpha", "bravo", "charlie"]);

    let diff_state = get_diff_state(
        &lines(&["alpha", "bravo", "charlie"]),
        &lines(&["alpha"]),
        true,
        false,
    );
    let previous = handler.inline_diff().snapshot();
    handler
        .handle_diff_state(&mut doc, &diff_state, &previous, false)
        .unwrap();

    assert_eq!(doc.text(), "alpha");
    assert_eq!(handler.inline_diff().current_range, LineRange::new(1, 2));
}

#[test]
fn test_generation_growing_past_the_anchor() {
    let mut doc = InMemoryDocument::new("a.txt", "start\nend\n");
    let mut handler = start_session(&doc, LineRange::new(1, 2), &["start"]);

    handler
        .add_lines_to_diff(&mut doc, &lines(&["start"]), false)
        .unwrap();
    assert_eq!(doc.text(), "start\nend\n");

    handler
        .add_lines_to_diff(&mut doc, &lines(&["extra"]), false)
        .unwrap();
    assert_eq!(doc.text(), "start\nextra\nend\n");
    assert_eq!(handler.inline_diff().current_range, LineRange::new(1, 3));
}
