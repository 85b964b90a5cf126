//! Demo driver for the redraft engine.
//! Streams a sample generation into an in-memory document and reports
//! each reconciliation step.

use anyhow::Result;
use redraft::application::diff_state::get_diff_state;
use redraft::application::handler::InlineDiffHandler;
use redraft::domain::{InlineDiff, InlineDiffOptions, LineRange};
use redraft::infra::config::load_config;
use redraft::infra::document::InMemoryDocument;
use redraft::infra::line_diff::compute_line_diff;

fn main() -> Result<()> {
    env_logger::init();

    let config = load_config();
    let original_lines: Vec<String> = ["ddddddd", "ccccc", "aaaaa"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let streamed_lines = ["ddddddd", "aa", "bbbb"];

    // Raw hunks first, then the normalized view of the same pair.
    let modified_lines: Vec<String> = streamed_lines[..2].iter().map(|s| s.to_string()).collect();
    let computation = compute_line_diff(
        &original_lines,
        &modified_lines,
        &config.line_diff_options(),
    );
    log::info!(
        "raw diff: {} hunk(s), hit_timeout = {}",
        computation.changes.len(),
        computation.hit_timeout
    );

    let diff_state = get_diff_state(&original_lines, &modified_lines, false, false);
    log::info!(
        "normalized: active_line = {:?}, pending = {}",
        diff_state.active_line,
        diff_state.pending_range
    );

    // Stream the full generation through a live session.
    let mut doc = InMemoryDocument::new("demo.txt", "ddddddd\nccccc\naaaaa\n");
    let session = InlineDiff::new(
        doc.id().to_string(),
        LineRange::new(1, 4),
        original_lines,
        InlineDiffOptions {
            prompt: Some("rewrite the block".to_string()),
            ..Default::default()
        },
    );
    let mut handler = InlineDiffHandler::new(session);

    for line in streamed_lines {
        handler.add_lines_to_diff(&mut doc, &[line.to_string()], false)?;
        println!("--- after {line:?} ---");
        println!("{}", doc.text());
    }

    println!("--- final session ---");
    println!("{}", serde_json::to_string_pretty(handler.inline_diff())?);
    Ok(())
}
