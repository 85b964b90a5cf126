//! Streaming inline-diff reconciliation engine.
//!
//! Reconciles a streaming sequence of generated text lines against an
//! original block of text and translates the committed portion of the
//! diff into a minimal, anchored set of document edits. Text that is
//! still arriving is held back as a pending tail so the document does
//! not flicker while the generation is in flight.

pub mod application;
pub mod domain;
pub mod infra;
