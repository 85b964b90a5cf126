//! Infrastructure: diff computation, host document plumbing, config.

pub mod config;
pub mod document;
pub mod line_diff;
