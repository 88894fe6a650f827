//! Opener evaluation reports.
//!
//! Turns a newline-delimited JSON log of evaluated openers into a static,
//! browsable HTML page grouped by prompt and by test-case input.

pub mod html;
pub mod organize;

pub use html::render_report;
pub use organize::{OrganizedLogs, TestCase, organize_logs};
