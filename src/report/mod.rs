//! Incorrect-prediction reporting.
//!
//! Flow:
//! Result set → judge each index → tier by granularity → cap per tier → text report

mod extract;
mod render;

pub use extract::{CategoryBucket, Report, expected_answer, extract_incorrect};
pub use render::render_report;
