//! Plain-text report rendering.

use super::Report;
use crate::models::{ReportError, Result};
use std::io::Write;

const HEADER_RULE: usize = 80;
const EXAMPLE_RULE: usize = 50;

/// Write the grouped examples followed by the summary.
pub fn render_report<W: Write>(report: &Report, out: &mut W) -> Result<()> {
    write_report(report, out).map_err(|e| ReportError::io("writing report", e))
}

fn write_report<W: Write>(report: &Report, out: &mut W) -> std::io::Result<()> {
    let header_rule = "=".repeat(HEADER_RULE);
    let example_rule = "=".repeat(EXAMPLE_RULE);

    for (category, bucket) in report.iter() {
        writeln!(out, "\n\n{header_rule}")?;
        writeln!(out, "CATEGORY: {category} - Found {} examples", bucket.found)?;
        writeln!(out, "{header_rule}")?;

        for (i, example) in bucket.examples.iter().enumerate() {
            writeln!(out, "\nEXAMPLE {}:", i + 1)?;
            writeln!(out, "Question: {}", example.question)?;
            writeln!(out, "Expected Answer: {}", example.expected_answer)?;
            writeln!(out, "Model's Answer: {}", example.predicted_answer)?;
            writeln!(out, "Granularity Value: {:?}", example.granularity)?;
            writeln!(out, "{example_rule}")?;
        }
    }

    writeln!(out, "\n\nSUMMARY:")?;
    for (category, bucket) in report.iter() {
        writeln!(out, "{category}: {} examples found", bucket.examples.len())?;
    }

    out.flush()
}
