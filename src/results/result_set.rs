//! Result file access.
//!
//! K_i: A result set is loaded once and never mutated.
//! B_i: Every index lookup may fall outside the set → Result

use super::ResultAccess;
use super::answer::{answers_match, extract_text_answer, parse_number, value_matches};
use super::expr::{annotations, evaluate};
use crate::models::{Mode, OriginInput, PredictionRecord, ReportError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Ordered predictions from one evaluation run.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    records: Vec<PredictionRecord>,
}

impl ResultSet {
    /// Wrap records that are already in memory.
    pub fn from_records(records: Vec<PredictionRecord>) -> Self {
        Self { records }
    }

    /// Load a result set from a JSONL file.
    pub fn from_jsonl(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| ReportError::io(format!("opening result file {}", path.display()), e))?;
        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| ReportError::io("reading result file", e))?;
            if line.trim().is_empty() {
                continue;
            }
            let record: PredictionRecord = serde_json::from_str(&line).map_err(|e| {
                ReportError::ParseError(format!("Line {}: {}", line_num + 1, e))
            })?;
            records.push(record);
        }

        info!(count = records.len(), path = %path.display(), "Loaded result set");
        Ok(Self { records })
    }

    fn record(&self, idx: usize) -> Result<&PredictionRecord> {
        self.records.get(idx).ok_or(ReportError::IndexOutOfRange {
            index: idx,
            len: self.records.len(),
        })
    }

    fn gold<'a>(record: &'a PredictionRecord) -> &'a str {
        record
            .origin_data
            .gold_answer()
            .unwrap_or_else(|| record.origin_data.answer.trim())
    }

    fn judge_nl(record: &PredictionRecord) -> bool {
        let predicted = extract_text_answer(&record.last_pred_text());
        answers_match(&predicted, Self::gold(record))
    }

    fn judge_tool(record: &PredictionRecord) -> bool {
        let text = record.last_pred_text();
        let evaluated = annotations(&text).last().map(|expr| evaluate(expr));
        match evaluated {
            Some(Ok(value)) => value_matches(value, Self::gold(record)),
            Some(Err(e)) => {
                debug!(error = %e, "Calculator annotation failed, judging text answer");
                Self::judge_nl(record)
            }
            None => Self::judge_nl(record),
        }
    }

    fn judge_pot(record: &PredictionRecord) -> bool {
        match record.execution_result.as_deref() {
            Some(output) => match parse_number(output) {
                Some(value) => value_matches(value, Self::gold(record)),
                None => answers_match(output, Self::gold(record)),
            },
            None => Self::judge_nl(record),
        }
    }
}

impl ResultAccess for ResultSet {
    fn len(&self) -> usize {
        self.records.len()
    }

    fn get_origin_input(&self, idx: usize) -> Result<&OriginInput> {
        Ok(&self.record(idx)?.origin_data)
    }

    fn judge_correct(&self, idx: usize, mode: Mode) -> Result<bool> {
        let record = self.record(idx)?;
        Ok(match mode {
            Mode::Nl => Self::judge_nl(record),
            Mode::Tool => Self::judge_tool(record),
            Mode::Pot => Self::judge_pot(record),
        })
    }

    fn get_last_pred_text(&self, idx: usize) -> Result<String> {
        Ok(self.record(idx)?.last_pred_text())
    }

    fn get_text_answer(&self, idx: usize) -> Result<String> {
        Ok(extract_text_answer(&self.record(idx)?.last_pred_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn record(answer: &str, response: &str) -> PredictionRecord {
        serde_json::from_value(serde_json::json!({
            "origin_data": {"question": "How many?", "answer": answer},
            "pred": [{"role": "assistant", "content": response}]
        }))
        .unwrap()
    }

    #[test]
    fn test_load_jsonl_skips_blank_lines() {
        let mut file = NamedTempFile::new().unwrap();
        let first = serde_json::json!({
            "origin_data": {"question": "a", "answer": "#### 1"},
            "pred": []
        });
        let second = serde_json::json!({
            "index": 1,
            "origin_data": {"question": "b", "answer": "#### 2"},
            "pred": [{"role": "assistant", "content": "The answer is 2."}]
        });
        writeln!(file, "{first}").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "{second}").unwrap();

        let results = ResultSet::from_jsonl(file.path()).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results.get_origin_input(1).unwrap().question, "b");
        assert!(results.judge_correct(1, Mode::Nl).unwrap());
        assert!(!results.judge_correct(0, Mode::Nl).unwrap());
    }

    #[test]
    fn test_load_jsonl_reports_line_number() {
        let mut file = NamedTempFile::new().unwrap();
        let valid = serde_json::json!({
            "origin_data": {"question": "a", "answer": "#### 1"}
        });
        writeln!(file, "{valid}").unwrap();
        writeln!(file, "{{not json").unwrap();

        let err = ResultSet::from_jsonl(file.path()).unwrap_err();
        assert!(matches!(err, ReportError::ParseError(msg) if msg.starts_with("Line 2")));
    }

    #[test]
    fn test_missing_file() {
        let err = ResultSet::from_jsonl(Path::new("/no/such/results.jsonl")).unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
    }

    #[test]
    fn test_index_out_of_range() {
        let results = ResultSet::from_records(vec![record("#### 1", "1")]);
        assert!(matches!(
            results.get_origin_input(3),
            Err(ReportError::IndexOutOfRange { index: 3, len: 1 })
        ));
        assert!(results.judge_correct(1, Mode::Nl).is_err());
    }

    #[test]
    fn test_text_answer_and_last_pred() {
        let results = ResultSet::from_records(vec![record("#### 9", "3*3 = 9\nThe answer is 9.")]);
        assert_eq!(results.get_text_answer(0).unwrap(), "9");
        assert_eq!(results.get_last_pred_text(0).unwrap(), "3*3 = 9\nThe answer is 9.");
    }

    #[test]
    fn test_tool_mode_evaluates_last_annotation() {
        let results = ResultSet::from_records(vec![
            record("#### 20", "Total <<4*5>> so the answer is 19"),
            record("#### 20", "Total <<4*4=16>> so the answer is 20"),
            record("#### 20", "No calculator. The answer is 20"),
        ]);
        assert!(results.judge_correct(0, Mode::Tool).unwrap());
        assert!(!results.judge_correct(1, Mode::Tool).unwrap());
        assert!(results.judge_correct(2, Mode::Tool).unwrap());
    }

    #[test]
    fn test_tool_mode_deep_nesting_judges_text_answer() {
        let nested = format!("<<{}1>> The answer is 20", "(".repeat(20_000));
        let negated = format!("<<{}1>> The answer is 19", "-".repeat(20_000));
        let results = ResultSet::from_records(vec![
            record("#### 20", &nested),
            record("#### 20", &negated),
        ]);
        assert!(results.judge_correct(0, Mode::Tool).unwrap());
        assert!(!results.judge_correct(1, Mode::Tool).unwrap());
    }

    #[test]
    fn test_pot_mode_uses_execution_result() {
        let mut executed = record("#### 12", "print(3 * 4)");
        executed.execution_result = Some("12.0\n".to_string());
        let mut wrong = record("#### 12", "The answer is 12");
        wrong.execution_result = Some("13".to_string());
        let not_run = record("#### 12", "The answer is 12");

        let results = ResultSet::from_records(vec![executed, wrong, not_run]);
        assert!(results.judge_correct(0, Mode::Pot).unwrap());
        assert!(!results.judge_correct(1, Mode::Pot).unwrap());
        assert!(results.judge_correct(2, Mode::Pot).unwrap());
    }

    #[test]
    fn test_gold_without_delimiter_uses_whole_answer() {
        let results = ResultSet::from_records(vec![record(" 42 ", "The answer is 42")]);
        assert!(results.judge_correct(0, Mode::Nl).unwrap());
    }
}
