//! Prediction record types for rbreport.
//!
//! K_i: One JSONL line of a result file maps to one `PredictionRecord`.

use serde::{Deserialize, Serialize};

/// Gold delimiter preceding the final answer in a reference solution.
pub const ANSWER_DELIMITER: &str = "#### ";

/// Source record the model was asked about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OriginInput {
    /// Problem text shown to the model
    pub question: String,

    /// Reference solution, final value after `#### `
    pub answer: String,

    /// Precomputed reasoning boundary granularity, if the run recorded one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granularity: Option<f64>,

    /// Remaining fields of the source record (passed through untouched)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl OriginInput {
    /// Gold value: the segment after the last `#### `, trimmed.
    ///
    /// Returns `None` when the delimiter is absent; callers decide how lenient to be.
    pub fn gold_answer(&self) -> Option<&str> {
        self.answer
            .rsplit_once(ANSWER_DELIMITER)
            .map(|(_, tail)| tail.trim())
    }
}

/// A single part of a multi-part message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    #[serde(other)]
    Other,
}

/// Message content: either a plain string or a list of typed parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl MessageContent {
    /// Concatenate all text carried by this content.
    pub fn text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Parts(parts) => parts
                .iter()
                .filter_map(|part| match part {
                    ContentPart::Text { text } => Some(text.as_str()),
                    ContentPart::Other => None,
                })
                .collect::<Vec<_>>()
                .join(""),
        }
    }
}

/// One conversation turn produced during the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Speaker of the turn; not consulted for judging, kept so records
    /// re-serialize with the schema the runner wrote
    #[serde(default = "default_role")]
    pub role: String,
    pub content: MessageContent,
}

fn default_role() -> String {
    "assistant".to_string()
}

/// One line of a result file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// Position recorded by the runner (informational)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,

    /// The source record
    pub origin_data: OriginInput,

    /// Model turns, last one holds the final response
    #[serde(default)]
    pub pred: Vec<Message>,

    /// Output of an externally executed program (program-of-thought runs)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_result: Option<String>,
}

impl PredictionRecord {
    /// Text of the last model turn, empty if the model produced nothing.
    pub fn last_pred_text(&self) -> String {
        self.pred
            .last()
            .map(|message| message.content.text())
            .unwrap_or_default()
    }
}
