//! Access to the predictions of an evaluation run.

pub mod answer;
pub mod expr;
mod result_set;

pub use result_set::ResultSet;

use crate::models::{Mode, OriginInput, Result};

/// Read access to an evaluation run, indexed by position.
pub trait ResultAccess {
    /// Number of predictions.
    fn len(&self) -> usize;

    /// Whether the run holds no predictions.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Source record for a prediction.
    fn get_origin_input(&self, idx: usize) -> Result<&OriginInput>;

    /// Whether the prediction matches the gold answer under `mode`.
    fn judge_correct(&self, idx: usize, mode: Mode) -> Result<bool>;

    /// Full text of the model's last turn.
    fn get_last_pred_text(&self, idx: usize) -> Result<String>;

    /// Answer span extracted from the model's last turn.
    fn get_text_answer(&self, idx: usize) -> Result<String>;
}
