//! Reasoning boundary granularity scoring.
//!
//! K_i: Higher granularity means a harder problem.
//! I^R: Scorer weights come from `[granularity]` in the config file.

use crate::models::{GranularityConfig, OriginInput};
use crate::results::expr::annotations;
use regex::Regex;
use std::sync::LazyLock;

static OPERAND_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d[\d,]*(?:\.\d+)?").unwrap());

/// Computes a difficulty score for a source record.
pub trait GranularityScorer {
    fn granularity(&self, origin: &OriginInput) -> f64;
}

/// Combines planning and calculation load of the reference solution.
///
/// A precomputed `granularity` on the record always wins. Otherwise, with `p`
/// calculation steps and `c` the largest operand product of any step:
///
/// `g = 1 / (plan_weight / p + calc_weight / c)`
#[derive(Debug, Clone, Default)]
pub struct CombinedGranularity {
    config: GranularityConfig,
}

impl CombinedGranularity {
    pub fn new(config: GranularityConfig) -> Self {
        Self { config }
    }

    /// Number of calculation steps in the reference solution (at least 1).
    pub fn planning_load(answer: &str) -> f64 {
        annotations(answer).len().max(1) as f64
    }

    /// Largest product of operand magnitudes over all steps (at least 1).
    pub fn calculation_load(answer: &str) -> f64 {
        annotations(answer)
            .into_iter()
            .map(|expr| {
                OPERAND_RE
                    .find_iter(expr)
                    .filter_map(|m| m.as_str().replace(',', "").parse::<f64>().ok())
                    .map(f64::abs)
                    .product::<f64>()
            })
            .fold(1.0, f64::max)
    }
}

impl GranularityScorer for CombinedGranularity {
    fn granularity(&self, origin: &OriginInput) -> f64 {
        if let Some(precomputed) = origin.granularity {
            return precomputed;
        }

        let plan = Self::planning_load(&origin.answer);
        let calc = Self::calculation_load(&origin.answer);
        1.0 / (self.config.plan_weight / plan + self.config.calc_weight / calc)
    }
}
