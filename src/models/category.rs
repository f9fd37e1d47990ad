//! Difficulty tiers and the examples collected for them.

/// Reasoning boundary tier of an incorrect prediction.
///
/// K_i: Tiers are mutually exclusive and exhaustive over the granularity domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// `granularity <= K`
    Cfrb,
    /// `K < granularity <= K2`
    Pfrb,
    /// `granularity > K2`
    Cirb,
}

impl Category {
    /// All tiers, easiest first.
    pub const ALL: [Category; 3] = [Self::Cfrb, Self::Pfrb, Self::Cirb];

    /// Assign a tier from a granularity and two ordered thresholds.
    ///
    /// Ties go to the easier tier. NaN fails both comparisons and lands in CIRB.
    pub fn classify(granularity: f64, k: f64, k2: f64) -> Self {
        if granularity <= k {
            Self::Cfrb
        } else if granularity <= k2 {
            Self::Pfrb
        } else {
            Self::Cirb
        }
    }

    /// Label printed in report headers and the summary.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cfrb => "CFRB (should be easy)",
            Self::Pfrb => "PFRB (moderately difficult)",
            Self::Cirb => "CIRB (very difficult)",
        }
    }

    /// Position in `ALL`.
    pub fn ordinal(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// An incorrect prediction retained for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    /// Position in the result set
    pub index: usize,

    /// Problem text
    pub question: String,

    /// Gold value from the reference solution
    pub expected_answer: String,

    /// Full text of the model's last turn
    pub model_response: String,

    /// Answer span extracted from the model's last turn
    pub predicted_answer: String,

    /// Granularity the tier was assigned from
    pub granularity: f64,
}
