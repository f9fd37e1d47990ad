//! rbreport - Report incorrect predictions by reasoning boundary tier.
//!
//! ## Architecture
//!
//! - **Result access**: Loads an evaluation run (JSONL) and judges each prediction
//! - **Granularity**: Scores how hard each source problem is
//! - **Report**: Buckets incorrect predictions into CFRB / PFRB / CIRB and prints them
//!
//! ## Tiers
//!
//! With thresholds `K <= K2`:
//! - **CFRB**: `granularity <= K` (should be easy)
//! - **PFRB**: `K < granularity <= K2` (moderately difficult)
//! - **CIRB**: `granularity > K2` (very difficult)
//!
//! ## Epistemic Design
//!
//! - K_i (Knowledge): Compile-time enforced invariants (types, enums)
//! - B_i (Beliefs): Runtime fallible operations (Result, Option)
//! - I^R (Resolvable): User-configurable parameters

pub mod granularity;
pub mod models;
pub mod report;
pub mod results;

// Re-exports for convenience
pub use granularity::{CombinedGranularity, GranularityScorer};
pub use models::{
    Category, Config, ConfigError, Example, Mode, ReportError, ReportParams, ResolvedParams,
    Result,
};
pub use report::{Report, extract_incorrect, render_report};
pub use results::{ResultAccess, ResultSet};
