//! Configuration models for rbreport.
//!
//! All I^R (resolvable ignorance) is parameterized here.
//! The user resolves these unknowns via CLI flags, the split table, or a config file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default CFRB threshold.
pub const DEFAULT_K: f64 = 0.106;

/// Default CIRB threshold.
pub const DEFAULT_K2: f64 = 0.425;

/// Default data split.
pub const DEFAULT_DATA_SPLIT: &str = "CoT";

/// Default per-category example cap.
pub const DEFAULT_MAX_EXAMPLES: usize = 10;

/// Evaluation mode controlling how correctness is judged.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Natural-language chain of thought
    #[default]
    Nl,
    /// Tool-augmented arithmetic (`<<expr>>` annotations)
    Tool,
    /// Program of thought (externally executed program output)
    Pot,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Nl => "nl",
            Self::Tool => "tool",
            Self::Pot => "pot",
        };
        f.write_str(s)
    }
}

/// Parameters registered for a known data split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitParams {
    /// CFRB threshold
    #[serde(alias = "K")]
    pub k: f64,

    /// CIRB threshold
    #[serde(alias = "K2")]
    pub k2: f64,

    /// Evaluation mode
    #[serde(default)]
    pub mode: Mode,

    /// Result file for this split
    pub result_path: PathBuf,
}

/// Weights for the combined granularity scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GranularityConfig {
    /// Planning capacity; divided by the number of calculation steps
    #[serde(default = "default_plan_weight")]
    pub plan_weight: f64,

    /// Calculation capacity; divided by the largest operand product
    #[serde(default = "default_calc_weight")]
    pub calc_weight: f64,
}

fn default_plan_weight() -> f64 {
    10.0
}

fn default_calc_weight() -> f64 {
    10_000.0
}

impl Default for GranularityConfig {
    fn default() -> Self {
        Self {
            plan_weight: default_plan_weight(),
            calc_weight: default_calc_weight(),
        }
    }
}

/// Top-level configuration for rbreport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Known data splits, keyed by split name
    #[serde(default = "builtin_splits")]
    pub splits: BTreeMap<String, SplitParams>,

    /// Granularity scorer weights
    #[serde(default)]
    pub granularity: GranularityConfig,
}

/// Built-in split table.
pub fn builtin_splits() -> BTreeMap<String, SplitParams> {
    [
        ("CoT", Mode::Nl),
        ("PoT", Mode::Pot),
        ("Tool-Usage", Mode::Tool),
    ]
    .into_iter()
    .map(|(name, mode)| {
        (
            name.to_string(),
            SplitParams {
                k: DEFAULT_K,
                k2: DEFAULT_K2,
                mode,
                result_path: PathBuf::from(format!("data/results/{name}.jsonl")),
            },
        )
    })
    .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            splits: builtin_splits(),
            granularity: GranularityConfig::default(),
        }
    }
}

/// Caller-supplied report parameters, before resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportParams {
    pub data_split: String,
    pub result_path: Option<PathBuf>,
    pub k: f64,
    pub k2: f64,
    pub mode: Mode,
    pub max_examples: usize,
}

impl Default for ReportParams {
    fn default() -> Self {
        Self {
            data_split: DEFAULT_DATA_SPLIT.to_string(),
            result_path: None,
            k: DEFAULT_K,
            k2: DEFAULT_K2,
            mode: Mode::default(),
            max_examples: DEFAULT_MAX_EXAMPLES,
        }
    }
}

/// Fully resolved parameters for one report run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParams {
    pub result_path: PathBuf,
    pub k: f64,
    pub k2: f64,
    pub mode: Mode,
    pub max_examples: usize,
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// Splits named in the file override built-in entries of the same name;
    /// the remaining built-in entries stay available.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_owned(),
            source: e,
        })?;

        Self::from_toml_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_owned(),
            source: e,
        })
    }

    fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let mut config: Config = toml::from_str(content)?;
        for (name, params) in builtin_splits() {
            config.splits.entry(name).or_insert(params);
        }
        Ok(config)
    }

    /// Resolve caller parameters against the split table.
    ///
    /// B_i(result path known) → Result
    pub fn resolve(&self, params: &ReportParams) -> Result<ResolvedParams, ConfigError> {
        let resolved = match (&params.result_path, self.splits.get(&params.data_split)) {
            (Some(path), _) => ResolvedParams {
                result_path: path.clone(),
                k: params.k,
                k2: params.k2,
                mode: params.mode,
                max_examples: params.max_examples,
            },
            (None, Some(split)) => ResolvedParams {
                result_path: split.result_path.clone(),
                k: split.k,
                k2: split.k2,
                mode: split.mode,
                max_examples: params.max_examples,
            },
            (None, None) => {
                return Err(ConfigError::UnresolvedResultPath {
                    split: params.data_split.clone(),
                });
            }
        };

        if resolved.k.is_nan() || resolved.k2.is_nan() || resolved.k > resolved.k2 {
            return Err(ConfigError::InvalidThresholds {
                k: resolved.k,
                k2: resolved.k2,
            });
        }

        Ok(resolved)
    }
}

/// Configuration errors.
///
/// Epistemic origin:
/// - B_i falsified: File not found, parse error
/// - I^R unresolved: No result path for the requested split
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Unknown data split '{split}' and no --result-path given")]
    UnresolvedResultPath { split: String },

    #[error("Invalid thresholds: K ({k}) must be a number not exceeding K2 ({k2})")]
    InvalidThresholds { k: f64, k2: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_split_overrides_caller_values() {
        let config = Config::default();
        let params = ReportParams {
            data_split: "PoT".to_string(),
            k: 0.5,
            k2: 0.9,
            mode: Mode::Nl,
            max_examples: 3,
            ..ReportParams::default()
        };

        let resolved = config.resolve(&params).unwrap();
        assert_eq!(resolved.mode, Mode::Pot);
        assert_eq!(resolved.k, DEFAULT_K);
        assert_eq!(resolved.k2, DEFAULT_K2);
        assert_eq!(resolved.result_path, PathBuf::from("data/results/PoT.jsonl"));
        assert_eq!(resolved.max_examples, 3);
    }

    #[test]
    fn test_explicit_path_keeps_caller_values() {
        let config = Config::default();
        let params = ReportParams {
            result_path: Some(PathBuf::from("runs/custom.jsonl")),
            k: 0.2,
            k2: 0.3,
            mode: Mode::Tool,
            ..ReportParams::default()
        };

        let resolved = config.resolve(&params).unwrap();
        assert_eq!(resolved.result_path, PathBuf::from("runs/custom.jsonl"));
        assert_eq!(resolved.k, 0.2);
        assert_eq!(resolved.k2, 0.3);
        assert_eq!(resolved.mode, Mode::Tool);
    }

    #[test]
    fn test_unknown_split_without_path_fails() {
        let config = Config::default();
        let params = ReportParams {
            data_split: "Nope".to_string(),
            ..ReportParams::default()
        };

        let err = config.resolve(&params).unwrap_err();
        assert!(matches!(err, ConfigError::UnresolvedResultPath { split } if split == "Nope"));
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let config = Config::default();
        let params = ReportParams {
            result_path: Some(PathBuf::from("r.jsonl")),
            k: 0.5,
            k2: 0.1,
            ..ReportParams::default()
        };

        assert!(matches!(
            config.resolve(&params),
            Err(ConfigError::InvalidThresholds { .. })
        ));
    }

    #[test]
    fn test_nan_thresholds_rejected() {
        let config = Config::default();
        for (k, k2) in [(f64::NAN, 0.4), (0.1, f64::NAN)] {
            let params = ReportParams {
                result_path: Some(PathBuf::from("r.jsonl")),
                k,
                k2,
                ..ReportParams::default()
            };
            assert!(matches!(
                config.resolve(&params),
                Err(ConfigError::InvalidThresholds { .. })
            ));
        }
    }

    #[test]
    fn test_toml_overrides_merge_with_builtins() {
        let config = Config::from_toml_str(
            r#"
[splits.CoT]
K = 0.2
K2 = 0.6
result_path = "local/cot.jsonl"

[splits.Custom]
k = 0.1
k2 = 0.4
mode = "tool"
result_path = "local/custom.jsonl"

[granularity]
plan_weight = 5.0
"#,
        )
        .unwrap();

        assert_eq!(config.splits["CoT"].k, 0.2);
        assert_eq!(config.splits["CoT"].mode, Mode::Nl);
        assert_eq!(config.splits["Custom"].mode, Mode::Tool);
        assert!(config.splits.contains_key("PoT"));
        assert_eq!(config.granularity.plan_weight, 5.0);
        assert_eq!(config.granularity.calc_weight, 10_000.0);
    }

    #[test]
    fn test_missing_config_file() {
        let err = Config::from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }
}
