use crate::error::AssessError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssessConfig {
    pub scoring: Option<ScoringConfig>,
    pub storage: Option<StorageConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    pub practical_rule: Option<PracticalRule>,
    pub apply_overrides: Option<bool>,
    pub weights: Option<HashMap<String, f64>>,
}

/// Which practical-marks table to apply per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PracticalRule {
    /// Machine-type aware capacity thresholds.
    #[default]
    MachineAware,
    /// Uniform performance bands, as stored by older assessments.
    PerformanceOnly,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub data_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub machine: f64,
    pub dop: f64,
    pub practical: f64,
    pub quality: f64,
    pub education: f64,
    pub attitude: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            machine: 0.30,
            dop: 0.30,
            practical: 0.20,
            quality: 0.10,
            education: 0.05,
            attitude: 0.05,
        }
    }
}

impl ScoreWeights {
    pub fn as_array(&self) -> [f64; 6] {
        [
            self.machine,
            self.dop,
            self.practical,
            self.quality,
            self.education,
            self.attitude,
        ]
    }
}

const ALLOWED_WEIGHT_KEYS: [&str; 6] = [
    "machine",
    "dop",
    "practical",
    "quality",
    "education",
    "attitude",
];

impl AssessConfig {
    pub fn weights(&self) -> ScoreWeights {
        let defaults = ScoreWeights::default();
        match self.scoring.as_ref().and_then(|scoring| scoring.weights.as_ref()) {
            Some(weights) => ScoreWeights {
                machine: *weights.get("machine").unwrap_or(&defaults.machine),
                dop: *weights.get("dop").unwrap_or(&defaults.dop),
                practical: *weights.get("practical").unwrap_or(&defaults.practical),
                quality: *weights.get("quality").unwrap_or(&defaults.quality),
                education: *weights.get("education").unwrap_or(&defaults.education),
                attitude: *weights.get("attitude").unwrap_or(&defaults.attitude),
            },
            None => defaults,
        }
    }

    pub fn practical_rule(&self) -> PracticalRule {
        self.scoring
            .as_ref()
            .and_then(|scoring| scoring.practical_rule)
            .unwrap_or_default()
    }

    pub fn apply_overrides(&self) -> bool {
        self.scoring
            .as_ref()
            .and_then(|scoring| scoring.apply_overrides)
            .unwrap_or(true)
    }

    pub fn data_dir(&self) -> &str {
        self.storage
            .as_ref()
            .and_then(|storage| storage.data_dir.as_deref())
            .unwrap_or(DEFAULT_DATA_DIR)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|logging| logging.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn validate(&self) -> Result<(), AssessError> {
        if let Some(weights) = self
            .scoring
            .as_ref()
            .and_then(|scoring| scoring.weights.as_ref())
        {
            let mut unknown = weights
                .keys()
                .filter(|key| !ALLOWED_WEIGHT_KEYS.contains(&key.as_str()))
                .cloned()
                .collect::<Vec<_>>();
            if !unknown.is_empty() {
                unknown.sort();
                return Err(AssessError::ConfigParse(format!(
                    "scoring.weights contains unknown key(s): {}",
                    unknown.join(", ")
                )));
            }
        }

        let weights = self.weights().as_array();
        if weights.iter().any(|weight| !(0.0..=1.0).contains(weight)) {
            return Err(AssessError::ConfigParse(
                "scoring.weights values must be between 0.0 and 1.0".to_string(),
            ));
        }
        let weight_sum: f64 = weights.iter().sum();
        if (weight_sum - 1.0).abs() > 0.001 {
            return Err(AssessError::ConfigParse(format!(
                "scoring.weights must sum to 1.0 (found {:.3})",
                weight_sum
            )));
        }

        if self.data_dir().trim().is_empty() {
            return Err(AssessError::ConfigParse(
                "storage.data_dir must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
