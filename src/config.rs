use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use crate::classify::decision::DecisionRule;
pub use crate::classify::likelihood::Smoothing;
use crate::tokenize::Stopwords;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// Key point:
// Serializable
// Comparable
// Explicit defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Probability given to a word with no evidence in a category.
    /// Higher values make unseen words matter less.
    pub assumed_probability: f64,
    pub smoothing: Smoothing,
    pub decision: DecisionRule,
    #[serde(default)]
    pub stopwords: StopwordConfig,
}

impl ClassifierConfig {
    /// assumed probability 0.5, weighted blend with weight 1,
    /// ratio rule with threshold 2, built-in stopwords.
    pub fn v0() -> Self {
        Self {
            assumed_probability: 0.5,
            smoothing: Smoothing::Weighted { weight: 1.0 },
            decision: DecisionRule::Ratio { threshold: 2.0 },
            stopwords: StopwordConfig::default(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config: ClassifierConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = self.assumed_probability;
        if !(p.is_finite() && p > 0.0 && p <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "assumed_probability must be in (0, 1], got {p}"
            )));
        }

        if let Smoothing::Weighted { weight } = self.smoothing {
            if !(weight.is_finite() && weight >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "smoothing weight must be finite and non-negative, got {weight}"
                )));
            }
        }

        match self.decision {
            DecisionRule::AbsoluteThreshold { threshold } => {
                if !(threshold.is_finite() && threshold >= 0.0) {
                    return Err(ConfigError::Invalid(format!(
                        "absolute threshold must be finite and non-negative, got {threshold}"
                    )));
                }
            }
            DecisionRule::Ratio { threshold } => {
                // Below 1 every best score would beat its runner-up
                if !(threshold.is_finite() && threshold >= 1.0) {
                    return Err(ConfigError::Invalid(format!(
                        "ratio threshold must be finite and at least 1, got {threshold}"
                    )));
                }
            }
        }

        Ok(())
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::v0()
    }
}

/// Where the tokenizer's stopwords come from. Sources are combined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopwordConfig {
    pub include_builtin: bool,
    /// Extra words, e.g. a "top words" noise list exported from a trained store.
    pub words: Vec<String>,
    /// One word per line.
    pub file: Option<PathBuf>,
}

impl Default for StopwordConfig {
    fn default() -> Self {
        Self {
            include_builtin: true,
            words: Vec::new(),
            file: None,
        }
    }
}

impl StopwordConfig {
    pub fn build(&self) -> Result<Stopwords, ConfigError> {
        let mut stopwords = if self.include_builtin {
            Stopwords::builtin()
        } else {
            Stopwords::none()
        };

        stopwords.extend(&self.words);

        if let Some(path) = &self.file {
            let from_file = Stopwords::load(path)?;
            stopwords.extend(from_file.iter());
        }

        Ok(stopwords)
    }
}
