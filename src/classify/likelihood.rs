use serde::{Deserialize, Serialize};

use crate::store::{FrequencyStore, StoreError};

pub trait WordLikelihood {
    /// P(word | category)
    fn word_probability(
        &self,
        store: &FrequencyStore,
        word: &str,
        category: &str,
    ) -> Result<f64, StoreError>;

    /// P(category), estimated from training-set class balance.
    fn category_probability(&self, store: &FrequencyStore, category: &str) -> f64 {
        let total = store.train_count(None);
        let prob = if total == 0 {
            0.0
        } else {
            store.train_count(Some(category)) as f64 / total as f64
        };
        debug_assert!((0.0..=1.0).contains(&prob), "prior {prob} out of range [0.0, 1.0]");
        prob
    }
}

/// How sparse word evidence is pulled toward the assumed probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Smoothing {
    /// Raw frequency; the assumed probability stands in for unseen words.
    None,
    /// `(weight * assumed + n * raw) / (weight + n)` where `n` is the word's
    /// occurrences across all categories.
    Weighted { weight: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityModel {
    pub assumed_probability: f64,
    pub smoothing: Smoothing,
}

impl Default for ProbabilityModel {
    fn default() -> Self {
        Self {
            assumed_probability: 0.5,
            smoothing: Smoothing::Weighted { weight: 1.0 },
        }
    }
}

impl ProbabilityModel {
    pub fn new(assumed_probability: f64, smoothing: Smoothing) -> Self {
        Self {
            assumed_probability,
            smoothing,
        }
    }

    /// count(word, category) / words in category; 0 when the category has no words.
    pub fn raw_probability(
        &self,
        store: &FrequencyStore,
        word: &str,
        category: &str,
    ) -> Result<f64, StoreError> {
        let total = store.words_in_category(category, None)?;
        if total == 0 {
            return Ok(0.0);
        }

        let count = store.words_in_category(category, Some(word))?;
        Ok(count as f64 / total as f64)
    }
}

impl WordLikelihood for ProbabilityModel {
    fn word_probability(
        &self,
        store: &FrequencyStore,
        word: &str,
        category: &str,
    ) -> Result<f64, StoreError> {
        let raw = self.raw_probability(store, word, category)?;

        let prob = match self.smoothing {
            Smoothing::None => {
                if raw == 0.0 {
                    self.assumed_probability
                } else {
                    raw
                }
            }
            Smoothing::Weighted { weight } => {
                let observations = store.total_word_count(word) as f64;
                if weight + observations == 0.0 {
                    self.assumed_probability
                } else {
                    (weight * self.assumed_probability + observations * raw) / (weight + observations)
                }
            }
        };

        Ok(prob)
    }
}
