use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::InputError;
use crate::store::StoreError;
use crate::types::identifiers::{CategoryName, UNKNOWN_LABEL};

/// The outcome of a classification: a trained category, or `unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Label {
    Category(CategoryName),
    Unknown,
}

impl Label {
    pub fn as_str(&self) -> &str {
        match self {
            Label::Category(name) => name.as_str(),
            Label::Unknown => UNKNOWN_LABEL,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Label::Unknown)
    }

    pub fn category(&self) -> Option<&CategoryName> {
        match self {
            Label::Category(name) => Some(name),
            Label::Unknown => None,
        }
    }
}

impl TryFrom<String> for Label {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == UNKNOWN_LABEL {
            Ok(Label::Unknown)
        } else {
            CategoryName::new(value).map(Label::Category)
        }
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.as_str().to_string()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How well a text matches one category.
///
/// Kept in log space; `score()` converts back and may underflow to 0 for
/// long texts even when `log_score` is finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: CategoryName,
    pub log_score: f64,
}

impl CategoryScore {
    /// prior × Π P(word | category)
    pub fn score(&self) -> f64 {
        self.log_score.exp()
    }

    pub fn is_zero(&self) -> bool {
        self.log_score == f64::NEG_INFINITY
    }
}

/// The final result of classifying one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: Label,

    /// Every known category, sorted by name.
    pub scores: Vec<CategoryScore>,

    pub best: Option<CategoryName>,
    /// ln(best / runner-up). Infinite when there is no nonzero runner-up.
    pub log_ratio: Option<f64>,

    /// Distinct words the text contributed after tokenization.
    pub words_considered: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),
}
