use serde::{Deserialize, Serialize};

use crate::types::classification::{CategoryScore, Label};

/// When the best-scoring category is trusted over `unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecisionRule {
    /// Accept if the best score exceeds `threshold`.
    AbsoluteThreshold { threshold: f64 },
    /// Accept if best / runner-up exceeds `threshold`. Guards against near ties.
    Ratio { threshold: f64 },
}

pub struct Decision<'a> {
    pub label: Label,
    pub best: Option<&'a CategoryScore>,
    pub log_ratio: Option<f64>,
}

/// Pick a label from per-category scores.
///
/// `scores` are expected in category-name order: on an exact tie the earlier
/// entry stays best.
pub fn decide<'a>(scores: &'a [CategoryScore], rule: &DecisionRule) -> Decision<'a> {
    let mut best: Option<&CategoryScore> = None;
    let mut runner_up = f64::NEG_INFINITY;

    for score in scores {
        match best {
            Some(current) if score.log_score > current.log_score => {
                runner_up = current.log_score;
                best = Some(score);
            }
            Some(_) => {
                if score.log_score > runner_up {
                    runner_up = score.log_score;
                }
            }
            None => best = Some(score),
        }
    }

    // No categories, or every score is exactly zero
    let Some(best) = best.filter(|b| !b.is_zero()) else {
        return Decision {
            label: Label::Unknown,
            best: None,
            log_ratio: None,
        };
    };

    let log_ratio = best.log_score - runner_up;

    let accepted = match *rule {
        DecisionRule::AbsoluteThreshold { threshold } => best.log_score > threshold.ln(),
        // A zero runner-up means there is no competing category
        DecisionRule::Ratio { threshold } => {
            runner_up == f64::NEG_INFINITY || log_ratio > threshold.ln()
        }
    };

    let label = if accepted {
        Label::Category(best.category.clone())
    } else {
        Label::Unknown
    };

    Decision {
        label,
        best: Some(best),
        log_ratio: Some(log_ratio),
    }
}
