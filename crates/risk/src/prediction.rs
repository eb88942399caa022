//! Zone predictions and the prediction history ledger.
//!
//! A prediction names a pit zone, a tier, and the model's probability and
//! confidence for a given timeframe. History records pair a predicted risk
//! percentage with the risk actually observed, and classify the outcome.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::tier::RiskTier;

/// A prediction counts as correct when the observed risk lands within this
/// many percentage points of the predicted value.
pub const OUTCOME_TOLERANCE_PCT: f32 = 10.0;

/// One factor line in a prediction card: name, displayed reading, and the
/// factor's share of the model output in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributingFactor {
    pub name: String,
    pub value: String,
    pub impact: f32,
}

/// A per-zone model prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZonePrediction {
    pub id: String,
    pub zone: String,
    pub risk_level: RiskTier,
    /// Event probability in [0, 1] over `timeframe`.
    pub probability: f32,
    /// Horizon the probability applies to, e.g. "24_hours".
    pub timeframe: String,
    /// Model confidence in [0, 1].
    pub confidence: f32,
    pub factors: Vec<ContributingFactor>,
}

/// Group predictions by tier for the classification cards.
///
/// Tiers with no predictions are absent from the map; iteration order is
/// Low, Medium, High.
pub fn group_by_tier(predictions: &[ZonePrediction]) -> BTreeMap<RiskTier, Vec<&ZonePrediction>> {
    let mut groups: BTreeMap<RiskTier, Vec<&ZonePrediction>> = BTreeMap::new();
    for prediction in predictions {
        groups.entry(prediction.risk_level).or_default().push(prediction);
    }
    groups
}

/// Whether a historical prediction landed within tolerance of the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionOutcome {
    Correct,
    Incorrect,
}

/// One row of the prediction history: what the model said versus what the
/// pit actually did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub zone: String,
    /// Predicted risk percentage.
    pub predicted: f32,
    /// Observed risk percentage.
    pub actual: f32,
    /// Model confidence in [0, 1] at prediction time.
    pub confidence: f32,
}

impl PredictionRecord {
    /// Absolute gap between predicted and observed risk, in percentage points.
    pub fn absolute_error(&self) -> f32 {
        (self.predicted - self.actual).abs()
    }

    pub fn outcome(&self) -> PredictionOutcome {
        if self.absolute_error() <= OUTCOME_TOLERANCE_PCT {
            PredictionOutcome::Correct
        } else {
            PredictionOutcome::Incorrect
        }
    }
}

/// Mean absolute error over a history slice; 0 when the slice is empty.
pub fn mean_absolute_error(records: &[PredictionRecord]) -> f32 {
    if records.is_empty() {
        return 0.0;
    }
    let total: f32 = records.iter().map(PredictionRecord::absolute_error).sum();
    total / records.len() as f32
}

/// Fraction of records classified correct; 0 when the slice is empty.
pub fn hit_rate(records: &[PredictionRecord]) -> f32 {
    if records.is_empty() {
        return 0.0;
    }
    let hits = records
        .iter()
        .filter(|r| r.outcome() == PredictionOutcome::Correct)
        .count();
    hits as f32 / records.len() as f32
}
