//! Factor correlation classification for the analytics view.
//!
//! Coefficients are Pearson-style values in [-1, 1] supplied per factor
//! pair by an upstream analysis; this module only classifies, ranks, and
//! arranges them into a symmetric matrix.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::scenario::ScenarioFactor;

/// |r| at or above this is a strong correlation.
pub const STRONG_CORRELATION: f32 = 0.8;
/// |r| at or above this (but below strong) is a moderate correlation.
pub const MODERATE_CORRELATION: f32 = 0.6;

/// Qualitative strength bucket for a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationStrength {
    Weak,
    Moderate,
    Strong,
}

impl CorrelationStrength {
    /// Bucket a coefficient by magnitude; sign is ignored.
    pub fn from_coefficient(coefficient: f32) -> Self {
        let magnitude = coefficient.abs();
        if magnitude >= STRONG_CORRELATION {
            CorrelationStrength::Strong
        } else if magnitude >= MODERATE_CORRELATION {
            CorrelationStrength::Moderate
        } else {
            CorrelationStrength::Weak
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CorrelationStrength::Weak => "Weak",
            CorrelationStrength::Moderate => "Moderate",
            CorrelationStrength::Strong => "Strong",
        }
    }
}

/// Correlation coefficient observed between two scenario factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorCorrelation {
    pub a: ScenarioFactor,
    pub b: ScenarioFactor,
    pub coefficient: f32,
}

impl FactorCorrelation {
    pub fn strength(&self) -> CorrelationStrength {
        CorrelationStrength::from_coefficient(self.coefficient)
    }
}

/// Pairs sorted by coefficient magnitude, strongest first.
pub fn rank_by_magnitude(pairs: &[FactorCorrelation]) -> Vec<FactorCorrelation> {
    let mut ranked = pairs.to_vec();
    ranked.sort_by(|x, y| {
        y.coefficient
            .abs()
            .partial_cmp(&x.coefficient.abs())
            .unwrap_or(Ordering::Equal)
    });
    ranked
}

/// Symmetric factor-by-factor correlation matrix with a unit diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    values: [[f32; ScenarioFactor::ALL.len()]; ScenarioFactor::ALL.len()],
}

impl CorrelationMatrix {
    /// Build from a pair list. Pairs are mirrored across the diagonal, the
    /// diagonal is fixed at 1.0, and unlisted pairs read as 0.0. A pair
    /// listed twice keeps the last coefficient.
    pub fn from_pairs(pairs: &[FactorCorrelation]) -> Self {
        let mut values = [[0.0; ScenarioFactor::ALL.len()]; ScenarioFactor::ALL.len()];
        for factor in ScenarioFactor::ALL {
            values[factor.index()][factor.index()] = 1.0;
        }
        for pair in pairs {
            values[pair.a.index()][pair.b.index()] = pair.coefficient;
            values[pair.b.index()][pair.a.index()] = pair.coefficient;
        }
        Self { values }
    }

    pub fn get(&self, a: ScenarioFactor, b: ScenarioFactor) -> f32 {
        self.values[a.index()][b.index()]
    }
}
