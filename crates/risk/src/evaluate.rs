//! PRED-003: Scenario risk evaluator.
//!
//! Maps a [`ScenarioParameters`] snapshot to a bounded risk percentage, a
//! qualitative tier, and the per-factor contribution breakdown shown in the
//! simulator panel. The model is a weighted sum: each factor is normalized
//! against its saturation reading, capped at 1.0, and scaled by a fixed
//! weight. The total is clamped so the engine never reports full certainty.
//!
//! The function is pure and total over all real inputs. The per-factor cap is
//! upper-only: a negative reading yields a negative contribution, so callers
//! feeding unconstrained values use [`ScenarioParameters::clamped`] first.

use serde::{Deserialize, Serialize};

use crate::scenario::ScenarioParameters;
use crate::tier::RiskTier;

// ---------------------------------------------------------------------------
// Model constants
// ---------------------------------------------------------------------------

/// Factor weights. They sum to 1.0, so the unclamped ceiling is 100 %.
pub const RAINFALL_WEIGHT: f32 = 0.40;
pub const SLOPE_WEIGHT: f32 = 0.30;
pub const VIBRATION_WEIGHT: f32 = 0.20;
pub const GROUNDWATER_WEIGHT: f32 = 0.10;

/// Reading at which each factor's contribution saturates at its full weight.
///
/// Slope saturates at 45° even though the control range extends to 60°:
/// walls steeper than 45° cannot push the factor past its allotted weight.
/// Vibration likewise saturates at 2 m/s² inside a 0–3 m/s² control range.
pub const RAINFALL_SATURATION_MM: f32 = 150.0;
pub const SLOPE_SATURATION_DEG: f32 = 45.0;
pub const VIBRATION_SATURATION_MS2: f32 = 2.0;
pub const GROUNDWATER_SATURATION_PCT: f32 = 100.0;

/// The reported risk percentage never exceeds this ceiling.
pub const MAX_RISK_PERCENT: f32 = 95.0;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Per-factor share of the risk percentage, for the breakdown display.
///
/// The four fields sum to the pre-clamp risk percentage.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FactorContributions {
    pub rainfall: f32,
    pub slope_angle: f32,
    pub vibration: f32,
    pub groundwater: f32,
}

impl FactorContributions {
    /// Sum of the four contributions: the risk percentage before clamping.
    pub fn total(&self) -> f32 {
        self.rainfall + self.slope_angle + self.vibration + self.groundwater
    }
}

/// Immutable result of evaluating one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Risk percentage, at most [`MAX_RISK_PERCENT`] (in [0, 95] for
    /// in-domain input).
    pub risk_percent: f32,
    /// Qualitative tier derived from `risk_percent`.
    pub tier: RiskTier,
    /// Per-factor breakdown summing (pre-clamp) to `risk_percent`.
    pub contributions: FactorContributions,
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// One factor's contribution to the risk percentage.
fn factor_percent(reading: f32, saturation: f32, weight: f32) -> f32 {
    (reading / saturation).min(1.0) * weight * 100.0
}

/// Evaluate a scenario into a bounded [`RiskAssessment`].
///
/// Deterministic, allocation-free, and cheap enough to re-run on every
/// parameter change without memoization.
pub fn evaluate(params: &ScenarioParameters) -> RiskAssessment {
    let contributions = FactorContributions {
        rainfall: factor_percent(params.rainfall, RAINFALL_SATURATION_MM, RAINFALL_WEIGHT),
        slope_angle: factor_percent(params.slope_angle, SLOPE_SATURATION_DEG, SLOPE_WEIGHT),
        vibration: factor_percent(params.vibration, VIBRATION_SATURATION_MS2, VIBRATION_WEIGHT),
        groundwater: factor_percent(
            params.groundwater,
            GROUNDWATER_SATURATION_PCT,
            GROUNDWATER_WEIGHT,
        ),
    };
    let risk_percent = contributions.total().min(MAX_RISK_PERCENT);
    RiskAssessment {
        risk_percent,
        tier: RiskTier::from_percent(risk_percent),
        contributions,
    }
}
