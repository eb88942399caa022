//! Qualitative risk tiers derived from the numeric risk percentage.

use serde::{Deserialize, Serialize};

/// Risk percentage above which a scenario is classified High.
pub const HIGH_TIER_THRESHOLD: f32 = 70.0;
/// Risk percentage above which a scenario is classified Medium.
pub const MEDIUM_TIER_THRESHOLD: f32 = 40.0;

/// Three-level risk bucket used to select emphasis and recommended actions.
///
/// Ordered least to most severe, so escalation can be tested with `>`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Classify a risk percentage: High above 70, Medium above 40, else Low.
    pub fn from_percent(risk_percent: f32) -> Self {
        if risk_percent > HIGH_TIER_THRESHOLD {
            RiskTier::High
        } else if risk_percent > MEDIUM_TIER_THRESHOLD {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }

    /// Badge label for display.
    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "LOW",
            RiskTier::Medium => "MEDIUM",
            RiskTier::High => "HIGH",
        }
    }

    /// Recommended operator actions for this tier.
    pub fn recommended_actions(self) -> &'static [&'static str] {
        match self {
            RiskTier::High => &[
                "Immediate evacuation recommended",
                "Deploy additional monitoring",
                "Conduct visual inspection",
            ],
            RiskTier::Medium => &[
                "Increase monitoring frequency",
                "Restrict access to high-risk areas",
                "Prepare evacuation procedures",
            ],
            RiskTier::Low => &[
                "Continue normal operations",
                "Maintain regular monitoring",
                "Monitor weather conditions",
            ],
        }
    }
}
