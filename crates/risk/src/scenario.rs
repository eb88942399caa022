//! Scenario parameters: the four user-adjustable environmental inputs.

use serde::{Deserialize, Serialize};

/// Documented control range for 24-hour rainfall, in millimeters.
pub const RAINFALL_MIN_MM: f32 = 0.0;
pub const RAINFALL_MAX_MM: f32 = 150.0;

/// Documented control range for slope angle, in degrees.
pub const SLOPE_MIN_DEG: f32 = 15.0;
pub const SLOPE_MAX_DEG: f32 = 60.0;

/// Documented control range for ground vibration, in m/s².
pub const VIBRATION_MIN_MS2: f32 = 0.0;
pub const VIBRATION_MAX_MS2: f32 = 3.0;

/// Documented control range for groundwater saturation, in percent.
pub const GROUNDWATER_MIN_PCT: f32 = 0.0;
pub const GROUNDWATER_MAX_PCT: f32 = 100.0;

/// The four environmental factors that drive the risk model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioFactor {
    Rainfall,
    SlopeAngle,
    Vibration,
    Groundwater,
}

impl ScenarioFactor {
    pub const ALL: [ScenarioFactor; 4] = [
        ScenarioFactor::Rainfall,
        ScenarioFactor::SlopeAngle,
        ScenarioFactor::Vibration,
        ScenarioFactor::Groundwater,
    ];

    /// Stable index into factor-ordered arrays (correlation matrix rows).
    pub fn index(self) -> usize {
        match self {
            ScenarioFactor::Rainfall => 0,
            ScenarioFactor::SlopeAngle => 1,
            ScenarioFactor::Vibration => 2,
            ScenarioFactor::Groundwater => 3,
        }
    }

    /// Display name.
    pub fn label(self) -> &'static str {
        match self {
            ScenarioFactor::Rainfall => "Rainfall",
            ScenarioFactor::SlopeAngle => "Slope Angle",
            ScenarioFactor::Vibration => "Vibration",
            ScenarioFactor::Groundwater => "Groundwater",
        }
    }
}

/// One evaluable scenario: a snapshot of the four environmental inputs.
///
/// Values are expected to sit inside the documented control ranges, but
/// nothing here enforces that — `evaluate::evaluate` is total over all real
/// inputs. Callers holding values from an unconstrained source can pass them
/// through [`ScenarioParameters::clamped`] first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParameters {
    /// Rainfall over the trailing 24 hours, mm.
    pub rainfall: f32,
    /// Slope angle of the monitored wall, degrees.
    pub slope_angle: f32,
    /// Peak ground vibration, m/s².
    pub vibration: f32,
    /// Groundwater saturation, percent.
    pub groundwater: f32,
}

impl Default for ScenarioParameters {
    /// The default scenario shown when the simulator opens.
    fn default() -> Self {
        Self {
            rainfall: 45.0,
            slope_angle: 35.0,
            vibration: 0.8,
            groundwater: 60.0,
        }
    }
}

impl ScenarioParameters {
    /// Clamp every input to its documented control range.
    pub fn clamped(self) -> Self {
        Self {
            rainfall: self.rainfall.clamp(RAINFALL_MIN_MM, RAINFALL_MAX_MM),
            slope_angle: self.slope_angle.clamp(SLOPE_MIN_DEG, SLOPE_MAX_DEG),
            vibration: self.vibration.clamp(VIBRATION_MIN_MS2, VIBRATION_MAX_MS2),
            groundwater: self.groundwater.clamp(GROUNDWATER_MIN_PCT, GROUNDWATER_MAX_PCT),
        }
    }

    /// True when all four inputs are finite (not NaN or infinity).
    pub fn is_finite(&self) -> bool {
        self.rainfall.is_finite()
            && self.slope_angle.is_finite()
            && self.vibration.is_finite()
            && self.groundwater.is_finite()
    }

    /// True when every input sits inside its documented control range.
    pub fn is_in_domain(&self) -> bool {
        (RAINFALL_MIN_MM..=RAINFALL_MAX_MM).contains(&self.rainfall)
            && (SLOPE_MIN_DEG..=SLOPE_MAX_DEG).contains(&self.slope_angle)
            && (VIBRATION_MIN_MS2..=VIBRATION_MAX_MS2).contains(&self.vibration)
            && (GROUNDWATER_MIN_PCT..=GROUNDWATER_MAX_PCT).contains(&self.groundwater)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scenario() {
        let params = ScenarioParameters::default();
        assert_eq!(params.rainfall, 45.0);
        assert_eq!(params.slope_angle, 35.0);
        assert_eq!(params.vibration, 0.8);
        assert_eq!(params.groundwater, 60.0);
        assert!(params.is_in_domain());
    }

    #[test]
    fn test_clamped_pulls_values_into_range() {
        let params = ScenarioParameters {
            rainfall: -10.0,
            slope_angle: 90.0,
            vibration: 5.0,
            groundwater: 120.0,
        }
        .clamped();
        assert_eq!(params.rainfall, 0.0);
        assert_eq!(params.slope_angle, 60.0);
        assert_eq!(params.vibration, 3.0);
        assert_eq!(params.groundwater, 100.0);
        assert!(params.is_in_domain());
    }

    #[test]
    fn test_clamped_respects_slope_floor() {
        let params = ScenarioParameters {
            slope_angle: 0.0,
            ..Default::default()
        }
        .clamped();
        assert_eq!(params.slope_angle, SLOPE_MIN_DEG);
    }

    #[test]
    fn test_is_finite_rejects_nan() {
        let params = ScenarioParameters {
            rainfall: f32::NAN,
            ..Default::default()
        };
        assert!(!params.is_finite());
        assert!(ScenarioParameters::default().is_finite());
    }

    #[test]
    fn test_factor_indices_are_distinct() {
        for (i, factor) in ScenarioFactor::ALL.iter().enumerate() {
            assert_eq!(factor.index(), i);
        }
    }
}
