//! Runtime invariant guards for the live scenario.
//!
//! Validates every update that the scenario parameters are finite and that
//! the cached assessment agrees with a fresh evaluation (tier, percentage,
//! and contribution total). On violation, a warning is logged, the state is
//! repaired, and a counter is bumped for tests.

use bevy::prelude::*;

use risk::evaluate::{evaluate, MAX_RISK_PERCENT};

use crate::scenario::ScenarioState;
use crate::MonitoringSet;

/// Tolerance for floating-point comparisons between cached and fresh values.
const DRIFT_TOLERANCE: f32 = 1e-3;

/// Violations detected during the last validation pass.
#[derive(Resource, Default, Debug)]
pub struct ScenarioInvariantViolations {
    pub non_finite_params: u32,
    pub assessment_drift: u32,
    pub out_of_bounds: u32,
}

/// Validate the scenario state, repairing on violation.
pub fn validate_scenario(
    mut state: ResMut<ScenarioState>,
    mut violations: ResMut<ScenarioInvariantViolations>,
) {
    violations.non_finite_params = 0;
    violations.assessment_drift = 0;
    violations.out_of_bounds = 0;

    let params = state.params();

    // Parameters: finite. NaN or infinity cannot be clamped back into the
    // control range, so the whole scenario resets.
    if !params.is_finite() {
        warn!("Invariant violation: non-finite scenario parameters {:?}. Resetting.", params);
        state.reset();
        violations.non_finite_params += 1;
        return;
    }

    // Cached assessment: must agree with a fresh evaluation.
    let expected = evaluate(&params);
    let cached = *state.assessment();
    if cached.tier != expected.tier
        || (cached.risk_percent - expected.risk_percent).abs() > DRIFT_TOLERANCE
        || (cached.contributions.total() - expected.contributions.total()).abs() > DRIFT_TOLERANCE
    {
        warn!(
            "Invariant violation: cached assessment {:?} drifted from {:?}. Re-evaluating.",
            cached, expected
        );
        state.set_params(params);
        violations.assessment_drift += 1;
    }

    // In-domain parameters must produce a bounded percentage.
    if params.is_in_domain()
        && !(0.0..=MAX_RISK_PERCENT).contains(&state.assessment().risk_percent)
    {
        warn!(
            "Invariant violation: in-domain scenario produced risk {}",
            state.assessment().risk_percent
        );
        violations.out_of_bounds += 1;
    }
}

pub struct InvariantChecksPlugin;

impl Plugin for InvariantChecksPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScenarioInvariantViolations>()
            .add_systems(Update, validate_scenario.in_set(MonitoringSet::PostAssess));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violations_default_to_zero() {
        let v = ScenarioInvariantViolations::default();
        assert_eq!(v.non_finite_params, 0);
        assert_eq!(v.assessment_drift, 0);
        assert_eq!(v.out_of_bounds, 0);
    }

    #[test]
    fn test_drift_tolerance_is_tight() {
        assert!(DRIFT_TOLERANCE < 0.01);
    }
}
