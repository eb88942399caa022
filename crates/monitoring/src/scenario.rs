//! MON-004: Live scenario state and tier-transition detection.
//!
//! The dashboard owns exactly one mutable scenario. Every mutation goes
//! through a setter that immediately re-runs the pure evaluator, so the
//! cached [`RiskAssessment`] can never lag the parameters. A system watches
//! the cached tier and emits [`TierChanged`] once per transition (not every
//! tick), mirroring how the alert feed expects escalations to arrive.

use bevy::prelude::*;

use risk::evaluate::{evaluate, RiskAssessment};
use risk::scenario::ScenarioParameters;
use risk::tier::RiskTier;

use crate::MonitoringSet;

/// Fired once per qualitative tier transition of the live scenario.
#[derive(Event, Debug, Clone)]
pub struct TierChanged {
    pub old_tier: RiskTier,
    pub new_tier: RiskTier,
    /// Risk percentage at the moment of transition.
    pub risk_percent: f32,
}

/// The live scenario and its cached assessment.
///
/// Fields are private so every mutation re-evaluates; stale assessments are
/// structurally impossible short of memory corruption (which
/// `invariant_checks` guards against anyway).
#[derive(Resource, Debug, Clone)]
pub struct ScenarioState {
    params: ScenarioParameters,
    assessment: RiskAssessment,
}

impl Default for ScenarioState {
    fn default() -> Self {
        let params = ScenarioParameters::default();
        Self {
            assessment: evaluate(&params),
            params,
        }
    }
}

impl ScenarioState {
    pub fn params(&self) -> ScenarioParameters {
        self.params
    }

    pub fn assessment(&self) -> &RiskAssessment {
        &self.assessment
    }

    /// Replace the whole parameter set and re-evaluate.
    pub fn set_params(&mut self, params: ScenarioParameters) {
        self.params = params;
        self.assessment = evaluate(&self.params);
    }

    pub fn set_rainfall(&mut self, mm: f32) {
        let mut params = self.params;
        params.rainfall = mm;
        self.set_params(params);
    }

    pub fn set_slope_angle(&mut self, degrees: f32) {
        let mut params = self.params;
        params.slope_angle = degrees;
        self.set_params(params);
    }

    pub fn set_vibration(&mut self, ms2: f32) {
        let mut params = self.params;
        params.vibration = ms2;
        self.set_params(params);
    }

    pub fn set_groundwater(&mut self, percent: f32) {
        let mut params = self.params;
        params.groundwater = percent;
        self.set_params(params);
    }

    /// Back to the default scenario.
    pub fn reset(&mut self) {
        self.set_params(ScenarioParameters::default());
    }
}

/// Last tier the transition watcher saw, for edge detection.
///
/// Starts at the default scenario's tier so engine startup is not reported
/// as a transition.
#[derive(Resource, Debug)]
pub struct TierTracker {
    pub last: RiskTier,
}

impl Default for TierTracker {
    fn default() -> Self {
        Self {
            last: ScenarioState::default().assessment.tier,
        }
    }
}

/// Emits [`TierChanged`] when the cached tier differs from the last one
/// observed. Fires once per transition.
pub fn watch_tier_transitions(
    state: Res<ScenarioState>,
    mut tracker: ResMut<TierTracker>,
    mut transitions: EventWriter<TierChanged>,
) {
    let tier = state.assessment.tier;
    if tier == tracker.last {
        return;
    }
    let old_tier = tracker.last;
    tracker.last = tier;
    info!(
        "Scenario tier {} -> {} at {:.1}%",
        old_tier.label(),
        tier.label(),
        state.assessment.risk_percent
    );
    transitions.send(TierChanged {
        old_tier,
        new_tier: tier,
        risk_percent: state.assessment.risk_percent,
    });
}

pub struct ScenarioPlugin;

impl Plugin for ScenarioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScenarioState>()
            .init_resource::<TierTracker>()
            .add_event::<TierChanged>()
            .add_systems(Update, watch_tier_transitions.in_set(MonitoringSet::Assess));
    }
}
