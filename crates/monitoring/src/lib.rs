//! Headless monitoring engine for the slope-stability dashboard.
//!
//! Coordinates the live scenario, the alert log, and the sensor registry as
//! Bevy ECS resources with change-driven systems. Runs under
//! `MinimalPlugins`: no window, renderer, or UI — presentation layers
//! consume the resources and events published here.

use bevy::prelude::*;

pub mod alerts;
pub mod invariant_checks;
pub mod scenario;
pub mod sensors;

#[cfg(test)]
pub mod test_bench;

/// Global tick counter incremented each `Update`, used for alert timestamps
/// and sensor sync-staleness checks.
#[derive(Resource, Default, Debug)]
pub struct TickCounter(pub u64);

pub fn advance_tick(mut tick: ResMut<TickCounter>) {
    tick.0 = tick.0.wrapping_add(1);
}

/// Phases of one engine update.
///
/// `Assess` reacts to state mutated since the last update (tier
/// transitions); `PostAssess` consumes the resulting events (alert raising,
/// health rollups, invariant guards).
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonitoringSet {
    Assess,
    PostAssess,
}

pub struct MonitoringPlugin;

impl Plugin for MonitoringPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TickCounter>()
            .configure_sets(
                Update,
                (MonitoringSet::Assess, MonitoringSet::PostAssess).chain(),
            )
            .add_systems(Update, advance_tick.before(MonitoringSet::Assess));

        app.add_plugins((
            scenario::ScenarioPlugin,
            alerts::AlertsPlugin,
            sensors::SensorsPlugin,
            invariant_checks::InvariantChecksPlugin,
        ));
    }
}
