//! Headless integration test bench for the monitoring engine.
//!
//! Wraps `bevy::app::App` + `MonitoringPlugin` so tests can mutate the
//! scenario and sensor fleet, advance updates, and assert on the resulting
//! ECS state without a window or renderer.

use bevy::app::App;
use bevy::prelude::*;

use crate::alerts::AlertLog;
use crate::invariant_checks::ScenarioInvariantViolations;
use crate::scenario::ScenarioState;
use crate::sensors::SensorRegistry;
use crate::{MonitoringPlugin, TickCounter};

pub struct TestBench {
    app: App,
}

impl TestBench {
    /// Engine with the default scenario, an empty alert log, and an empty
    /// sensor fleet, after one warm-up update.
    pub fn new() -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(MonitoringPlugin);
        app.update();
        Self { app }
    }

    /// Run one engine update.
    pub fn tick(&mut self) {
        self.app.update();
    }

    /// Run `n` engine updates.
    pub fn tick_n(&mut self, n: usize) {
        for _ in 0..n {
            self.app.update();
        }
    }

    /// Advance the tick counter by `n` without running updates, to simulate
    /// elapsed time (sensor sync timeouts) cheaply.
    pub fn jump_ticks(&mut self, n: u64) {
        self.app.world_mut().resource_mut::<TickCounter>().0 += n;
    }

    pub fn scenario(&self) -> &ScenarioState {
        self.app.world().resource::<ScenarioState>()
    }

    pub fn edit_scenario<R>(&mut self, f: impl FnOnce(&mut ScenarioState) -> R) -> R {
        f(self.app.world_mut().resource_mut::<ScenarioState>().into_inner())
    }

    pub fn alerts(&self) -> &AlertLog {
        self.app.world().resource::<AlertLog>()
    }

    pub fn edit_alerts<R>(&mut self, f: impl FnOnce(&mut AlertLog) -> R) -> R {
        f(self.app.world_mut().resource_mut::<AlertLog>().into_inner())
    }

    pub fn sensors(&self) -> &SensorRegistry {
        self.app.world().resource::<SensorRegistry>()
    }

    pub fn edit_sensors<R>(&mut self, f: impl FnOnce(&mut SensorRegistry) -> R) -> R {
        f(self.app.world_mut().resource_mut::<SensorRegistry>().into_inner())
    }

    pub fn violations(&self) -> &ScenarioInvariantViolations {
        self.app.world().resource::<ScenarioInvariantViolations>()
    }
}
