//! MON-008: Sensor registry and health rollup.
//!
//! Tracks the pit's sensor fleet: identity, latest reading, battery level,
//! and a derived health status. Status is recomputed every update from
//! battery level and sync staleness; a sensor going offline raises a
//! critical alert (the zone loses coverage). The registry also holds the
//! comparison selection the monitoring view toggles sensors in and out of.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::alerts::{AlertEvent, AlertSeverity};
use crate::{MonitoringSet, TickCounter};

// ---------------------------------------------------------------------------
// Health thresholds
// ---------------------------------------------------------------------------

/// Battery percentage at or below which a sensor reports Warning.
pub const LOW_BATTERY_PCT: f32 = 20.0;

/// Ticks without a sync after which a sensor reports Offline.
pub const SYNC_TIMEOUT_TICKS: u64 = 600;

// ---------------------------------------------------------------------------
// Sensor model
// ---------------------------------------------------------------------------

/// What a sensor measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    Displacement,
    Strain,
    PorePressure,
    Vibration,
    RainGauge,
}

impl SensorKind {
    pub fn label(self) -> &'static str {
        match self {
            SensorKind::Displacement => "Displacement",
            SensorKind::Strain => "Strain",
            SensorKind::PorePressure => "Pore Pressure",
            SensorKind::Vibration => "Vibration",
            SensorKind::RainGauge => "Rain Gauge",
        }
    }
}

/// Derived health status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorStatus {
    #[default]
    Online,
    Warning,
    Offline,
}

/// Status implied by battery level and sync age. Staleness dominates: a
/// sensor that stopped syncing is offline no matter what its last battery
/// report said.
pub fn derive_status(battery_pct: f32, ticks_since_sync: u64) -> SensorStatus {
    if ticks_since_sync > SYNC_TIMEOUT_TICKS {
        SensorStatus::Offline
    } else if battery_pct <= LOW_BATTERY_PCT {
        SensorStatus::Warning
    } else {
        SensorStatus::Online
    }
}

/// One sensor in the fleet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorInfo {
    pub id: String,
    pub name: String,
    pub kind: SensorKind,
    /// Pit zone the sensor covers.
    pub zone: String,
    pub status: SensorStatus,
    pub battery_pct: f32,
    /// Most recent reading, in the kind's native unit.
    pub last_reading: f32,
    /// Tick of the most recent sync.
    pub last_sync_tick: u64,
}

/// Per-status fleet counts (header badges on the monitoring view).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    pub online: usize,
    pub warning: usize,
    pub offline: usize,
}

// ---------------------------------------------------------------------------
// Registry resource
// ---------------------------------------------------------------------------

/// The sensor fleet plus the comparison selection.
#[derive(Resource, Default, Debug)]
pub struct SensorRegistry {
    sensors: Vec<SensorInfo>,
    /// Ids selected for side-by-side comparison, in selection order.
    selected: Vec<String>,
}

impl SensorRegistry {
    /// Add a sensor, replacing any existing sensor with the same id.
    pub fn register(&mut self, sensor: SensorInfo) {
        if let Some(existing) = self.sensors.iter_mut().find(|s| s.id == sensor.id) {
            *existing = sensor;
        } else {
            self.sensors.push(sensor);
        }
    }

    /// Record a reading and sync for the given sensor. Returns false when
    /// the id is unknown.
    pub fn record_reading(&mut self, id: &str, value: f32, battery_pct: f32, tick: u64) -> bool {
        match self.sensors.iter_mut().find(|s| s.id == id) {
            Some(sensor) => {
                sensor.last_reading = value;
                sensor.battery_pct = battery_pct;
                sensor.last_sync_tick = tick;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&SensorInfo> {
        self.sensors.iter().find(|s| s.id == id)
    }

    pub fn sensors(&self) -> &[SensorInfo] {
        &self.sensors
    }

    /// Toggle a sensor in or out of the comparison selection. Unknown ids
    /// are ignored.
    pub fn toggle_selected(&mut self, id: &str) {
        if self.get(id).is_none() {
            return;
        }
        if let Some(pos) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(id.to_string());
        }
    }

    /// Selected sensors in selection order.
    pub fn selected(&self) -> Vec<&SensorInfo> {
        self.selected
            .iter()
            .filter_map(|id| self.get(id))
            .collect()
    }

    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for sensor in &self.sensors {
            match sensor.status {
                SensorStatus::Online => counts.online += 1,
                SensorStatus::Warning => counts.warning += 1,
                SensorStatus::Offline => counts.offline += 1,
            }
        }
        counts
    }
}

// ---------------------------------------------------------------------------
// Health-check system
// ---------------------------------------------------------------------------

/// Re-derives every sensor's status. A transition to Offline raises a
/// critical alert; other transitions are logged only.
pub fn check_sensor_health(
    tick: Res<TickCounter>,
    mut registry: ResMut<SensorRegistry>,
    mut alerts: EventWriter<AlertEvent>,
) {
    for sensor in &mut registry.sensors {
        let ticks_since_sync = tick.0.saturating_sub(sensor.last_sync_tick);
        let new_status = derive_status(sensor.battery_pct, ticks_since_sync);
        if new_status == sensor.status {
            continue;
        }
        sensor.status = new_status;
        match new_status {
            SensorStatus::Offline => {
                warn!(
                    "Sensor {} ({}) offline: no sync for {} ticks",
                    sensor.id, sensor.name, ticks_since_sync
                );
                alerts.send(AlertEvent {
                    severity: AlertSeverity::Critical,
                    title: format!("Sensor {} offline", sensor.id),
                    description: format!(
                        "{} in {} stopped syncing; the zone has lost coverage",
                        sensor.name, sensor.zone
                    ),
                    location: Some(sensor.zone.clone()),
                    sensor_id: Some(sensor.id.clone()),
                    confidence: None,
                    recommended_actions: vec![
                        "Dispatch a technician to inspect the sensor".to_string(),
                        "Increase patrols in the uncovered zone".to_string(),
                    ],
                });
            }
            SensorStatus::Warning => {
                warn!(
                    "Sensor {} ({}) degraded: battery at {:.0}%",
                    sensor.id, sensor.name, sensor.battery_pct
                );
            }
            SensorStatus::Online => {
                info!("Sensor {} ({}) back online", sensor.id, sensor.name);
            }
        }
    }
}

pub struct SensorsPlugin;

impl Plugin for SensorsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SensorRegistry>().add_systems(
            Update,
            check_sensor_health
                .before(crate::alerts::collect_alerts)
                .in_set(MonitoringSet::PostAssess),
        );
    }
}
