//! ALERT-006: Alert log with severity, lifecycle, and filtering.
//!
//! Systems emit [`AlertEvent`]s which are collected into the [`AlertLog`]
//! resource. Each alert moves through Active -> Acknowledged -> Resolved;
//! the header badges count *active* alerts per severity, and the table view
//! filters on severity, status, and a case-insensitive search term.
//!
//! Tier escalations of the live scenario raise alerts automatically, once
//! per transition.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use risk::tier::RiskTier;

use crate::scenario::TierChanged;
use crate::{MonitoringSet, TickCounter};

// =============================================================================
// Severity and status
// =============================================================================

/// Alert severity, from most to least urgent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    /// Immediate danger to personnel or equipment.
    Critical,
    High,
    Medium,
    Low,
}

impl AlertSeverity {
    /// Badge label for display.
    pub fn label(self) -> &'static str {
        match self {
            AlertSeverity::Critical => "CRITICAL",
            AlertSeverity::High => "HIGH",
            AlertSeverity::Medium => "MEDIUM",
            AlertSeverity::Low => "LOW",
        }
    }

    /// Severity of an alert raised for a scenario entering `tier`.
    fn for_tier(tier: RiskTier) -> Self {
        match tier {
            RiskTier::High => AlertSeverity::High,
            RiskTier::Medium => AlertSeverity::Medium,
            RiskTier::Low => AlertSeverity::Low,
        }
    }
}

/// Lifecycle state of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    #[default]
    Active,
    Acknowledged,
    Resolved,
}

// =============================================================================
// Alert
// =============================================================================

/// A single alert in the log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// Log-assigned id, unique per engine run.
    pub id: u64,
    pub severity: AlertSeverity,
    pub title: String,
    pub description: String,
    /// Pit zone, when the alert is tied to one.
    pub location: Option<String>,
    /// Originating sensor, when the alert is tied to one.
    pub sensor_id: Option<String>,
    /// Model confidence in [0, 1], for prediction-driven alerts.
    pub confidence: Option<f32>,
    pub recommended_actions: Vec<String>,
    /// Tick when the alert was raised.
    pub raised_tick: u64,
    pub status: AlertStatus,
}

/// Event emitted by systems to create an alert.
#[derive(Event, Debug, Clone)]
pub struct AlertEvent {
    pub severity: AlertSeverity,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub sensor_id: Option<String>,
    pub confidence: Option<f32>,
    pub recommended_actions: Vec<String>,
}

// =============================================================================
// Filtering
// =============================================================================

/// Table-view filter: unset fields match everything; `search` matches a
/// case-insensitive substring of the title, description, or location.
#[derive(Debug, Clone, Default)]
pub struct AlertFilter {
    pub severity: Option<AlertSeverity>,
    pub status: Option<AlertStatus>,
    pub search: Option<String>,
}

impl AlertFilter {
    fn matches(&self, alert: &Alert) -> bool {
        if let Some(severity) = self.severity {
            if alert.severity != severity {
                return false;
            }
        }
        if let Some(status) = self.status {
            if alert.status != status {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let in_location = alert
                .location
                .as_deref()
                .is_some_and(|l| l.to_lowercase().contains(&needle));
            if !alert.title.to_lowercase().contains(&needle)
                && !alert.description.to_lowercase().contains(&needle)
                && !in_location
            {
                return false;
            }
        }
        true
    }
}

// =============================================================================
// Alert log resource
// =============================================================================

/// All alerts raised this run, oldest first.
#[derive(Resource, Default, Debug)]
pub struct AlertLog {
    alerts: Vec<Alert>,
    next_id: u64,
}

impl AlertLog {
    /// Append a new active alert and return its id.
    pub fn raise(&mut self, event: AlertEvent, tick: u64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.alerts.push(Alert {
            id,
            severity: event.severity,
            title: event.title,
            description: event.description,
            location: event.location,
            sensor_id: event.sensor_id,
            confidence: event.confidence,
            recommended_actions: event.recommended_actions,
            raised_tick: tick,
            status: AlertStatus::Active,
        });
        id
    }

    /// Active -> Acknowledged. Returns false if the alert is unknown or has
    /// already left the Active state.
    pub fn acknowledge(&mut self, id: u64) -> bool {
        match self.alerts.iter_mut().find(|a| a.id == id) {
            Some(alert) if alert.status == AlertStatus::Active => {
                alert.status = AlertStatus::Acknowledged;
                true
            }
            _ => false,
        }
    }

    /// Any non-resolved state -> Resolved. Returns false if the alert is
    /// unknown or already resolved.
    pub fn resolve(&mut self, id: u64) -> bool {
        match self.alerts.iter_mut().find(|a| a.id == id) {
            Some(alert) if alert.status != AlertStatus::Resolved => {
                alert.status = AlertStatus::Resolved;
                true
            }
            _ => false,
        }
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn get(&self, id: u64) -> Option<&Alert> {
        self.alerts.iter().find(|a| a.id == id)
    }

    /// Count of *active* alerts at the given severity (header badges).
    pub fn active_count(&self, severity: AlertSeverity) -> usize {
        self.alerts
            .iter()
            .filter(|a| a.severity == severity && a.status == AlertStatus::Active)
            .count()
    }

    /// Alerts matching the filter, in log order.
    pub fn filtered(&self, filter: &AlertFilter) -> Vec<&Alert> {
        self.alerts.iter().filter(|a| filter.matches(a)).collect()
    }
}

// =============================================================================
// Systems
// =============================================================================

/// Drains [`AlertEvent`]s into the log.
pub fn collect_alerts(
    mut events: EventReader<AlertEvent>,
    tick: Res<TickCounter>,
    mut log: ResMut<AlertLog>,
) {
    for event in events.read() {
        let severity = event.severity;
        let title = event.title.clone();
        let id = log.raise(event.clone(), tick.0);
        info!("Alert {} raised ({}): {}", id, severity.label(), title);
    }
}

/// Raises an alert for each scenario tier transition. Escalations carry the
/// destination tier's severity and recommended actions; a drop back to Low
/// is logged as an all-clear.
pub fn raise_tier_alerts(
    mut transitions: EventReader<TierChanged>,
    mut alerts: EventWriter<AlertEvent>,
) {
    for transition in transitions.read() {
        let actions = transition
            .new_tier
            .recommended_actions()
            .iter()
            .map(|s| s.to_string())
            .collect();
        match transition.new_tier {
            RiskTier::High => {
                alerts.send(AlertEvent {
                    severity: AlertSeverity::for_tier(RiskTier::High),
                    title: "Critical risk level detected".to_string(),
                    description: format!(
                        "Scenario risk reached {:.1}% (was {})",
                        transition.risk_percent,
                        transition.old_tier.label()
                    ),
                    location: None,
                    sensor_id: None,
                    confidence: None,
                    recommended_actions: actions,
                });
            }
            RiskTier::Medium => {
                alerts.send(AlertEvent {
                    severity: AlertSeverity::for_tier(RiskTier::Medium),
                    title: "Elevated risk level".to_string(),
                    description: format!(
                        "Scenario risk at {:.1}% (was {})",
                        transition.risk_percent,
                        transition.old_tier.label()
                    ),
                    location: None,
                    sensor_id: None,
                    confidence: None,
                    recommended_actions: actions,
                });
            }
            RiskTier::Low => {
                // Only meaningful as a recovery from a higher tier; the
                // tracker never reports Low -> Low.
                alerts.send(AlertEvent {
                    severity: AlertSeverity::for_tier(RiskTier::Low),
                    title: "Risk level back to normal".to_string(),
                    description: format!(
                        "Scenario risk subsided to {:.1}%",
                        transition.risk_percent
                    ),
                    location: None,
                    sensor_id: None,
                    confidence: None,
                    recommended_actions: actions,
                });
            }
        }
    }
}

pub struct AlertsPlugin;

impl Plugin for AlertsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AlertLog>().add_event::<AlertEvent>().add_systems(
            Update,
            (raise_tier_alerts, collect_alerts)
                .chain()
                .in_set(MonitoringSet::PostAssess),
        );
    }
}
