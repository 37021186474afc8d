#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result types for point and route risk checks.
//!
//! Each evaluator has its own level enum and report shape. Consumers
//! depend on them independently, so they are deliberately not unified.

use disaster_map_geo::GeoPoint;
use disaster_map_incident_models::{Incident, IncidentId, IncidentSeverity, IncidentType};
use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};

/// Danger classification around a single point.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum PointRiskLevel {
    /// Fewer than two incidents nearby
    Low,
    /// A small cluster of incidents nearby
    Moderate,
    /// A larger cluster or at least one high-severity incident
    High,
    /// A dense cluster or several high-severity incidents
    Critical,
}

/// Danger classification along a sampled route.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum RouteRiskLevel {
    /// No incidents near any sample
    Safe,
    /// Some incidents, below the risky thresholds
    Caution,
    /// Several incidents or a couple of high-severity ones
    Risky,
    /// Many incidents or many high-severity ones
    Dangerous,
}

/// Label derived from a corridor safety score.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum CorridorLabel {
    /// Score below 40
    Risky,
    /// Score in `40..70`
    Moderate,
    /// Score of 70 or more
    Safe,
}

/// Result of a point risk check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointRiskReport {
    /// Derived classification.
    pub risk_level: PointRiskLevel,
    /// Incidents within the search radius.
    pub nearby_count: usize,
    /// Subset of `nearby_count` with high severity.
    pub high_count: usize,
}

/// Counts observed around one sample point of a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleSummary {
    /// The sample position. Serialized as flat `lat`/`lng`.
    #[serde(flatten)]
    pub point: GeoPoint,
    /// Incidents within the radius of this sample.
    pub nearby_count: usize,
    /// High-severity subset of `nearby_count`.
    pub high_count: usize,
}

/// Result of the sampled-route density check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDensityReport {
    /// Derived classification.
    pub risk_level: RouteRiskLevel,
    /// Distinct incidents near at least one sample.
    pub total_incidents_on_route: usize,
    /// High-severity subset of `total_incidents_on_route`.
    pub high_severity_on_route: usize,
    /// Per-sample counts, in route order. Empty when nothing was sampled.
    pub sample_summaries: Vec<SampleSummary>,
    /// Human-readable summary.
    pub message: String,
}

/// An incident found inside a route corridor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyIncident {
    /// Incident ID.
    pub id: IncidentId,
    /// Kind of disaster.
    #[serde(rename = "type")]
    pub incident_type: IncidentType,
    /// Reported severity.
    pub severity: IncidentSeverity,
    /// Incident position. Serialized as flat `lat`/`lng`.
    #[serde(flatten)]
    pub location: GeoPoint,
    /// Approximate distance to the route segment.
    pub distance_km: f64,
}

impl NearbyIncident {
    /// Pairs an incident with its measured corridor distance.
    #[must_use]
    pub const fn new(incident: &Incident, distance_km: f64) -> Self {
        Self {
            id: incident.id,
            incident_type: incident.incident_type,
            severity: incident.severity,
            location: incident.location,
            distance_km,
        }
    }
}

/// Result of the corridor proximity check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorridorReport {
    /// Safety score in `0..=100`; higher is safer.
    pub score: u32,
    /// Label derived from `score`.
    pub label: CorridorLabel,
    /// Number of incidents inside the corridor.
    pub nearby_count: usize,
    /// The incidents inside the corridor, closest first.
    pub nearby_incidents: Vec<NearbyIncident>,
    /// Human-readable summary.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_serialize_with_capitalized_names() {
        assert_eq!(
            serde_json::to_value(PointRiskLevel::Critical).unwrap(),
            serde_json::json!("Critical")
        );
        assert_eq!(
            serde_json::to_value(RouteRiskLevel::Caution).unwrap(),
            serde_json::json!("Caution")
        );
        assert_eq!(CorridorLabel::Moderate.to_string(), "Moderate");
    }

    #[test]
    fn point_levels_are_ordered_by_danger() {
        assert!(PointRiskLevel::Low < PointRiskLevel::Moderate);
        assert!(PointRiskLevel::High < PointRiskLevel::Critical);
        assert!(RouteRiskLevel::Safe < RouteRiskLevel::Dangerous);
    }

    #[test]
    fn sample_summary_is_flat() {
        let summary = SampleSummary {
            point: GeoPoint::new(16.5, 81.5).unwrap(),
            nearby_count: 3,
            high_count: 1,
        };
        assert_eq!(
            serde_json::to_value(summary).unwrap(),
            serde_json::json!({ "lat": 16.5, "lng": 81.5, "nearbyCount": 3, "highCount": 1 })
        );
    }

    #[test]
    fn corridor_report_wire_shape() {
        let report = CorridorReport {
            score: 85,
            label: CorridorLabel::Safe,
            nearby_count: 1,
            nearby_incidents: vec![NearbyIncident {
                id: uuid::Uuid::nil(),
                incident_type: IncidentType::Fire,
                severity: IncidentSeverity::High,
                location: GeoPoint::new(16.5, 81.5).unwrap(),
                distance_km: 0.25,
            }],
            message: "ok".to_string(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["label"], "Safe");
        assert_eq!(json["nearbyCount"], 1);
        assert_eq!(json["nearbyIncidents"][0]["type"], "fire");
        assert_eq!(json["nearbyIncidents"][0]["distanceKm"], 0.25);
        assert_eq!(json["nearbyIncidents"][0]["lat"], 16.5);
    }
}
