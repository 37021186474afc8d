//! Risk around a single coordinate.

use disaster_map_geo::{GeoPoint, distance_km};
use disaster_map_incident_models::Incident;
use disaster_map_risk_models::{PointRiskLevel, PointRiskReport};

use crate::thresholds::{IncidentTally, OrderedThresholds, Tier};

/// Search radius for point risk checks and route samples.
pub const POINT_RADIUS_KM: f64 = 5.0;

const POINT_TIERS: &[Tier<PointRiskLevel, IncidentTally>] = &[
    Tier {
        level: PointRiskLevel::Critical,
        when: |t| t.nearby >= 8 || t.high >= 3,
    },
    Tier {
        level: PointRiskLevel::High,
        when: |t| t.nearby >= 5 || t.high >= 1,
    },
    Tier {
        level: PointRiskLevel::Moderate,
        when: |t| t.nearby >= 2,
    },
];

/// Point risk classification table.
pub const POINT_THRESHOLDS: OrderedThresholds<PointRiskLevel, IncidentTally> =
    OrderedThresholds::new(POINT_TIERS, PointRiskLevel::Low);

/// Incidents whose great-circle distance to `point` is at most
/// `radius_km` (inclusive).
pub fn incidents_within(
    point: GeoPoint,
    incidents: &[Incident],
    radius_km: f64,
) -> impl Iterator<Item = &Incident> {
    incidents
        .iter()
        .filter(move |incident| distance_km(point, incident.location) <= radius_km)
}

/// Counts incidents within `radius_km` of `point`, and how many of them
/// are high severity.
#[must_use]
pub fn tally_within(point: GeoPoint, incidents: &[Incident], radius_km: f64) -> IncidentTally {
    incidents_within(point, incidents, radius_km).fold(
        IncidentTally::default(),
        |mut tally, incident| {
            tally.nearby += 1;
            if incident.is_high_severity() {
                tally.high += 1;
            }
            tally
        },
    )
}

/// Classifies the danger at `point` from incidents within
/// [`POINT_RADIUS_KM`].
///
/// An empty snapshot yields [`PointRiskLevel::Low`] with zero counts.
#[must_use]
pub fn evaluate_point(point: GeoPoint, incidents: &[Incident]) -> PointRiskReport {
    let tally = tally_within(point, incidents, POINT_RADIUS_KM);
    let risk_level = POINT_THRESHOLDS.classify(&tally);

    log::debug!(
        "Point ({}, {}): {} nearby, {} high -> {risk_level}",
        point.lat(),
        point.lng(),
        tally.nearby,
        tally.high,
    );

    PointRiskReport {
        risk_level,
        nearby_count: tally.nearby,
        high_count: tally.high,
    }
}
