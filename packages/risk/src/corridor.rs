//! Corridor proximity scoring for a straight-line route.
//!
//! Unlike the sampled density check, this measures each incident's
//! distance to the route segment itself and scores the route by how many
//! incidents fall inside a fixed-width corridor.

use disaster_map_geo::{GeoPoint, segment_distance_km};
use disaster_map_incident_models::Incident;
use disaster_map_risk_models::{CorridorLabel, CorridorReport, NearbyIncident};

use crate::thresholds::{OrderedThresholds, Tier};

/// Maximum distance from the route segment for an incident to count.
pub const CORRIDOR_THRESHOLD_KM: f64 = 2.0;

/// Score of a route with no incidents in its corridor.
pub const MAX_CORRIDOR_SCORE: u32 = 100;

/// Score deducted per incident in the corridor.
pub const CORRIDOR_PENALTY_PER_INCIDENT: u32 = 15;

const CORRIDOR_TIERS: &[Tier<CorridorLabel, u32>] = &[
    Tier {
        level: CorridorLabel::Risky,
        when: |score| *score < 40,
    },
    Tier {
        level: CorridorLabel::Moderate,
        when: |score| *score < 70,
    },
];

/// Corridor score labelling table.
pub const CORRIDOR_THRESHOLDS: OrderedThresholds<CorridorLabel, u32> =
    OrderedThresholds::new(CORRIDOR_TIERS, CorridorLabel::Safe);

/// `max(0, 100 - 15 * nearby_count)`.
#[must_use]
pub fn corridor_score(nearby_count: usize) -> u32 {
    let count = u32::try_from(nearby_count).unwrap_or(u32::MAX);
    MAX_CORRIDOR_SCORE.saturating_sub(count.saturating_mul(CORRIDOR_PENALTY_PER_INCIDENT))
}

/// Scores the straight segment `start`-`end` by the incidents within
/// [`CORRIDOR_THRESHOLD_KM`] of it.
///
/// `nearby_incidents` is ordered closest first; ties keep snapshot order.
#[must_use]
pub fn evaluate_corridor(start: GeoPoint, end: GeoPoint, incidents: &[Incident]) -> CorridorReport {
    let mut nearby_incidents: Vec<NearbyIncident> = incidents
        .iter()
        .filter_map(|incident| {
            let distance = segment_distance_km(incident.location, start, end);
            (distance <= CORRIDOR_THRESHOLD_KM).then(|| NearbyIncident::new(incident, distance))
        })
        .collect();
    nearby_incidents.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    let nearby_count = nearby_incidents.len();
    let score = corridor_score(nearby_count);
    let label = CORRIDOR_THRESHOLDS.classify(&score);

    log::debug!("Corridor: {nearby_count} incidents within {CORRIDOR_THRESHOLD_KM} km -> score {score} ({label})");

    CorridorReport {
        score,
        label,
        nearby_count,
        nearby_incidents,
        message: summarize(label, nearby_count),
    }
}

fn summarize(label: CorridorLabel, nearby_count: usize) -> String {
    match (label, nearby_count) {
        (_, 0) => format!("No reported incidents within {CORRIDOR_THRESHOLD_KM} km of this route."),
        (CorridorLabel::Safe, n) => format!(
            "{n} incident(s) within {CORRIDOR_THRESHOLD_KM} km of this route. Route looks mostly safe."
        ),
        (CorridorLabel::Moderate, n) => format!(
            "{n} incidents within {CORRIDOR_THRESHOLD_KM} km of this route. Proceed with caution."
        ),
        (CorridorLabel::Risky, n) => format!(
            "{n} incidents within {CORRIDOR_THRESHOLD_KM} km of this route. Consider an alternative path."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{incident, point};
    use disaster_map_incident_models::IncidentSeverity::{High, Low};

    /// About 10.7 km due east along latitude 16.5.
    fn route() -> (GeoPoint, GeoPoint) {
        (point(16.50, 81.50), point(16.50, 81.60))
    }

    /// `n` incidents about 1.1 km north of the route.
    fn beside_route(n: u32) -> Vec<Incident> {
        (0..n)
            .map(|i| incident(16.51, f64::from(i).mul_add(0.005, 81.51), Low))
            .collect()
    }

    #[test]
    fn score_formula() {
        assert_eq!(corridor_score(0), 100);
        assert_eq!(corridor_score(1), 85);
        assert_eq!(corridor_score(2), 70);
        assert_eq!(corridor_score(4), 40);
        assert_eq!(corridor_score(6), 10);
        assert_eq!(corridor_score(7), 0);
        assert_eq!(corridor_score(usize::MAX), 0);
    }

    #[test]
    fn label_boundaries() {
        assert_eq!(CORRIDOR_THRESHOLDS.classify(&100), CorridorLabel::Safe);
        assert_eq!(CORRIDOR_THRESHOLDS.classify(&70), CorridorLabel::Safe);
        assert_eq!(CORRIDOR_THRESHOLDS.classify(&69), CorridorLabel::Moderate);
        assert_eq!(CORRIDOR_THRESHOLDS.classify(&40), CorridorLabel::Moderate);
        assert_eq!(CORRIDOR_THRESHOLDS.classify(&39), CorridorLabel::Risky);
        assert_eq!(CORRIDOR_THRESHOLDS.classify(&0), CorridorLabel::Risky);
    }

    #[test]
    fn empty_snapshot_is_safe() {
        let (start, end) = route();
        let report = evaluate_corridor(start, end, &[]);
        assert_eq!(report.score, 100);
        assert_eq!(report.label, CorridorLabel::Safe);
        assert_eq!(report.nearby_count, 0);
        assert!(report.nearby_incidents.is_empty());
        assert!(report.message.starts_with("No reported incidents"));
    }

    #[test]
    fn only_incidents_inside_the_corridor_count() {
        let (start, end) = route();
        let incidents = [
            // ~1.1 km north of the middle.
            incident(16.51, 81.55, High),
            // ~2.2 km north of the middle.
            incident(16.52, 81.55, High),
            // ~1.07 km past the east end.
            incident(16.50, 81.61, Low),
            // ~2.13 km past the east end.
            incident(16.50, 81.62, Low),
        ];
        let report = evaluate_corridor(start, end, &incidents);

        assert_eq!(report.nearby_count, 2);
        let ids: Vec<_> = report.nearby_incidents.iter().map(|n| n.id).collect();
        assert!(ids.contains(&incidents[0].id));
        assert!(ids.contains(&incidents[2].id));
        assert!(
            report
                .nearby_incidents
                .iter()
                .all(|n| n.distance_km <= CORRIDOR_THRESHOLD_KM)
        );
        assert_eq!(report.score, 70);
        assert_eq!(report.label, CorridorLabel::Safe);
    }

    #[test]
    fn nearby_incidents_are_sorted_closest_first() {
        let (start, end) = route();
        let incidents = [
            incident(16.515, 81.55, Low),
            incident(16.501, 81.55, Low),
            incident(16.508, 81.55, Low),
        ];
        let report = evaluate_corridor(start, end, &incidents);
        let ids: Vec<_> = report.nearby_incidents.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![incidents[1].id, incidents[2].id, incidents[0].id]);
    }

    #[test]
    fn nearby_incident_carries_incident_details() {
        let (start, end) = route();
        let incidents = [incident(16.51, 81.55, High)];
        let report = evaluate_corridor(start, end, &incidents);
        let found = &report.nearby_incidents[0];
        assert_eq!(found.id, incidents[0].id);
        assert_eq!(found.severity, High);
        assert_eq!(found.incident_type, incidents[0].incident_type);
        assert_eq!(found.location, incidents[0].location);
        assert!((found.distance_km - 1.112).abs() < 0.01);
    }

    #[test]
    fn three_incidents_are_moderate() {
        let (start, end) = route();
        let report = evaluate_corridor(start, end, &beside_route(3));
        assert_eq!(report.score, 55);
        assert_eq!(report.label, CorridorLabel::Moderate);
        assert!(report.message.contains("Proceed with caution"));
    }

    #[test]
    fn five_incidents_are_risky() {
        let (start, end) = route();
        let report = evaluate_corridor(start, end, &beside_route(5));
        assert_eq!(report.score, 25);
        assert_eq!(report.label, CorridorLabel::Risky);
        assert!(report.message.starts_with("5 incidents"));
    }

    #[test]
    fn score_floors_at_zero() {
        let (start, end) = route();
        let report = evaluate_corridor(start, end, &beside_route(9));
        assert_eq!(report.nearby_count, 9);
        assert_eq!(report.score, 0);
        assert_eq!(report.label, CorridorLabel::Risky);
    }
}
