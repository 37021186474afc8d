//! Sampled-corridor density check for a straight-line route.
//!
//! The route is sampled at evenly spaced points, each sample is tallied
//! like a point check, and incidents seen from any sample are merged by
//! id so an incident close to several samples is counted once.

use std::collections::BTreeSet;

use disaster_map_geo::{GeoPoint, sample_line};
use disaster_map_incident_models::{Incident, IncidentId};
use disaster_map_risk_models::{RouteDensityReport, RouteRiskLevel, SampleSummary};

use crate::point::{POINT_RADIUS_KM, incidents_within};
use crate::thresholds::{IncidentTally, OrderedThresholds, Tier};

/// Number of intervals the route is divided into (samples = steps + 1).
pub const ROUTE_SAMPLE_STEPS: usize = 25;

/// Radius around each sample within which incidents count.
pub const ROUTE_RADIUS_KM: f64 = POINT_RADIUS_KM;

const EMPTY_SNAPSHOT_MESSAGE: &str = "No incidents in the system. Route currently looks safe.";
const CLEAR_ROUTE_MESSAGE: &str = "No significant incident clusters close to this route.";
const CLUSTERED_ROUTE_MESSAGE: &str =
    "There are incident clusters near this route. Consider re-checking or adjusting the path.";

const ROUTE_TIERS: &[Tier<RouteRiskLevel, IncidentTally>] = &[
    Tier {
        level: RouteRiskLevel::Safe,
        when: |t| t.nearby == 0,
    },
    Tier {
        level: RouteRiskLevel::Dangerous,
        when: |t| t.high >= 5 || t.nearby >= 20,
    },
    Tier {
        level: RouteRiskLevel::Risky,
        when: |t| t.high >= 2 || t.nearby >= 10,
    },
];

/// Route density classification table, applied to the de-duplicated
/// route totals.
pub const ROUTE_THRESHOLDS: OrderedThresholds<RouteRiskLevel, IncidentTally> =
    OrderedThresholds::new(ROUTE_TIERS, RouteRiskLevel::Caution);

/// Classifies a straight route by incident density around
/// [`ROUTE_SAMPLE_STEPS`]` + 1` linearly interpolated samples.
///
/// An empty snapshot short-circuits to [`RouteRiskLevel::Safe`] without
/// sampling, so `sample_summaries` is empty in that case.
#[must_use]
pub fn evaluate_route_density(
    start: GeoPoint,
    end: GeoPoint,
    incidents: &[Incident],
) -> RouteDensityReport {
    if incidents.is_empty() {
        log::debug!("Route density: empty snapshot, skipping sampling");
        return RouteDensityReport {
            risk_level: RouteRiskLevel::Safe,
            total_incidents_on_route: 0,
            high_severity_on_route: 0,
            sample_summaries: Vec::new(),
            message: EMPTY_SNAPSHOT_MESSAGE.to_string(),
        };
    }

    let mut on_route: BTreeSet<IncidentId> = BTreeSet::new();
    let mut high_on_route: BTreeSet<IncidentId> = BTreeSet::new();

    let sample_summaries: Vec<SampleSummary> = sample_line(start, end, ROUTE_SAMPLE_STEPS)
        .into_iter()
        .map(|sample| {
            let mut tally = IncidentTally::default();
            for incident in incidents_within(sample, incidents, ROUTE_RADIUS_KM) {
                tally.nearby += 1;
                on_route.insert(incident.id);
                if incident.is_high_severity() {
                    tally.high += 1;
                    high_on_route.insert(incident.id);
                }
            }
            SampleSummary {
                point: sample,
                nearby_count: tally.nearby,
                high_count: tally.high,
            }
        })
        .collect();

    let totals = IncidentTally {
        nearby: on_route.len(),
        high: high_on_route.len(),
    };
    let risk_level = ROUTE_THRESHOLDS.classify(&totals);

    log::debug!(
        "Route density over {} samples: {} incidents, {} high -> {risk_level}",
        sample_summaries.len(),
        totals.nearby,
        totals.high,
    );

    let message = if risk_level == RouteRiskLevel::Safe {
        CLEAR_ROUTE_MESSAGE
    } else {
        CLUSTERED_ROUTE_MESSAGE
    };

    RouteDensityReport {
        risk_level,
        total_incidents_on_route: totals.nearby,
        high_severity_on_route: totals.high,
        sample_summaries,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{incident, point};
    use disaster_map_incident_models::IncidentSeverity::{High, Low, Medium};

    /// About 11 km due north.
    fn route() -> (GeoPoint, GeoPoint) {
        (point(16.50, 81.50), point(16.60, 81.50))
    }

    /// `n` incidents clustered around the middle of [`route`].
    fn cluster(n: u32, severity: disaster_map_incident_models::IncidentSeverity) -> Vec<Incident> {
        (0..n)
            .map(|i| incident(f64::from(i).mul_add(0.0005, 16.55), 81.501, severity))
            .collect()
    }

    #[test]
    fn empty_snapshot_is_safe_without_sampling() {
        let (start, end) = route();
        let report = evaluate_route_density(start, end, &[]);
        assert_eq!(report.risk_level, RouteRiskLevel::Safe);
        assert_eq!(report.total_incidents_on_route, 0);
        assert_eq!(report.high_severity_on_route, 0);
        assert!(report.sample_summaries.is_empty());
        assert_eq!(report.message, EMPTY_SNAPSHOT_MESSAGE);
    }

    #[test]
    fn far_incidents_leave_route_safe_but_sampled() {
        let (start, end) = route();
        let incidents = [incident(20.0, 85.0, High)];
        let report = evaluate_route_density(start, end, &incidents);
        assert_eq!(report.risk_level, RouteRiskLevel::Safe);
        assert_eq!(report.sample_summaries.len(), ROUTE_SAMPLE_STEPS + 1);
        assert!(report.sample_summaries.iter().all(|s| s.nearby_count == 0));
        assert_eq!(report.message, CLEAR_ROUTE_MESSAGE);
    }

    #[test]
    fn samples_follow_the_straight_line() {
        let (start, end) = route();
        let report = evaluate_route_density(start, end, &[incident(20.0, 85.0, Low)]);
        let first = report.sample_summaries.first().unwrap().point;
        let last = report.sample_summaries.last().unwrap().point;
        assert_eq!(first, start);
        assert!((last.lat() - end.lat()).abs() < 1e-12);
        assert!(
            report
                .sample_summaries
                .windows(2)
                .all(|w| w[0].point.lat() < w[1].point.lat())
        );
    }

    #[test]
    fn incident_near_many_samples_is_counted_once() {
        let (start, end) = route();
        let incidents = [incident(16.55, 81.501, Low)];
        let report = evaluate_route_density(start, end, &incidents);

        let per_sample_sum: usize = report.sample_summaries.iter().map(|s| s.nearby_count).sum();
        assert!(per_sample_sum > 1, "expected several samples to see it");
        assert_eq!(report.total_incidents_on_route, 1);
        assert_eq!(report.risk_level, RouteRiskLevel::Caution);
    }

    #[test]
    fn high_severity_is_counted_in_both_totals() {
        let (start, end) = route();
        let incidents = [incident(16.55, 81.501, High), incident(16.56, 81.501, Low)];
        let report = evaluate_route_density(start, end, &incidents);
        assert_eq!(report.total_incidents_on_route, 2);
        assert_eq!(report.high_severity_on_route, 1);
        assert_eq!(report.risk_level, RouteRiskLevel::Caution);
    }

    #[test]
    fn two_high_incidents_are_risky() {
        let (start, end) = route();
        let report = evaluate_route_density(start, end, &cluster(2, High));
        assert_eq!(report.risk_level, RouteRiskLevel::Risky);
        assert_eq!(report.message, CLUSTERED_ROUTE_MESSAGE);
    }

    #[test]
    fn ten_incidents_are_risky() {
        let (start, end) = route();
        let report = evaluate_route_density(start, end, &cluster(10, Medium));
        assert_eq!(report.total_incidents_on_route, 10);
        assert_eq!(report.risk_level, RouteRiskLevel::Risky);
    }

    #[test]
    fn five_high_incidents_are_dangerous() {
        let (start, end) = route();
        let report = evaluate_route_density(start, end, &cluster(5, High));
        assert_eq!(report.high_severity_on_route, 5);
        assert_eq!(report.risk_level, RouteRiskLevel::Dangerous);
    }

    #[test]
    fn twenty_incidents_are_dangerous() {
        let (start, end) = route();
        let report = evaluate_route_density(start, end, &cluster(20, Low));
        assert_eq!(report.total_incidents_on_route, 20);
        assert_eq!(report.high_severity_on_route, 0);
        assert_eq!(report.risk_level, RouteRiskLevel::Dangerous);
    }

    #[test]
    fn zero_length_route_samples_one_spot() {
        let here = point(16.55, 81.50);
        let report = evaluate_route_density(here, here, &[incident(16.551, 81.50, Low)]);
        assert_eq!(report.sample_summaries.len(), ROUTE_SAMPLE_STEPS + 1);
        assert!(report.sample_summaries.iter().all(|s| s.nearby_count == 1));
        assert_eq!(report.total_incidents_on_route, 1);
    }
}
