#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Transport-agnostic operations for the disaster map.
//!
//! [`DisasterService`] validates raw caller input, fetches a snapshot (or
//! performs an atomic vote) through an [`IncidentStore`], and hands the
//! snapshot to the pure evaluators in `disaster_map_risk`. Every failure
//! is one of the three [`ServiceError`] variants.

use std::sync::Arc;

use chrono::Utc;
use disaster_map_database::{IncidentStore, StoreError, VoteOutcome};
use disaster_map_geo::{CoordinateError, GeoPoint};
use disaster_map_incident_models::{Incident, IncidentId, IncidentReport};
use disaster_map_risk_models::{CorridorReport, PointRiskReport, RouteDensityReport};
use disaster_map_verification::{VoteAction, VoteStatus};
use thiserror::Error;
use uuid::Uuid;

pub use disaster_map_geo::RawCoordinates;

/// Errors surfaced to API callers.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed coordinates, an unknown vote action, or a missing
    /// required field. Nothing was computed or changed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No incident with this id exists.
    #[error("Incident not found: {id}")]
    NotFound {
        /// The id as the caller supplied it.
        id: String,
    },

    /// The incident store failed.
    #[error(transparent)]
    StorageUnavailable(#[from] StoreError),
}

impl From<CoordinateError> for ServiceError {
    fn from(e: CoordinateError) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

/// Entry point for every operation exposed to the API layer.
#[derive(Clone)]
pub struct DisasterService {
    store: Arc<dyn IncidentStore>,
}

impl DisasterService {
    /// Creates a service backed by `store`.
    #[must_use]
    pub fn new(store: Arc<dyn IncidentStore>) -> Self {
        Self { store }
    }

    /// Classifies the risk around a point.
    ///
    /// # Errors
    ///
    /// * [`ServiceError::InvalidInput`] if the coordinates are not valid.
    /// * [`ServiceError::StorageUnavailable`] if the snapshot fetch fails.
    pub async fn check_point_risk(
        &self,
        at: RawCoordinates,
    ) -> Result<PointRiskReport, ServiceError> {
        let point = validated(at)?;
        let snapshot = self.snapshot().await?;
        Ok(disaster_map_risk::evaluate_point(point, &snapshot))
    }

    /// Classifies a straight route by incident density around sampled
    /// points.
    ///
    /// # Errors
    ///
    /// * [`ServiceError::InvalidInput`] if either endpoint is not valid.
    /// * [`ServiceError::StorageUnavailable`] if the snapshot fetch fails.
    pub async fn check_route_density(
        &self,
        start: RawCoordinates,
        end: RawCoordinates,
    ) -> Result<RouteDensityReport, ServiceError> {
        let (start, end) = (validated(start)?, validated(end)?);
        let snapshot = self.snapshot().await?;
        Ok(disaster_map_risk::evaluate_route_density(
            start, end, &snapshot,
        ))
    }

    /// Scores a straight route by incidents inside its corridor.
    ///
    /// # Errors
    ///
    /// * [`ServiceError::InvalidInput`] if either endpoint is not valid.
    /// * [`ServiceError::StorageUnavailable`] if the snapshot fetch fails.
    pub async fn check_route_corridor(
        &self,
        start: RawCoordinates,
        end: RawCoordinates,
    ) -> Result<CorridorReport, ServiceError> {
        let (start, end) = (validated(start)?, validated(end)?);
        let snapshot = self.snapshot().await?;
        Ok(disaster_map_risk::evaluate_corridor(start, end, &snapshot))
    }

    /// Records a confirm or flag vote from `voter_id`.
    ///
    /// A voter who has already voted on the incident gets
    /// [`VoteStatus::AlreadyVoted`] and the unchanged incident back; that
    /// is not an error.
    ///
    /// # Errors
    ///
    /// * [`ServiceError::InvalidInput`] if `voter_id` is blank or `action`
    ///   is neither `confirm` nor `flag`.
    /// * [`ServiceError::NotFound`] if the incident does not exist.
    /// * [`ServiceError::StorageUnavailable`] if the store fails.
    pub async fn vote_on_incident(
        &self,
        incident_id: &str,
        voter_id: &str,
        action: &str,
    ) -> Result<VoteOutcome, ServiceError> {
        let voter_id = voter_id.trim();
        if voter_id.is_empty() {
            log::warn!("Rejected vote on {incident_id}: blank voter id");
            return Err(ServiceError::InvalidInput("userId is required".to_string()));
        }

        let action: VoteAction = action.trim().parse().map_err(|_| {
            log::warn!("Rejected vote on {incident_id}: unknown action {action:?}");
            ServiceError::InvalidInput(format!(
                "vote must be \"confirm\" or \"flag\", got {action:?}"
            ))
        })?;

        let id = resolve_id(incident_id)?;
        let outcome = self
            .store
            .append_vote_and_recompute(id, voter_id, action)
            .await
            .inspect_err(|e| log::error!("Vote on {id} failed: {e}"))?
            .ok_or_else(|| not_found(incident_id))?;

        match outcome.status {
            VoteStatus::Recorded => log::info!(
                "Recorded {action} from {voter_id} on {id}: now {}",
                outcome.incident.verification.status()
            ),
            VoteStatus::AlreadyVoted => {
                log::info!("Ignored duplicate vote from {voter_id} on {id}");
            }
        }

        Ok(outcome)
    }

    /// Returns every incident, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::StorageUnavailable`] if the store fails.
    pub async fn list_incidents(&self) -> Result<Vec<Incident>, ServiceError> {
        self.snapshot().await
    }

    /// Looks up one incident.
    ///
    /// # Errors
    ///
    /// * [`ServiceError::NotFound`] if the incident does not exist.
    /// * [`ServiceError::StorageUnavailable`] if the store fails.
    pub async fn get_incident(&self, incident_id: &str) -> Result<Incident, ServiceError> {
        let id = resolve_id(incident_id)?;
        self.store
            .fetch_incident_by_id(id)
            .await
            .inspect_err(|e| log::error!("Fetching incident {id} failed: {e}"))?
            .ok_or_else(|| not_found(incident_id))
    }

    /// Validates and stores a newly submitted report.
    ///
    /// Blank descriptions are dropped and a missing severity defaults to
    /// medium.
    ///
    /// # Errors
    ///
    /// * [`ServiceError::InvalidInput`] if the coordinates are not valid.
    /// * [`ServiceError::StorageUnavailable`] if the store fails.
    pub async fn create_incident(&self, report: IncidentReport) -> Result<Incident, ServiceError> {
        let location = validated(RawCoordinates::new(report.lat, report.lng))?;

        let mut incident = Incident::new(
            Uuid::new_v4(),
            report.incident_type,
            report.severity.unwrap_or_default(),
            location,
            Utc::now(),
        );
        incident.description = report
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        incident.is_simulation = report.is_simulation;

        self.store
            .insert_incident(incident.clone())
            .await
            .inspect_err(|e| log::error!("Storing incident failed: {e}"))?;

        log::info!(
            "Created {} incident {} ({}) at ({}, {})",
            incident.incident_type,
            incident.id,
            incident.severity,
            location.lat(),
            location.lng(),
        );

        Ok(incident)
    }

    /// Hard-deletes an incident.
    ///
    /// # Errors
    ///
    /// * [`ServiceError::NotFound`] if the incident does not exist.
    /// * [`ServiceError::StorageUnavailable`] if the store fails.
    pub async fn delete_incident(&self, incident_id: &str) -> Result<(), ServiceError> {
        let id = resolve_id(incident_id)?;
        let deleted = self
            .store
            .delete_incident(id)
            .await
            .inspect_err(|e| log::error!("Deleting incident {id} failed: {e}"))?;

        if deleted {
            log::info!("Deleted incident {id}");
            Ok(())
        } else {
            Err(not_found(incident_id))
        }
    }

    async fn snapshot(&self) -> Result<Vec<Incident>, ServiceError> {
        self.store.fetch_all_incidents().await.map_err(|e| {
            log::error!("Fetching incident snapshot failed: {e}");
            ServiceError::from(e)
        })
    }
}

fn validated(raw: RawCoordinates) -> Result<GeoPoint, ServiceError> {
    raw.validate().map_err(|e| {
        log::warn!("Rejected coordinates ({}, {}): {e}", raw.lat, raw.lng);
        ServiceError::from(e)
    })
}

/// Ids that don't parse can't name a stored incident.
fn resolve_id(incident_id: &str) -> Result<IncidentId, ServiceError> {
    Uuid::parse_str(incident_id.trim()).map_err(|_| not_found(incident_id))
}

fn not_found(incident_id: &str) -> ServiceError {
    ServiceError::NotFound {
        id: incident_id.to_string(),
    }
}
