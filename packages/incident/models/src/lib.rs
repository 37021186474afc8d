#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident report types, categories, and severity definitions.
//!
//! An [`Incident`] is a geotagged disaster report submitted by the
//! community. These types are shared by the risk evaluators, the incident
//! store, and the API layer.

use chrono::{DateTime, Utc};
use disaster_map_geo::GeoPoint;
use disaster_map_verification::VerificationLedger;
use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};
use uuid::Uuid;

/// Identifier assigned to an incident when it is stored.
pub type IncidentId = Uuid;

/// Kind of disaster being reported.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IncidentType {
    /// Flooding or waterlogging
    Flood,
    /// Fire of any scale
    Fire,
    /// Earthquake or tremor damage
    Earthquake,
    /// Road or industrial accident
    Accident,
    /// Landslide or mudslide
    Landslide,
    /// Anything not covered above
    Other,
}

impl IncidentType {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Flood,
            Self::Fire,
            Self::Earthquake,
            Self::Accident,
            Self::Landslide,
            Self::Other,
        ]
    }
}

/// Reported severity, ordered `Low < Medium < High`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IncidentSeverity {
    /// Minor disruption
    Low,
    /// Noticeable danger (the default when a reporter doesn't say)
    #[default]
    Medium,
    /// Immediate danger to life or property
    High,
}

/// A report as submitted, before it has been validated and stored.
///
/// Coordinates are raw numbers here; they are only trusted once they have
/// passed through [`GeoPoint::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentReport {
    /// Kind of disaster.
    pub incident_type: IncidentType,
    /// Severity, defaulting to [`IncidentSeverity::Medium`] when `None`.
    pub severity: Option<IncidentSeverity>,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Free-text description.
    pub description: Option<String>,
    /// Whether the report came from a simulation run.
    pub is_simulation: bool,
}

/// A stored incident report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    /// Unique incident ID.
    pub id: IncidentId,
    /// Kind of disaster.
    #[serde(rename = "type")]
    pub incident_type: IncidentType,
    /// Reported severity.
    pub severity: IncidentSeverity,
    /// Where the incident was reported. Serialized as flat `lat`/`lng`.
    #[serde(flatten)]
    pub location: GeoPoint,
    /// Free-text description.
    pub description: Option<String>,
    /// When the report was stored.
    pub created_at: DateTime<Utc>,
    /// Community votes and the derived status. Only the vote path mutates
    /// this.
    #[serde(flatten)]
    pub verification: VerificationLedger,
    /// Marks demo data. Evaluators ignore it.
    pub is_simulation: bool,
}

impl Incident {
    /// Builds a fresh, unverified incident at a validated location.
    #[must_use]
    pub fn new(
        id: IncidentId,
        incident_type: IncidentType,
        severity: IncidentSeverity,
        location: GeoPoint,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            incident_type,
            severity,
            location,
            description: None,
            created_at,
            verification: VerificationLedger::new(),
            is_simulation: false,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether this incident counts towards "high severity" tallies.
    #[must_use]
    pub const fn is_high_severity(&self) -> bool {
        matches!(self.severity, IncidentSeverity::High)
    }
}
