#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the disaster map server.
//!
//! Request bodies are deliberately loose (every field optional,
//! coordinates as either JSON numbers or numeric strings) so that a bad
//! request produces a specific [`RequestError`] instead of a generic
//! deserialization failure. Each body has a `resolve` method that is the
//! only way to turn it into validated-ready input.

use disaster_map_geo::{Axis, CoordinateError, RawCoordinates, parse_degrees};
use disaster_map_incident_models::{Incident, IncidentReport, IncidentSeverity, IncidentType};
use disaster_map_verification::VoteStatus;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Problems with the shape of a request body.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    /// A required field was absent or `null`.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A field held a value outside its fixed set.
    #[error("unknown {field} {value:?}")]
    UnknownValue {
        /// Field name as it appears on the wire.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A coordinate could not be read.
    #[error(transparent)]
    Coordinate(#[from] CoordinateError),
}

/// A coordinate sent either as a JSON number or as a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CoordinateInput {
    /// `16.5449`
    Number(f64),
    /// `"16.5449"`
    Text(String),
}

impl CoordinateInput {
    /// Reads the coordinate as degrees. Range checks happen later.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::Unparseable`] for non-numeric text.
    pub fn resolve(&self, axis: Axis) -> Result<f64, CoordinateError> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(text) => parse_degrees(text, axis),
        }
    }
}

fn required_coordinate(
    input: Option<&CoordinateInput>,
    axis: Axis,
) -> Result<f64, CoordinateError> {
    input
        .ok_or(CoordinateError::Missing { axis })?
        .resolve(axis)
}

/// Body of `POST /api/risk/check`, and each endpoint of a route body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PointBody {
    /// Latitude.
    pub lat: Option<CoordinateInput>,
    /// Longitude.
    pub lng: Option<CoordinateInput>,
}

impl PointBody {
    /// Reads both coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Coordinate`] if either is missing or not
    /// numeric.
    pub fn resolve(&self) -> Result<RawCoordinates, RequestError> {
        Ok(RawCoordinates::new(
            required_coordinate(self.lat.as_ref(), Axis::Latitude)?,
            required_coordinate(self.lng.as_ref(), Axis::Longitude)?,
        ))
    }
}

/// Body of `POST /api/route/check` and `POST /api/route/corridor`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteBody {
    /// Route origin.
    pub start: Option<PointBody>,
    /// Route destination.
    pub end: Option<PointBody>,
}

impl RouteBody {
    /// Reads both endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if an endpoint or one of its coordinates is
    /// missing or not numeric.
    pub fn resolve(&self) -> Result<(RawCoordinates, RawCoordinates), RequestError> {
        let start = self
            .start
            .as_ref()
            .ok_or(RequestError::MissingField("start"))?
            .resolve()?;
        let end = self
            .end
            .as_ref()
            .ok_or(RequestError::MissingField("end"))?
            .resolve()?;
        Ok((start, end))
    }
}

/// Body of `POST /api/incidents/{id}/vote`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteBody {
    /// Anonymous voter identifier.
    pub user_id: Option<String>,
    /// `"confirm"` or `"flag"`.
    pub vote: Option<String>,
}

impl VoteBody {
    /// Returns `(user_id, vote)`. The values themselves are validated by
    /// the service.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::MissingField`] if either field is absent.
    pub fn resolve(&self) -> Result<(&str, &str), RequestError> {
        let user_id = self
            .user_id
            .as_deref()
            .ok_or(RequestError::MissingField("userId"))?;
        let vote = self
            .vote
            .as_deref()
            .ok_or(RequestError::MissingField("vote"))?;
        Ok((user_id, vote))
    }
}

/// Body of `POST /api/incidents`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIncidentBody {
    /// Incident type name, e.g. `"flood"`.
    #[serde(rename = "type")]
    pub incident_type: Option<String>,
    /// `"low"`, `"medium"`, or `"high"`; defaults to medium.
    pub severity: Option<String>,
    /// Latitude.
    pub lat: Option<CoordinateInput>,
    /// Longitude.
    pub lng: Option<CoordinateInput>,
    /// Free-text description.
    pub description: Option<String>,
}

impl CreateIncidentBody {
    /// Converts the body into a report for the service. Reports from
    /// callers are never simulation data.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the type is missing, the type or
    /// severity is unknown, or a coordinate is missing or not numeric.
    pub fn resolve(self) -> Result<IncidentReport, RequestError> {
        let type_name = self
            .incident_type
            .ok_or(RequestError::MissingField("type"))?;
        let incident_type: IncidentType =
            type_name
                .trim()
                .parse()
                .map_err(|_| RequestError::UnknownValue {
                    field: "type",
                    value: type_name.clone(),
                })?;

        let severity = self
            .severity
            .map(|s| {
                s.trim()
                    .parse::<IncidentSeverity>()
                    .map_err(|_| RequestError::UnknownValue {
                        field: "severity",
                        value: s.clone(),
                    })
            })
            .transpose()?;

        Ok(IncidentReport {
            incident_type,
            severity,
            lat: required_coordinate(self.lat.as_ref(), Axis::Latitude)?,
            lng: required_coordinate(self.lng.as_ref(), Axis::Longitude)?,
            description: self.description,
            is_simulation: false,
        })
    }
}

/// Response of `POST /api/incidents/{id}/vote`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiVoteResponse {
    /// Whether the vote was recorded or ignored.
    pub status: VoteStatus,
    /// Human-readable outcome.
    pub message: String,
    /// The incident after the vote.
    pub incident: Incident,
}

impl ApiVoteResponse {
    /// Builds the response, picking the message from `status`.
    #[must_use]
    pub fn new(status: VoteStatus, incident: Incident) -> Self {
        let message = match status {
            VoteStatus::Recorded => "Vote saved",
            VoteStatus::AlreadyVoted => "Already voted",
        };
        Self {
            status,
            message: message.to_string(),
            incident,
        }
    }
}

/// A bare confirmation message.
#[derive(Debug, Clone, Serialize)]
pub struct ApiMessage {
    /// Human-readable message.
    pub message: String,
}

/// Error body returned with every non-2xx response.
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorBody {
    /// Human-readable error.
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}
