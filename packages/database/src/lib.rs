#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident storage for the disaster map.
//!
//! [`IncidentStore`] is the contract the service layer depends on. The
//! vote path is a single atomic operation on the store, not a
//! fetch-mutate-save sequence, so implementations can close the
//! double-vote race with whatever mechanism they have (a row lock, a
//! conditional update, or the per-incident mutex used by
//! [`InMemoryIncidentStore`]).

pub mod memory;

pub use memory::InMemoryIncidentStore;

use async_trait::async_trait;
use disaster_map_incident_models::{Incident, IncidentId};
use disaster_map_verification::{VoteAction, VoteStatus};
use thiserror::Error;

/// Errors that can occur during storage operations.
///
/// A missing incident is not an error; lookups return `None` instead.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached or failed mid-operation.
    #[error("Storage unavailable: {message}")]
    Unavailable {
        /// Description of what went wrong.
        message: String,
    },
}

/// Result of [`IncidentStore::append_vote_and_recompute`].
#[derive(Debug, Clone, PartialEq)]
pub struct VoteOutcome {
    /// Whether the vote was recorded or ignored as a duplicate.
    pub status: VoteStatus,
    /// The incident as it stands after the vote.
    pub incident: Incident,
}

/// Persistent storage for incident reports.
#[async_trait]
pub trait IncidentStore: Send + Sync {
    /// Returns every stored incident, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unavailable.
    async fn fetch_all_incidents(&self) -> Result<Vec<Incident>, StoreError>;

    /// Looks up one incident.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unavailable.
    async fn fetch_incident_by_id(&self, id: IncidentId) -> Result<Option<Incident>, StoreError>;

    /// Stores a new incident, replacing any existing one with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unavailable.
    async fn insert_incident(&self, incident: Incident) -> Result<(), StoreError>;

    /// Atomically checks voter-set membership, appends the vote, and
    /// recomputes the verification status.
    ///
    /// Concurrent calls for the same incident must be serialized so a
    /// voter can never be counted twice. Returns `None` if the incident
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unavailable.
    async fn append_vote_and_recompute(
        &self,
        id: IncidentId,
        voter_id: &str,
        action: VoteAction,
    ) -> Result<Option<VoteOutcome>, StoreError>;

    /// Hard-deletes an incident. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is unavailable.
    async fn delete_incident(&self, id: IncidentId) -> Result<bool, StoreError>;
}
