//! In-process incident store.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use disaster_map_incident_models::{Incident, IncidentId};
use disaster_map_verification::VoteAction;
use tokio::sync::{Mutex, RwLock};

use crate::{IncidentStore, StoreError, VoteOutcome};

/// Incident store held entirely in memory.
///
/// The outer `RwLock` guards the id -> incident map; each incident sits
/// behind its own `Mutex`, so votes on one incident are serialized
/// without blocking reads or votes on others.
#[derive(Default)]
pub struct InMemoryIncidentStore {
    incidents: RwLock<BTreeMap<IncidentId, Arc<Mutex<Incident>>>>,
}

impl InMemoryIncidentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn entry(&self, id: IncidentId) -> Option<Arc<Mutex<Incident>>> {
        self.incidents.read().await.get(&id).cloned()
    }
}

#[async_trait]
impl IncidentStore for InMemoryIncidentStore {
    async fn fetch_all_incidents(&self) -> Result<Vec<Incident>, StoreError> {
        let entries: Vec<Arc<Mutex<Incident>>> =
            self.incidents.read().await.values().cloned().collect();

        let mut snapshot = Vec::with_capacity(entries.len());
        for entry in entries {
            snapshot.push(entry.lock().await.clone());
        }
        snapshot.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        Ok(snapshot)
    }

    async fn fetch_incident_by_id(&self, id: IncidentId) -> Result<Option<Incident>, StoreError> {
        let Some(entry) = self.entry(id).await else {
            return Ok(None);
        };
        let incident = entry.lock().await.clone();
        Ok(Some(incident))
    }

    async fn insert_incident(&self, incident: Incident) -> Result<(), StoreError> {
        let id = incident.id;
        self.incidents
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(incident)));
        log::debug!("Stored incident {id}");
        Ok(())
    }

    async fn append_vote_and_recompute(
        &self,
        id: IncidentId,
        voter_id: &str,
        action: VoteAction,
    ) -> Result<Option<VoteOutcome>, StoreError> {
        let Some(entry) = self.entry(id).await else {
            return Ok(None);
        };

        // Held across the membership check and the append.
        let mut incident = entry.lock().await;
        let status = incident.verification.record(voter_id, action);

        Ok(Some(VoteOutcome {
            status,
            incident: incident.clone(),
        }))
    }

    async fn delete_incident(&self, id: IncidentId) -> Result<bool, StoreError> {
        Ok(self.incidents.write().await.remove(&id).is_some())
    }
}
