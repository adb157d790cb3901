//! Refresh flow: consult the update gate, fetch from Steam, record the update

use crate::error::SteamError;
use crate::steam_api::{FetchKind, Payload, SteamApiClient};
use crate::steam_id::{FullId, SmallId};
use crate::update_gate::UpdateGate;
use std::collections::HashMap;
use tracing::{debug, info};

/// Data fetched during one refresh, keyed by kind
#[derive(Debug, Clone)]
pub struct RefreshedProfile {
    pub small_id: SmallId,
    pub full_id: FullId,
    pub payloads: HashMap<FetchKind, Payload>,
}

pub struct ProfileRefresher {
    client: SteamApiClient,
    gate: UpdateGate,
}

impl ProfileRefresher {
    pub fn new(client: SteamApiClient, gate: UpdateGate) -> Self {
        Self { client, gate }
    }

    pub fn gate(&self) -> &UpdateGate {
        &self.gate
    }

    /// Fetch the requested kinds if the profile is due for a refresh.
    ///
    /// Returns `Ok(None)` inside the update window. The update is only
    /// recorded once every kind was fetched; any failure leaves the gate open.
    pub async fn refresh(
        &self,
        small_id: SmallId,
        kinds: &[FetchKind],
    ) -> Result<Option<RefreshedProfile>, SteamError> {
        if kinds.is_empty() {
            return Err(SteamError::InvalidArgument(
                "No data kinds requested".to_string(),
            ));
        }
        // Existence checks are keyed by custom URL name, not by id
        if kinds.contains(&FetchKind::ExistenceCheck) {
            return Err(SteamError::InvalidArgument(format!(
                "{} cannot be fetched by id",
                FetchKind::ExistenceCheck
            )));
        }

        if !self.gate.can_update(small_id).await? {
            debug!("Skipping refresh of profile {}", small_id);
            return Ok(None);
        }

        let full_id = small_id.to_full_id()?;
        let value = [full_id.to_string()];

        let mut payloads = HashMap::with_capacity(kinds.len());
        for &kind in kinds {
            let payload = self.client.fetch(kind, &value).await?;
            payloads.insert(kind, payload);
        }

        self.gate.set_update(small_id).await?;
        info!(
            "Refreshed profile {} ({} data kinds)",
            small_id,
            payloads.len()
        );

        Ok(Some(RefreshedProfile {
            small_id,
            full_id,
            payloads,
        }))
    }
}
