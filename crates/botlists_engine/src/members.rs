use std::sync::Arc;

use botlists_core::{ListId, MembersResponse};
use botlists_logging::{bot_debug, bot_info, bot_warn};
use serde::Deserialize;

use crate::store::{DiskStore, StoreError};
use crate::twitter::{ListMembersApi, MembersQuery};
use crate::{ApiError, MembersError};

/// Default page size for the list-members call.
pub(crate) const DEFAULT_PAGE_SIZE: u32 = 5_000;

/// Fetches list membership once per list and serves repeats from disk.
///
/// Only successful responses are stored, so a failed call is retried on the
/// next run. Entries hold the response body as received, including fields
/// the profile model does not read. Store trouble other than a closed store degrades to a cache miss
/// or an unsaved response.
pub struct MemoizedMembers {
    api: Arc<dyn ListMembersApi>,
    store: Arc<DiskStore>,
    page_size: u32,
}

impl MemoizedMembers {
    pub fn new(api: Arc<dyn ListMembersApi>, store: Arc<DiskStore>) -> Self {
        Self::with_page_size(api, store, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(
        api: Arc<dyn ListMembersApi>,
        store: Arc<DiskStore>,
        page_size: u32,
    ) -> Self {
        Self {
            api,
            store,
            page_size,
        }
    }

    pub async fn fetch_members(&self, list: &ListId) -> Result<MembersResponse, MembersError> {
        let key = list.to_string();

        if let Some(cached) = self.cached(&key)? {
            bot_debug!("Cache hit for {}", key);
            return Ok(cached);
        }

        bot_info!("Cache miss for {}, requesting members", key);
        let query = MembersQuery {
            list: list.clone(),
            count: self.page_size,
            skip_status: true,
        };
        let raw = self.api.list_members(&query).await?;
        // Undecodable bodies are reported as api errors and never stored.
        let members = MembersResponse::deserialize(&raw).map_err(ApiError::from)?;

        match self.store.put(&key, &raw.to_string()) {
            Ok(()) => {}
            Err(err @ StoreError::Closed(_)) => return Err(err.into()),
            Err(err) => bot_warn!("Could not cache members of {}: {}", key, err),
        }

        Ok(members)
    }

    /// Flushes and closes the underlying store.
    pub fn close(&self) -> Result<(), StoreError> {
        self.store.close()
    }

    fn cached(&self, key: &str) -> Result<Option<MembersResponse>, MembersError> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(None),
            Err(err @ StoreError::Closed(_)) => return Err(err.into()),
            Err(err) => {
                bot_warn!("Ignoring unreadable cache entry for {}: {}", key, err);
                return Ok(None);
            }
        };
        match serde_json::from_str(&raw) {
            Ok(members) => Ok(Some(members)),
            Err(err) => {
                bot_warn!("Ignoring corrupt cache entry for {}: {}", key, err);
                Ok(None)
            }
        }
    }
}
