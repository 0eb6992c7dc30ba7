use std::sync::Arc;

use botlists_core::{dedupe_by_handle, BotProfile, ListId};
use botlists_logging::{bot_info, bot_warn};
use futures_util::future::{join_all, try_join_all};

use crate::config::EngineConfig;
use crate::members::MemoizedMembers;
use crate::normalize::Normalizer;
use crate::resolve::{LinkResolver, ReqwestLinkResolver};
use crate::store::DiskStore;
use crate::twitter::{ListMembersApi, TwitterClient};
use crate::AggregateError;

/// Builds one deduplicated batch of bot profiles from the configured lists.
pub struct Aggregator {
    members: MemoizedMembers,
    normalizer: Normalizer,
    lists: Vec<ListId>,
}

impl Aggregator {
    pub fn new(members: MemoizedMembers, normalizer: Normalizer, lists: Vec<ListId>) -> Self {
        Self {
            members,
            normalizer,
            lists,
        }
    }

    /// Wires the platform client, link resolver and on-disk cache from `config`.
    pub fn from_config(config: &EngineConfig) -> Result<Self, AggregateError> {
        let api: Arc<dyn ListMembersApi> = Arc::new(TwitterClient::new(
            config.api_base_url.clone(),
            config.bearer_token.clone(),
        )?);
        let resolver: Arc<dyn LinkResolver> =
            Arc::new(ReqwestLinkResolver::new(config.resolve.clone())?);
        let store = Arc::new(DiskStore::open(config.cache_dir.clone())?);

        Ok(Self::new(
            MemoizedMembers::with_page_size(api, store, config.page_size),
            Normalizer::new(resolver),
            config.lists.clone(),
        ))
    }

    pub fn lists(&self) -> &[ListId] {
        &self.lists
    }

    /// Fetches every list, normalizes every member and dedupes by handle.
    ///
    /// The first list that fails to fetch fails the whole batch. Profiles keep
    /// list order, then member order; the first profile per handle wins. The
    /// cache store is closed before returning, on success and on failure; a
    /// close error is logged and never replaces the outcome.
    pub async fn aggregate(&self) -> Result<Vec<BotProfile>, AggregateError> {
        let per_list = try_join_all(self.lists.iter().map(|list| self.collect_list(list))).await;

        let per_list = match per_list {
            Ok(per_list) => per_list,
            Err(err) => {
                if let Err(close_err) = self.members.close() {
                    bot_warn!("Failed to close cache store after error: {}", close_err);
                }
                return Err(err);
            }
        };

        let total: usize = per_list.iter().map(Vec::len).sum();
        let profiles = dedupe_by_handle(per_list.into_iter().flatten());
        bot_info!(
            "Aggregated {} profiles ({} before dedupe) from {} lists",
            profiles.len(),
            total,
            self.lists.len()
        );

        if let Err(err) = self.members.close() {
            bot_warn!("Failed to close cache store: {}", err);
        }
        Ok(profiles)
    }

    /// Runs [`Aggregator::aggregate`] and hands the outcome to `callback` exactly once.
    pub async fn run<F>(&self, callback: F)
    where
        F: FnOnce(Result<Vec<BotProfile>, AggregateError>),
    {
        callback(self.aggregate().await);
    }

    async fn collect_list(&self, list: &ListId) -> Result<Vec<BotProfile>, AggregateError> {
        bot_info!("Getting {}", list);
        let members = self
            .members
            .fetch_members(list)
            .await
            .map_err(|source| AggregateError::Fetch {
                list: list.clone(),
                source,
            })?;

        Ok(join_all(members.users.iter().map(|account| self.normalizer.normalize(account))).await)
    }
}
