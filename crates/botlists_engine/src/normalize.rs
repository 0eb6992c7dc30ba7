use std::sync::Arc;

use botlists_core::{
    build_profile, find_urls, rewrite_description, BotProfile, RawAccount, Resolution,
};
use botlists_logging::{bot_debug, bot_warn};
use futures_util::future::join_all;

use crate::resolve::LinkResolver;

/// Turns raw accounts into profiles, expanding links in their descriptions.
#[derive(Clone)]
pub struct Normalizer {
    resolver: Arc<dyn LinkResolver>,
}

impl Normalizer {
    pub fn new(resolver: Arc<dyn LinkResolver>) -> Self {
        Self { resolver }
    }

    /// Never fails: a link that cannot be expanded stays as written.
    pub async fn normalize(&self, account: &RawAccount) -> BotProfile {
        let spans = find_urls(&account.description);
        let resolutions = join_all(spans.into_iter().map(|span| async move {
            let resolved = match self.resolver.expand(&span.url).await {
                Ok(url) => Some(url),
                Err(err) => {
                    bot_warn!(
                        "Leaving {} unresolved for @{}: {}",
                        span.url,
                        account.screen_name,
                        err
                    );
                    None
                }
            };
            Resolution::new(span, resolved)
        }))
        .await;

        for resolution in &resolutions {
            if let Some(resolved) = &resolution.resolved {
                bot_debug!("Expanded {} -> {}", resolution.span.url, resolved);
            }
        }

        let description = rewrite_description(&account.description, &resolutions);
        build_profile(account, description)
    }
}
