use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{extract_hashtags, extract_mentions, extract_urls, primary_url, RawAccount};

/// Format of `created_at` in platform responses, e.g. `Wed Oct 10 20:19:24 +0000 2018`.
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Canonical, normalized view of one bot account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotProfile {
    pub id: String,
    pub name: String,
    pub handle: String,
    pub avatar: String,
    pub description: String,
    pub main_url: String,
    pub urls: Vec<String>,
    pub mentions: Vec<String>,
    pub hashtags: Vec<String>,
    pub location: String,
    pub created_at: Option<DateTime<Utc>>,
    pub post_count: u64,
    pub listed_count: u64,
    pub follower_count: u64,
}

/// Assembles a profile from `account` and its already rewritten description.
///
/// Mentions and hashtags are read from the rewritten description followed by
/// the location.
pub fn build_profile(account: &RawAccount, description: String) -> BotProfile {
    let texts = [description.as_str(), account.location.as_str()];
    let mentions = extract_mentions(texts);
    let hashtags = extract_hashtags(texts);

    BotProfile {
        id: account.id_str.clone(),
        name: account.name.clone(),
        handle: account.screen_name.clone(),
        avatar: account.profile_image_url_https.clone(),
        main_url: primary_url(&account.entities),
        urls: extract_urls(&account.entities),
        mentions,
        hashtags,
        location: account.location.clone(),
        created_at: parse_created_at(&account.created_at),
        post_count: account.statuses_count,
        listed_count: account.listed_count,
        follower_count: account.followers_count,
        description,
    }
}

/// Parses a platform timestamp into UTC; blank or malformed input yields `None`.
pub fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DateTime::parse_from_str(raw, CREATED_AT_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
