//! Botlists core: pure data model, extractors and profile assembly.
mod account;
mod catalogue;
mod dedupe;
mod extract;
mod list_id;
mod profile;
mod rewrite;

pub use account::{EntitySource, Entities, MembersResponse, RawAccount, UrlEntity};
pub use catalogue::{default_lists, DEFAULT_LISTS};
pub use dedupe::dedupe_by_handle;
pub use extract::{
    extract_hashtags, extract_mentions, extract_urls, find_urls, primary_url, UrlSpan,
};
pub use list_id::{ListId, ListIdError};
pub use profile::{build_profile, parse_created_at, BotProfile};
pub use rewrite::{rewrite_description, Resolution};
