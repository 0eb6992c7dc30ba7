//! Engine configuration, loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use botlists_core::{default_lists, ListId, ListIdError};

use crate::members::DEFAULT_PAGE_SIZE;
use crate::resolve::ResolveSettings;
use crate::twitter::DEFAULT_API_BASE_URL;

const CACHE_SUBDIR: &str = "caches";
const MEMBERS_CACHE_NAME: &str = "list-members";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} is required")]
    Missing(&'static str),
    #[error("environment variable {var} has invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
    #[error("invalid list in {var}: {source}")]
    List {
        var: &'static str,
        #[source]
        source: ListIdError,
    },
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub api_base_url: String,
    pub bearer_token: String,
    /// Members requested per list; the platform caps this at 5000.
    pub page_size: u32,
    pub cache_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Lists to aggregate, in output order.
    pub lists: Vec<ListId>,
    pub resolve: ResolveSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            bearer_token: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
            cache_dir: default_cache_dir(),
            output_dir: PathBuf::from("output"),
            lists: default_lists(),
            resolve: ResolveSettings::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TWITTER_BEARER_TOKEN` (required)
    /// - `BOTLISTS_API_BASE_URL` (default: https://api.twitter.com/1.1)
    /// - `BOTLISTS_PAGE_SIZE` (default: 5000)
    /// - `BOTLISTS_CACHE_DIR` (default: `caches/list-members` beside the executable)
    /// - `BOTLISTS_OUTPUT_DIR` (default: ./output)
    /// - `BOTLISTS_LISTS` (comma-separated `owner/lists/slug`; default: built-in catalogue)
    /// - `BOTLISTS_RESOLVE_TIMEOUT_SECS` (default: 30)
    /// - `BOTLISTS_REDIRECT_LIMIT` (default: 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`EngineConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let bearer_token =
            var("TWITTER_BEARER_TOKEN").ok_or(ConfigError::Missing("TWITTER_BEARER_TOKEN"))?;

        let lists = match var("BOTLISTS_LISTS") {
            Some(raw) => parse_lists(&raw).map_err(|source| ConfigError::List {
                var: "BOTLISTS_LISTS",
                source,
            })?,
            None => defaults.lists,
        };

        let mut resolve = defaults.resolve;
        if let Some(secs) = parse_number::<u64>(&var, "BOTLISTS_RESOLVE_TIMEOUT_SECS")? {
            resolve.request_timeout = Duration::from_secs(secs);
        }
        if let Some(limit) = parse_number::<usize>(&var, "BOTLISTS_REDIRECT_LIMIT")? {
            resolve.redirect_limit = limit;
        }

        Ok(Self {
            api_base_url: var("BOTLISTS_API_BASE_URL").unwrap_or(defaults.api_base_url),
            bearer_token,
            page_size: parse_number(&var, "BOTLISTS_PAGE_SIZE")?.unwrap_or(defaults.page_size),
            cache_dir: var("BOTLISTS_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
            output_dir: var("BOTLISTS_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            lists,
            resolve,
        })
    }
}

fn parse_lists(raw: &str) -> Result<Vec<ListId>, ListIdError> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::parse)
        .collect()
}

fn parse_number<T: std::str::FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    match var(name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { var: name, value }),
        None => Ok(None),
    }
}

/// `caches/list-members` next to the running executable, or under the
/// working directory when the executable path is unavailable.
fn default_cache_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CACHE_SUBDIR)
        .join(MEMBERS_CACHE_NAME)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn token_is_required() {
        let err = EngineConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("TWITTER_BEARER_TOKEN"));
    }

    #[test]
    fn defaults_apply_when_only_token_is_set() {
        let config = EngineConfig::from_lookup(lookup(&[("TWITTER_BEARER_TOKEN", "t")])).unwrap();
        assert_eq!(config.bearer_token, "t");
        assert_eq!(config.page_size, 5_000);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.lists, default_lists());
        assert!(config.cache_dir.ends_with("caches/list-members"));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("TWITTER_BEARER_TOKEN", "t"),
            ("BOTLISTS_PAGE_SIZE", "200"),
            ("BOTLISTS_LISTS", "a/lists/b, c/lists/d"),
            ("BOTLISTS_REDIRECT_LIMIT", "3"),
        ]))
        .unwrap();
        assert_eq!(config.page_size, 200);
        assert_eq!(config.lists, vec![ListId::new("a", "b"), ListId::new("c", "d")]);
        assert_eq!(config.resolve.redirect_limit, 3);
    }

    #[test]
    fn bad_numbers_and_lists_are_rejected() {
        let err = EngineConfig::from_lookup(lookup(&[
            ("TWITTER_BEARER_TOKEN", "t"),
            ("BOTLISTS_PAGE_SIZE", "lots"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "BOTLISTS_PAGE_SIZE", .. }));

        let err = EngineConfig::from_lookup(lookup(&[
            ("TWITTER_BEARER_TOKEN", "t"),
            ("BOTLISTS_LISTS", "nope"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::List { .. }));
    }
}
