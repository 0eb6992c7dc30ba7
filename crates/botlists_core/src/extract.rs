use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::Entities;

// The leading group stands in for a look-behind: a token must start the text
// or follow a non-alphanumeric character, so `email@domain.com` is skipped.
static MENTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^A-Za-z0-9])(@[A-Za-z0-9_]{1,15})").expect("valid mention pattern")
});
static HASHTAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^A-Za-z0-9])(#[A-Za-z0-9_]+)").expect("valid hashtag pattern")
});
// ASCII-only: the boundary and the case folding ignore non-ASCII letters.
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i-u)\b(?:https?|ftp)://[-A-Z0-9+&@#/%?=~_|!:,.;]*[-A-Z0-9+&@#/%=~_|]")
        .expect("valid url pattern")
});

/// A URL found in free text, with its byte span in that text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlSpan {
    pub start: usize,
    pub end: usize,
    pub url: String,
}

/// Unique `@handle` tokens across `texts`, in first-seen order.
pub fn extract_mentions<'a>(texts: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    unique(texts.into_iter().flat_map(|text| bounded_tokens(&MENTION_RE, text)))
}

/// Unique `#tag` tokens across `texts`, in first-seen order.
pub fn extract_hashtags<'a>(texts: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    unique(texts.into_iter().flat_map(|text| bounded_tokens(&HASHTAG_RE, text)))
}

/// Expanded URLs from every entities source, without blanks or repeats.
pub fn extract_urls(entities: &Entities) -> Vec<String> {
    unique(
        entities
            .sources()
            .flat_map(|source| source.urls.iter())
            .filter_map(|entity| entity.expanded_url.clone())
            .filter(|url| !url.is_empty()),
    )
}

/// The profile's declared URL, or an empty string unless exactly one is set.
pub fn primary_url(entities: &Entities) -> String {
    match entities.url.as_ref().map(|source| source.urls.as_slice()) {
        Some([only]) => only.expanded_url.clone().unwrap_or_default(),
        _ => String::new(),
    }
}

/// Protocol-qualified URLs embedded in `text`, in order of appearance.
pub fn find_urls(text: &str) -> Vec<UrlSpan> {
    URL_RE
        .find_iter(text)
        .map(|m| UrlSpan {
            start: m.start(),
            end: m.end(),
            url: m.as_str().to_string(),
        })
        .collect()
}

/// Runs `re` over `text`, keeping captures that end on an ASCII word boundary.
///
/// A capture followed by another word character is rejected and scanning
/// resumes one character past the start of that match.
fn bounded_tokens(re: &Regex, text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    while pos <= text.len() {
        let Some(caps) = re.captures_at(text, pos) else {
            break;
        };
        let (Some(whole), Some(token)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let followed_by_word = text[token.end()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
        if followed_by_word {
            pos = whole.start()
                + text[whole.start()..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
        } else {
            tokens.push(token.as_str().to_string());
            pos = whole.end();
        }
    }
    tokens
}

fn unique(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mention_longer_than_fifteen_characters_is_skipped() {
        assert!(extract_mentions(["@abcdefghijklmnopq"]).is_empty());
        assert_eq!(extract_mentions(["@abcdefghijklmno"]), vec!["@abcdefghijklmno"]);
    }

    #[test]
    fn adjacent_tokens_share_a_separator() {
        assert_eq!(extract_mentions(["@a @b,@c"]), vec!["@a", "@b", "@c"]);
    }

    #[test]
    fn rejected_token_does_not_hide_a_later_one() {
        assert_eq!(
            extract_mentions(["@abcdefghijklmnopq_@ok"]),
            vec!["@ok"]
        );
    }
}
