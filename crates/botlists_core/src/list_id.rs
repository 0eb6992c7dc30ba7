use std::fmt;
use std::str::FromStr;

const LIST_SEPARATOR: &str = "/lists/";

/// A curated list on the platform, addressed by its owner and slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListId {
    owner: String,
    slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListIdError {
    #[error("list id {0:?} is not of the form owner/lists/slug")]
    Malformed(String),
    #[error("list id {0:?} has an empty owner or slug")]
    Empty(String),
}

impl ListId {
    pub fn new(owner: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            slug: slug.into(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.owner, LIST_SEPARATOR, self.slug)
    }
}

impl FromStr for ListId {
    type Err = ListIdError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let (owner, slug) = trimmed
            .split_once(LIST_SEPARATOR)
            .ok_or_else(|| ListIdError::Malformed(raw.to_string()))?;
        if slug.contains('/') {
            return Err(ListIdError::Malformed(raw.to_string()));
        }
        if owner.is_empty() || slug.is_empty() {
            return Err(ListIdError::Empty(raw.to_string()));
        }
        Ok(Self::new(owner, slug))
    }
}
