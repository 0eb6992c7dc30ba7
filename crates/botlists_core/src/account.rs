//! Wire shapes of the list-members response.
//!
//! Only the fields the normalizer reads are modelled. Fields the platform
//! sends as `null` or omits altogether fall back to their defaults, so a
//! partially populated record still yields a profile.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MembersResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub users: Vec<RawAccount>,
    #[serde(default)]
    pub next_cursor_str: Option<String>,
    #[serde(default)]
    pub previous_cursor_str: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawAccount {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id_str: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub screen_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile_image_url_https: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub entities: Entities,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub statuses_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub listed_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub followers_count: u64,
}

/// Machine-parsed link objects attached to the profile's free-text fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Entities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<EntitySource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<EntitySource>,
}

impl Entities {
    /// Sources in the order the platform lists them.
    pub fn sources(&self) -> impl Iterator<Item = &EntitySource> {
        self.url.iter().chain(self.description.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntitySource {
    #[serde(default, deserialize_with = "null_as_default")]
    pub urls: Vec<UrlEntity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UrlEntity {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default)]
    pub expanded_url: Option<String>,
    #[serde(default)]
    pub display_url: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
