use botlists_core::ListId;
use botlists_logging::bot_debug;
use serde_json::Value;

use crate::ApiError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.twitter.com/1.1";

/// Parameters of one "list members" call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembersQuery {
    pub list: ListId,
    /// Page size; large enough to return the whole list in one call.
    pub count: u32,
    /// Omit each member's latest post from the payload.
    pub skip_status: bool,
}

/// The remote call the membership fetcher depends on.
///
/// Returns the response body as received; decoding into
/// [`botlists_core::MembersResponse`] is left to the caller.
#[async_trait::async_trait]
pub trait ListMembersApi: Send + Sync {
    async fn list_members(&self, query: &MembersQuery) -> Result<Value, ApiError>;
}

/// Platform REST client authenticated with an app-only bearer token.
pub struct TwitterClient {
    client: reqwest::Client,
    base_url: String,
    bearer_token: String,
}

impl TwitterClient {
    pub fn new(
        base_url: impl Into<String>,
        bearer_token: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            bearer_token: bearer_token.into(),
        })
    }

    fn members_url(&self, query: &MembersQuery) -> Result<url::Url, ApiError> {
        let raw = format!("{}/lists/members.json", self.base_url.trim_end_matches('/'));
        let mut url = url::Url::parse(&raw).map_err(|err| ApiError::InvalidUrl(err.to_string()))?;
        url.query_pairs_mut()
            .append_pair("owner_screen_name", query.list.owner())
            .append_pair("slug", query.list.slug())
            .append_pair("count", &query.count.to_string())
            .append_pair("skip_status", if query.skip_status { "true" } else { "false" });
        Ok(url)
    }
}

#[async_trait::async_trait]
impl ListMembersApi for TwitterClient {
    async fn list_members(&self, query: &MembersQuery) -> Result<Value, ApiError> {
        let url = self.members_url(query)?;
        bot_debug!("GET {}", url);

        let resp = self
            .client
            .get(url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        let raw: Value = serde_json::from_str(&body)?;
        bot_debug!("Received {} bytes of members of {}", body.len(), query.list);
        Ok(raw)
    }
}
