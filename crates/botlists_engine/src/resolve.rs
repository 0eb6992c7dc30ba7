use std::time::Duration;

use crate::{FailureKind, ResolveError};

#[derive(Debug, Clone)]
pub struct ResolveSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
}

impl Default for ResolveSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 10,
        }
    }
}

/// Expands a possibly shortened URL to the destination it redirects to.
#[async_trait::async_trait]
pub trait LinkResolver: Send + Sync {
    async fn expand(&self, url: &str) -> Result<String, ResolveError>;
}

/// Follows redirects over HTTP and reports the URL of the final response.
///
/// The response status is not inspected: a 404 at the end of a redirect
/// chain still tells us where the link points.
#[derive(Debug, Clone)]
pub struct ReqwestLinkResolver {
    client: reqwest::Client,
}

impl ReqwestLinkResolver {
    pub fn new(settings: ResolveSettings) -> Result<Self, ResolveError> {
        let redirect_limit = settings.redirect_limit;
        let policy = reqwest::redirect::Policy::custom(move |attempt| {
            if attempt.previous().len() >= redirect_limit {
                attempt.error("redirect limit exceeded")
            } else {
                attempt.follow()
            }
        });

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(policy)
            .build()
            .map_err(|err| ResolveError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl LinkResolver for ReqwestLinkResolver {
    async fn expand(&self, url: &str) -> Result<String, ResolveError> {
        let parsed = url::Url::parse(url)
            .map_err(|err| ResolveError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ResolveError::new(
                FailureKind::InvalidUrl,
                format!("unsupported scheme {}", parsed.scheme()),
            ));
        }

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Ok(response.url().to_string())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ResolveError {
    if err.is_timeout() {
        return ResolveError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return ResolveError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    ResolveError::new(FailureKind::Network, err.to_string())
}
