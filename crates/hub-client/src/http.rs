//! Bearer-authenticated JSON GETs shared by the adapters.

use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::Url;

use crate::{ApiKey, ProviderError};

/// A reqwest client bound to one provider base URL and credential.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Clone)]
pub struct HttpJsonClient {
    client: reqwest::Client,
    base_url: Url,
    api_key: ApiKey,
}

impl HttpJsonClient {
    pub fn new(api_key: ApiKey, base_url: &str) -> Result<Self, ProviderError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ProviderError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ProviderError::InvalidUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("frame-gate/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append `segments` to the base path and set `query`.
    pub fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, ProviderError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// GET `url` and decode a 2xx body as `T`.
    ///
    /// Non-2xx statuses and undecodable bodies are separate errors so the
    /// logs say which one happened.
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ProviderError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key.expose()))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                error!("Request to {} failed: {}", url, e);
                ProviderError::Request(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Provider returned {} for {}", status, url);
            return Err(ProviderError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| {
            error!("Could not decode response from {}: {}", url, source);
            ProviderError::Decode {
                url: url.to_string(),
                source,
            }
        })
    }
}
