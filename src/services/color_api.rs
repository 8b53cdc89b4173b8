use reqwest::Client;
use tracing::debug;

use crate::models::ColorInfo;
use crate::services::query::ColorQuery;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("color API request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unexpected color API response: {0}")]
    Decode(String),
}

/// Client for the remote color-information API.
///
/// One request per call: no retries and no caching.
#[derive(Debug, Clone)]
pub struct ColorInfoClient {
    client: Client,
    endpoint: String,
}

impl ColorInfoClient {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn fetch(&self, query: &ColorQuery) -> Result<ColorInfo, FetchError> {
        debug!(endpoint = %self.endpoint, key = query.key(), value = query.value(), "Fetching color information");

        let body = self
            .client
            .get(&self.endpoint)
            .query(&query.pairs())
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        decode(&body)
    }
}

/// Parse a color API body and check the name-match invariant
pub fn decode(body: &[u8]) -> Result<ColorInfo, FetchError> {
    let info: ColorInfo =
        serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    if !info.name.is_consistent() {
        return Err(FetchError::Decode(format!(
            "name distance {} disagrees with exact_match_name={}",
            info.name.distance, info.name.exact_match_name
        )));
    }

    Ok(info)
}
