//! TeX expression rendering through a remote rasterizer.
//!
//! The renderer answers `GET <endpoint>?<latex>` with a PNG. The configured
//! preamble is prepended to every expression to pick density and colors.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Client;
use tracing::error;

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Everything outside the RFC 3986 unreserved set
const QUERY: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Expression is empty")]
    Empty,
    #[error("Renderer unreachable: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{0}")]
    Rejected(String),
    #[error("Renderer did not return a PNG image")]
    NotPng,
}

#[derive(Debug, Clone)]
pub struct LatexService {
    client: Client,
    endpoint: String,
    preamble: String,
}

impl LatexService {
    pub fn new(client: Client, endpoint: impl Into<String>, preamble: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            preamble: preamble.into(),
        }
    }

    /// Full request URL for `expression`
    pub fn request_url(&self, expression: &str) -> String {
        let latex = format!("{}{}", self.preamble, expression.trim());
        format!("{}?{}", self.endpoint, utf8_percent_encode(&latex, QUERY))
    }

    /// Render `expression` to PNG bytes
    pub async fn render(&self, expression: &str) -> Result<Vec<u8>, RenderError> {
        if expression.trim().is_empty() {
            return Err(RenderError::Empty);
        }

        let result = self.request(expression).await;
        if let Err(e) = &result {
            error!(error = %e, expression, "Error rendering LaTeX");
        }
        result
    }

    async fn request(&self, expression: &str) -> Result<Vec<u8>, RenderError> {
        let res = self.client.get(self.request_url(expression)).send().await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            let message = match text.trim() {
                "" => format!("Renderer returned {status}"),
                body => body.to_string(),
            };
            return Err(RenderError::Rejected(message));
        }

        let bytes = res.bytes().await?;
        if !bytes.starts_with(PNG_SIGNATURE) {
            return Err(RenderError::NotPng);
        }
        Ok(bytes.to_vec())
    }
}
