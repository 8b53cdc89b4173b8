use std::net::SocketAddr;
use std::time::Duration;

use reqwest::Client;

pub const DEFAULT_COLOR_API_URL: &str = "https://www.thecolorapi.com/id";
pub const DEFAULT_COLOR_NAMES_URL: &str =
    "https://raw.githubusercontent.com/joshbeckman/thecolorapi/refs/heads/master/static/colorNames.json";
pub const DEFAULT_TEX_RENDERER_URL: &str = "https://latex.codecogs.com/png.image";
pub const DEFAULT_TEX_PREAMBLE: &str = r"\dpi{200}\bg{black}\fg{white}";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("Invalid filter pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub color_api_url: String,
    pub color_names_url: String,
    pub tex_renderer_url: String,
    pub tex_preamble: String,
    pub http_timeout: Duration,
    /// Empty means no content filter
    pub filter_patterns: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            color_api_url: DEFAULT_COLOR_API_URL.into(),
            color_names_url: DEFAULT_COLOR_NAMES_URL.into(),
            tex_renderer_url: DEFAULT_TEX_RENDERER_URL.into(),
            tex_preamble: DEFAULT_TEX_PREAMBLE.into(),
            http_timeout: Duration::from_secs(10),
            filter_patterns: Vec::new(),
        }
    }
}

impl Config {
    /// Read settings from the process environment (after `.env` is loaded)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup("PENCIL_BIND_ADDR") {
            config.bind_addr = addr.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PENCIL_BIND_ADDR",
                value: addr.clone(),
            })?;
        }
        if let Some(url) = lookup("PENCIL_COLOR_API_URL") {
            config.color_api_url = url;
        }
        if let Some(url) = lookup("PENCIL_COLOR_NAMES_URL") {
            config.color_names_url = url;
        }
        if let Some(url) = lookup("PENCIL_TEX_RENDERER_URL") {
            config.tex_renderer_url = url;
        }
        if let Some(preamble) = lookup("PENCIL_TEX_PREAMBLE") {
            config.tex_preamble = preamble;
        }
        if let Some(secs) = lookup("PENCIL_HTTP_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .ok()
                .filter(|&s| s > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    key: "PENCIL_HTTP_TIMEOUT_SECS",
                    value: secs.clone(),
                })?;
            config.http_timeout = Duration::from_secs(secs);
        }
        if let Some(patterns) = lookup("PENCIL_FILTER_PATTERNS") {
            config.filter_patterns = patterns
                .split(';')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect();
        }

        Ok(config)
    }

    /// Shared client for every outbound call, bounded by `http_timeout`
    pub fn http_client(&self) -> reqwest::Result<Client> {
        Client::builder()
            .timeout(self.http_timeout)
            .user_agent(concat!("pencil/", env!("CARGO_PKG_VERSION")))
            .build()
    }
}
