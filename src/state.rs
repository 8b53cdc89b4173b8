use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::{Config, ConfigError};
use crate::services::code_format::{BraceFormatter, PrettyPrinter};
use crate::services::color_api::ColorInfoClient;
use crate::services::filter::{self, ContentFilter};
use crate::services::latex::LatexService;
use crate::services::named_colors::NamedColorTable;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct AppState {
    pub colors: Arc<NamedColorTable>,
    pub color_api: ColorInfoClient,
    pub latex: LatexService,
    pub filter: Arc<dyn ContentFilter>,
    pub formatter: Arc<dyn PrettyPrinter>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Build every service from `config`.
    ///
    /// Resolves only once the named color table is fully loaded, so nothing
    /// served from this state can see a partial table.
    pub async fn initialize(config: &Config) -> Result<Self, StartupError> {
        let client = config.http_client()?;
        let filter = filter::from_patterns(&config.filter_patterns)?;
        let colors = NamedColorTable::load(&client, &config.color_names_url).await;

        Ok(Self {
            colors: Arc::new(colors),
            color_api: ColorInfoClient::new(client.clone(), config.color_api_url.clone()),
            latex: LatexService::new(
                client,
                config.tex_renderer_url.clone(),
                config.tex_preamble.clone(),
            ),
            filter,
            formatter: Arc::new(BraceFormatter),
            started_at: Utc::now(),
        })
    }
}
