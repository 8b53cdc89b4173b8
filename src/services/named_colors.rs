//! Process-wide table of named colors.
//!
//! Built once at startup by [`NamedColorTable::load`] and shared read-only
//! afterwards. The table is handed to every consumer explicitly, there is no
//! global instance.

use std::collections::HashMap;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{info, warn};

use crate::models::Rgb8;
use crate::services::palette::BUILT_IN_COLORS;

/// Why the remote name table could not be used
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("malformed payload: {0}")]
    Malformed(String),
    #[error("payload contained no colors")]
    Empty,
}

/// Where the table contents came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSource {
    Remote,
    BuiltIn,
}

impl TableSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableSource::Remote => "remote",
            TableSource::BuiltIn => "built-in",
        }
    }
}

#[derive(Debug, Deserialize)]
struct ColorNamesDocument {
    colors: Vec<ColorNameEntry>,
}

#[derive(Debug, Deserialize)]
struct ColorNameEntry {
    name: String,
    r: u8,
    g: u8,
    b: u8,
}

#[derive(Debug, Clone)]
pub struct NamedColorTable {
    colors: HashMap<String, Rgb8>,
    source: TableSource,
}

/// Canonical table key: all whitespace removed, upper-cased
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

impl NamedColorTable {
    /// Fetch the remote name table, falling back to the built-in palette on
    /// any failure. Never fails.
    pub async fn load(client: &Client, url: &str) -> Self {
        info!(url, "Loading predefined colors");
        match Self::fetch_remote(client, url).await {
            Ok(table) => {
                info!(count = table.len(), "Loaded predefined colors");
                table
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch predefined colors, using built-in colors");
                let table = Self::built_in();
                info!(count = table.len(), "Loaded predefined colors");
                table
            }
        }
    }

    async fn fetch_remote(client: &Client, url: &str) -> Result<Self, TableError> {
        let res = client.get(url).send().await?;
        if !res.status().is_success() {
            return Err(TableError::Status(res.status()));
        }

        let body = res.bytes().await?;
        let document: ColorNamesDocument =
            serde_json::from_slice(&body).map_err(|e| TableError::Malformed(e.to_string()))?;

        let table = Self::from_entries(
            document
                .colors
                .into_iter()
                .map(|c| (c.name, Rgb8(c.r, c.g, c.b))),
            TableSource::Remote,
        );
        if table.is_empty() {
            return Err(TableError::Empty);
        }
        Ok(table)
    }

    /// Build a table from `(name, rgb)` pairs. Names that normalize to the
    /// same key overwrite each other, last one wins. Blank names are skipped.
    pub fn from_entries<I, S>(entries: I, source: TableSource) -> Self
    where
        I: IntoIterator<Item = (S, Rgb8)>,
        S: AsRef<str>,
    {
        let colors = entries
            .into_iter()
            .map(|(name, rgb)| (normalize_name(name.as_ref()), rgb))
            .filter(|(key, _)| !key.is_empty())
            .collect();
        Self { colors, source }
    }

    pub fn built_in() -> Self {
        Self::from_entries(
            BUILT_IN_COLORS
                .iter()
                .map(|&(name, r, g, b)| (name, Rgb8(r, g, b))),
            TableSource::BuiltIn,
        )
    }

    pub fn lookup(&self, name: &str) -> Option<Rgb8> {
        self.colors.get(&normalize_name(name)).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.colors.contains_key(&normalize_name(name))
    }

    pub fn source(&self) -> TableSource {
        self.source
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
