use crate::models::ColorError;
use crate::services::named_colors::NamedColorTable;
use crate::services::notation::Notation;

/// Response encoding requested from the color API
pub const RESPONSE_FORMAT: &str = "json";

/// Canonical parameter set for one color API request.
///
/// Always `format` plus exactly one color key. Fields are private so a
/// query cannot change after [`normalize`] builds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorQuery {
    format: &'static str,
    key: &'static str,
    value: String,
}

impl ColorQuery {
    pub fn format(&self) -> &str {
        self.format
    }

    /// One of `hex`, `rgb`, `hsl` or `cmyk`
    pub fn key(&self) -> &str {
        self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Query-string pairs in request order
    pub fn pairs(&self) -> [(&str, &str); 2] {
        [("format", self.format), (self.key, &self.value)]
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }
}

/// Turn classified input into a query for the color API.
///
/// Hex drops a leading `#` and keeps its case, the functional notations go
/// through untouched, and names are resolved to upper-case `RRGGBB`.
pub fn normalize(
    input: &str,
    notation: Notation,
    table: &NamedColorTable,
) -> Result<ColorQuery, ColorError> {
    let value = match notation {
        Notation::Hex => input.strip_prefix('#').unwrap_or(input).to_string(),
        Notation::Rgb | Notation::Hsl | Notation::Cmyk => input.to_string(),
        Notation::Named => table
            .lookup(input)
            .ok_or_else(|| ColorError::UnknownColorName(input.to_string()))?
            .to_hex(),
        Notation::Invalid => return Err(ColorError::InvalidInput),
    };
    let key = notation.query_key().ok_or(ColorError::InvalidInput)?;

    Ok(ColorQuery {
        format: RESPONSE_FORMAT,
        key,
        value,
    })
}
