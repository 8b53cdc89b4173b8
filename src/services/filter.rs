//! Filtering of user-supplied expressions before they are rendered.
//!
//! The filter is a capability picked at startup: without configured
//! patterns every expression passes.

use std::sync::Arc;

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::config::ConfigError;

pub trait ContentFilter: Send + Sync {
    fn contains_filtered_expression(&self, input: &str) -> bool;
}

/// Lets everything through
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFilter;

impl ContentFilter for NoFilter {
    fn contains_filtered_expression(&self, _input: &str) -> bool {
        false
    }
}

/// Matches any of a list of case-insensitive patterns
#[derive(Debug, Clone)]
pub struct PatternFilter {
    patterns: Vec<Regex>,
}

impl PatternFilter {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ConfigError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                RegexBuilder::new(p.as_ref())
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| ConfigError::InvalidPattern {
                        pattern: p.as_ref().to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }
}

impl ContentFilter for PatternFilter {
    fn contains_filtered_expression(&self, input: &str) -> bool {
        let hit = self.patterns.iter().find(|re| re.is_match(input));
        if let Some(re) = hit {
            debug!(pattern = re.as_str(), "Expression matched filter");
        }
        hit.is_some()
    }
}

/// `PatternFilter` when patterns are configured, `NoFilter` otherwise
pub fn from_patterns(patterns: &[String]) -> Result<Arc<dyn ContentFilter>, ConfigError> {
    if patterns.is_empty() {
        Ok(Arc::new(NoFilter))
    } else {
        Ok(Arc::new(PatternFilter::new(patterns)?))
    }
}
