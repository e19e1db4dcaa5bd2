//! Configuration file for bcd-query
//!
//! # Example bcd-query.toml
//!
//! ```toml
//! # Only look at CSS and JavaScript
//! categories = ["css", "javascript"]
//! format = "json"
//!
//! # Filter state, in the same form as a shared query string
//! query = "filterType=version-support&browser=safari&version=26"
//! title = "grid"
//! ```
//!
//! Command-line flags override values from the file.

use crate::cli::OutputFormat;
use crate::projector::DEFAULT_CATEGORIES;
use crate::query_state::QueryState;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Root configuration of bcd-query.toml
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct QueryConfig {
    /// Top-level categories to project
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// Output format
    #[serde(default)]
    pub format: Option<OutputFormat>,

    /// Filter state as a query string
    #[serde(default)]
    pub query: Option<String>,

    /// Title phrase (overrides `title=` inside `query`)
    #[serde(default)]
    pub title: Option<String>,
}

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            format: None,
            query: None,
            title: None,
        }
    }
}

impl QueryConfig {
    /// Load configuration from a TOML file
    ///
    /// # Example
    ///
    /// ```no_run
    /// use bcd_query::config::QueryConfig;
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = QueryConfig::from_file("bcd-query.toml")?;
    /// println!("Projecting {} categories", config.categories.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: QueryConfig = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            bail!("categories must list at least one top-level category");
        }
        if let Some(query) = &self.query {
            QueryState::from_query_str(query).context("Invalid query in configuration")?;
        }
        Ok(())
    }

    /// Filter state described by this configuration
    pub fn query_state(&self) -> Result<QueryState> {
        let mut state = match &self.query {
            Some(query) => QueryState::from_query_str(query)?,
            None => QueryState::default(),
        };
        if let Some(title) = &self.title {
            state.title = title.clone();
        }
        Ok(state)
    }
}
