//! CLI argument parsing for bcd-query

use crate::engine::Engine;
use crate::filter_def::{FilterDef, FilterKind};
use crate::predicates::{SupportStatus, VersionSupportFilter};
use crate::query_state::QueryState;
use crate::release::ReleaseCatalogue;
use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

/// Output format for the filtered feature tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented tree with per-engine support (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format, one row per matched feature
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "bcd-query")]
#[command(version)]
#[command(about = "Query browser-compat-data by engine support and baseline status", long_about = None)]
pub struct Cli {
    /// Path to the browser-compat-data JSON document ("-" for stdin)
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Filter to apply
    #[arg(short = 't', long = "filter-type", value_enum, value_name = "TYPE")]
    pub filter_type: Option<FilterKind>,

    /// Required Chrome support (engine-support filter)
    #[arg(long, value_enum, value_name = "STATUS")]
    pub chrome: Option<SupportStatus>,

    /// Required Firefox support (engine-support filter)
    #[arg(long, value_enum, value_name = "STATUS")]
    pub firefox: Option<SupportStatus>,

    /// Required Safari support (engine-support filter)
    #[arg(long, value_enum, value_name = "STATUS")]
    pub safari: Option<SupportStatus>,

    /// Engine to check (version-support filter)
    #[arg(short = 'b', long = "browser", value_enum, value_name = "ENGINE")]
    pub browser: Option<Engine>,

    /// Exact version token to look for (version-support filter, defaults to
    /// the browser's current release)
    #[arg(short = 'r', long = "release", value_name = "VERSION")]
    pub release: Option<String>,

    /// Only keep features whose name contains every word of this phrase
    #[arg(long, value_name = "PHRASE")]
    pub title: Option<String>,

    /// Filter state as a query string (e.g. "filterType=newly-baseline")
    #[arg(short = 'q', long = "query", value_name = "QUERY")]
    pub query: Option<String>,

    /// Output format
    #[arg(long = "format", value_enum)]
    pub format: Option<OutputFormat>,

    /// Configuration file (TOML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Top-level categories to project (comma-separated)
    #[arg(long, value_delimiter = ',', value_name = "CATEGORIES")]
    pub categories: Option<Vec<String>>,

    /// Print the current/beta/nightly/planned versions of each browser
    #[arg(long = "show-versions")]
    pub show_versions: bool,

    /// Print the effective filter state as a query string
    #[arg(long = "print-query")]
    pub print_query: bool,

    /// Enable debug tracing output (to stderr)
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Merge the filter flags into a base state (from config or defaults)
    ///
    /// `--query` replaces the base state, `--filter-type` switches to that
    /// filter's defaults, then per-filter flags and `--title` apply.
    pub fn resolve_query(&self, base: QueryState, releases: &ReleaseCatalogue) -> Result<QueryState> {
        let mut state = match &self.query {
            Some(query) => QueryState::from_query_str(query)?,
            None => base,
        };

        if let Some(kind) = self.filter_type {
            if state.filter.kind() != kind {
                state.filter = FilterDef::default_for(kind);
            }
        }

        let engine_flags = [
            (Engine::Chrome, self.chrome),
            (Engine::Firefox, self.firefox),
            (Engine::Safari, self.safari),
        ];
        let has_engine_flags = engine_flags.iter().any(|(_, status)| status.is_some());
        let has_version_flags = self.browser.is_some() || self.release.is_some();

        let kind = state.filter.kind();
        match &mut state.filter {
            FilterDef::EngineSupport(filter) => {
                if has_version_flags {
                    bail!("--browser/--release only apply to the version-support filter");
                }
                for (engine, status) in engine_flags {
                    if let Some(status) = status {
                        filter.set_status(engine, status);
                    }
                }
            }
            FilterDef::VersionSupport(filter) => {
                if has_engine_flags {
                    bail!("--chrome/--firefox/--safari only apply to the engine-support filter");
                }
                *filter = self.version_filter(filter, releases);
            }
            FilterDef::ApproachingBaseline | FilterDef::NewlyBaseline => {
                if has_engine_flags || has_version_flags {
                    bail!("the {} filter takes no engine or version options", kind);
                }
            }
        }

        if let Some(title) = &self.title {
            state.title = title.clone();
        }

        Ok(state)
    }

    fn version_filter(
        &self,
        current: &VersionSupportFilter,
        releases: &ReleaseCatalogue,
    ) -> VersionSupportFilter {
        let engine = self.browser.unwrap_or(current.engine);
        let version = match (&self.release, self.browser) {
            (Some(release), _) => release.clone(),
            // Switching browser picks its current release, as the version list changes
            (None, Some(engine)) if engine != current.engine => releases
                .current_release(engine.desktop_browser())
                .map(str::to_string)
                .unwrap_or_else(|| current.version.clone()),
            (None, _) => current.version.clone(),
        };
        VersionSupportFilter::new(engine, version)
    }
}
