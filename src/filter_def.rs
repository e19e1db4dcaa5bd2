//! Filter definitions
//!
//! Plain-data descriptions of the available filters, and the query pipeline
//! that applies them: the selected filter first, then the title filter when
//! a title phrase is given. Each pass works on a fresh copy of the tree.

use crate::engine::Engine;
use crate::feature::FeatureTree;
use crate::predicates::{
    ApproachingBaselineFilter, EngineSupportFilter, FeatureFilter, NewlyBaselineFilter,
    TitleFilter, VersionSupportFilter,
};
use crate::release::ReleaseCatalogue;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Version used by the default version filter
pub const DEFAULT_VERSION: &str = "142";

/// Kind of filter, as named in query strings and on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKind {
    EngineSupport,
    VersionSupport,
    ApproachingBaseline,
    NewlyBaseline,
}

impl FilterKind {
    pub const ALL: [FilterKind; 4] = [
        FilterKind::EngineSupport,
        FilterKind::VersionSupport,
        FilterKind::ApproachingBaseline,
        FilterKind::NewlyBaseline,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterKind::EngineSupport => "engine-support",
            FilterKind::VersionSupport => "version-support",
            FilterKind::ApproachingBaseline => "approaching-baseline",
            FilterKind::NewlyBaseline => "newly-baseline",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown filter type: {}", s))
    }
}

/// A configured filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "options", rename_all = "kebab-case")]
pub enum FilterDef {
    EngineSupport(EngineSupportFilter),
    VersionSupport(VersionSupportFilter),
    ApproachingBaseline,
    NewlyBaseline,
}

impl Default for FilterDef {
    fn default() -> Self {
        FilterDef::default_for(FilterKind::EngineSupport)
    }
}

impl FilterDef {
    /// Default configuration of a filter kind
    pub fn default_for(kind: FilterKind) -> Self {
        match kind {
            FilterKind::EngineSupport => FilterDef::EngineSupport(EngineSupportFilter::default()),
            FilterKind::VersionSupport => {
                FilterDef::VersionSupport(VersionSupportFilter::new(Engine::Firefox, DEFAULT_VERSION))
            }
            FilterKind::ApproachingBaseline => FilterDef::ApproachingBaseline,
            FilterKind::NewlyBaseline => FilterDef::NewlyBaseline,
        }
    }

    pub fn kind(&self) -> FilterKind {
        match self {
            FilterDef::EngineSupport(_) => FilterKind::EngineSupport,
            FilterDef::VersionSupport(_) => FilterKind::VersionSupport,
            FilterDef::ApproachingBaseline => FilterKind::ApproachingBaseline,
            FilterDef::NewlyBaseline => FilterKind::NewlyBaseline,
        }
    }

    /// Whether building this filter needs browser release data
    pub fn needs_releases(&self) -> bool {
        matches!(self, FilterDef::ApproachingBaseline | FilterDef::NewlyBaseline)
    }

    /// Build the predicate this definition describes
    pub fn build(&self, releases: &ReleaseCatalogue) -> Box<dyn FeatureFilter> {
        match self {
            FilterDef::EngineSupport(filter) => Box::new(*filter),
            FilterDef::VersionSupport(filter) => Box::new(filter.clone()),
            FilterDef::ApproachingBaseline => {
                Box::new(ApproachingBaselineFilter::new(releases.clone()))
            }
            FilterDef::NewlyBaseline => Box::new(NewlyBaselineFilter::new(releases.clone())),
        }
    }
}

/// Apply a filter definition and an optional title phrase to a tree
///
/// The source tree is left untouched. A blank title skips the title pass.
pub fn run_query(
    tree: &FeatureTree,
    filter: &FilterDef,
    title: &str,
    releases: &ReleaseCatalogue,
) -> FeatureTree {
    let predicate = filter.build(releases);
    let filtered = tree.filtered(predicate.as_ref());

    let title = TitleFilter::new(title);
    if title.is_empty() {
        return filtered;
    }
    filtered.filtered(&title)
}
