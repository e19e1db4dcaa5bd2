//! Feature predicates
//!
//! Each predicate decides whether a feature's details are "of interest".
//! Predicates are pure functions of their configuration and the details
//! they are given.

use crate::engine::Engine;
use crate::feature::{FeatureDetails, SupportData};
use crate::release::ReleaseCatalogue;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A predicate over a feature's details
pub trait FeatureFilter {
    fn matches(&self, details: &FeatureDetails) -> bool;
}

impl<F> FeatureFilter for F
where
    F: Fn(&FeatureDetails) -> bool,
{
    fn matches(&self, details: &FeatureDetails) -> bool {
        self(details)
    }
}

/// Adapts a predicate over the support map alone
#[derive(Debug, Clone, Copy)]
pub struct OnSupport<F>(pub F);

impl<F> FeatureFilter for OnSupport<F>
where
    F: Fn(&SupportData) -> bool,
{
    fn matches(&self, details: &FeatureDetails) -> bool {
        (self.0)(&details.support)
    }
}

/// Requested support state of one engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SupportStatus {
    Supported,
    Unsupported,
    Either,
}

impl SupportStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SupportStatus::Supported => "supported",
            SupportStatus::Unsupported => "unsupported",
            SupportStatus::Either => "either",
        }
    }
}

impl fmt::Display for SupportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SupportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "supported" => Ok(SupportStatus::Supported),
            "unsupported" => Ok(SupportStatus::Unsupported),
            "either" => Ok(SupportStatus::Either),
            other => Err(format!("unknown support status: {}", other)),
        }
    }
}

/// Matches features whose per-engine support agrees with the requested states
///
/// Supported means a non-empty token on desktop or mobile; unsupported means
/// an empty token on both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSupportFilter {
    pub chrome: SupportStatus,
    pub firefox: SupportStatus,
    pub safari: SupportStatus,
}

impl EngineSupportFilter {
    pub fn status(&self, engine: Engine) -> SupportStatus {
        match engine {
            Engine::Chrome => self.chrome,
            Engine::Firefox => self.firefox,
            Engine::Safari => self.safari,
        }
    }

    pub fn set_status(&mut self, engine: Engine, status: SupportStatus) {
        match engine {
            Engine::Chrome => self.chrome = status,
            Engine::Firefox => self.firefox = status,
            Engine::Safari => self.safari = status,
        }
    }

    pub fn matches_support(&self, support: &SupportData) -> bool {
        support.iter().all(|(engine, engine_support)| match self.status(engine) {
            SupportStatus::Supported => engine_support.is_supported(),
            SupportStatus::Unsupported => engine_support.is_unsupported(),
            SupportStatus::Either => true,
        })
    }
}

impl Default for EngineSupportFilter {
    fn default() -> Self {
        Self {
            chrome: SupportStatus::Supported,
            firefox: SupportStatus::Unsupported,
            safari: SupportStatus::Supported,
        }
    }
}

impl FeatureFilter for EngineSupportFilter {
    fn matches(&self, details: &FeatureDetails) -> bool {
        self.matches_support(&details.support)
    }
}

/// Matches features supported since exactly the given version of an engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionSupportFilter {
    pub engine: Engine,
    pub version: String,
}

impl VersionSupportFilter {
    pub fn new(engine: Engine, version: impl Into<String>) -> Self {
        Self {
            engine,
            version: version.into(),
        }
    }
}

impl FeatureFilter for VersionSupportFilter {
    fn matches(&self, details: &FeatureDetails) -> bool {
        let support = details.support.get(self.engine);
        support.desktop.supported == self.version || support.mobile.supported == self.version
    }
}

/// Matches features supported in every engine where at least one supporting
/// version has not reached a stable release yet
#[derive(Debug, Clone)]
pub struct ApproachingBaselineFilter {
    releases: ReleaseCatalogue,
}

impl ApproachingBaselineFilter {
    pub fn new(releases: ReleaseCatalogue) -> Self {
        Self { releases }
    }
}

impl FeatureFilter for ApproachingBaselineFilter {
    fn matches(&self, details: &FeatureDetails) -> bool {
        let support = &details.support;

        if !support.iter().all(|(_, engine_support)| engine_support.is_supported()) {
            return false;
        }

        support.iter().any(|(engine, engine_support)| {
            engine_support.facets().into_iter().any(|(facet, statement)| {
                statement.is_supported()
                    && self
                        .releases
                        .is_pre_stable(engine.browser_for(facet), &statement.supported)
            })
        })
    }
}

/// Matches features that became available in every engine with the latest
/// stable release of at least one of them
#[derive(Debug, Clone)]
pub struct NewlyBaselineFilter {
    releases: ReleaseCatalogue,
}

impl NewlyBaselineFilter {
    pub fn new(releases: ReleaseCatalogue) -> Self {
        Self { releases }
    }
}

impl FeatureFilter for NewlyBaselineFilter {
    fn matches(&self, details: &FeatureDetails) -> bool {
        let support = &details.support;

        let all_shipped = support.iter().all(|(engine, engine_support)| {
            engine_support.facets().into_iter().any(|(facet, statement)| {
                !statement.flagged
                    && self
                        .releases
                        .is_shipped(engine.browser_for(facet), &statement.supported)
            })
        });
        if !all_shipped {
            return false;
        }

        support.iter().any(|(engine, engine_support)| {
            engine_support.facets().into_iter().any(|(facet, statement)| {
                statement.is_supported()
                    && !statement.flagged
                    && self.releases.current_release(engine.browser_for(facet))
                        == Some(statement.supported.as_str())
            })
        })
    }
}

/// Matches features whose display name contains every word of a phrase,
/// ignoring case
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TitleFilter {
    words: Vec<String>,
}

impl TitleFilter {
    pub fn new(phrase: &str) -> Self {
        Self {
            words: phrase
                .to_lowercase()
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        }
    }

    /// An empty phrase matches everything
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl FeatureFilter for TitleFilter {
    fn matches(&self, details: &FeatureDetails) -> bool {
        let name = details.name.to_lowercase();
        self.words.iter().all(|word| name.contains(word.as_str()))
    }
}

/// Supported in Chrome and Safari, but not in Firefox
pub fn only_missing_in_firefox(support: &SupportData) -> bool {
    support.chrome.is_supported() && support.safari.is_supported() && support.firefox.is_unsupported()
}

/// Not supported in Firefox, whatever the other engines do
pub fn missing_in_firefox(support: &SupportData) -> bool {
    support.firefox.is_unsupported()
}

/// Supported in Firefox only
pub fn only_in_firefox(support: &SupportData) -> bool {
    support.chrome.is_unsupported() && support.safari.is_unsupported() && support.firefox.is_supported()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat_data::CompatData;
    use crate::feature::{EngineSupport, SupportStatement};

    fn facet(version: &str) -> SupportStatement {
        SupportStatement::version(version)
    }

    fn engine(desktop: &str, mobile: &str) -> EngineSupport {
        EngineSupport {
            desktop: facet(desktop),
            mobile: facet(mobile),
        }
    }

    fn details(chrome: EngineSupport, firefox: EngineSupport, safari: EngineSupport) -> FeatureDetails {
        FeatureDetails {
            name: "feature".to_string(),
            support: SupportData {
                chrome,
                firefox,
                safari,
            },
            ..FeatureDetails::default()
        }
    }

    fn named(name: &str) -> FeatureDetails {
        FeatureDetails {
            name: name.to_string(),
            ..FeatureDetails::default()
        }
    }

    fn catalogue() -> ReleaseCatalogue {
        let data = CompatData::from_json_str(
            r#"{
                "browsers": {
                    "chrome": { "name": "Chrome", "releases": {
                        "138": { "status": "retired" }, "139": { "status": "current" },
                        "140": { "status": "beta" }, "141": { "status": "nightly" } } },
                    "chrome_android": { "name": "Chrome Android", "releases": {
                        "138": { "status": "retired" }, "139": { "status": "current" } } },
                    "firefox": { "name": "Firefox", "releases": {
                        "141": { "status": "retired" }, "142": { "status": "current" },
                        "143": { "status": "beta" } } },
                    "firefox_android": { "name": "Firefox Android", "releases": {
                        "142": { "status": "current" } } },
                    "safari": { "name": "Safari", "releases": {
                        "18": { "status": "retired" }, "26": { "status": "current" },
                        "26.1": { "status": "beta" } } },
                    "safari_ios": { "name": "Safari iOS", "releases": {
                        "18": { "status": "retired" }, "26": { "status": "current" } } }
                }
            }"#,
        )
        .unwrap();
        ReleaseCatalogue::from_browsers(&data.browsers)
    }

    #[test]
    fn test_engine_support_example() {
        let filter = EngineSupportFilter {
            chrome: SupportStatus::Supported,
            firefox: SupportStatus::Unsupported,
            safari: SupportStatus::Either,
        };
        assert!(filter.matches(&details(engine("10", ""), engine("", ""), engine("", ""))));
        assert!(filter.matches(&details(engine("10", ""), engine("", ""), engine("3", "3"))));
        assert!(!filter.matches(&details(engine("10", ""), engine("", "4"), engine("", ""))));
        assert!(!filter.matches(&details(engine("", ""), engine("", ""), engine("", ""))));
    }

    #[test]
    fn test_engine_support_mobile_only_counts_as_supported() {
        let filter = EngineSupportFilter::default();
        assert!(filter.matches(&details(engine("", "18"), engine("", ""), engine("", "14"))));
    }

    #[test]
    fn test_engine_support_all_either_matches_everything() {
        let filter = EngineSupportFilter {
            chrome: SupportStatus::Either,
            firefox: SupportStatus::Either,
            safari: SupportStatus::Either,
        };
        assert!(filter.matches(&FeatureDetails::default()));
    }

    #[test]
    fn test_version_filter_exact_token() {
        let filter = VersionSupportFilter::new(Engine::Firefox, "142");
        assert!(filter.matches(&details(engine("", ""), engine("142", ""), engine("", ""))));
        assert!(filter.matches(&details(engine("", ""), engine("100", "142"), engine("", ""))));
        assert!(!filter.matches(&details(engine("", ""), engine("142.0", ""), engine("", ""))));
        assert!(!filter.matches(&details(engine("", ""), engine("141", ""), engine("", ""))));
        assert!(!filter.matches(&details(engine("142", ""), engine("", ""), engine("", ""))));
    }

    #[test]
    fn test_title_filter_all_words() {
        let filter = TitleFilter::new("Array includes");
        assert!(filter.matches(&named("Array.prototype.includes")));
        assert!(!filter.matches(&named("Array.prototype.map")));
    }

    #[test]
    fn test_title_filter_case_insensitive() {
        let filter = TitleFilter::new("  ARRAY   Includes ");
        assert!(filter.matches(&named("array.prototype.INCLUDES")));
    }

    #[test]
    fn test_empty_title_matches_everything() {
        let filter = TitleFilter::new("   ");
        assert!(filter.is_empty());
        assert!(filter.matches(&named("")));
        assert!(filter.matches(&named("anything")));
    }

    #[test]
    fn test_newly_baseline_requires_every_engine() {
        let filter = NewlyBaselineFilter::new(catalogue());
        // chrome and firefox at their current release, safari unsupported
        let feature = details(engine("139", ""), engine("142", ""), engine("", ""));
        assert!(!filter.matches(&feature));
    }

    #[test]
    fn test_newly_baseline_matches() {
        let filter = NewlyBaselineFilter::new(catalogue());
        let feature = details(engine("139", "139"), engine("141", "142"), engine("18", "18"));
        assert!(filter.matches(&feature));
    }

    #[test]
    fn test_newly_baseline_needs_a_current_release() {
        let filter = NewlyBaselineFilter::new(catalogue());
        let feature = details(engine("138", ""), engine("141", ""), engine("≤18", ""));
        assert!(!filter.matches(&feature));
    }

    #[test]
    fn test_newly_baseline_rejects_flagged_and_beta() {
        let filter = NewlyBaselineFilter::new(catalogue());

        let mut flagged = details(engine("139", ""), engine("142", ""), engine("26", ""));
        assert!(filter.matches(&flagged));
        flagged.support.firefox.desktop.flagged = true;
        assert!(!filter.matches(&flagged));

        let beta = details(engine("139", ""), engine("143", ""), engine("26", ""));
        assert!(!filter.matches(&beta));
    }

    #[test]
    fn test_newly_baseline_ignores_flagged_current_release() {
        let filter = NewlyBaselineFilter::new(catalogue());

        // only the chrome desktop facet is at a current release, behind a flag
        let mut feature = details(engine("139", "138"), engine("141", ""), engine("18", ""));
        feature.support.chrome.desktop.flagged = true;
        assert!(!filter.matches(&feature));

        feature.support.chrome.desktop.flagged = false;
        assert!(filter.matches(&feature));
    }

    #[test]
    fn test_approaching_baseline() {
        let filter = ApproachingBaselineFilter::new(catalogue());

        let approaching = details(engine("139", ""), engine("143", ""), engine("26", ""));
        assert!(filter.matches(&approaching));

        let preview = details(engine("139", ""), engine("142", ""), engine("preview", ""));
        assert!(filter.matches(&preview));

        let shipped = details(engine("139", ""), engine("142", ""), engine("26", ""));
        assert!(!filter.matches(&shipped));

        let missing = details(engine("140", ""), engine("", ""), engine("26", ""));
        assert!(!filter.matches(&missing));
    }

    #[test]
    fn test_support_presets() {
        let missing = details(engine("1", ""), engine("", ""), engine("", "2")).support;
        assert!(only_missing_in_firefox(&missing));
        assert!(missing_in_firefox(&missing));
        assert!(!only_in_firefox(&missing));

        let firefox_only = details(engine("", ""), engine("", "3"), engine("", "")).support;
        assert!(only_in_firefox(&firefox_only));
        assert!(!missing_in_firefox(&firefox_only));
        assert!(!only_missing_in_firefox(&firefox_only));
    }

    #[test]
    fn test_on_support_adapter_and_closures() {
        let feature = details(engine("1", ""), engine("", ""), engine("2", ""));
        assert!(OnSupport(only_missing_in_firefox).matches(&feature));

        let by_name = |d: &FeatureDetails| d.name == "feature";
        assert!(by_name.matches(&feature));

        let boxed: Box<dyn FeatureFilter> = Box::new(TitleFilter::new("feat"));
        assert!(boxed.as_ref().matches(&feature));
    }

    #[test]
    fn test_support_status_parsing() {
        assert_eq!("either".parse::<SupportStatus>().unwrap(), SupportStatus::Either);
        assert!("maybe".parse::<SupportStatus>().is_err());
    }
}
