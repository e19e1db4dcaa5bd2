//! Browser release catalogue
//!
//! Classifies version tokens into release channels, using the `browsers`
//! section of the compat-data document.

use crate::compat_data::{BrowserStatement, Release, ReleaseStatus};
use std::collections::HashMap;

/// Version token BCD uses for support in a browser's preview build
pub const PREVIEW_TOKEN: &str = "preview";

/// Channels shown in the browser versions table, in display order
pub const TABLE_CHANNELS: [ReleaseStatus; 4] = [
    ReleaseStatus::Current,
    ReleaseStatus::Beta,
    ReleaseStatus::Nightly,
    ReleaseStatus::Planned,
];

#[derive(Debug, Clone)]
struct BrowserReleases {
    name: String,
    releases: Vec<Release>,
    by_version: HashMap<String, usize>,
}

/// Release channels of every browser, indexed for token lookups
#[derive(Debug, Clone, Default)]
pub struct ReleaseCatalogue {
    browsers: HashMap<String, BrowserReleases>,
}

impl ReleaseCatalogue {
    /// Index the `browsers` section of a document
    pub fn from_browsers(browsers: &HashMap<String, BrowserStatement>) -> Self {
        let browsers = browsers
            .iter()
            .map(|(id, statement)| {
                let by_version = statement
                    .releases
                    .iter()
                    .enumerate()
                    .map(|(i, release)| (release.version.clone(), i))
                    .collect();
                let releases = BrowserReleases {
                    name: statement.name.clone(),
                    releases: statement.releases.clone(),
                    by_version,
                };
                (id.clone(), releases)
            })
            .collect();

        Self { browsers }
    }

    pub fn is_empty(&self) -> bool {
        self.browsers.is_empty()
    }

    /// Display name of a browser (e.g. "Safari on iOS"), if the data names it
    pub fn browser_name(&self, browser: &str) -> Option<&str> {
        self.browsers
            .get(browser)
            .map(|b| b.name.as_str())
            .filter(|name| !name.is_empty())
    }

    /// All releases of a browser in document order
    pub fn releases(&self, browser: &str) -> &[Release] {
        self.browsers
            .get(browser)
            .map(|b| b.releases.as_slice())
            .unwrap_or(&[])
    }

    /// Release channel of a version token
    ///
    /// Ranged tokens such as `≤18` are looked up by their upper bound.
    pub fn status_of(&self, browser: &str, token: &str) -> Option<ReleaseStatus> {
        let browser = self.browsers.get(browser)?;
        let version = token.trim_start_matches('≤');
        browser
            .by_version
            .get(version)
            .map(|&i| browser.releases[i].status)
    }

    /// Whether a supporting token points at a release that has not shipped yet
    pub fn is_pre_stable(&self, browser: &str, token: &str) -> bool {
        if token == PREVIEW_TOKEN {
            return true;
        }
        matches!(
            self.status_of(browser, token),
            Some(ReleaseStatus::Beta | ReleaseStatus::Nightly | ReleaseStatus::Planned)
        )
    }

    /// Whether a supporting token points at a shipped stable release
    pub fn is_shipped(&self, browser: &str, token: &str) -> bool {
        matches!(
            self.status_of(browser, token),
            Some(ReleaseStatus::Current | ReleaseStatus::Esr | ReleaseStatus::Retired)
        )
    }

    /// Latest stable release of a browser (last `current` in document order)
    pub fn current_release(&self, browser: &str) -> Option<&str> {
        self.latest_in(browser, ReleaseStatus::Current)
            .map(|r| r.version.as_str())
    }

    /// Last release of a browser in the given channel
    pub fn latest_in(&self, browser: &str, status: ReleaseStatus) -> Option<&Release> {
        self.releases(browser)
            .iter()
            .rev()
            .find(|release| release.status == status)
    }
}
