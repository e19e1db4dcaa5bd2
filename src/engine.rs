//! Tracked browser engines
//!
//! Each engine is tracked through a desktop browser and its mobile
//! counterpart, using the browser identifiers of browser-compat-data.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A browser engine tracked by the feature tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Chrome,
    Firefox,
    Safari,
}

/// Which half of an engine a support record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Desktop,
    Mobile,
}

impl Engine {
    /// All tracked engines, in display order
    pub const ALL: [Engine; 3] = [Engine::Chrome, Engine::Firefox, Engine::Safari];

    /// Short lowercase name, also used in query strings
    pub fn as_str(self) -> &'static str {
        match self {
            Engine::Chrome => "chrome",
            Engine::Firefox => "firefox",
            Engine::Safari => "safari",
        }
    }

    /// BCD browser id of the desktop browser
    pub fn desktop_browser(self) -> &'static str {
        self.as_str()
    }

    /// BCD browser id of the mobile browser
    pub fn mobile_browser(self) -> &'static str {
        match self {
            Engine::Chrome => "chrome_android",
            Engine::Firefox => "firefox_android",
            Engine::Safari => "safari_ios",
        }
    }

    /// BCD browser id for one facet of this engine
    pub fn browser_for(self, facet: Facet) -> &'static str {
        match facet {
            Facet::Desktop => self.desktop_browser(),
            Facet::Mobile => self.mobile_browser(),
        }
    }
}

impl Facet {
    pub const BOTH: [Facet; 2] = [Facet::Desktop, Facet::Mobile];
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Engine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chrome" => Ok(Engine::Chrome),
            "firefox" => Ok(Engine::Firefox),
            "safari" => Ok(Engine::Safari),
            other => Err(format!("unknown engine: {}", other)),
        }
    }
}
