//! Raw browser-compat-data document model
//!
//! The document is a tree of identifier objects. Every identifier may carry a
//! compatibility statement under the reserved `__compat` key; every other key
//! is a nested identifier. Only the fields this crate reads are modelled, and
//! every one of them is optional so that any subset of the documented fields
//! may be absent.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Reserved key holding an identifier's compatibility statement
pub const COMPAT_KEY: &str = "__compat";

/// Errors raised while loading a compat-data document
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Compat data file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid compat data JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Compat data document must be a JSON object")]
    NotAnObject,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A loaded compat-data document
#[derive(Debug, Clone)]
pub struct CompatData {
    /// Browser release catalogue (the `browsers` section)
    pub browsers: HashMap<String, BrowserStatement>,

    /// The whole document, in document order
    pub root: Map<String, Value>,
}

impl CompatData {
    /// Load a document from a JSON file, or from stdin when `path` is `-`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let path = path.as_ref();

        if path.as_os_str() == "-" {
            return Self::from_reader(std::io::stdin().lock());
        }

        if !path.exists() {
            return Err(DataError::FileNotFound(path.display().to_string()));
        }

        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Load a document from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(value)
    }

    /// Parse a document from a JSON string
    pub fn from_json_str(contents: &str) -> Result<Self, DataError> {
        let value: Value = serde_json::from_str(contents)?;
        Self::from_value(value)
    }

    /// Build a document from an already parsed JSON value
    pub fn from_value(value: Value) -> Result<Self, DataError> {
        let Value::Object(root) = value else {
            return Err(DataError::NotAnObject);
        };

        let browsers = match root.get("browsers") {
            Some(section) => HashMap::<String, BrowserStatement>::deserialize(section)?,
            None => {
                tracing::debug!("compat data has no browsers section");
                HashMap::new()
            }
        };

        Ok(Self { browsers, root })
    }
}

/// Either a single value or an array of values
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    /// The first (most relevant) value, if any
    pub fn first(&self) -> Option<&T> {
        match self {
            OneOrMany::One(value) => Some(value),
            OneOrMany::Many(values) => values.first(),
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

/// Compatibility statement of one feature
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompatStatement {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub mdn_url: Option<String>,

    #[serde(default)]
    pub spec_url: Option<OneOrMany<String>>,

    /// Support per BCD browser id
    #[serde(default)]
    pub support: HashMap<String, OneOrMany<SimpleSupportStatement>>,

    #[serde(default)]
    pub status: Option<StatusBlock>,
}

impl CompatStatement {
    /// Whether the feature is marked deprecated
    pub fn is_deprecated(&self) -> bool {
        self.status.as_ref().is_some_and(|s| s.deprecated)
    }

    /// Most relevant support entry for a browser (first entry of an array)
    pub fn primary_support(&self, browser: &str) -> Option<&SimpleSupportStatement> {
        self.support.get(browser).and_then(OneOrMany::first)
    }
}

/// Standardisation status of a feature
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusBlock {
    #[serde(default)]
    pub experimental: bool,

    #[serde(default)]
    pub standard_track: bool,

    #[serde(default)]
    pub deprecated: bool,
}

/// A `version_added` / `version_removed` value: a version string or a boolean
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum VersionValue {
    Known(bool),
    Version(String),
}

impl VersionValue {
    /// Truthiness of the value (`false` and `""` are falsy)
    pub fn is_set(&self) -> bool {
        match self {
            VersionValue::Known(flag) => *flag,
            VersionValue::Version(version) => !version.is_empty(),
        }
    }
}

/// One support entry of a browser
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimpleSupportStatement {
    #[serde(default)]
    pub version_added: Option<VersionValue>,

    #[serde(default)]
    pub version_removed: Option<VersionValue>,

    #[serde(default)]
    pub flags: Vec<FlagStatement>,

    #[serde(default)]
    pub partial_implementation: bool,

    #[serde(default)]
    pub notes: Option<OneOrMany<String>>,

    #[serde(default)]
    pub impl_url: Option<OneOrMany<String>>,

    #[serde(default)]
    pub prefix: Option<String>,

    #[serde(default)]
    pub alternative_name: Option<String>,
}

/// A flag that must be set for a support entry to apply
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlagStatement {
    #[serde(default, rename = "type")]
    pub flag_type: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub value_to_set: Option<String>,
}

/// Release channel of a browser version
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseStatus {
    Retired,
    Current,
    Exclusive,
    Beta,
    Nightly,
    Esr,
    Planned,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ReleaseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReleaseStatus::Retired => "retired",
            ReleaseStatus::Current => "current",
            ReleaseStatus::Exclusive => "exclusive",
            ReleaseStatus::Beta => "beta",
            ReleaseStatus::Nightly => "nightly",
            ReleaseStatus::Esr => "esr",
            ReleaseStatus::Planned => "planned",
            ReleaseStatus::Unknown => "unknown",
        }
    }
}

/// One release of a browser
#[derive(Debug, Clone, PartialEq)]
pub struct Release {
    pub version: String,
    pub status: ReleaseStatus,
    pub release_date: Option<String>,
}

#[derive(Deserialize)]
struct ReleaseStatement {
    #[serde(default)]
    status: ReleaseStatus,
    #[serde(default)]
    release_date: Option<String>,
}

/// Entry of the `browsers` section
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserStatement {
    #[serde(default)]
    pub name: String,

    /// Releases in document order (oldest first in published data)
    #[serde(default, deserialize_with = "ordered_releases")]
    pub releases: Vec<Release>,
}

fn ordered_releases<'de, D>(deserializer: D) -> Result<Vec<Release>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ReleasesVisitor;

    impl<'de> Visitor<'de> for ReleasesVisitor {
        type Value = Vec<Release>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of version to release statement")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut releases = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((version, statement)) = map.next_entry::<String, ReleaseStatement>()? {
                releases.push(Release {
                    version,
                    status: statement.status,
                    release_date: statement.release_date,
                });
            }
            Ok(releases)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(ReleasesVisitor)
}
