//! Query-string encoding of filter state
//!
//! Filter selections are shareable as URL query strings such as
//! `filterType=version-support&browser=firefox&version=142&title=array`.
//! Missing keys fall back to the defaults of the selected filter type, and an
//! unknown or missing `filterType` selects the default engine-support filter.

use crate::engine::Engine;
use crate::filter_def::{FilterDef, FilterKind};
use crate::predicates::{EngineSupportFilter, SupportStatus, VersionSupportFilter};
use std::collections::HashMap;
use thiserror::Error;
use url::form_urlencoded;

/// Errors in a query string's values
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueryStateError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Selected filter and title phrase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pub filter: FilterDef,
    pub title: String,
}

impl QueryState {
    pub fn new(filter: FilterDef, title: impl Into<String>) -> Self {
        Self {
            filter,
            title: title.into(),
        }
    }

    /// Parse a query string, with or without a leading `?`
    pub fn from_query_str(query: &str) -> Result<Self, QueryStateError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let params: HashMap<String, String> = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();

        let kind = params
            .get("filterType")
            .and_then(|value| value.parse::<FilterKind>().ok())
            .unwrap_or(FilterKind::EngineSupport);

        let filter = match FilterDef::default_for(kind) {
            FilterDef::EngineSupport(mut filter) => {
                for engine in Engine::ALL {
                    if let Some(status) = param::<SupportStatus>(&params, engine.as_str())? {
                        filter.set_status(engine, status);
                    }
                }
                FilterDef::EngineSupport(filter)
            }
            FilterDef::VersionSupport(default) => {
                let engine = param::<Engine>(&params, "browser")?.unwrap_or(default.engine);
                let version = params
                    .get("version")
                    .filter(|v| !v.is_empty())
                    .cloned()
                    .unwrap_or(default.version);
                FilterDef::VersionSupport(VersionSupportFilter::new(engine, version))
            }
            other => other,
        };

        Ok(Self {
            filter,
            title: params.get("title").cloned().unwrap_or_default(),
        })
    }

    /// Encode as a query string (without the leading `?`)
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.append_pair("filterType", self.filter.kind().as_str());

        match &self.filter {
            FilterDef::EngineSupport(filter) => append_engine_support(&mut serializer, filter),
            FilterDef::VersionSupport(filter) => {
                serializer.append_pair("browser", filter.engine.as_str());
                serializer.append_pair("version", &filter.version);
            }
            FilterDef::ApproachingBaseline | FilterDef::NewlyBaseline => {}
        }

        if !self.title.trim().is_empty() {
            serializer.append_pair("title", &self.title);
        }

        serializer.finish()
    }
}

fn append_engine_support(
    serializer: &mut form_urlencoded::Serializer<'_, String>,
    filter: &EngineSupportFilter,
) {
    for engine in Engine::ALL {
        serializer.append_pair(engine.as_str(), filter.status(engine).as_str());
    }
}

fn param<T: std::str::FromStr>(
    params: &HashMap<String, String>,
    key: &str,
) -> Result<Option<T>, QueryStateError> {
    match params.get(key) {
        None => Ok(None),
        Some(value) if value.is_empty() => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| QueryStateError::InvalidValue {
                key: key.to_string(),
                value: value.clone(),
            }),
    }
}
