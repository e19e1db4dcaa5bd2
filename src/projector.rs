//! Tree projector
//!
//! Converts a raw compat-data document into a [`FeatureTree`]. Only the
//! allow-listed top-level categories are visited. Deprecated features are
//! dropped together with their whole subtree, and nodes that end up with
//! neither details nor subfeatures are not kept.

use crate::compat_data::{
    CompatData, CompatStatement, OneOrMany, SimpleSupportStatement, VersionValue, COMPAT_KEY,
};
use crate::engine::Engine;
use crate::feature::{
    EngineSupport, FeatureDetails, FeatureNode, FeatureTree, SupportData, SupportStatement,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, trace};

/// Top-level categories projected by default
pub const DEFAULT_CATEGORIES: [&str; 9] = [
    "api",
    "css",
    "html",
    "http",
    "javascript",
    "mathml",
    "svg",
    "manifests",
    "webassembly",
];

/// Token reported when support is known but the version is not
pub const UNKNOWN_VERSION_TOKEN: &str = "?";

/// Structural errors in the compat-data document
#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("Feature not found: {0}")]
    MissingCategory(String),

    #[error("Feature {path} is not an object")]
    NotAnObject { path: String },

    #[error("Malformed compat statement at {path}: {source}")]
    MalformedStatement {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Project the default categories of a document
pub fn project(data: &CompatData) -> Result<FeatureTree, ProjectError> {
    project_categories(data, &DEFAULT_CATEGORIES)
}

/// Project the given top-level categories of a document
///
/// Categories are emitted in the order given. Every listed category must be
/// present in the document.
pub fn project_categories<S: AsRef<str>>(
    data: &CompatData,
    categories: &[S],
) -> Result<FeatureTree, ProjectError> {
    let mut subfeatures = Vec::with_capacity(categories.len());

    for category in categories {
        let category = category.as_ref();
        let value = data
            .root
            .get(category)
            .ok_or_else(|| ProjectError::MissingCategory(category.to_string()))?;

        match project_feature(category, value, category)? {
            Some(node) => {
                debug!(category, nodes = node.node_count(), "projected category");
                subfeatures.push(node);
            }
            None => debug!(category, "category has no retained features"),
        }
    }

    Ok(FeatureTree::new(subfeatures))
}

fn project_feature(
    id: &str,
    value: &Value,
    path: &str,
) -> Result<Option<FeatureNode>, ProjectError> {
    let Value::Object(feature) = value else {
        return Err(ProjectError::NotAnObject {
            path: path.to_string(),
        });
    };

    let statement = compat_statement(feature, path)?;
    if statement.as_ref().is_some_and(CompatStatement::is_deprecated) {
        trace!(path, "dropping deprecated feature");
        return Ok(None);
    }

    let mut subfeatures = Vec::new();
    for (key, child) in feature {
        if key == COMPAT_KEY {
            continue;
        }
        let child_path = format!("{}.{}", path, key);
        if let Some(node) = project_feature(key, child, &child_path)? {
            subfeatures.push(node);
        }
    }

    let details = statement.map(|statement| feature_details(id, statement));
    if details.is_none() && subfeatures.is_empty() {
        return Ok(None);
    }

    Ok(Some(FeatureNode {
        id: id.to_string(),
        subfeatures,
        details,
    }))
}

fn compat_statement(
    feature: &Map<String, Value>,
    path: &str,
) -> Result<Option<CompatStatement>, ProjectError> {
    feature
        .get(COMPAT_KEY)
        .map(|value| {
            CompatStatement::deserialize(value).map_err(|source| ProjectError::MalformedStatement {
                path: path.to_string(),
                source,
            })
        })
        .transpose()
}

fn feature_details(id: &str, statement: CompatStatement) -> FeatureDetails {
    let support = support_data(&statement);

    FeatureDetails {
        name: statement.description.unwrap_or_else(|| id.to_string()),
        mdn_url: statement.mdn_url.unwrap_or_default(),
        spec_urls: statement.spec_url.map(OneOrMany::into_vec).unwrap_or_default(),
        support,
    }
}

/// Summarise the support of every tracked engine
pub fn support_data(statement: &CompatStatement) -> SupportData {
    let mut support = SupportData::default();

    for engine in Engine::ALL {
        *support.get_mut(engine) = EngineSupport {
            desktop: support_statement(statement.primary_support(engine.desktop_browser())),
            mobile: support_statement(statement.primary_support(engine.mobile_browser())),
        };
    }

    support
}

/// Summarise one browser's most relevant support entry
///
/// Missing entries are unsupported. A removed feature is unsupported. A
/// flag-gated entry keeps its version token and is marked `flagged`.
pub fn support_statement(entry: Option<&SimpleSupportStatement>) -> SupportStatement {
    let Some(entry) = entry else {
        return SupportStatement::default();
    };

    let removed = entry.version_removed.as_ref().is_some_and(VersionValue::is_set);
    let supported = match &entry.version_added {
        _ if removed => String::new(),
        Some(VersionValue::Version(version)) => version.clone(),
        Some(VersionValue::Known(true)) => UNKNOWN_VERSION_TOKEN.to_string(),
        Some(VersionValue::Known(false)) | None => String::new(),
    };

    SupportStatement {
        supported,
        flagged: !entry.flags.is_empty(),
        partial: entry.partial_implementation,
        notes: entry.notes.clone().map(OneOrMany::into_vec).unwrap_or_default(),
        links: entry.impl_url.clone().map(OneOrMany::into_vec).unwrap_or_default(),
    }
}
