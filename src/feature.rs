//! Simplified feature tree
//!
//! The projected form of a compat-data document: one node per feature,
//! carrying a support summary for each tracked engine.

use crate::engine::{Engine, Facet};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Support of one facet (desktop or mobile browser) of an engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportStatement {
    /// Version that added support, empty when unsupported
    pub supported: String,
    /// Support requires a flag or preference
    pub flagged: bool,
    /// Support is a partial implementation
    pub partial: bool,
    pub notes: Vec<String>,
    /// Implementation tracking links (commits, bugs)
    pub links: Vec<String>,
}

impl SupportStatement {
    /// Shorthand for a plain, unflagged support record
    pub fn version(version: impl Into<String>) -> Self {
        Self {
            supported: version.into(),
            ..Self::default()
        }
    }

    pub fn is_supported(&self) -> bool {
        !self.supported.is_empty()
    }
}

/// Desktop and mobile support of one engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSupport {
    pub desktop: SupportStatement,
    pub mobile: SupportStatement,
}

impl EngineSupport {
    pub fn facet(&self, facet: Facet) -> &SupportStatement {
        match facet {
            Facet::Desktop => &self.desktop,
            Facet::Mobile => &self.mobile,
        }
    }

    /// Supported on desktop or mobile
    pub fn is_supported(&self) -> bool {
        self.desktop.is_supported() || self.mobile.is_supported()
    }

    /// Unsupported on both desktop and mobile
    pub fn is_unsupported(&self) -> bool {
        self.desktop.supported.is_empty() && self.mobile.supported.is_empty()
    }

    /// Both facets paired with their facet kind
    pub fn facets(&self) -> [(Facet, &SupportStatement); 2] {
        [(Facet::Desktop, &self.desktop), (Facet::Mobile, &self.mobile)]
    }
}

/// Support of a feature in every tracked engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportData {
    pub chrome: EngineSupport,
    pub firefox: EngineSupport,
    pub safari: EngineSupport,
}

impl SupportData {
    pub fn get(&self, engine: Engine) -> &EngineSupport {
        match engine {
            Engine::Chrome => &self.chrome,
            Engine::Firefox => &self.firefox,
            Engine::Safari => &self.safari,
        }
    }

    pub fn get_mut(&mut self, engine: Engine) -> &mut EngineSupport {
        match engine {
            Engine::Chrome => &mut self.chrome,
            Engine::Firefox => &mut self.firefox,
            Engine::Safari => &mut self.safari,
        }
    }

    /// Engines paired with their support, in display order
    pub fn iter(&self) -> impl Iterator<Item = (Engine, &EngineSupport)> {
        Engine::ALL.into_iter().map(move |engine| (engine, self.get(engine)))
    }
}

impl Index<Engine> for SupportData {
    type Output = EngineSupport;

    fn index(&self, engine: Engine) -> &EngineSupport {
        self.get(engine)
    }
}

/// Compatibility details of a non-deprecated feature
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureDetails {
    /// Display name (may contain inline HTML from the description)
    pub name: String,
    pub mdn_url: String,
    pub spec_urls: Vec<String>,
    pub support: SupportData,
}

/// A feature and its retained subfeatures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureNode {
    pub id: String,
    pub subfeatures: Vec<FeatureNode>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub details: Option<FeatureDetails>,
}

impl FeatureNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            subfeatures: Vec::new(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: FeatureDetails) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_subfeatures(mut self, subfeatures: Vec<FeatureNode>) -> Self {
        self.subfeatures = subfeatures;
        self
    }

    /// Name to display: the details name, or the id when there is none
    pub fn display_name(&self) -> &str {
        match &self.details {
            Some(details) if !details.name.is_empty() => &details.name,
            _ => &self.id,
        }
    }

    /// Number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self.subfeatures.iter().map(FeatureNode::node_count).sum::<usize>()
    }
}

/// Root of a projected tree: the top-level categories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureTree {
    pub subfeatures: Vec<FeatureNode>,
}

impl FeatureTree {
    pub fn new(subfeatures: Vec<FeatureNode>) -> Self {
        Self { subfeatures }
    }

    /// Total number of nodes below the root
    pub fn node_count(&self) -> usize {
        self.subfeatures.iter().map(FeatureNode::node_count).sum()
    }

    /// Number of nodes without subfeatures
    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// Depth-first iterator over every node without subfeatures, with the
    /// dotted path of ids leading to it
    pub fn leaves(&self) -> impl Iterator<Item = (String, &FeatureNode)> {
        let mut stack: Vec<(String, &FeatureNode)> = self
            .subfeatures
            .iter()
            .rev()
            .map(|node| (node.id.clone(), node))
            .collect();

        std::iter::from_fn(move || {
            while let Some((path, node)) = stack.pop() {
                if node.subfeatures.is_empty() {
                    return Some((path, node));
                }
                for child in node.subfeatures.iter().rev() {
                    stack.push((format!("{}.{}", path, child.id), child));
                }
            }
            None
        })
    }
}
