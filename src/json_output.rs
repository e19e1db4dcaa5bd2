//! JSON output format for filtered feature trees
//!
//! `--format json` wraps the tree in a small envelope carrying the filter
//! state and result counts.

use crate::feature::FeatureTree;
use crate::query_state::QueryState;
use serde::Serialize;

/// Result counts of a query
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonSummary {
    /// Nodes in the tree after filtering
    pub nodes: usize,
    /// Terminal features after filtering
    pub leaves: usize,
}

/// Complete JSON document emitted for a query
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput<'a> {
    pub version: String,
    pub format: String,
    /// Filter state as a query string
    pub query: String,
    pub summary: JsonSummary,
    pub tree: &'a FeatureTree,
}

impl<'a> JsonOutput<'a> {
    pub fn new(state: &QueryState, tree: &'a FeatureTree) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "bcd-query-json-v1".to_string(),
            query: state.to_query_string(),
            summary: JsonSummary {
                nodes: tree.node_count(),
                leaves: tree.leaf_count(),
            },
            tree,
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
