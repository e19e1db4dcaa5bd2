//! CSV output format for filtered feature trees
//!
//! One row per matched feature (every leaf with details), with the dotted
//! feature path and the support token of each tracked browser.

use crate::engine::{Engine, Facet};
use crate::feature::FeatureTree;

/// CSV record for a single feature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvFeature {
    pub path: String,
    pub name: String,
    /// Support tokens in column order (desktop then mobile, per engine)
    pub support: Vec<String>,
    pub mdn_url: String,
}

/// CSV output formatter
#[derive(Debug, Default)]
pub struct CsvOutput {
    features: Vec<CsvFeature>,
}

impl CsvOutput {
    /// Create a new CSV output formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every matched feature of a tree
    pub fn from_tree(tree: &FeatureTree) -> Self {
        let mut output = Self::new();

        for (path, node) in tree.leaves() {
            let Some(details) = &node.details else {
                continue;
            };

            let support = Engine::ALL
                .into_iter()
                .flat_map(|engine| {
                    Facet::BOTH
                        .into_iter()
                        .map(move |facet| details.support[engine].facet(facet).supported.clone())
                })
                .collect();

            output.add_feature(CsvFeature {
                path,
                name: details.name.clone(),
                support,
                mdn_url: details.mdn_url.clone(),
            });
        }

        output
    }

    /// Add a feature to the output
    pub fn add_feature(&mut self, feature: CsvFeature) {
        self.features.push(feature);
    }

    /// Generate CSV header row
    fn header(&self) -> String {
        let mut headers = vec!["path", "name"];
        for engine in Engine::ALL {
            headers.push(engine.desktop_browser());
            headers.push(engine.mobile_browser());
        }
        headers.push("mdn_url");
        headers.join(",")
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    /// Format a feature as CSV row
    fn format_feature(&self, feature: &CsvFeature) -> String {
        let mut fields = vec![
            Self::escape_field(&feature.path),
            Self::escape_field(&feature.name),
        ];
        fields.extend(feature.support.iter().map(|token| Self::escape_field(token)));
        fields.push(Self::escape_field(&feature.mdn_url));
        fields.join(",")
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();

        output.push_str(&self.header());
        output.push('\n');

        for feature in &self.features {
            output.push_str(&self.format_feature(feature));
            output.push('\n');
        }

        output
    }
}
