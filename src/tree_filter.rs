//! Tree filter (prune in place)
//!
//! Keeps only the branches of a feature tree that lead to features matching
//! a predicate. A feature that matches directly becomes a terminal leaf: its
//! own subfeatures are discarded. The root is never removed, only pruned.

use crate::feature::{FeatureNode, FeatureTree};
use crate::predicates::FeatureFilter;
use tracing::debug;

/// Prune a node against a predicate
///
/// Returns whether the node is of interest, i.e. whether its parent should
/// keep it. Sibling order is preserved.
pub fn filter_node<P: FeatureFilter + ?Sized>(node: &mut FeatureNode, predicate: &P) -> bool {
    if let Some(details) = &node.details {
        if predicate.matches(details) {
            node.subfeatures.clear();
            return true;
        }
    }

    node.subfeatures
        .retain_mut(|subfeature| filter_node(subfeature, predicate));

    !node.subfeatures.is_empty()
}

impl FeatureTree {
    /// Prune this tree in place, keeping only branches of interest
    pub fn retain_matching<P: FeatureFilter + ?Sized>(&mut self, predicate: &P) {
        self.subfeatures
            .retain_mut(|subfeature| filter_node(subfeature, predicate));
    }

    /// Deep copy of this tree pruned against a predicate
    ///
    /// The tree itself is left untouched.
    pub fn filtered<P: FeatureFilter + ?Sized>(&self, predicate: &P) -> FeatureTree {
        let mut copy = self.clone();
        copy.retain_matching(predicate);
        debug!(
            before = self.node_count(),
            after = copy.node_count(),
            "filtered feature tree"
        );
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::FeatureDetails;
    use crate::predicates::TitleFilter;

    fn leaf(id: &str) -> FeatureNode {
        FeatureNode::new(id).with_details(FeatureDetails {
            name: id.to_string(),
            ..FeatureDetails::default()
        })
    }

    fn tree() -> FeatureTree {
        FeatureTree::new(vec![
            FeatureNode::new("api").with_subfeatures(vec![
                leaf("Array").with_subfeatures(vec![leaf("includes"), leaf("map"), leaf("flat")]),
                leaf("Set").with_subfeatures(vec![leaf("has")]),
            ]),
            FeatureNode::new("css").with_subfeatures(vec![leaf("color")]),
        ])
    }

    fn ids(nodes: &[FeatureNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn test_keeps_ancestors_of_matches() {
        let filtered = tree().filtered(&TitleFilter::new("includes"));
        assert_eq!(ids(&filtered.subfeatures), vec!["api"]);
        let api = &filtered.subfeatures[0];
        assert_eq!(ids(&api.subfeatures), vec!["Array"]);
        assert_eq!(ids(&api.subfeatures[0].subfeatures), vec!["includes"]);
    }

    #[test]
    fn test_direct_match_discards_descendants() {
        let filtered = tree().filtered(&TitleFilter::new("set"));
        let set = &filtered.subfeatures[0].subfeatures[0];
        assert_eq!(set.id, "Set");
        assert!(set.subfeatures.is_empty());
    }

    #[test]
    fn test_wider_predicate_keeps_match_under_matched_ancestor() {
        let narrow = |d: &FeatureDetails| d.name == "map";
        let wide = |d: &FeatureDetails| d.name == "map" || d.name == "Array";

        let paths = |tree: &FeatureTree| -> Vec<String> { tree.leaves().map(|(path, _)| path).collect() };
        assert_eq!(paths(&tree().filtered(&narrow)), vec!["api.Array.map"]);
        assert_eq!(paths(&tree().filtered(&wide)), vec!["api.Array"]);
    }

    #[test]
    fn test_sibling_order_preserved() {
        let predicate = |d: &FeatureDetails| d.name == "flat" || d.name == "includes";
        let filtered = tree().filtered(&predicate);
        assert_eq!(
            ids(&filtered.subfeatures[0].subfeatures[0].subfeatures),
            vec!["includes", "flat"]
        );
    }

    #[test]
    fn test_no_match_leaves_empty_root() {
        let filtered = tree().filtered(&|_: &FeatureDetails| false);
        assert!(filtered.subfeatures.is_empty());
    }

    #[test]
    fn test_source_tree_untouched() {
        let source = tree();
        let before = source.clone();
        let _ = source.filtered(&TitleFilter::new("color"));
        assert_eq!(source, before);
    }

    #[test]
    fn test_node_without_details_never_matches_directly() {
        let mut node = FeatureNode::new("lonely");
        assert!(!filter_node(&mut node, &|_: &FeatureDetails| true));
    }

    #[test]
    fn test_dyn_predicate() {
        let predicate: Box<dyn FeatureFilter> = Box::new(TitleFilter::new("has"));
        let filtered = tree().filtered(predicate.as_ref());
        assert_eq!(filtered.leaf_count(), 1);
    }
}
