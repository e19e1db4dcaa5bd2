//! Human-readable output
//!
//! Renders a filtered tree as an indented outline. Matched features show
//! one `[engine desktop|mobile]` block per engine, with markers for flagged
//! (🚩), partial (🌓), annotated (📝) and linked (🔗) support.

use crate::engine::Engine;
use crate::feature::{FeatureNode, FeatureTree, SupportStatement};
use crate::release::{ReleaseCatalogue, TABLE_CHANNELS};

const INDENT: &str = "  ";
const UNSUPPORTED: &str = "-";

/// Render a tree as an indented outline
pub fn render_tree(tree: &FeatureTree) -> String {
    let mut out = String::new();
    for node in &tree.subfeatures {
        render_node(&mut out, node, 0);
    }
    out
}

fn render_node(out: &mut String, node: &FeatureNode, level: usize) {
    out.push_str(&INDENT.repeat(level));
    out.push_str(node.display_name());

    if let (Some(details), true) = (&node.details, node.subfeatures.is_empty()) {
        for (engine, support) in details.support.iter() {
            out.push_str(&format!(
                " [{} {}|{}]",
                engine,
                cell(&support.desktop),
                cell(&support.mobile)
            ));
        }
    }
    out.push('\n');

    for child in &node.subfeatures {
        render_node(out, child, level + 1);
    }
}

/// Text of one support cell
pub fn cell(statement: &SupportStatement) -> String {
    let mut text = if statement.is_supported() {
        statement.supported.clone()
    } else {
        UNSUPPORTED.to_string()
    };

    if statement.flagged {
        text.push('🚩');
    }
    if statement.partial {
        text.push('🌓');
    }
    if !statement.notes.is_empty() {
        text.push('📝');
    }
    if !statement.links.is_empty() {
        text.push('🔗');
    }
    text
}

/// Render the current/beta/nightly/planned versions of each desktop browser
pub fn render_versions(releases: &ReleaseCatalogue) -> String {
    let mut out = String::new();

    for engine in Engine::ALL {
        let browser = engine.desktop_browser();
        let name = releases.browser_name(browser).unwrap_or(browser);
        out.push_str(&format!("{}:\n", name));

        for channel in TABLE_CHANNELS {
            let version = releases
                .latest_in(browser, channel)
                .map(|release| {
                    format!(
                        "{} ({})",
                        release.version,
                        release.release_date.as_deref().unwrap_or("unknown date")
                    )
                })
                .unwrap_or_default();
            out.push_str(&format!("{}{:<8} {}\n", INDENT, channel.as_str(), version));
        }
    }

    out
}
