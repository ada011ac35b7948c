//! CSS display classification.

use super::{Dialect, Options, WhitespaceSensitivity};
use crate::model::{NodeId, NodeKind, Tree};
use crate::style::{CssDisplay, InlineStyle, default_display};

/// Parse a `display: KEYWORD` directive comment.
fn display_directive(comment: &str) -> Option<CssDisplay> {
    let keyword = comment.trim().strip_prefix("display:")?.trim();
    if keyword.is_empty() || !keyword.bytes().all(|b| b.is_ascii_lowercase() || b == b'-') {
        return None;
    }
    CssDisplay::from_css(keyword)
}

/// Effective display of a node.
///
/// In order: a `<!-- display: x -->` comment right before the node, the
/// whitespace sensitivity mode, top-level Vue blocks, an inline `style`
/// attribute, the tag default, and finally `inline`.
pub fn css_display(tree: &Tree, id: NodeId, options: &Options<'_>) -> CssDisplay {
    let node = &tree[id];

    if let Some(prev) = node.prev
        && let NodeKind::Comment { value } = &tree[prev].kind
        && let Some(display) = display_directive(value)
    {
        return display;
    }

    match options.whitespace_sensitivity {
        WhitespaceSensitivity::Strict => return CssDisplay::Inline,
        WhitespaceSensitivity::Ignore => return CssDisplay::Block,
        WhitespaceSensitivity::Css => {}
    }

    if options.dialect == Dialect::Vue && node.parent == Some(NodeId::ROOT) {
        return CssDisplay::Block;
    }

    let Some(element) = node.as_element() else {
        return CssDisplay::default();
    };
    if let Some(display) = element
        .attr("style")
        .and_then(|style| InlineStyle::parse(style).display)
    {
        return display;
    }
    if element.namespace.is_some() {
        return CssDisplay::default();
    }
    default_display(&element.name).unwrap_or_default()
}

/// Assign every node its display category.
pub fn add_css_display(tree: &Tree, options: &Options<'_>) -> Tree {
    tree.map_annotations(|input, id, node| {
        node.annotations.css_display = Some(css_display(input, id, options));
    })
}
