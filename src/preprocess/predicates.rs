//! Shared predicates for the whitespace passes.

use crate::model::{Node, NodeId, NodeKind, Tree};
use crate::style::{CssDisplay, InlineStyle, WhiteSpace, default_white_space};

/// HTML whitespace: space, tab, LF, CR and form feed.
pub fn is_html_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

pub fn has_html_whitespace(s: &str) -> bool {
    s.chars().any(is_html_whitespace)
}

/// Trim HTML whitespace (but not other Unicode whitespace) from both ends.
pub fn html_trim(s: &str) -> &str {
    s.trim_matches(is_html_whitespace)
}

/// A string cut into leading whitespace, content and trailing whitespace.
///
/// When the string is all whitespace, everything is `leading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhitespaceSplit<'a> {
    pub leading: &'a str,
    pub text: &'a str,
    pub trailing: &'a str,
}

pub fn split_html_whitespace(s: &str) -> WhitespaceSplit<'_> {
    let text_start = s.len() - s.trim_start_matches(is_html_whitespace).len();
    let (leading, rest) = s.split_at(text_start);
    let text = rest.trim_end_matches(is_html_whitespace);
    WhitespaceSplit {
        leading,
        text,
        trailing: &rest[text.len()..],
    }
}

/// `<script>`, `<style>` and `<svg:style>`: raw text content.
pub fn is_script_like(node: &Node) -> bool {
    let Some(element) = node.as_element() else {
        return false;
    };
    let name = element.full_name().to_ascii_lowercase();
    matches!(name.as_str(), "script" | "style" | "svg:style")
}

/// Effective `white-space` of a node.
///
/// An inline `style` attribute wins over the tag default. Namespaced
/// elements have no tag default, and nodes other than elements are
/// `normal`.
pub fn white_space(node: &Node) -> WhiteSpace {
    let Some(element) = node.as_element() else {
        return WhiteSpace::Normal;
    };
    if let Some(white_space) = element
        .attr("style")
        .and_then(|style| InlineStyle::parse(style).white_space)
    {
        return white_space;
    }
    match element.namespace {
        Some(_) => WhiteSpace::Normal,
        None => default_white_space(&element.name),
    }
}

/// `pre`, `pre-wrap` or `pre-line`.
pub fn is_pre_like(node: &Node) -> bool {
    white_space(node).is_pre()
}

/// Re-indenting the content would change it.
pub fn is_indentation_sensitive(node: &Node) -> bool {
    is_pre_like(node)
}

/// No whitespace inside this node may be normalized.
pub fn is_whitespace_sensitive(node: &Node) -> bool {
    is_script_like(node) || is_indentation_sensitive(node)
}

pub fn can_have_interpolation(node: &Node) -> bool {
    node.children.is_some() && !is_script_like(node)
}

/// Whitespace inside an empty container is significant.
pub fn is_dangling_space_sensitive(node: &Node) -> bool {
    node.css_display().is_dangling_space_sensitive() && !is_script_like(node)
}

/// Whitespace directly before `id` is significant, looking only at the
/// node, its parent and its previous sibling.
pub fn is_leading_space_sensitive(tree: &Tree, id: NodeId) -> bool {
    leading_space_sensitive(tree, id, &|id| is_pre_like(&tree[id]))
}

/// [`is_leading_space_sensitive`] with pre-like state looked up by `pre_like`.
pub(crate) fn leading_space_sensitive<P>(tree: &Tree, id: NodeId, pre_like: &P) -> bool
where
    P: Fn(NodeId) -> bool,
{
    let node = &tree[id];
    let prev = node.prev.map(|prev| &tree[prev]);

    if node.is_text_like() && prev.is_some_and(Node::is_text_like) {
        return true;
    }

    let Some(parent_id) = node.parent else {
        return true;
    };
    let parent = &tree[parent_id];
    if parent.css_display() == CssDisplay::None || pre_like(parent_id) {
        return true;
    }

    match prev {
        None => {
            let hidden = matches!(parent.kind, NodeKind::Root)
                || pre_like(id)
                || is_script_like(parent)
                || !parent.css_display().is_first_child_leading_space_sensitive();
            !hidden
        }
        Some(prev) => prev.css_display().is_next_leading_space_sensitive(),
    }
}

/// Whitespace directly after `id` is significant, looking only at the
/// node, its parent and its next sibling.
pub fn is_trailing_space_sensitive(tree: &Tree, id: NodeId) -> bool {
    trailing_space_sensitive(tree, id, &|id| is_pre_like(&tree[id]))
}

/// [`is_trailing_space_sensitive`] with pre-like state looked up by `pre_like`.
pub(crate) fn trailing_space_sensitive<P>(tree: &Tree, id: NodeId, pre_like: &P) -> bool
where
    P: Fn(NodeId) -> bool,
{
    let node = &tree[id];
    let next = node.next.map(|next| &tree[next]);

    if node.is_text_like() && next.is_some_and(Node::is_text_like) {
        return true;
    }

    let Some(parent_id) = node.parent else {
        return true;
    };
    let parent = &tree[parent_id];
    if parent.css_display() == CssDisplay::None || pre_like(parent_id) {
        return true;
    }

    match next {
        None => {
            let hidden = matches!(parent.kind, NodeKind::Root)
                || pre_like(id)
                || is_script_like(parent)
                || !parent.css_display().is_last_child_trailing_space_sensitive();
            !hidden
        }
        Some(next) => next.css_display().is_prev_trailing_space_sensitive(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Attribute, Element, SourceSpan};
    use crate::testing::SourceBuilder;

    fn element(name: &str) -> Node {
        Node::element(Element::new(name, SourceSpan::default()), SourceSpan::default())
    }

    #[test]
    fn test_split_html_whitespace() {
        let split = split_html_whitespace("\n  hello world \t");
        assert_eq!(split.leading, "\n  ");
        assert_eq!(split.text, "hello world");
        assert_eq!(split.trailing, " \t");

        let split = split_html_whitespace(" \r\n ");
        assert_eq!(split.leading, " \r\n ");
        assert_eq!(split.text, "");
        assert_eq!(split.trailing, "");

        // Non-breaking space is content
        let split = split_html_whitespace("\u{a0}x ");
        assert_eq!(split.leading, "");
        assert_eq!(split.text, "\u{a0}x");
    }

    #[test]
    fn test_html_trim() {
        assert_eq!(html_trim("\x0C a \n"), "a");
        assert_eq!(html_trim("\u{2003}a"), "\u{2003}a");
        assert!(has_html_whitespace("a b"));
        assert!(!has_html_whitespace("a\u{a0}b"));
    }

    #[test]
    fn test_script_like() {
        assert!(is_script_like(&element("script")));
        assert!(is_script_like(&element("STYLE")));
        let svg_style = Node::element(
            Element::new("style", SourceSpan::default()).with_namespace("svg"),
            SourceSpan::default(),
        );
        assert!(is_script_like(&svg_style));
        assert!(!is_script_like(&element("div")));
        assert!(!is_script_like(&Node::text("script", SourceSpan::default())));
    }

    #[test]
    fn test_pre_like_from_tag_and_style() {
        assert!(is_pre_like(&element("pre")));
        assert!(is_pre_like(&element("textarea")));
        assert!(!is_pre_like(&element("div")));

        let styled = Node::element(
            Element::new("div", SourceSpan::default())
                .with_attrs(vec![Attribute::new("style", "white-space: pre-line")]),
            SourceSpan::default(),
        );
        assert!(is_pre_like(&styled));
        assert!(is_whitespace_sensitive(&styled));

        let unstyled = Node::element(
            Element::new("pre", SourceSpan::default())
                .with_attrs(vec![Attribute::new("style", "white-space: normal")]),
            SourceSpan::default(),
        );
        assert!(!is_indentation_sensitive(&unstyled));
    }

    #[test]
    fn test_namespaced_elements_have_no_white_space_default() {
        let svg_pre = Node::element(
            Element::new("pre", SourceSpan::default()).with_namespace("svg"),
            SourceSpan::default(),
        );
        assert_eq!(white_space(&svg_pre), WhiteSpace::Normal);
        assert!(!is_whitespace_sensitive(&svg_pre));

        let styled = Node::element(
            Element::new("text", SourceSpan::default())
                .with_namespace("svg")
                .with_attrs(vec![Attribute::new("style", "white-space: pre")]),
            SourceSpan::default(),
        );
        assert!(is_pre_like(&styled));
    }

    #[test]
    fn test_dangling_space_sensitivity() {
        let mut span = element("span");
        span.annotations.css_display = Some(CssDisplay::Inline);
        assert!(is_dangling_space_sensitive(&span));

        let mut div = element("div");
        div.annotations.css_display = Some(CssDisplay::Block);
        assert!(!is_dangling_space_sensitive(&div));

        let mut script = element("script");
        script.annotations.css_display = Some(CssDisplay::Inline);
        assert!(!is_dangling_space_sensitive(&script));
    }

    #[test]
    fn test_leading_and_trailing_sensitivity() {
        // <div><span>a</span>b</div> with display already assigned
        let mut b = SourceBuilder::new();
        let div = b.open("div");
        let span = b.open("span");
        b.text("a");
        b.close();
        let text = b.text("b");
        b.close();
        let (_, mut tree) = b.finish();
        tree[div].annotations.css_display = Some(CssDisplay::Block);

        // First child of a block
        assert!(!is_leading_space_sensitive(&tree, span));
        // Between two inline nodes
        assert!(is_trailing_space_sensitive(&tree, span));
        assert!(is_leading_space_sensitive(&tree, text));
        // Last child of a block
        assert!(!is_trailing_space_sensitive(&tree, text));
        // Directly under the root
        assert!(!is_leading_space_sensitive(&tree, div));
        assert!(!is_trailing_space_sensitive(&tree, div));
    }

    #[test]
    fn test_block_sibling_hides_boundary() {
        // <span>a</span><p>b</p>
        let mut b = SourceBuilder::new();
        b.open("div");
        let span = b.open("span");
        b.close();
        let p = b.open("p");
        b.close();
        b.close();
        let (_, mut tree) = b.finish();
        tree[p].annotations.css_display = Some(CssDisplay::Block);

        assert!(!is_trailing_space_sensitive(&tree, span));
        // The paragraph itself does not see its previous sibling as a block
        assert!(is_leading_space_sensitive(&tree, p));
    }

    #[test]
    fn test_pre_parent_keeps_everything() {
        let mut b = SourceBuilder::new();
        b.open("pre");
        let text = b.text("x");
        b.close();
        let (_, tree) = b.finish();

        assert!(is_leading_space_sensitive(&tree, text));
        assert!(is_trailing_space_sensitive(&tree, text));
    }
}
