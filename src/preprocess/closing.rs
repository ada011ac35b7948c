//! Self-closing and component closing tag detection.

use super::Options;
use crate::model::{Node, Tree};

/// Printed without a closing tag: a leaf kind, a void element, or an
/// element written as `<x />`.
fn is_self_closing(node: &Node) -> bool {
    if node.children.is_none() {
        return true;
    }
    node.as_element().is_some_and(|element| {
        element.tag.is_void || element.end_span.as_ref() == Some(&element.start_span)
    })
}

/// Matches `</ />` with any whitespace between the characters.
fn is_component_closing_tag(end_tag: &str) -> bool {
    let Some(inner) = end_tag.strip_prefix('<').and_then(|s| s.strip_suffix('>')) else {
        return false;
    };
    inner.chars().filter(|c| !c.is_whitespace()).eq("//".chars())
}

/// Set `is_self_closing` on every node.
pub fn add_is_self_closing(tree: &Tree, _options: &Options<'_>) -> Tree {
    tree.map_annotations(|_, _, node| {
        node.annotations.is_self_closing = Some(is_self_closing(node));
    })
}

/// Set `has_component_closing_tag` on every element.
pub fn add_component_closing_tag(tree: &Tree, options: &Options<'_>) -> Tree {
    let source = options.source();
    tree.map_annotations(|_, _, node| {
        let Some(element) = node.as_element_mut() else {
            return;
        };
        let matched = element
            .end_span
            .as_ref()
            .and_then(|span| source.slice(span).ok())
            .is_some_and(is_component_closing_tag);
        element.has_component_closing_tag = Some(matched);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeId;
    use crate::testing::SourceBuilder;

    #[test]
    fn test_self_closing() {
        let mut b = SourceBuilder::new();
        let text = b.text("a");
        let br = b.void("br");
        let icon = b.self_closing("icon");
        let div = b.open("div");
        b.close();
        let unclosed = b.open("p");
        b.close_implied();
        let (source, tree) = b.finish();

        let result = add_is_self_closing(&tree, &Options::new(&source));

        assert_eq!(result[text].annotations.is_self_closing, Some(true));
        assert_eq!(result[br].annotations.is_self_closing, Some(true));
        assert_eq!(result[icon].annotations.is_self_closing, Some(true));
        assert_eq!(result[div].annotations.is_self_closing, Some(false));
        assert_eq!(result[unclosed].annotations.is_self_closing, Some(false));
        assert_eq!(result[NodeId::ROOT].annotations.is_self_closing, Some(false));
    }

    #[test]
    fn test_component_closing_tag_pattern() {
        assert!(is_component_closing_tag("<//>"));
        assert!(is_component_closing_tag("< / / >"));
        assert!(is_component_closing_tag("<\n/\t/>"));
        assert!(!is_component_closing_tag("</div>"));
        assert!(!is_component_closing_tag("</>"));
        assert!(!is_component_closing_tag("<///>"));
        assert!(!is_component_closing_tag("x<//>"));
    }

    #[test]
    fn test_component_closing_tag() {
        let mut b = SourceBuilder::new();
        let component = b.open("Foo");
        b.close_with("< / / >");
        let div = b.open("div");
        b.close();
        let unclosed = b.open("p");
        b.close_implied();
        let text = b.text("x");
        let (source, tree) = b.finish();

        let result = add_component_closing_tag(&tree, &Options::new(&source));

        let flag = |id: NodeId| {
            result[id]
                .as_element()
                .and_then(|element| element.has_component_closing_tag)
        };
        assert_eq!(flag(component), Some(true));
        assert_eq!(flag(div), Some(false));
        assert_eq!(flag(unclosed), Some(false));
        assert_eq!(flag(text), None);
    }
}
