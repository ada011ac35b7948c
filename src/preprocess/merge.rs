//! Node-into-text folding.
//!
//! Two passes turn nodes back into literal text and coalesce the result
//! with neighbouring text:
//!
//! ```text
//! a<![CDATA[b]]>c        ->  "a<![CDATA[b]]>c"
//! a<b>x</b>c             ->  "a<b>x</b>c"
//! ```

use super::Options;
use super::pass::rewrite_children;
use super::predicates::has_html_whitespace;
use crate::model::{NodeId, NodeKind, Tree};

/// Replace every child matching `should_merge` with text produced by
/// `value_of`, then coalesce adjacent text children.
///
/// Coalesced text spans run from the first piece's start to the last
/// piece's end.
fn merge_into_text<P, V>(tree: &Tree, should_merge: P, value_of: V) -> Tree
where
    P: Fn(&Tree, NodeId) -> bool,
    V: Fn(&Tree, NodeId) -> String,
{
    rewrite_children(tree, |out, id| {
        let children = out.children(id).to_vec();
        let targets: Vec<bool> = children
            .iter()
            .map(|&child| should_merge(out, child))
            .collect();
        if !targets.contains(&true) {
            return None;
        }

        let mut merged: Vec<NodeId> = Vec::with_capacity(children.len());
        for (&child, &target) in children.iter().zip(&targets) {
            if target {
                let value = value_of(out, child);
                let node = &mut out[child];
                node.kind = NodeKind::Text { value };
                node.children = None;
            } else if !out[child].is_text() {
                merged.push(child);
                continue;
            }

            match merged.last() {
                Some(&last) if out[last].is_text() => append_text(out, last, child),
                _ => merged.push(child),
            }
        }
        Some(merged)
    })
}

/// Append the value of text node `from` to text node `to`, widening the span.
fn append_text(tree: &mut Tree, to: NodeId, from: NodeId) {
    let value = tree[from].text_value().unwrap_or_default().to_string();
    let end = tree[from].span.end;

    let node = &mut tree[to];
    if let NodeKind::Text { value: existing } = &mut node.kind {
        existing.push_str(&value);
    }
    node.span.end = end;
}

/// Fold CDATA sections into text, keeping their delimiters.
pub fn fold_cdata(tree: &Tree, _options: &Options<'_>) -> Tree {
    merge_into_text(
        tree,
        |tree, id| matches!(tree[id].kind, NodeKind::Cdata { .. }),
        |tree, id| match &tree[id].kind {
            NodeKind::Cdata { value } => format!("<![CDATA[{value}]]>"),
            _ => String::new(),
        },
    )
}

/// An element that can be printed as literal text without changing any
/// whitespace semantics.
///
/// The element must have no attributes and a single text child without
/// whitespace, touch its text siblings on both sides without any space in
/// between, and sit between two text siblings.
fn is_simple_element(tree: &Tree, id: NodeId) -> bool {
    let node = &tree[id];
    let Some(element) = node.as_element() else {
        return false;
    };
    let [only] = tree.children(id) else {
        return false;
    };
    let inner = &tree[*only];

    element.attrs.is_empty()
        && inner
            .text_value()
            .is_some_and(|value| !has_html_whitespace(value))
        && !inner.has_leading_spaces()
        && !inner.has_trailing_spaces()
        && node.is_leading_space_sensitive()
        && !node.has_leading_spaces()
        && node.is_trailing_space_sensitive()
        && !node.has_trailing_spaces()
        && node.prev.is_some_and(|prev| tree[prev].is_text())
        && node.next.is_some_and(|next| tree[next].is_text())
}

/// Fold simple inline elements into the text around them.
///
/// The folded text takes its trailing whitespace state from the text after
/// the element.
pub fn fold_simple_elements(tree: &Tree, _options: &Options<'_>) -> Tree {
    rewrite_children(tree, |out, id| {
        let children = out.children(id).to_vec();
        let simple: Vec<bool> = children
            .iter()
            .map(|&child| is_simple_element(out, child))
            .collect();
        if !simple.contains(&true) {
            return None;
        }

        let mut merged: Vec<NodeId> = Vec::with_capacity(children.len());
        let mut i = 0;
        while i < children.len() {
            let child = children[i];
            let folding = simple[i].then(|| (merged.last().copied(), children.get(i + 1).copied()));
            let Some((Some(last), Some(next))) = folding else {
                merged.push(child);
                i += 1;
                continue;
            };

            let name = match out[child].as_element() {
                Some(element) => element.full_name().into_owned(),
                None => String::new(),
            };
            let content = out
                .first_child(child)
                .and_then(|inner| out[inner].text_value())
                .unwrap_or_default();
            let literal = format!("<{name}>{content}</{name}>");
            log::trace!(target: "prepress", "fold simple element {literal}");

            let next_annotations = out[next].annotations;
            let next_value = out[next].text_value().unwrap_or_default().to_string();
            let end = out[next].span.end;

            let node = &mut out[last];
            if let NodeKind::Text { value } = &mut node.kind {
                value.push_str(&literal);
                value.push_str(&next_value);
            }
            node.span.end = end;
            node.annotations.is_trailing_space_sensitive = next_annotations.is_trailing_space_sensitive;
            node.annotations.has_trailing_spaces = next_annotations.has_trailing_spaces;

            i += 2;
        }
        Some(merged)
    })
}
