//! Whitespace extraction.
//!
//! Outside whitespace-sensitive elements, leading and trailing whitespace
//! is cut out of every text child. What was removed is recorded on the
//! neighbouring nodes as `has_leading_spaces` / `has_trailing_spaces`, and
//! a container left with nothing but whitespace records it as
//! `has_dangling_spaces`.

use super::Options;
use super::pass::rewrite_children;
use super::predicates::{
    html_trim, is_indentation_sensitive, is_script_like, split_html_whitespace,
};
use crate::model::{NodeId, NodeKind, SourceSpan, Tree};

/// A child list entry while whitespace is being cut out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece {
    Whitespace,
    Node(NodeId),
}

/// Strip insignificant whitespace from text children and record it.
pub fn extract_whitespace(tree: &Tree, options: &Options<'_>) -> Tree {
    let source = options.source();
    rewrite_children(tree, |out, id| {
        let children = out.children(id).to_vec();

        let only_whitespace = match children.as_slice() {
            [] => true,
            [only] => out[*only]
                .text_value()
                .is_some_and(|value| html_trim(value).is_empty()),
            _ => false,
        };
        if only_whitespace {
            out[id].annotations.has_dangling_spaces = Some(!children.is_empty());
            return Some(Vec::new());
        }

        let indentation_sensitive = is_indentation_sensitive(&out[id]);
        let whitespace_sensitive = indentation_sensitive || is_script_like(&out[id]);

        let mut pieces = Vec::with_capacity(children.len());
        for child in children {
            let value = match out[child].text_value() {
                Some(value) if !whitespace_sensitive => value,
                _ => {
                    pieces.push(Piece::Node(child));
                    continue;
                }
            };

            let split = split_html_whitespace(value);
            let (leading, trailing) = (split.leading.len(), split.trailing.len());
            let text = split.text.to_string();

            if leading > 0 {
                pieces.push(Piece::Whitespace);
            }
            if !text.is_empty() {
                let span = out[child].span;
                let node = &mut out[child];
                node.kind = NodeKind::Text { value: text };
                node.span = SourceSpan::new(
                    source.move_by(span.start, leading as isize),
                    source.move_by(span.end, -(trailing as isize)),
                );
                pieces.push(Piece::Node(child));
            }
            if trailing > 0 {
                pieces.push(Piece::Whitespace);
            }
        }

        let mut kept = Vec::with_capacity(pieces.len());
        for (i, piece) in pieces.iter().enumerate() {
            let Piece::Node(child) = *piece else {
                continue;
            };
            let annotations = &mut out[child].annotations;
            annotations.has_leading_spaces =
                Some(i > 0 && pieces[i - 1] == Piece::Whitespace);
            annotations.has_trailing_spaces = Some(pieces.get(i + 1) == Some(&Piece::Whitespace));
            kept.push(child);
        }

        let annotations = &mut out[id].annotations;
        annotations.is_whitespace_sensitive = Some(whitespace_sensitive);
        annotations.is_indentation_sensitive = Some(indentation_sensitive);
        Some(kept)
    })
}
