//! Interpolation extraction.
//!
//! Template dialects embed expressions in text as `{{ expression }}`.
//! Each such text child is split into literal text and interpolation
//! nodes, the latter holding the expression as a single text child.

use memchr::memmem;

use super::Options;
use super::pass::rewrite_children;
use super::predicates::can_have_interpolation;
use crate::model::{Node, NodeId, NodeKind, SourceSpan, Tree};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A piece of text split around interpolations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    /// The expression between the delimiters, never empty.
    Expression(&'a str),
}

/// Split `value` into alternating text and expression segments.
///
/// Matching is non-greedy and spans lines: an expression runs up to the
/// first `}}` after at least one character. Text segments may be empty;
/// an unterminated `{{` stays in the text.
pub fn split_interpolations(value: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = value;

    while let Some(open) = memmem::find(rest.as_bytes(), OPEN.as_bytes()) {
        let body = &rest[open + OPEN.len()..];
        let Some(first) = body.chars().next() else {
            break;
        };
        let Some(close) = memmem::find(&body.as_bytes()[first.len_utf8()..], CLOSE.as_bytes())
        else {
            break;
        };
        let close = close + first.len_utf8();

        segments.push(Segment::Text(&rest[..open]));
        segments.push(Segment::Expression(&body[..close]));
        rest = &body[close + CLOSE.len()..];
    }

    segments.push(Segment::Text(rest));
    segments
}

/// Split `{{ }}` interpolations out of text children.
///
/// Does nothing for dialects without interpolation syntax.
pub fn extract_interpolation(tree: &Tree, options: &Options<'_>) -> Tree {
    if !options.dialect.has_interpolation() {
        return tree.clone();
    }

    let source = options.source();
    rewrite_children(tree, |out, id| {
        if !can_have_interpolation(&out[id]) {
            return None;
        }

        let children = out.children(id).to_vec();
        let mut split = Vec::with_capacity(children.len());
        let mut changed = false;

        for child in children {
            let value = match out[child].text_value() {
                Some(value) if memmem::find(value.as_bytes(), OPEN.as_bytes()).is_some() => {
                    value.to_string()
                }
                _ => {
                    split.push(child);
                    continue;
                }
            };
            let segments = split_interpolations(&value);
            if segments.len() == 1 {
                split.push(child);
                continue;
            }
            changed = true;

            let mut cursor = out[child].span.start;
            for segment in segments {
                match segment {
                    Segment::Text(text) => {
                        let end = source.move_by(cursor, text.len() as isize);
                        if !text.is_empty() {
                            let span = SourceSpan::new(cursor, end);
                            split.push(out.clone_with(child, |node| {
                                node.kind = NodeKind::Text {
                                    value: text.to_string(),
                                };
                                node.span = span;
                            }));
                        }
                        cursor = end;
                    }
                    Segment::Expression(expression) => {
                        let len = expression.len() + OPEN.len() + CLOSE.len();
                        let end = source.move_by(cursor, len as isize);
                        log::trace!(
                            target: "prepress",
                            "interpolation {{{{{expression}}}}} at {}",
                            cursor.offset
                        );

                        let inner_span = SourceSpan::new(
                            source.move_by(cursor, OPEN.len() as isize),
                            source.move_by(end, -(CLOSE.len() as isize)),
                        );
                        let inner = out.alloc(Node::text(expression, inner_span));
                        let interpolation = out.alloc(Node::interpolation(SourceSpan::new(cursor, end)));
                        out.set_children(interpolation, vec![inner]);
                        split.push(interpolation);
                        cursor = end;
                    }
                }
            }
        }

        changed.then_some(split)
    })
}
