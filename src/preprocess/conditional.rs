//! IE conditional comment folding.
//!
//! ```html
//! <!--[if IE 5]><!--><target><!--<![endif]-->...</target>
//! ```
//!
//! The start comment before the element and the end comment opening its
//! content are removed. The element keeps the condition and its opening
//! tag span grows to cover both comments.

use super::Options;
use super::pass::rewrite_children;
use crate::model::{NodeId, NodeKind, SourceLocation, SourceSpan, Tree};

struct Target {
    condition: String,
    /// Start of the conditional start comment.
    start: SourceLocation,
    /// End of the conditional end comment.
    end: SourceLocation,
}

/// Match an element wrapped by a conditional comment pair.
///
/// Both comments must touch the opening tag exactly.
fn target(tree: &Tree, id: NodeId) -> Option<Target> {
    let node = &tree[id];
    let element = node.as_element()?;

    let start_comment = &tree[node.prev?];
    let NodeKind::IeConditionalStartComment { condition } = &start_comment.kind else {
        return None;
    };
    if start_comment.span.end.offset != element.start_span.start.offset {
        return None;
    }

    let end_comment = &tree[tree.first_child(id)?];
    if !matches!(end_comment.kind, NodeKind::IeConditionalEndComment)
        || end_comment.span.start.offset != element.start_span.end.offset
    {
        return None;
    }

    Some(Target {
        condition: condition.clone(),
        start: start_comment.span.start,
        end: end_comment.span.end,
    })
}

/// Fold conditional comment pairs into the element they guard.
pub fn fold_ie_conditionals(tree: &Tree, _options: &Options<'_>) -> Tree {
    rewrite_children(tree, |out, id| {
        let children = out.children(id).to_vec();
        let mut targets: Vec<_> = children.iter().map(|&child| target(out, child)).collect();
        if targets.iter().all(Option::is_none) {
            return None;
        }

        let mut folded = Vec::with_capacity(children.len());
        for (i, &child) in children.iter().enumerate() {
            // Start comment of the next element
            if targets.get(i + 1).is_some_and(Option::is_some) {
                continue;
            }

            let Some(target) = targets[i].take() else {
                folded.push(child);
                continue;
            };

            log::trace!(
                target: "prepress",
                "fold conditional comment [if {}] at {}",
                target.condition,
                target.start.offset
            );

            let content = out.children(child)[1..].to_vec();
            let node = &mut out[child];
            node.span.start = target.start;
            if let Some(element) = node.as_element_mut() {
                element.start_span = SourceSpan::new(target.start, target.end);
                element.condition = Some(target.condition);
            }
            out.set_children(child, content);
            folded.push(child);
        }
        Some(folded)
    })
}
