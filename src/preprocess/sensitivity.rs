//! Space sensitivity propagation.
//!
//! Whether whitespace between two siblings matters depends on both of
//! them: the boundary is only safe to reformat when neither side needs it.
//! Each child first gets its own (intrinsic) leading and trailing
//! sensitivity; the effective value is then the intrinsic one combined
//! with the neighbour's intrinsic value on the other side of the boundary.

use super::Options;
use super::predicates::{
    is_dangling_space_sensitive, is_pre_like, leading_space_sensitive, trailing_space_sensitive,
};
use crate::model::{NodeId, Tree};

/// Set leading, trailing and dangling space sensitivity.
///
/// Leading and trailing sensitivity are set on children of non-empty
/// containers; dangling sensitivity on empty containers.
pub fn add_space_sensitivity(tree: &Tree, _options: &Options<'_>) -> Tree {
    // One inline style parse per node
    let pre_like_nodes: Vec<bool> = (0..tree.node_count())
        .map(|index| is_pre_like(&tree[NodeId(index as u32)]))
        .collect();
    let pre_like = |id: NodeId| pre_like_nodes[id.index()];
    let is_leading_space_sensitive =
        |input: &Tree, id: NodeId| leading_space_sensitive(input, id, &pre_like);
    let is_trailing_space_sensitive =
        |input: &Tree, id: NodeId| trailing_space_sensitive(input, id, &pre_like);

    tree.map_annotations(|input, id, node| {
        let original = &input[id];

        if original.children.as_ref().is_some_and(Vec::is_empty) {
            node.annotations.is_dangling_space_sensitive =
                Some(is_dangling_space_sensitive(original));
        }

        if original.parent.is_none() {
            return;
        }

        let leading = is_leading_space_sensitive(input, id)
            && original
                .prev
                .is_none_or(|prev| is_trailing_space_sensitive(input, prev));
        let trailing = is_trailing_space_sensitive(input, id)
            && original
                .next
                .is_none_or(|next| is_leading_space_sensitive(input, next));

        node.annotations.is_leading_space_sensitive = Some(leading);
        node.annotations.is_trailing_space_sensitive = Some(trailing);
    })
}
