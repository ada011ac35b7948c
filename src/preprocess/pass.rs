//! Tree traversal utilities for the structural passes.

use crate::model::{NodeId, Tree};

/// Rebuild the tree bottom-up, offering every container's child list for
/// rewriting.
///
/// `rewrite` sees the output tree with the container's children already
/// rebuilt and linked, so sibling links can be followed. Returning
/// `Some(children)` replaces the child list; `None` keeps it. The children
/// are fresh copies and may be edited in place.
pub fn rewrite_children<F>(tree: &Tree, mut rewrite: F) -> Tree
where
    F: FnMut(&mut Tree, NodeId) -> Option<Vec<NodeId>>,
{
    tree.map(|out, id| {
        if out[id].children.is_some()
            && let Some(children) = rewrite(out, id)
        {
            out.set_children(id, children);
        }
        id
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::SourceBuilder;

    #[test]
    fn test_rewrite_only_visits_containers() {
        let mut b = SourceBuilder::new();
        b.open("div");
        b.text("a");
        b.comment("b");
        b.close();
        let (_, tree) = b.finish();

        let mut visited = Vec::new();
        let result = rewrite_children(&tree, |out, id| {
            visited.push(out[id].kind.name());
            None
        });

        assert_eq!(visited, vec!["element", "root"]);
        assert_eq!(result, tree);
    }

    #[test]
    fn test_rewrite_drops_children() {
        let mut b = SourceBuilder::new();
        b.open("div");
        b.text("a");
        b.comment("b");
        b.close();
        let (_, tree) = b.finish();

        let result = rewrite_children(&tree, |out, id| {
            let kept = out
                .children(id)
                .iter()
                .copied()
                .filter(|&child| !out[child].is_text())
                .collect();
            Some(kept)
        });

        let div = result.first_child(NodeId::ROOT).unwrap();
        assert_eq!(result.children(div).len(), 1);
        assert_eq!(result[result.children(div)[0]].kind.name(), "comment");
        assert_eq!(result.iter_dfs().count(), 3);
    }
}
