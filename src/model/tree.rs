//! Arena tree with index links.
//!
//! Nodes live in a single vector and refer to each other through
//! [`NodeId`]s, so parent and sibling links are plain indices rather than
//! back-pointers. Passes never edit a tree they were given: [`Tree::map`]
//! and [`Tree::map_annotations`] build a fresh tree and leave the input
//! untouched.

use std::fmt;
use std::ops::{Index, IndexMut};

use super::{Node, NodeId, NodeKind, SourceSpan, SourceText};
use crate::error::{Error, Result};

/// A markup tree. Index 0 is always the root.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Create a tree holding only a root node.
    pub fn new(span: SourceSpan) -> Self {
        Self {
            nodes: vec![Node::root(span)],
        }
    }

    /// Get a node by ID, or `None` for an ID from another tree.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Number of allocated nodes, including detached ones.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Allocate a detached node and return its ID.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Append a detached node as the last child of `parent`.
    ///
    /// The root counts as attached.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let child_node = self.node(child).ok_or(Error::UnknownNode(child))?;
        if child == NodeId::ROOT || child_node.parent.is_some() {
            return Err(Error::AlreadyAttached(child));
        }

        let parent_node = self.node(parent).ok_or(Error::UnknownNode(parent))?;
        let Some(siblings) = &parent_node.children else {
            return Err(Error::NotAContainer {
                parent,
                kind: parent_node.kind.name(),
            });
        };

        let last = siblings.last().copied();
        if let Some(last) = last {
            self[last].next = Some(child);
        }

        let child_node = &mut self[child];
        child_node.parent = Some(parent);
        child_node.prev = last;
        child_node.next = None;

        if let Some(siblings) = &mut self[parent].children {
            siblings.push(child);
        }
        Ok(())
    }

    /// Children of a node; empty for leaf kinds.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self[id].children.as_deref().unwrap_or(&[])
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// Replace the children of `parent`, re-deriving parent and sibling links.
    ///
    /// `parent` must be a container.
    pub fn set_children(&mut self, parent: NodeId, children: Vec<NodeId>) {
        debug_assert!(
            self[parent].children.is_some(),
            "set_children on a {} node",
            self[parent].kind.name()
        );

        for (i, &child) in children.iter().enumerate() {
            let node = &mut self[child];
            node.parent = Some(parent);
            node.prev = i.checked_sub(1).map(|p| children[p]);
            node.next = children.get(i + 1).copied();
        }

        if let Some(slot) = &mut self[parent].children {
            *slot = children;
        }
    }

    /// Allocate a copy of `id` with `overrides` applied.
    ///
    /// The copy starts detached; children it carries after the overrides
    /// are re-parented to it.
    pub fn clone_with<F>(&mut self, id: NodeId, overrides: F) -> NodeId
    where
        F: FnOnce(&mut Node),
    {
        let mut node = self[id].clone();
        node.parent = None;
        node.prev = None;
        node.next = None;
        overrides(&mut node);

        let children = node.children.take();
        if children.is_some() {
            node.children = Some(Vec::new());
        }

        let new_id = self.alloc(node);
        if let Some(children) = children {
            self.set_children(new_id, children);
        }
        new_id
    }

    /// Rebuild the tree bottom-up.
    ///
    /// Every node is copied into a fresh tree after its children have been
    /// mapped, with sibling and parent links already derived for the new
    /// child list. `f` then receives the output tree and the copy's ID and
    /// returns the ID that should take the node's place: the same ID after
    /// editing it, or a different node entirely. `f` runs exactly once per
    /// node, children before parents.
    ///
    /// The result is compacted: nodes no longer reachable from the root are
    /// dropped and IDs are renumbered in depth-first pre-order.
    pub fn map<F>(&self, mut f: F) -> Tree
    where
        F: FnMut(&mut Tree, NodeId) -> NodeId,
    {
        let mut out = Tree {
            nodes: Vec::with_capacity(self.nodes.len()),
        };
        let root = self.map_node(NodeId::ROOT, &mut out, &mut f);
        out.compact(root)
    }

    fn map_node<F>(&self, id: NodeId, out: &mut Tree, f: &mut F) -> NodeId
    where
        F: FnMut(&mut Tree, NodeId) -> NodeId,
    {
        let source = &self[id];
        let children = source.children.as_ref().map(|children| {
            children
                .iter()
                .map(|&child| self.map_node(child, out, f))
                .collect::<Vec<_>>()
        });

        let new_id = out.alloc(Node {
            kind: source.kind.clone(),
            span: source.span,
            parent: None,
            prev: None,
            next: None,
            children: children.as_ref().map(|_| Vec::new()),
            annotations: source.annotations,
        });
        if let Some(children) = children {
            out.set_children(new_id, children);
        }

        f(out, new_id)
    }

    /// Rebuild the tree with per-node attribute overrides.
    ///
    /// The structure is kept as is. `f` gets the input tree (to look at
    /// neighbours as they were before this rebuild), the node's ID and the
    /// output copy of the node to edit.
    pub fn map_annotations<F>(&self, mut f: F) -> Tree
    where
        F: FnMut(&Tree, NodeId, &mut Node),
    {
        let mut out = self.clone();
        for id in self.iter_dfs() {
            f(self, id, &mut out[id]);
        }
        out
    }

    /// Visit every node reachable from the root, parents before children.
    pub fn walk<F>(&self, mut visitor: F)
    where
        F: FnMut(&Tree, NodeId),
    {
        for id in self.iter_dfs() {
            visitor(self, id);
        }
    }

    /// Iterate over all reachable nodes in depth-first pre-order.
    pub fn iter_dfs(&self) -> DfsIter<'_> {
        DfsIter {
            tree: self,
            stack: vec![NodeId::ROOT],
        }
    }

    /// Check that every span lies within `source` on character boundaries.
    pub fn check_spans(&self, source: &SourceText<'_>) -> Result<()> {
        for id in self.iter_dfs() {
            let node = &self[id];
            source.slice(&node.span)?;
            if let Some(element) = node.as_element() {
                source.slice(&element.start_span)?;
                if let Some(end_span) = &element.end_span {
                    source.slice(end_span)?;
                }
            }
        }
        Ok(())
    }

    /// Structural comparison, independent of node IDs.
    ///
    /// Returns the first node (in pre-order) whose payload, span,
    /// annotations or child count differ.
    pub fn diff(&self, other: &Tree) -> Option<Divergence> {
        let mut path = Vec::new();
        diff_nodes(self, NodeId::ROOT, other, NodeId::ROOT, &mut path)
    }

    /// Copy the subtree at `root` into a fresh tree in pre-order.
    fn compact(mut self, root: NodeId) -> Tree {
        let mut out = Tree {
            nodes: Vec::with_capacity(self.nodes.len()),
        };
        self.move_subtree(root, None, &mut out);
        out
    }

    fn move_subtree(&mut self, id: NodeId, parent: Option<NodeId>, out: &mut Tree) -> NodeId {
        let node = &mut self.nodes[id.index()];
        let children = node.children.take();
        let new_id = out.alloc(Node {
            kind: std::mem::replace(&mut node.kind, NodeKind::Root),
            span: node.span,
            parent,
            prev: None,
            next: None,
            children: children.as_ref().map(|_| Vec::new()),
            annotations: node.annotations,
        });

        if let Some(children) = children {
            let ids = children
                .into_iter()
                .map(|child| self.move_subtree(child, Some(new_id), out))
                .collect();
            out.set_children(new_id, ids);
        }
        new_id
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

impl IndexMut<NodeId> for Tree {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }
}

impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        self.diff(other).is_none()
    }
}

impl Eq for Tree {}

/// The first point at which two trees differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divergence {
    /// Child indices leading from the root to the differing node.
    pub path: Vec<usize>,
    pub left: String,
    pub right: String,
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trees diverge at /")?;
        for (i, index) in self.path.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{index}")?;
        }
        write!(f, ": {} != {}", self.left, self.right)
    }
}

fn diff_nodes(
    left: &Tree,
    left_id: NodeId,
    right: &Tree,
    right_id: NodeId,
    path: &mut Vec<usize>,
) -> Option<Divergence> {
    let (a, b) = (&left[left_id], &right[right_id]);
    let same = a.kind == b.kind
        && a.span == b.span
        && a.annotations == b.annotations
        && a.children.as_ref().map(Vec::len) == b.children.as_ref().map(Vec::len);
    if !same {
        return Some(Divergence {
            path: path.clone(),
            left: describe(a),
            right: describe(b),
        });
    }

    for (i, (&l, &r)) in left
        .children(left_id)
        .iter()
        .zip(right.children(right_id))
        .enumerate()
    {
        path.push(i);
        if let Some(divergence) = diff_nodes(left, l, right, r, path) {
            return Some(divergence);
        }
        path.pop();
    }
    None
}

fn describe(node: &Node) -> String {
    let children = match &node.children {
        Some(children) => children.len().to_string(),
        None => "-".to_string(),
    };
    format!(
        "{:?} @{}..{} children={} {:?}",
        node.kind, node.span.start.offset, node.span.end.offset, children, node.annotations
    )
}

/// Depth-first iterator over all reachable nodes.
pub struct DfsIter<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl Iterator for DfsIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;

        // Push children in reverse order so they're visited left-to-right
        self.stack
            .extend(self.tree.children(current).iter().rev().copied());

        Some(current)
    }
}
