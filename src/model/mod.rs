//! Core data model for markup trees.
//!
//! This module contains:
//! - Source text and span bookkeeping
//! - Node payloads and pass annotations
//! - The arena tree and its rebuild primitives

mod node;
mod span;
mod tree;

// Re-export node types
pub use node::{Annotations, Attribute, Element, Node, NodeId, NodeKind, TagDefinition};

// Re-export source positions
pub use span::{SourceLocation, SourceSpan, SourceText};

// Re-export tree and iteration
pub use tree::{DfsIter, Divergence, Tree};
