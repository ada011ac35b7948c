//! # prepress
//!
//! Preprocessing for markup pretty-printers.
//!
//! A markup parser produces a tree of elements, text and comments with
//! source spans. Before a printer can lay that tree out it needs to know,
//! for every node, whether the whitespace around it is significant. This
//! crate runs the passes that work that out and returns an annotated tree.
//!
//! ## Features
//!
//! - Arena [`Tree`] with index links and pure rebuild primitives
//! - Folding of IE conditional comments, CDATA and trivial inline elements
//! - `{{ }}` interpolation extraction for template dialects
//! - CSS `display` and `white-space` driven whitespace sensitivity
//!
//! ## Quick Start
//!
//! ```
//! use prepress::testing::SourceBuilder;
//! use prepress::{preprocess, Dialect, NodeId, Options};
//!
//! let mut b = SourceBuilder::new();
//! b.open("div");
//! b.text("\n  Hello {{ name }}!\n");
//! b.close();
//! let (text, tree) = b.finish();
//!
//! let options = Options::new(&text).with_dialect(Dialect::Vue);
//! let tree = preprocess(&tree, &options).unwrap();
//!
//! let div = tree.first_child(NodeId::ROOT).unwrap();
//! let first = tree.first_child(div).unwrap();
//! assert_eq!(tree[first].text_value(), Some("Hello"));
//! assert!(tree[first].has_leading_spaces());
//! ```

pub mod error;
pub mod model;
pub mod preprocess;
pub mod style;
pub mod testing;

pub use error::{Error, Result};
pub use model::{
    Annotations, Attribute, Divergence, Element, Node, NodeId, NodeKind, SourceLocation,
    SourceSpan, SourceText, TagDefinition, Tree,
};
pub use preprocess::{Dialect, Options, PASSES, Pass, WhitespaceSensitivity, preprocess};
pub use style::{CssDisplay, WhiteSpace};
