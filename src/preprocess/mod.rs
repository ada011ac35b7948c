//! Preprocessing passes.
//!
//! This module turns the raw tree produced by a markup parser into the
//! annotated tree a layout engine consumes. Every pass is a pure function
//! from one tree to the next; none of them edits its input.
//!
//! ## Pipeline Order
//!
//! The order is load-bearing: later passes read what earlier ones computed.
//!
//! 1. **Strip Leading LF** - Drop the newline a `<pre>`-like element ignores
//! 2. **IE Conditionals** - Fold `<!--[if]><!-->` markers into the element
//! 3. **CDATA** - Turn CDATA sections into literal text
//! 4. **Interpolation** - Split `{{ }}` expressions out of text
//! 5. **Whitespace** - Strip insignificant whitespace, record where it was
//! 6. **Display** - Compute each node's CSS display category
//! 7. **Self-Closing** - Mark nodes printed without a closing tag
//! 8. **Component Closing** - Detect `<//>` closing tags
//! 9. **Sensitivity** - Decide which whitespace boundaries are significant
//! 10. **Simple Elements** - Fold trivial inline elements into their text

mod closing;
mod conditional;
mod display;
mod first_lf;
mod interpolation;
mod merge;
mod pass;
mod predicates;
mod sensitivity;
mod whitespace;

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::model::{SourceText, Tree};

pub use predicates::{
    html_trim, is_dangling_space_sensitive, is_html_whitespace, is_indentation_sensitive,
    is_leading_space_sensitive, is_script_like, is_trailing_space_sensitive,
    is_whitespace_sensitive,
};

/// Markup dialect the tree was parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dialect {
    #[default]
    Html,
    Vue,
    Angular,
}

impl Dialect {
    /// Whether text may contain `{{ expression }}` interpolations.
    pub fn has_interpolation(self) -> bool {
        !matches!(self, Dialect::Html)
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(Dialect::Html),
            "vue" => Ok(Dialect::Vue),
            "angular" => Ok(Dialect::Angular),
            _ => Err(Error::UnknownOption {
                option: "dialect",
                value: s.to_string(),
            }),
        }
    }
}

/// How display categories are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WhitespaceSensitivity {
    /// Follow the CSS `display` of each element.
    #[default]
    Css,
    /// Treat every node as inline, so all whitespace is significant.
    Strict,
    /// Treat every node as a block, so whitespace between nodes is not.
    Ignore,
}

impl FromStr for WhitespaceSensitivity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "css" => Ok(WhitespaceSensitivity::Css),
            "strict" => Ok(WhitespaceSensitivity::Strict),
            "ignore" => Ok(WhitespaceSensitivity::Ignore),
            _ => Err(Error::UnknownOption {
                option: "whitespace sensitivity",
                value: s.to_string(),
            }),
        }
    }
}

/// Read-only configuration shared by all passes.
#[derive(Debug, Clone)]
pub struct Options<'a> {
    pub dialect: Dialect,
    pub whitespace_sensitivity: WhitespaceSensitivity,
    source: SourceText<'a>,
}

impl<'a> Options<'a> {
    /// Options for a tree parsed from `original_text`.
    pub fn new(original_text: &'a str) -> Self {
        Self {
            dialect: Dialect::default(),
            whitespace_sensitivity: WhitespaceSensitivity::default(),
            source: SourceText::new(original_text),
        }
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_whitespace_sensitivity(mut self, sensitivity: WhitespaceSensitivity) -> Self {
        self.whitespace_sensitivity = sensitivity;
        self
    }

    /// The original text the tree's spans point into.
    pub fn source(&self) -> &SourceText<'a> {
        &self.source
    }
}

/// A whole-tree rewrite.
pub type Pass = fn(&Tree, &Options<'_>) -> Tree;

/// All passes, in the order [`preprocess`] runs them.
pub const PASSES: [(&str, Pass); 10] = [
    ("strip-leading-lf", first_lf::strip_leading_lf),
    ("fold-ie-conditionals", conditional::fold_ie_conditionals),
    ("fold-cdata", merge::fold_cdata),
    ("extract-interpolation", interpolation::extract_interpolation),
    ("extract-whitespace", whitespace::extract_whitespace),
    ("css-display", display::add_css_display),
    ("self-closing", closing::add_is_self_closing),
    ("component-closing-tag", closing::add_component_closing_tag),
    ("space-sensitivity", sensitivity::add_space_sensitivity),
    ("fold-simple-elements", merge::fold_simple_elements),
];

/// Run the full pipeline over a parsed tree.
///
/// Every span is checked against the original text first; after that the
/// passes cannot fail. The returned tree is compacted, so its node IDs are
/// in depth-first pre-order.
pub fn preprocess(tree: &Tree, options: &Options<'_>) -> Result<Tree> {
    tree.check_spans(options.source())?;

    let mut current: Option<Tree> = None;
    for (name, pass) in PASSES {
        let input = current.as_ref().unwrap_or(tree);
        let output = pass(input, options);
        if log::log_enabled!(target: "prepress", log::Level::Debug) {
            log::debug!(
                target: "prepress",
                "{name}: {} -> {} nodes",
                input.iter_dfs().count(),
                output.iter_dfs().count()
            );
        }
        current = Some(output);
    }

    Ok(current.unwrap_or_else(|| tree.clone()))
}
