//! CSS keyword types and the enum_property! macro.

use super::ToCss;

/// Macro for defining CSS keyword enums with automatic ToCss implementation.
///
/// # Example
///
/// ```ignore
/// enum_property! {
///     /// Text wrapping.
///     pub enum TextWrap {
///         #[default]
///         Wrap => "wrap",
///         Nowrap => "nowrap",
///     }
/// }
/// ```
macro_rules! enum_property {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $css:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $name {
            /// Returns the CSS keyword for this value.
            #[inline]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $css,)*
                }
            }

            /// Parse a CSS keyword into this enum.
            #[inline]
            pub fn from_css(s: &str) -> Option<Self> {
                match s {
                    $($css => Some($name::$variant),)*
                    _ => None,
                }
            }
        }

        impl ToCss for $name {
            fn to_css(&self, buf: &mut String) {
                buf.push_str(self.as_str());
            }
        }
    };
}

enum_property! {
    /// Effective `display` category of a node.
    ///
    /// `Inline` is the default and also what nodes without a display of
    /// their own (text, comments, unknown elements) resolve to.
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub enum CssDisplay {
        #[default]
        Inline => "inline",
        Block => "block",
        InlineBlock => "inline-block",
        ListItem => "list-item",
        None => "none",
        Table => "table",
        InlineTable => "inline-table",
        TableCaption => "table-caption",
        TableColumnGroup => "table-column-group",
        TableColumn => "table-column",
        TableHeaderGroup => "table-header-group",
        TableRowGroup => "table-row-group",
        TableFooterGroup => "table-footer-group",
        TableRow => "table-row",
        TableCell => "table-cell",
        Flex => "flex",
        InlineFlex => "inline-flex",
        Grid => "grid",
        InlineGrid => "inline-grid",
        FlowRoot => "flow-root",
        Contents => "contents",
        Ruby => "ruby",
        RubyBase => "ruby-base",
        RubyText => "ruby-text",
        RubyBaseContainer => "ruby-base-container",
        RubyTextContainer => "ruby-text-container",
    }
}

impl CssDisplay {
    /// Block, list-item and the `table*` family start a new line in layout.
    ///
    /// Flex and grid containers do not: whitespace around them is kept.
    pub fn is_block_like(self) -> bool {
        matches!(self, CssDisplay::Block | CssDisplay::ListItem) || self.as_str().starts_with("table")
    }

    /// Whether whitespace before the first child of a box with this display matters.
    pub fn is_first_child_leading_space_sensitive(self) -> bool {
        !self.is_block_like() && self != CssDisplay::InlineBlock
    }

    /// Whether whitespace after the last child of a box with this display matters.
    pub fn is_last_child_trailing_space_sensitive(self) -> bool {
        !self.is_block_like() && self != CssDisplay::InlineBlock
    }

    /// Whether whitespace after a previous sibling with this display matters.
    pub fn is_prev_trailing_space_sensitive(self) -> bool {
        !self.is_block_like()
    }

    /// Whether whitespace before a next sibling with this display matters.
    pub fn is_next_leading_space_sensitive(self) -> bool {
        !self.is_block_like()
    }

    /// Whether whitespace inside an empty box with this display matters.
    pub fn is_dangling_space_sensitive(self) -> bool {
        !self.is_block_like() && self != CssDisplay::InlineBlock
    }
}

enum_property! {
    /// CSS white-space handling.
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub enum WhiteSpace {
        /// Collapse whitespace, wrap lines.
        #[default]
        Normal => "normal",
        /// Collapse whitespace but don't wrap lines.
        Nowrap => "nowrap",
        /// Preserve whitespace and newlines, don't wrap lines.
        Pre => "pre",
        /// Preserve whitespace and newlines, wrap lines.
        PreWrap => "pre-wrap",
        /// Collapse whitespace except newlines, wrap lines.
        PreLine => "pre-line",
    }
}

impl WhiteSpace {
    /// `pre`, `pre-wrap` and `pre-line` keep the author's line structure.
    pub fn is_pre(self) -> bool {
        self.as_str().starts_with("pre")
    }
}
