//! Tree node types.

use std::borrow::Cow;

use super::SourceSpan;
use crate::style::CssDisplay;

/// Unique identifier for a node within a [`Tree`](super::Tree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

impl NodeId {
    /// The root node ID (always 0).
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Tag semantics supplied by the parser's tag table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagDefinition {
    /// The element never has content or a closing tag (`<br>`, `<img>`).
    pub is_void: bool,
    /// A newline directly after the opening tag is not content (`<pre>`).
    pub ignore_first_lf: bool,
}

impl TagDefinition {
    /// Definition of a standard HTML element.
    ///
    /// Parser adapters with a tag table of their own should fill the
    /// definition from it instead.
    pub fn html(name: &str) -> Self {
        let name = name.to_ascii_lowercase();
        Self {
            is_void: matches!(
                name.as_str(),
                "area"
                    | "base"
                    | "basefont"
                    | "bgsound"
                    | "br"
                    | "col"
                    | "embed"
                    | "frame"
                    | "hr"
                    | "img"
                    | "input"
                    | "keygen"
                    | "link"
                    | "meta"
                    | "param"
                    | "source"
                    | "track"
                    | "wbr"
            ),
            ignore_first_lf: matches!(name.as_str(), "pre" | "textarea" | "listing"),
        }
    }
}

/// An element attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Element payload.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    /// Tag name as written in the source.
    pub name: String,
    /// Namespace prefix (`svg` for `<svg:style>`).
    pub namespace: Option<String>,
    pub attrs: Vec<Attribute>,
    pub tag: TagDefinition,
    /// Span of the opening tag.
    pub start_span: SourceSpan,
    /// Span of the closing tag. `None` for unterminated elements; equal to
    /// `start_span` for self-terminated ones (`<x />`).
    pub end_span: Option<SourceSpan>,
    /// Condition of an IE conditional comment folded into the opening tag.
    pub condition: Option<String>,
    /// Closing tag written in component style (`<//>`).
    pub has_component_closing_tag: Option<bool>,
}

impl Element {
    /// Create an element with the standard HTML tag definition for `name`.
    pub fn new(name: impl Into<String>, start_span: SourceSpan) -> Self {
        let name = name.into();
        Self {
            tag: TagDefinition::html(&name),
            name,
            namespace: None,
            attrs: Vec::new(),
            start_span,
            end_span: None,
            condition: None,
            has_component_closing_tag: None,
        }
    }

    pub fn with_attrs(mut self, attrs: Vec<Attribute>) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_tag(mut self, tag: TagDefinition) -> Self {
        self.tag = tag;
        self
    }

    pub fn with_end_span(mut self, end_span: Option<SourceSpan>) -> Self {
        self.end_span = end_span;
        self
    }

    /// Name including the namespace prefix, e.g. `svg:style`.
    pub fn full_name(&self) -> Cow<'_, str> {
        match &self.namespace {
            Some(namespace) => Cow::Owned(format!("{namespace}:{}", self.name)),
            None => Cow::Borrowed(&self.name),
        }
    }

    /// Value of the first attribute called `name` (ASCII case-insensitive).
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
            .map(|attr| attr.value.as_str())
    }
}

/// Kind-specific payload of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// Document root.
    Root,
    Element(Element),
    Text { value: String },
    Comment { value: String },
    Cdata { value: String },
    /// `{{ expression }}`; holds zero or one text child with the expression.
    Interpolation,
    Doctype { value: String },
    /// `<!--[if COND]><!-->`
    IeConditionalStartComment { condition: String },
    /// `<!--<![endif]-->`
    IeConditionalEndComment,
}

impl NodeKind {
    /// Short name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Element(_) => "element",
            NodeKind::Text { .. } => "text",
            NodeKind::Comment { .. } => "comment",
            NodeKind::Cdata { .. } => "cdata",
            NodeKind::Interpolation => "interpolation",
            NodeKind::Doctype { .. } => "doctype",
            NodeKind::IeConditionalStartComment { .. } => "ie-conditional-start-comment",
            NodeKind::IeConditionalEndComment => "ie-conditional-end-comment",
        }
    }

    /// Whether nodes of this kind carry a child list at all.
    pub fn can_have_children(&self) -> bool {
        matches!(
            self,
            NodeKind::Root | NodeKind::Element(_) | NodeKind::Interpolation
        )
    }
}

/// Attributes computed by the preprocessing passes.
///
/// Every field is `None` until the pass that owns it has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Annotations {
    pub css_display: Option<CssDisplay>,
    /// Whitespace was removed directly before this node.
    pub has_leading_spaces: Option<bool>,
    /// Whitespace was removed directly after this node.
    pub has_trailing_spaces: Option<bool>,
    /// Container whose only content was whitespace.
    pub has_dangling_spaces: Option<bool>,
    pub is_leading_space_sensitive: Option<bool>,
    pub is_trailing_space_sensitive: Option<bool>,
    pub is_dangling_space_sensitive: Option<bool>,
    pub is_whitespace_sensitive: Option<bool>,
    pub is_indentation_sensitive: Option<bool>,
    pub is_self_closing: Option<bool>,
}

/// A node in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub kind: NodeKind,
    pub span: SourceSpan,
    /// Parent node (None for the root and for detached nodes).
    pub parent: Option<NodeId>,
    /// Previous sibling.
    pub prev: Option<NodeId>,
    /// Next sibling.
    pub next: Option<NodeId>,
    /// Ordered children; `None` for kinds that cannot have any.
    pub children: Option<Vec<NodeId>>,
    pub annotations: Annotations,
}

impl Node {
    /// Create a detached node of the given kind.
    pub fn new(kind: NodeKind, span: SourceSpan) -> Self {
        let children = kind.can_have_children().then(Vec::new);
        Self {
            kind,
            span,
            parent: None,
            prev: None,
            next: None,
            children,
            annotations: Annotations::default(),
        }
    }

    pub fn root(span: SourceSpan) -> Self {
        Self::new(NodeKind::Root, span)
    }

    pub fn element(element: Element, span: SourceSpan) -> Self {
        Self::new(NodeKind::Element(element), span)
    }

    pub fn text(value: impl Into<String>, span: SourceSpan) -> Self {
        Self::new(
            NodeKind::Text {
                value: value.into(),
            },
            span,
        )
    }

    pub fn comment(value: impl Into<String>, span: SourceSpan) -> Self {
        Self::new(
            NodeKind::Comment {
                value: value.into(),
            },
            span,
        )
    }

    pub fn cdata(value: impl Into<String>, span: SourceSpan) -> Self {
        Self::new(
            NodeKind::Cdata {
                value: value.into(),
            },
            span,
        )
    }

    pub fn doctype(value: impl Into<String>, span: SourceSpan) -> Self {
        Self::new(
            NodeKind::Doctype {
                value: value.into(),
            },
            span,
        )
    }

    pub fn interpolation(span: SourceSpan) -> Self {
        Self::new(NodeKind::Interpolation, span)
    }

    pub fn ie_conditional_start(condition: impl Into<String>, span: SourceSpan) -> Self {
        Self::new(
            NodeKind::IeConditionalStartComment {
                condition: condition.into(),
            },
            span,
        )
    }

    pub fn ie_conditional_end(span: SourceSpan) -> Self {
        Self::new(NodeKind::IeConditionalEndComment, span)
    }

    pub fn as_element(&self) -> Option<&Element> {
        match &self.kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match &mut self.kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    /// The value of a text node.
    pub fn text_value(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text { value } => Some(value),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text { .. })
    }

    /// Text and interpolations flow together as inline content.
    pub fn is_text_like(&self) -> bool {
        matches!(self.kind, NodeKind::Text { .. } | NodeKind::Interpolation)
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element(_))
    }

    /// The computed display, `inline` before the display pass has run.
    pub fn css_display(&self) -> CssDisplay {
        self.annotations.css_display.unwrap_or_default()
    }

    pub fn has_leading_spaces(&self) -> bool {
        self.annotations.has_leading_spaces.unwrap_or(false)
    }

    pub fn has_trailing_spaces(&self) -> bool {
        self.annotations.has_trailing_spaces.unwrap_or(false)
    }

    pub fn has_dangling_spaces(&self) -> bool {
        self.annotations.has_dangling_spaces.unwrap_or(false)
    }

    pub fn is_leading_space_sensitive(&self) -> bool {
        self.annotations.is_leading_space_sensitive.unwrap_or(false)
    }

    pub fn is_trailing_space_sensitive(&self) -> bool {
        self.annotations.is_trailing_space_sensitive.unwrap_or(false)
    }

    pub fn is_self_closing(&self) -> bool {
        self.annotations.is_self_closing.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_presence_follows_kind() {
        let span = SourceSpan::default();
        assert_eq!(Node::root(span).children, Some(Vec::new()));
        assert_eq!(Node::interpolation(span).children, Some(Vec::new()));
        assert_eq!(Node::text("x", span).children, None);
        assert_eq!(Node::cdata("x", span).children, None);
        assert_eq!(Node::ie_conditional_end(span).children, None);
    }

    #[test]
    fn test_html_tag_definitions() {
        assert!(TagDefinition::html("br").is_void);
        assert!(TagDefinition::html("IMG").is_void);
        assert!(!TagDefinition::html("div").is_void);
        assert!(TagDefinition::html("pre").ignore_first_lf);
        assert!(TagDefinition::html("textarea").ignore_first_lf);
        assert!(!TagDefinition::html("p").ignore_first_lf);
    }

    #[test]
    fn test_element_full_name_and_attrs() {
        let element = Element::new("style", SourceSpan::default())
            .with_namespace("svg")
            .with_attrs(vec![Attribute::new("Type", "text/css")]);

        assert_eq!(element.full_name(), "svg:style");
        assert_eq!(element.attr("type"), Some("text/css"));
        assert_eq!(element.attr("media"), None);
    }

    #[test]
    fn test_annotations_default_absent() {
        let node = Node::text("x", SourceSpan::default());
        assert_eq!(node.annotations, Annotations::default());
        assert!(node.annotations.css_display.is_none());
        assert!(!node.has_leading_spaces());
        assert_eq!(node.css_display(), CssDisplay::Inline);
    }
}
