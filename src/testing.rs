//! Build markup text and its parsed tree side by side.
//!
//! [`SourceBuilder`] plays the part of the markup parser in tests and
//! benchmarks: every call appends markup to the text and the matching node
//! to the tree, so all spans point at exactly the text they came from.
//!
//! ```
//! use prepress::testing::SourceBuilder;
//!
//! let mut b = SourceBuilder::new();
//! b.open("p");
//! b.text("Hello ");
//! b.open("b");
//! b.text("world");
//! b.close();
//! b.close();
//! let (text, tree) = b.finish();
//!
//! assert_eq!(text, "<p>Hello <b>world</b></p>");
//! assert_eq!(tree.iter_dfs().count(), 5);
//! ```

use crate::model::{
    Attribute, Element, Node, NodeId, SourceLocation, SourceSpan, SourceText, Tree,
};

/// Incremental writer for markup text and its tree.
#[derive(Debug)]
pub struct SourceBuilder {
    text: String,
    tree: Tree,
    /// Open containers with the children written so far.
    stack: Vec<(NodeId, Vec<NodeId>)>,
}

impl Default for SourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceBuilder {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            tree: Tree::new(SourceSpan::default()),
            stack: vec![(NodeId::ROOT, Vec::new())],
        }
    }

    /// Text written so far.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Append a text node with `value` as its literal content.
    pub fn text(&mut self, value: &str) -> NodeId {
        let span = self.write(value);
        self.push(Node::text(value, span))
    }

    /// Append `<!--value-->`.
    pub fn comment(&mut self, value: &str) -> NodeId {
        let span = self.write(&format!("<!--{value}-->"));
        self.push(Node::comment(value, span))
    }

    /// Append `<![CDATA[value]]>`.
    pub fn cdata(&mut self, value: &str) -> NodeId {
        let span = self.write(&format!("<![CDATA[{value}]]>"));
        self.push(Node::cdata(value, span))
    }

    /// Append `<!value>`, e.g. `doctype("DOCTYPE html")`.
    pub fn doctype(&mut self, value: &str) -> NodeId {
        let span = self.write(&format!("<!{value}>"));
        self.push(Node::doctype(value, span))
    }

    /// Append `<!--[if condition]><!-->`.
    pub fn ie_conditional_start(&mut self, condition: &str) -> NodeId {
        let span = self.write(&format!("<!--[if {condition}]><!-->"));
        self.push(Node::ie_conditional_start(condition, span))
    }

    /// Append `<!--<![endif]-->`.
    pub fn ie_conditional_end(&mut self) -> NodeId {
        let span = self.write("<!--<![endif]-->");
        self.push(Node::ie_conditional_end(span))
    }

    /// Open an element; `svg:style` gets the `svg` namespace.
    pub fn open(&mut self, name: &str) -> NodeId {
        self.open_with(name, &[])
    }

    /// Open an element with attributes.
    pub fn open_with(&mut self, name: &str, attrs: &[(&str, &str)]) -> NodeId {
        let start_span = self.write(&start_tag(name, attrs, ">"));
        let id = self.push(Node::element(element(name, attrs, start_span), start_span));
        self.stack.push((id, Vec::new()));
        id
    }

    /// Close the innermost open element with `</name>`.
    pub fn close(&mut self) -> NodeId {
        let name = self
            .stack
            .last()
            .and_then(|&(id, _)| self.tree[id].as_element())
            .map(|element| element.full_name().into_owned())
            .unwrap_or_default();
        self.close_with(&format!("</{name}>"))
    }

    /// Close the innermost open element with a literal end tag.
    pub fn close_with(&mut self, end_tag: &str) -> NodeId {
        let end_span = self.write(end_tag);
        self.pop(Some(end_span))
    }

    /// Close the innermost open element without an end tag.
    pub fn close_implied(&mut self) -> NodeId {
        self.pop(None)
    }

    /// Append a void element such as `<br>`.
    pub fn void(&mut self, name: &str) -> NodeId {
        let start_span = self.write(&start_tag(name, &[], ">"));
        self.push(Node::element(element(name, &[], start_span), start_span))
    }

    /// Append a self-terminated element, `<name />`.
    pub fn self_closing(&mut self, name: &str) -> NodeId {
        let start_span = self.write(&start_tag(name, &[], " />"));
        let element = element(name, &[], start_span).with_end_span(Some(start_span));
        self.push(Node::element(element, start_span))
    }

    /// Close everything still open and return the text and its tree.
    ///
    /// Locations get their line and column from the finished text.
    pub fn finish(mut self) -> (String, Tree) {
        while self.stack.len() > 1 {
            self.close_implied();
        }
        if let Some((root, children)) = self.stack.pop() {
            self.tree.set_children(root, children);
        }

        {
            let source = SourceText::new(&self.text);
            let resolve = |span: SourceSpan| source.span(span.range());
            let ids: Vec<_> = self.tree.iter_dfs().collect();
            for id in ids {
                let node = &mut self.tree[id];
                node.span = resolve(node.span);
                if let Some(element) = node.as_element_mut() {
                    element.start_span = resolve(element.start_span);
                    element.end_span = element.end_span.map(resolve);
                }
            }
            self.tree[NodeId::ROOT].span = source.span(0..self.text.len());
        }

        (self.text, self.tree)
    }

    /// Append raw markup and return its span.
    fn write(&mut self, markup: &str) -> SourceSpan {
        let start = self.text.len();
        self.text.push_str(markup);
        SourceSpan::new(at(start), at(self.text.len()))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = self.tree.alloc(node);
        if let Some((_, children)) = self.stack.last_mut() {
            children.push(id);
        }
        id
    }

    fn pop(&mut self, end_span: Option<SourceSpan>) -> NodeId {
        if self.stack.len() <= 1 {
            return NodeId::ROOT;
        }
        let Some((id, children)) = self.stack.pop() else {
            return NodeId::ROOT;
        };

        self.tree.set_children(id, children);
        let end = self.text.len();
        let node = &mut self.tree[id];
        node.span.end = at(end);
        if let Some(element) = node.as_element_mut() {
            element.end_span = end_span;
        }
        id
    }
}

/// Offset-only location; line and column are filled in by `finish`.
fn at(offset: usize) -> SourceLocation {
    SourceLocation {
        offset,
        ..SourceLocation::default()
    }
}

fn start_tag(name: &str, attrs: &[(&str, &str)], close: &str) -> String {
    let mut tag = format!("<{name}");
    for (attr, value) in attrs {
        tag.push_str(&format!(" {attr}=\"{value}\""));
    }
    tag.push_str(close);
    tag
}

fn element(name: &str, attrs: &[(&str, &str)], start_span: SourceSpan) -> Element {
    let attrs = attrs
        .iter()
        .map(|(attr, value)| Attribute::new(*attr, *value))
        .collect();
    match name.split_once(':') {
        Some((namespace, local)) => Element::new(local, start_span)
            .with_namespace(namespace)
            .with_attrs(attrs),
        None => Element::new(name, start_span).with_attrs(attrs),
    }
}
