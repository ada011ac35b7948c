//! Pipeline scenario tests.
//!
//! Each test builds a small document, runs the whole pipeline or a single
//! pass, and checks the annotated tree.

use prepress::testing::SourceBuilder;
use prepress::{
    CssDisplay, Dialect, NodeId, NodeKind, Options, PASSES, Tree, WhitespaceSensitivity,
    preprocess,
};

/// Run a single pass by name.
fn run_pass(tree: &Tree, options: &Options<'_>, name: &str) -> Tree {
    let (_, pass) = PASSES
        .iter()
        .find(|(pass_name, _)| *pass_name == name)
        .expect("unknown pass");
    pass(tree, options)
}

fn text_values(tree: &Tree, parent: NodeId) -> Vec<Option<String>> {
    tree.children(parent)
        .iter()
        .map(|&id| tree[id].text_value().map(str::to_string))
        .collect()
}

// ============================================================================
// Whitespace Tests
// ============================================================================

#[test]
fn test_whitespace_around_text_becomes_flags() {
    let mut b = SourceBuilder::new();
    b.open("span");
    b.text("\n  hello  \n");
    b.close();
    let (text, tree) = b.finish();

    let result = preprocess(&tree, &Options::new(&text)).unwrap();

    let span = result.first_child(NodeId::ROOT).unwrap();
    let [hello] = result.children(span) else {
        panic!("container gained extra children");
    };
    let hello = &result[*hello];
    assert_eq!(hello.text_value(), Some("hello"));
    assert_eq!(hello.annotations.has_leading_spaces, Some(true));
    assert_eq!(hello.annotations.has_trailing_spaces, Some(true));
    assert_eq!(&text[hello.span.range()], "hello");
}

#[test]
fn test_whitespace_only_child_dangles() {
    let mut b = SourceBuilder::new();
    b.open("div");
    b.text("   \n ");
    b.close();
    let (text, tree) = b.finish();

    let result = preprocess(&tree, &Options::new(&text)).unwrap();

    let div = result.first_child(NodeId::ROOT).unwrap();
    assert_eq!(result[div].children, Some(vec![]));
    assert_eq!(result[div].annotations.has_dangling_spaces, Some(true));
    assert_eq!(result[div].annotations.is_dangling_space_sensitive, Some(false));
}

#[test]
fn test_textarea_content_is_kept_verbatim() {
    let mut b = SourceBuilder::new();
    b.open("textarea");
    b.text("\n  line one\n  line two\n");
    b.close();
    let (text, tree) = b.finish();

    let result = preprocess(&tree, &Options::new(&text)).unwrap();

    let textarea = result.first_child(NodeId::ROOT).unwrap();
    assert_eq!(
        text_values(&result, textarea),
        vec![Some("  line one\n  line two\n".to_string())]
    );
    let annotations = result[textarea].annotations;
    assert_eq!(annotations.is_whitespace_sensitive, Some(true));
    assert_eq!(annotations.is_indentation_sensitive, Some(true));
}

#[test]
fn test_script_is_whitespace_sensitive_but_not_indentation_sensitive() {
    let mut b = SourceBuilder::new();
    b.open("script");
    b.text("\n  let x = 1;\n");
    b.close();
    let (text, tree) = b.finish();

    let result = preprocess(&tree, &Options::new(&text)).unwrap();

    let script = result.first_child(NodeId::ROOT).unwrap();
    assert_eq!(result[script].annotations.is_whitespace_sensitive, Some(true));
    assert_eq!(result[script].annotations.is_indentation_sensitive, Some(false));
    assert_eq!(
        text_values(&result, script),
        vec![Some("\n  let x = 1;\n".to_string())]
    );
}

// ============================================================================
// Folding Tests
// ============================================================================

#[test]
fn test_ignorable_first_lf() {
    let mut b = SourceBuilder::new();
    b.open("pre");
    b.text("\nfoo");
    b.close();
    let (text, tree) = b.finish();
    let before = tree[tree.first_child(tree.first_child(NodeId::ROOT).unwrap()).unwrap()].span;

    let result = run_pass(&tree, &Options::new(&text), "strip-leading-lf");

    let pre = result.first_child(NodeId::ROOT).unwrap();
    let foo = &result[result.first_child(pre).unwrap()];
    assert_eq!(foo.text_value(), Some("foo"));
    assert_eq!(foo.span.start.offset, before.start.offset + 1);
    assert_eq!(foo.span.end, before.end);
}

#[test]
fn test_ie_conditional_comment_folds_into_element() {
    let mut b = SourceBuilder::new();
    b.ie_conditional_start("lt IE 9");
    b.open("div");
    b.ie_conditional_end();
    b.text("content");
    b.close();
    let (text, tree) = b.finish();
    assert_eq!(
        text,
        "<!--[if lt IE 9]><!--><div><!--<![endif]-->content</div>"
    );

    let result = preprocess(&tree, &Options::new(&text)).unwrap();

    let [div] = result.children(NodeId::ROOT) else {
        panic!("conditional comments should not remain as siblings");
    };
    let element = result[*div].as_element().unwrap();
    assert_eq!(element.condition.as_deref(), Some("lt IE 9"));
    assert_eq!(element.start_span.start.offset, 0);
    assert_eq!(
        &text[element.start_span.range()],
        "<!--[if lt IE 9]><!--><div><!--<![endif]-->"
    );
    assert_eq!(text_values(&result, *div), vec![Some("content".to_string())]);
}

#[test]
fn test_cdata_becomes_text() {
    let mut b = SourceBuilder::new();
    b.open("svg:svg");
    b.text("a");
    b.cdata("x < y");
    b.close();
    let (text, tree) = b.finish();

    let result = preprocess(&tree, &Options::new(&text)).unwrap();

    let svg = result.first_child(NodeId::ROOT).unwrap();
    assert_eq!(
        text_values(&result, svg),
        vec![Some("a<![CDATA[x < y]]>".to_string())]
    );
}

#[test]
fn test_simple_element_folding_needs_text_on_both_sides() {
    let mut b = SourceBuilder::new();
    b.open("p");
    b.text("x");
    b.open("em");
    b.text("y");
    b.close();
    b.close();
    b.open("p");
    b.text("x");
    b.open("em");
    b.text("y");
    b.close();
    b.text("z");
    b.close();
    let (text, tree) = b.finish();

    let result = preprocess(&tree, &Options::new(&text)).unwrap();

    let [first, second] = result.children(NodeId::ROOT) else {
        panic!("expected two paragraphs");
    };
    assert_eq!(result.children(*first).len(), 2);
    assert_eq!(
        text_values(&result, *second),
        vec![Some("x<em>y</em>z".to_string())]
    );
}

// ============================================================================
// Interpolation Tests
// ============================================================================

#[test]
fn test_interpolation_split_spans() {
    let mut b = SourceBuilder::new();
    b.text("a{{b}}c");
    let (text, tree) = b.finish();
    let options = Options::new(&text).with_dialect(Dialect::Angular);

    let result = run_pass(&tree, &options, "extract-interpolation");

    let children = result.children(NodeId::ROOT);
    assert_eq!(children.len(), 3);
    let ranges: Vec<_> = children.iter().map(|&id| result[id].span.range()).collect();
    assert_eq!(ranges, vec![0..1, 1..6, 6..7]);
    assert_eq!(result[children[1]].kind, NodeKind::Interpolation);
    assert_eq!(
        text_values(&result, children[1]),
        vec![Some("b".to_string())]
    );
}

#[test]
fn test_html_dialect_keeps_braces() {
    let mut b = SourceBuilder::new();
    b.open("p");
    b.text("a{{b}}c");
    b.close();
    let (text, tree) = b.finish();

    let result = preprocess(&tree, &Options::new(&text)).unwrap();

    let p = result.first_child(NodeId::ROOT).unwrap();
    assert_eq!(text_values(&result, p), vec![Some("a{{b}}c".to_string())]);
}

#[test]
fn test_interpolations_are_sensitive_to_adjacent_text() {
    let mut b = SourceBuilder::new();
    b.open("div");
    b.text("Total: {{ total }} items");
    b.close();
    let (text, tree) = b.finish();
    let options = Options::new(&text).with_dialect(Dialect::Vue);

    let result = preprocess(&tree, &options).unwrap();

    let div = result.first_child(NodeId::ROOT).unwrap();
    let children = result.children(div);
    assert_eq!(children.len(), 3);
    let interpolation = &result[children[1]];
    assert!(interpolation.is_leading_space_sensitive());
    assert!(interpolation.is_trailing_space_sensitive());
    assert!(interpolation.has_leading_spaces());
    assert!(interpolation.has_trailing_spaces());
}

// ============================================================================
// Display and Closing Tag Tests
// ============================================================================

#[test]
fn test_display_drives_sensitivity() {
    let mut b = SourceBuilder::new();
    b.open("div");
    b.open("button");
    b.text("ok");
    b.close();
    b.text(" ");
    b.open("span");
    b.text("more");
    b.close();
    b.close();
    let (text, tree) = b.finish();

    let result = preprocess(&tree, &Options::new(&text)).unwrap();

    let div = result.first_child(NodeId::ROOT).unwrap();
    let [button, span] = result.children(div) else {
        panic!("expected two children");
    };
    assert_eq!(result[*button].css_display(), CssDisplay::InlineBlock);
    assert!(result[*button].is_trailing_space_sensitive());
    assert!(result[*span].is_leading_space_sensitive());

    let ignored = preprocess(
        &tree,
        &Options::new(&text).with_whitespace_sensitivity(WhitespaceSensitivity::Ignore),
    )
    .unwrap();
    let div = ignored.first_child(NodeId::ROOT).unwrap();
    let [button, _] = ignored.children(div) else {
        panic!("expected two children");
    };
    assert!(!ignored[*button].is_trailing_space_sensitive());
}

#[test]
fn test_closing_tags() {
    let mut b = SourceBuilder::new();
    b.void("img");
    b.self_closing("x-icon");
    b.open("Item");
    b.close_with("<//>");
    b.open("div");
    b.close();
    let (text, tree) = b.finish();
    let options = Options::new(&text).with_dialect(Dialect::Vue);

    let result = preprocess(&tree, &options).unwrap();

    let flags: Vec<_> = result
        .children(NodeId::ROOT)
        .iter()
        .map(|&id| {
            let node = &result[id];
            let component = node.as_element().and_then(|e| e.has_component_closing_tag);
            (node.is_self_closing(), component)
        })
        .collect();
    assert_eq!(
        flags,
        vec![
            (true, Some(false)),
            (true, Some(false)),
            (false, Some(true)),
            (false, Some(false)),
        ]
    );
}

// ============================================================================
// Pipeline Tests
// ============================================================================

#[test]
fn test_every_derived_attribute_is_filled() {
    let mut b = SourceBuilder::new();
    b.doctype("DOCTYPE html");
    b.open("body");
    b.text(" text ");
    b.comment(" note ");
    b.open("ul");
    b.open("li");
    b.close();
    b.close();
    b.close();
    let (text, tree) = b.finish();

    let result = preprocess(&tree, &Options::new(&text)).unwrap();

    for id in result.iter_dfs() {
        let node = &result[id];
        assert!(node.annotations.css_display.is_some(), "{id:?}");
        assert!(node.annotations.is_self_closing.is_some(), "{id:?}");
        if node.parent.is_some() {
            assert!(node.annotations.has_leading_spaces.is_some(), "{id:?}");
            assert!(node.annotations.is_leading_space_sensitive.is_some(), "{id:?}");
            assert!(node.annotations.is_trailing_space_sensitive.is_some(), "{id:?}");
        }
        if node.children.as_ref().is_some_and(Vec::is_empty) {
            assert!(node.annotations.has_dangling_spaces.is_some(), "{id:?}");
            assert!(node.annotations.is_dangling_space_sensitive.is_some(), "{id:?}");
        }
    }
}

#[test]
fn test_input_tree_is_not_modified() {
    let mut b = SourceBuilder::new();
    b.open("p");
    b.text("  a<![CDATA[b]]>  ");
    b.close();
    let (text, tree) = b.finish();
    let snapshot = tree.clone();

    let result = preprocess(&tree, &Options::new(&text)).unwrap();

    assert_eq!(tree.diff(&snapshot), None);
    assert!(tree.diff(&result).is_some());
}

#[test]
fn test_pass_order() {
    let names: Vec<_> = PASSES.iter().map(|(name, _)| *name).collect();
    assert_eq!(
        names,
        vec![
            "strip-leading-lf",
            "fold-ie-conditionals",
            "fold-cdata",
            "extract-interpolation",
            "extract-whitespace",
            "css-display",
            "self-closing",
            "component-closing-tag",
            "space-sensitivity",
            "fold-simple-elements",
        ]
    );
}
