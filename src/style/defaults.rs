//! User-agent defaults for `display` and `white-space` by tag name.
//!
//! These follow the HTML rendering section, with a few adjustments for
//! elements whose browser behaviour is closer to another category than
//! their nominal default (form controls, media, `template`).

use super::{CssDisplay, WhiteSpace};

/// Default `display` of an HTML element, if the element has one.
///
/// Unknown elements return `None`; callers fall back to `inline`.
pub fn default_display(name: &str) -> Option<CssDisplay> {
    let name = name.to_ascii_lowercase();
    let display = match name.as_str() {
        // Hidden by default
        "area" | "base" | "basefont" | "datalist" | "head" | "link" | "meta" | "noembed"
        | "noframes" | "rp" | "style" | "title" => CssDisplay::None,

        // Block containers
        "html" | "body" | "address" | "blockquote" | "center" | "div" | "figure"
        | "figcaption" | "footer" | "form" | "header" | "hr" | "legend" | "listing" | "main"
        | "p" | "plaintext" | "pre" | "xmp" | "article" | "aside" | "h1" | "h2" | "h3" | "h4"
        | "h5" | "h6" | "hgroup" | "nav" | "section" | "dir" | "dd" | "dl" | "dt" | "menu"
        | "ol" | "ul" | "fieldset" | "frameset" | "frame" | "search" => CssDisplay::Block,

        // Not rendered as boxes, but formatted as if they were blocks
        "source" | "track" | "script" | "param" | "details" | "summary" | "dialog"
        | "option" | "optgroup" => CssDisplay::Block,

        "li" => CssDisplay::ListItem,

        // Tables
        "table" => CssDisplay::Table,
        "caption" => CssDisplay::TableCaption,
        "colgroup" => CssDisplay::TableColumnGroup,
        "col" => CssDisplay::TableColumn,
        "thead" => CssDisplay::TableHeaderGroup,
        "tbody" => CssDisplay::TableRowGroup,
        "tfoot" => CssDisplay::TableFooterGroup,
        "tr" => CssDisplay::TableRow,
        "td" | "th" => CssDisplay::TableCell,

        // Replaced and form elements that size like inline blocks
        "input" | "button" | "select" | "video" | "audio" | "meter" | "progress" | "object" => {
            CssDisplay::InlineBlock
        }

        "template" => CssDisplay::Inline,

        _ => return None,
    };
    Some(display)
}

/// Default `white-space` of an HTML element.
pub fn default_white_space(name: &str) -> WhiteSpace {
    let name = name.to_ascii_lowercase();
    match name.as_str() {
        "pre" | "listing" | "xmp" => WhiteSpace::Pre,
        "textarea" | "plaintext" => WhiteSpace::PreWrap,
        "nobr" => WhiteSpace::Nowrap,
        _ => WhiteSpace::Normal,
    }
}
