//! Leading linefeed stripping.
//!
//! Elements like `<pre>` and `<textarea>` ignore a newline directly after
//! their opening tag. The parser keeps it in the first text child; it is
//! removed here so the printer does not treat it as content.

use super::Options;
use super::pass::rewrite_children;
use crate::model::{NodeKind, Tree};

/// Remove the ignorable first linefeed from elements whose tag says so.
pub fn strip_leading_lf(tree: &Tree, options: &Options<'_>) -> Tree {
    rewrite_children(tree, |out, id| {
        let element = out[id].as_element()?;
        if !element.tag.ignore_first_lf {
            return None;
        }

        let first = out.first_child(id)?;
        let rest = out[first].text_value()?.strip_prefix('\n')?.to_string();
        if rest.is_empty() {
            return Some(out.children(id)[1..].to_vec());
        }

        let start = options.source().move_by(out[first].span.start, 1);
        let text = &mut out[first];
        text.kind = NodeKind::Text { value: rest };
        text.span.start = start;
        None
    })
}
