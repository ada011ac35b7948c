//! CSS knowledge needed to decide whitespace significance.
//!
//! This module contains:
//! - Keyword types for `display` and `white-space`
//! - User-agent default tables by tag name
//! - Inline `style` attribute parsing

mod defaults;
mod inline;
mod properties;

/// Serialize a value as CSS.
pub trait ToCss {
    /// Write this value as CSS to the buffer.
    fn to_css(&self, buf: &mut String);

    /// Convert to a CSS string (convenience method).
    fn to_css_string(&self) -> String {
        let mut buf = String::new();
        self.to_css(&mut buf);
        buf
    }
}

pub use defaults::{default_display, default_white_space};
pub use inline::InlineStyle;
pub use properties::{CssDisplay, WhiteSpace};
