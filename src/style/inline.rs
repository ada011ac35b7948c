//! Inline `style` attribute parsing.
//!
//! Only the two properties that influence whitespace handling are read:
//! `display` and `white-space`. Everything else is skipped.

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser,
};

use super::{CssDisplay, WhiteSpace};

/// Layout-relevant declarations of an inline `style` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InlineStyle {
    pub display: Option<CssDisplay>,
    pub white_space: Option<WhiteSpace>,
}

impl InlineStyle {
    /// Parse the value of a `style` attribute.
    ///
    /// Parsing is lenient: invalid or unknown declarations are ignored and
    /// later declarations win over earlier ones.
    pub fn parse(style_attr: &str) -> Self {
        let mut style = InlineStyle::default();
        let mut input = ParserInput::new(style_attr);
        let mut parser = Parser::new(&mut input);
        let mut decl_parser = InlineDeclarationParser { style: &mut style };

        for result in RuleBodyParser::new(&mut parser, &mut decl_parser) {
            // Ignore errors - lenient parsing
            let _ = result;
        }

        style
    }
}

struct InlineDeclarationParser<'a> {
    style: &'a mut InlineStyle,
}

impl<'i> DeclarationParser<'i> for InlineDeclarationParser<'_> {
    type Declaration = ();
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let is_display = name.eq_ignore_ascii_case("display");
        let is_white_space = name.eq_ignore_ascii_case("white-space");
        if !is_display && !is_white_space {
            // Consume the value so the declaration is skipped quietly
            while input.next().is_ok() {}
            return Ok(());
        }

        let keyword = input.expect_ident_cloned()?.to_ascii_lowercase();
        let _ = input.try_parse(cssparser::parse_important);
        input.expect_exhausted()?;

        if is_display {
            if let Some(display) = CssDisplay::from_css(&keyword) {
                self.style.display = Some(display);
            }
        } else if let Some(white_space) = WhiteSpace::from_css(&keyword) {
            self.style.white_space = Some(white_space);
        }
        Ok(())
    }
}

impl<'i> AtRuleParser<'i> for InlineDeclarationParser<'_> {
    type Prelude = ();
    type AtRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        _name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }
}

impl<'i> QualifiedRuleParser<'i> for InlineDeclarationParser<'_> {
    type Prelude = ();
    type QualifiedRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }
}

impl<'i> RuleBodyItemParser<'i, (), ()> for InlineDeclarationParser<'_> {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}
