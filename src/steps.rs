//! Pairs block openers with their inline content so renderers never look
//! around in the flat token stream.

use crate::token::{Inline, ListKind, Token};

/// One unit of work for a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    EnterList { kind: ListKind, start: u64 },
    ExitList(ListKind),
    /// A heading and the inline token that immediately follows it.
    Heading {
        level: u8,
        inline: Option<&'a Inline>,
    },
    /// Inline content opened by a paragraph (including list item bodies).
    Paragraph(&'a Inline),
    /// Inline content with no paragraph or heading opener in front of it.
    Loose(&'a Inline),
    ParagraphEnd,
}

/// Walk `tokens`, yielding the renderer steps in document order.
pub fn steps(tokens: &[Token]) -> Steps<'_> {
    Steps { tokens, pos: 0 }
}

pub struct Steps<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Steps<'a> {
    /// Consume the next token if it is inline content.
    fn take_inline(&mut self) -> Option<&'a Inline> {
        let tokens: &'a [Token] = self.tokens;
        match tokens.get(self.pos) {
            Some(Token::Inline(inline)) => {
                self.pos += 1;
                Some(inline)
            }
            _ => None,
        }
    }
}

impl<'a> Iterator for Steps<'a> {
    type Item = Step<'a>;

    fn next(&mut self) -> Option<Step<'a>> {
        let tokens: &'a [Token] = self.tokens;
        while let Some(token) = tokens.get(self.pos) {
            self.pos += 1;
            let step = match token {
                Token::ListOpen { kind, start } => Step::EnterList {
                    kind: *kind,
                    start: *start,
                },
                Token::ListClose(kind) => Step::ExitList(*kind),
                Token::HeadingOpen(level) => Step::Heading {
                    level: *level,
                    inline: self.take_inline(),
                },
                Token::ParagraphOpen => match self.take_inline() {
                    Some(inline) => Step::Paragraph(inline),
                    None => continue,
                },
                Token::Inline(inline) => Step::Loose(inline),
                Token::ParagraphClose => Step::ParagraphEnd,
                Token::ItemOpen
                | Token::ItemClose
                | Token::HeadingClose(_)
                | Token::BlockquoteOpen
                | Token::BlockquoteClose
                | Token::CodeBlock(_)
                | Token::HtmlBlock(_)
                | Token::Rule => continue,
            };
            return Some(step);
        }
        None
    }
}
