use std::ops::Range;

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::token::{Inline, InlineNode, ListKind, Token};

/// Parse markdown text into a flat token stream
pub fn tokenize(markdown: &str) -> Vec<Token> {
    let parser = Parser::new_ext(markdown, Options::empty());
    let mut state = ParseState::new(markdown);

    for (event, range) in parser.into_offset_iter() {
        process_event(event, range, &mut state);
    }

    state.flush_inline();
    state.tokens
}

struct ParseState<'a> {
    source: &'a str,
    tokens: Vec<Token>,

    // Inline content being built
    inline: Option<InlineBuilder>,

    // Open list, item and block quote containers, innermost last
    containers: Vec<Container>,
    image_depth: usize,

    // Code and HTML block state
    code_block: Option<String>,
    html_block: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Container {
    List,
    Item,
    Quote,
}

#[derive(Default)]
struct InlineBuilder {
    children: Vec<InlineNode>,
    // Source span covered by inline events
    span: Option<Range<usize>>,
    // Paragraph synthesized for a tight list item
    synthetic: bool,
}

impl InlineBuilder {
    fn cover(&mut self, range: &Range<usize>) {
        self.span = Some(match self.span.take() {
            Some(span) => span.start.min(range.start)..span.end.max(range.end),
            None => range.clone(),
        });
    }

    fn push(&mut self, node: InlineNode) {
        if let InlineNode::Text(text) = &node {
            if let Some(InlineNode::Text(prev)) = self.children.last_mut() {
                prev.push_str(text);
                return;
            }
        }
        self.children.push(node);
    }
}

impl<'a> ParseState<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            inline: None,
            containers: Vec::new(),
            image_depth: 0,
            code_block: None,
            html_block: None,
        }
    }

    fn in_item(&self) -> bool {
        self.containers.last() == Some(&Container::Item)
    }

    fn quote_depth(&self) -> usize {
        self.containers
            .iter()
            .filter(|c| **c == Container::Quote)
            .count()
    }

    fn enter(&mut self, container: Container) {
        self.flush_inline();
        self.containers.push(container);
    }

    fn exit(&mut self) {
        self.flush_inline();
        self.containers.pop();
    }

    /// Inline builder for the current block, opening a paragraph for bare
    /// list item content.
    fn inline_mut(&mut self) -> &mut InlineBuilder {
        if self.inline.is_none() {
            let synthetic = self.in_item();
            if synthetic {
                self.tokens.push(Token::ParagraphOpen);
            }
            self.inline = Some(InlineBuilder {
                synthetic,
                ..Default::default()
            });
        }
        self.inline.get_or_insert_with(InlineBuilder::default)
    }

    fn add_node(&mut self, node: InlineNode, range: &Range<usize>) {
        if self.image_depth > 0 {
            return;
        }
        let builder = self.inline_mut();
        builder.cover(range);
        builder.push(node);
    }

    fn cover(&mut self, range: &Range<usize>) {
        if self.image_depth == 0 {
            self.inline_mut().cover(range);
        }
    }

    fn flush_inline(&mut self) {
        let Some(builder) = self.inline.take() else {
            return;
        };
        let quote_depth = self.quote_depth();
        let content = builder
            .span
            .map(|span| normalize_content(&self.source[span], quote_depth))
            .unwrap_or_default();
        self.tokens.push(Token::Inline(Inline {
            content,
            children: builder.children,
        }));
        if builder.synthetic {
            self.tokens.push(Token::ParagraphClose);
        }
    }
}

fn process_event(event: Event, range: Range<usize>, state: &mut ParseState) {
    // Code and HTML blocks swallow their text
    if let Some(content) = state.code_block.as_mut() {
        match event {
            Event::Text(text) => {
                content.push_str(&text);
                return;
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(content) = state.code_block.take() {
                    state.tokens.push(Token::CodeBlock(content));
                }
                return;
            }
            _ => return,
        }
    }
    if let Some(html) = state.html_block.as_mut() {
        match event {
            Event::Html(text) | Event::Text(text) => {
                html.push_str(&text);
                return;
            }
            Event::End(TagEnd::HtmlBlock) => {
                if let Some(html) = state.html_block.take() {
                    state.tokens.push(Token::HtmlBlock(html));
                }
                return;
            }
            _ => return,
        }
    }

    match event {
        // Headings
        Event::Start(Tag::Heading { level, .. }) => {
            state.flush_inline();
            state.tokens.push(Token::HeadingOpen(heading_level_to_u8(level)));
            state.inline = Some(InlineBuilder::default());
        }
        Event::End(TagEnd::Heading(level)) => {
            state.flush_inline();
            state.tokens.push(Token::HeadingClose(heading_level_to_u8(level)));
        }

        // Paragraphs
        Event::Start(Tag::Paragraph) => {
            state.flush_inline();
            state.tokens.push(Token::ParagraphOpen);
            state.inline = Some(InlineBuilder::default());
        }
        Event::End(TagEnd::Paragraph) => {
            state.flush_inline();
            state.tokens.push(Token::ParagraphClose);
        }

        // Block quotes
        Event::Start(Tag::BlockQuote(_)) => {
            state.enter(Container::Quote);
            state.tokens.push(Token::BlockquoteOpen);
        }
        Event::End(TagEnd::BlockQuote(_)) => {
            state.exit();
            state.tokens.push(Token::BlockquoteClose);
        }

        // Code and HTML blocks
        Event::Start(Tag::CodeBlock(_)) => {
            state.flush_inline();
            state.code_block = Some(String::new());
        }
        Event::Start(Tag::HtmlBlock) => {
            state.flush_inline();
            state.html_block = Some(String::new());
        }

        // Lists
        Event::Start(Tag::List(first_item)) => {
            state.enter(Container::List);
            let token = match first_item {
                Some(start) => Token::ListOpen {
                    kind: ListKind::Ordered,
                    start,
                },
                None => Token::ListOpen {
                    kind: ListKind::Bullet,
                    start: 1,
                },
            };
            state.tokens.push(token);
        }
        Event::End(TagEnd::List(ordered)) => {
            state.exit();
            let kind = if ordered {
                ListKind::Ordered
            } else {
                ListKind::Bullet
            };
            state.tokens.push(Token::ListClose(kind));
        }
        Event::Start(Tag::Item) => {
            state.enter(Container::Item);
            state.tokens.push(Token::ItemOpen);
        }
        Event::End(TagEnd::Item) => {
            state.exit();
            state.tokens.push(Token::ItemClose);
        }

        // Inline formatting
        Event::Start(Tag::Strong) => state.add_node(InlineNode::StrongOpen, &range),
        Event::End(TagEnd::Strong) => state.add_node(InlineNode::StrongClose, &range),
        Event::Start(Tag::Emphasis) => state.add_node(InlineNode::EmphasisOpen, &range),
        Event::End(TagEnd::Emphasis) => state.add_node(InlineNode::EmphasisClose, &range),

        // Links keep their text; images are not rendered
        Event::Start(Tag::Link { .. }) | Event::End(TagEnd::Link) => state.cover(&range),
        Event::Start(Tag::Image { .. }) => {
            state.add_node(InlineNode::Image, &range);
            state.image_depth += 1;
        }
        Event::End(TagEnd::Image) => {
            state.image_depth = state.image_depth.saturating_sub(1);
            state.cover(&range);
        }

        // Leaves
        Event::Text(text) => state.add_node(InlineNode::Text(text.into_string()), &range),
        Event::Code(code) => state.add_node(InlineNode::Code(code.into_string()), &range),
        Event::InlineHtml(_) => state.cover(&range),

        // Single line breaks are hard breaks
        Event::SoftBreak | Event::HardBreak => state.add_node(InlineNode::HardBreak, &range),

        Event::Rule => {
            state.flush_inline();
            state.tokens.push(Token::Rule);
        }

        // Ignore other events
        _ => {}
    }
}

/// Source text of an inline run with continuation lines unindented and
/// block quote markers removed.
fn normalize_content(raw: &str, quote_depth: usize) -> String {
    let mut out = String::with_capacity(raw.len());
    for (i, line) in raw.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
            out.push_str(strip_quote_markers(line, quote_depth).trim_start());
        } else {
            out.push_str(line);
        }
    }
    out.trim_end_matches(['\n', '\r']).to_string()
}

fn strip_quote_markers(mut line: &str, depth: usize) -> &str {
    for _ in 0..depth {
        let trimmed = line.trim_start();
        match trimmed.strip_prefix('>') {
            Some(rest) => line = rest.strip_prefix(' ').unwrap_or(rest),
            None => break,
        }
    }
    line
}

fn heading_level_to_u8(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
