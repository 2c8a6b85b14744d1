/// Kind of an open list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Ordered,
}

/// Inline child nodes of an [`Inline`] token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    StrongOpen,
    StrongClose,
    EmphasisOpen,
    EmphasisClose,
    SoftBreak,
    HardBreak,
    Text(String),
    Code(String),
    /// An image; its alt text is not kept.
    Image,
}

/// The run of inline content inside one paragraph or heading
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inline {
    /// Source text of the run, continuation lines unindented.
    pub content: String,
    /// Formatting markers and leaves. Empty for plain-text leaves.
    pub children: Vec<InlineNode>,
}

impl Inline {
    /// A plain-text inline token with no child structure.
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            children: Vec::new(),
        }
    }
}

/// Flat Markdown token stream produced by the parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    ListOpen { kind: ListKind, start: u64 },
    ListClose(ListKind),
    ItemOpen,
    ItemClose,
    HeadingOpen(u8),
    HeadingClose(u8),
    ParagraphOpen,
    ParagraphClose,
    Inline(Inline),
    BlockquoteOpen,
    BlockquoteClose,
    CodeBlock(String),
    HtmlBlock(String),
    Rule,
}
