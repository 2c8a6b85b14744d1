/// Named paragraph style applied to an output paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphStyle {
    /// `Heading 1` through `Heading 6`.
    Heading(u8),
    /// Native numbered list paragraph.
    ListNumber,
}

impl ParagraphStyle {
    /// Style id as it appears in `word/styles.xml`.
    pub fn style_id(&self) -> String {
        match self {
            ParagraphStyle::Heading(level) => format!("Heading{}", (*level).clamp(1, 6)),
            ParagraphStyle::ListNumber => "ListNumber".to_string(),
        }
    }
}

/// A run of uniformly formatted text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    /// Set in a fixed-width font.
    pub code: bool,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    /// `None` is the body (Normal) style.
    pub style: Option<ParagraphStyle>,
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn new(style: Option<ParagraphStyle>) -> Self {
        Self {
            style,
            runs: Vec::new(),
        }
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// Word document body produced by the document renderer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a paragraph and return it for filling.
    pub fn add_paragraph(&mut self, style: Option<ParagraphStyle>) -> &mut Paragraph {
        self.paragraphs.push(Paragraph::new(style));
        let last = self.paragraphs.len() - 1;
        &mut self.paragraphs[last]
    }

    /// Plain text of every paragraph, one per line.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
