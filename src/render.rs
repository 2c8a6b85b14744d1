use log::{debug, warn};

use crate::config::{OrderedListStyle, Settings};
use crate::document::{Document, ParagraphStyle, Run};
use crate::list_state::ListState;
use crate::steps::{Step, steps};
use crate::template::StyleSource;
use crate::token::{Inline, InlineNode, ListKind, Token};

/// Render tokens into a Word document body.
///
/// `styles` answers which named paragraph styles exist; a missing native
/// numbered-list style falls back to manual numbering item by item.
pub fn render_document(
    tokens: &[Token],
    settings: &Settings,
    styles: &impl StyleSource,
) -> Document {
    let list_style = ParagraphStyle::ListNumber.style_id();
    let mut state = RenderState {
        doc: Document::new(),
        lists: ListState::new(),
        settings,
        native_numbering: styles.has_style(&list_style),
        fallback_reported: false,
    };

    for step in steps(tokens) {
        match step {
            Step::EnterList { kind, start } => state.lists.enter(kind, start),
            Step::ExitList(kind) => state.lists.exit(kind),
            Step::Heading {
                level,
                inline: Some(inline),
            } => {
                state.doc.add_paragraph(Some(ParagraphStyle::Heading(level)));
                // Wrapped heading lines continue in the body style
                fill(&mut state.doc, inline, None);
            }
            Step::Paragraph(inline) => state.paragraph(inline),
            Step::Heading { inline: None, .. } | Step::Loose(_) | Step::ParagraphEnd => {}
        }
    }

    debug!(
        "rendered {} paragraphs from {} tokens",
        state.doc.paragraphs.len(),
        tokens.len()
    );
    state.doc
}

struct RenderState<'a> {
    doc: Document,
    lists: ListState,
    settings: &'a Settings,
    native_numbering: bool,
    fallback_reported: bool,
}

impl RenderState<'_> {
    /// Paragraph or list item body, with its bullet or number.
    fn paragraph(&mut self, inline: &Inline) {
        let (style, prefix) = match self.lists.current() {
            Some(ListKind::Bullet) if !self.settings.ignore_bullets => {
                (None, Some("• ".to_string()))
            }
            Some(ListKind::Ordered) => {
                // Consumed once per item whichever way it is numbered
                let ordinal = self.lists.next_ordinal();
                match self.settings.ordered_list_style {
                    OrderedListStyle::Text => (None, Some(format!("{ordinal}. "))),
                    OrderedListStyle::List if self.native_numbering => {
                        (Some(ParagraphStyle::ListNumber), None)
                    }
                    OrderedListStyle::List => {
                        self.report_fallback();
                        (None, Some(format!("{ordinal}. ")))
                    }
                    OrderedListStyle::None => (None, None),
                }
            }
            _ => (None, None),
        };

        let paragraph = self.doc.add_paragraph(style);
        if let Some(prefix) = prefix {
            paragraph.runs.push(Run::plain(prefix));
        }
        // Continuation lines never repeat the marker or list style
        fill(&mut self.doc, inline, None);
    }

    fn report_fallback(&mut self) {
        if !self.fallback_reported {
            warn!("style source has no ListNumber style, numbering list items manually");
            self.fallback_reported = true;
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct RunFormat {
    bold: bool,
    italic: bool,
    code: bool,
}

/// Append the runs of `inline` to the last paragraph of `doc`.
///
/// Line breaks, and newlines inside text, start new paragraphs styled with
/// `continuation`. Bold and italic carry over into those paragraphs.
pub fn fill(doc: &mut Document, inline: &Inline, continuation: Option<ParagraphStyle>) {
    if inline.children.is_empty() {
        add_text(doc, &inline.content, RunFormat::default(), continuation);
        return;
    }

    let matched = match_markers(&inline.children);
    let mut format = RunFormat::default();

    for (child, matched) in inline.children.iter().zip(matched) {
        match child {
            InlineNode::StrongOpen if matched => format.bold = true,
            InlineNode::StrongClose if matched => format.bold = false,
            InlineNode::EmphasisOpen if matched => format.italic = true,
            InlineNode::EmphasisClose if matched => format.italic = false,
            InlineNode::StrongOpen
            | InlineNode::StrongClose
            | InlineNode::EmphasisOpen
            | InlineNode::EmphasisClose => {}
            InlineNode::SoftBreak | InlineNode::HardBreak => {
                doc.add_paragraph(continuation);
            }
            InlineNode::Text(text) => add_text(doc, text, format, continuation),
            InlineNode::Code(code) => {
                let format = RunFormat {
                    code: true,
                    ..format
                };
                add_text(doc, code, format, continuation);
            }
            InlineNode::Image => {}
        }
    }
}

fn add_text(
    doc: &mut Document,
    text: &str,
    format: RunFormat,
    continuation: Option<ParagraphStyle>,
) {
    for (i, segment) in text.split('\n').enumerate() {
        if i > 0 {
            doc.add_paragraph(continuation);
        }
        if segment.is_empty() {
            continue;
        }
        if let Some(paragraph) = doc.paragraphs.last_mut() {
            paragraph.runs.push(Run {
                text: segment.to_string(),
                bold: format.bold,
                italic: format.italic,
                code: format.code,
            });
        }
    }
}

/// Mark which formatting markers have a partner within the same inline
/// token. Unpaired markers are ignored by [`fill`].
fn match_markers(children: &[InlineNode]) -> Vec<bool> {
    let mut matched = vec![false; children.len()];
    let mut strong = Vec::new();
    let mut emphasis = Vec::new();

    for (i, child) in children.iter().enumerate() {
        let (open, stack) = match child {
            InlineNode::StrongOpen => (true, &mut strong),
            InlineNode::StrongClose => (false, &mut strong),
            InlineNode::EmphasisOpen => (true, &mut emphasis),
            InlineNode::EmphasisClose => (false, &mut emphasis),
            _ => {
                matched[i] = true;
                continue;
            }
        };
        if open {
            stack.push(i);
        } else if let Some(start) = stack.pop() {
            matched[start] = true;
            matched[i] = true;
        }
    }

    matched
}
