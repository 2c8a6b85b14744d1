//! DOCX serialization of a rendered [`Document`].

use std::io::Cursor;

use docx_rs::{IndentLevel, NumberingId, RunFonts};
use log::debug;

use crate::document::{Document, Paragraph, ParagraphStyle, Run};
use crate::error::{Error, Result};
use crate::template::{StyleSource, Template};

const CODE_FONT: &str = "Courier New";

/// Write `document` into `template` and pack the result as `.docx` bytes.
pub fn write(document: &Document, template: Template) -> Result<Vec<u8>> {
    let paragraphs: Vec<_> = document
        .paragraphs
        .iter()
        .map(|paragraph| build_paragraph(paragraph, &template))
        .collect();

    let mut docx = template.into_docx();
    for paragraph in paragraphs {
        docx = docx.add_paragraph(paragraph);
    }

    let mut buffer = Vec::new();
    docx.build()
        .pack(&mut Cursor::new(&mut buffer))
        .map_err(|e| Error::Pack(e.into()))?;

    debug!(
        "packed {} paragraphs into {} bytes",
        document.paragraphs.len(),
        buffer.len()
    );
    Ok(buffer)
}

fn build_paragraph(paragraph: &Paragraph, template: &Template) -> docx_rs::Paragraph {
    let mut para = docx_rs::Paragraph::new();

    if let Some(style) = paragraph.style {
        // Templates may define the style under a localized id
        let logical = style.style_id();
        para = para.style(template.resolve(&logical).unwrap_or(logical.as_str()));
        if style == ParagraphStyle::ListNumber
            && let Some(id) = template.list_numbering()
        {
            para = para.numbering(NumberingId::new(id), IndentLevel::new(0));
        }
    }

    for run in &paragraph.runs {
        para = para.add_run(build_run(run));
    }
    para
}

fn build_run(run: &Run) -> docx_rs::Run {
    let mut out = docx_rs::Run::new().add_text(&run.text);
    if run.bold {
        out = out.bold();
    }
    if run.italic {
        out = out.italic();
    }
    if run.code {
        out = out.fonts(
            RunFonts::new()
                .ascii(CODE_FONT)
                .hi_ansi(CODE_FONT)
                .east_asia(CODE_FONT)
                .cs(CODE_FONT),
        );
    }
    out
}
