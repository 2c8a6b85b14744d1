mod config;
mod document;
mod docx;
mod error;
mod list_state;
mod parser;
mod preview;
mod render;
mod steps;
mod template;
mod token;

pub use config::{Config, ExportConfig, OrderedListStyle, Settings};
pub use document::{Document, Paragraph, ParagraphStyle, Run};
pub use error::{Error, Result};
pub use list_state::ListState;
pub use preview::render_preview;
pub use render::{fill, render_document};
pub use steps::{Step, Steps, steps};
pub use template::{LIST_NUMBER_ID, StyleSet, StyleSource, Template};
pub use token::{Inline, InlineNode, ListKind, Token};

use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::debug;

/// Parse markdown text into a flat token stream.
pub fn tokenize(markdown: &str) -> Vec<Token> {
    parser::tokenize(markdown)
}

/// Convert markdown to the normalized Markdown preview.
pub fn markdown_to_preview(markdown: &str, settings: &Settings) -> String {
    if markdown.is_empty() {
        return String::new();
    }
    render_preview(&tokenize(markdown), settings)
}

/// Convert markdown to a document body using the styles of `styles`.
pub fn markdown_to_document(
    markdown: &str,
    settings: &Settings,
    styles: &impl StyleSource,
) -> Document {
    render_document(&tokenize(markdown), settings, styles)
}

/// Convert markdown to `.docx` bytes.
///
/// A missing or unreadable template is reported with `log::warn!` and the
/// built-in styles are used instead.
pub fn markdown_to_docx(
    markdown: &str,
    settings: &Settings,
    template: Option<&Path>,
) -> Result<Vec<u8>> {
    markdown_to_docx_with_progress(markdown, settings, template, |_| {})
}

fn markdown_to_docx_with_progress(
    markdown: &str,
    settings: &Settings,
    template: Option<&Path>,
    mut progress: impl FnMut(u8),
) -> Result<Vec<u8>> {
    if markdown.is_empty() {
        return Err(Error::EmptyInput);
    }
    progress(10);

    let template = Template::open_or_default(template);
    progress(30);

    let document = markdown_to_document(markdown, settings, &template);
    docx::write(&document, template)
}

/// Convert markdown and write the `.docx` file to `output`.
pub fn export_docx(
    markdown: &str,
    output: &Path,
    settings: &Settings,
    template: Option<&Path>,
) -> Result<()> {
    export_docx_with_progress(markdown, output, settings, template, |_| {})
}

/// Like [`export_docx`], reporting progress as a percentage (10, 30, 100).
pub fn export_docx_with_progress(
    markdown: &str,
    output: &Path,
    settings: &Settings,
    template: Option<&Path>,
    mut progress: impl FnMut(u8),
) -> Result<()> {
    let bytes = markdown_to_docx_with_progress(markdown, settings, template, &mut progress)?;

    let mut file = File::create(output)?;
    file.write_all(&bytes)?;
    file.flush()?;

    debug!("wrote {} ({} bytes)", output.display(), bytes.len());
    progress(100);
    Ok(())
}

/// Convert a markdown file on disk to a `.docx` file.
pub fn convert_file(
    input: &Path,
    output: &Path,
    settings: &Settings,
    template: Option<&Path>,
) -> Result<()> {
    if !input.exists() {
        return Err(Error::InputNotFound(input.to_path_buf()));
    }
    let markdown = std::fs::read_to_string(input)?;
    export_docx(&markdown, output, settings, template)
}
