//! Style sources for Word export: a user template with its body removed, or
//! the built-in blank document.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use docx_rs::*;
use log::{debug, warn};

use crate::document::ParagraphStyle;
use crate::error::{Error, Result};

/// Answers which named paragraph styles can be used.
pub trait StyleSource {
    /// The style id to write for `style`, looked up by id or by display
    /// name. Matching ignores case and whitespace, so `List Number`,
    /// `ListNumber` and `listnumber` are the same style.
    fn resolve(&self, style: &str) -> Option<&str>;

    fn has_style(&self, style: &str) -> bool {
        self.resolve(style).is_some()
    }
}

/// Style lookup keyed by normalized id and display name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSet(BTreeMap<String, String>);

impl StyleSet {
    /// Add a style known only by its id.
    pub fn insert(&mut self, style_id: &str) {
        self.0.insert(normalize(style_id), style_id.to_string());
    }

    /// Add a display name for `style_id`. Ids already present keep
    /// precedence over names.
    pub fn insert_name(&mut self, style_id: &str, name: &str) {
        self.0
            .entry(normalize(name))
            .or_insert_with(|| style_id.to_string());
    }
}

impl<'a> FromIterator<&'a str> for StyleSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = StyleSet::default();
        for style_id in iter {
            set.insert(style_id);
        }
        set
    }
}

impl StyleSource for StyleSet {
    fn resolve(&self, style: &str) -> Option<&str> {
        self.0.get(&normalize(style)).map(String::as_str)
    }
}

fn normalize(style_id: &str) -> String {
    style_id
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Display name of a style. `Name` has no accessor but serializes as its
/// string.
fn style_name(style: &Style) -> Option<String> {
    match toml::Value::try_from(&style.name) {
        Ok(toml::Value::String(name)) if !name.is_empty() => Some(name),
        _ => None,
    }
}

/// Numbering instance used by the built-in `ListNumber` style. Id 1 is left
/// to the default numbering docx-rs writes.
pub const LIST_NUMBER_ID: usize = 2;

/// An empty, styled document that rendered paragraphs are written into
pub struct Template {
    docx: Docx,
    styles: StyleSet,
    /// Numbering to attach to `ListNumber` paragraphs, when the style is
    /// ours rather than the template's.
    list_numbering: Option<usize>,
}

impl Template {
    /// Blank document with the default heading and numbered list styles.
    pub fn builtin() -> Self {
        let mut template = Self::from_docx(Docx::new());
        template.ensure_style(Style::new("Normal", StyleType::Paragraph).name("Normal"));
        template.ensure_default_styles();
        template.ensure_list_number_style();
        template
    }

    /// Open a `.docx` file as a style source, dropping its body paragraphs
    /// and tables.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        let mut docx = read_docx(&bytes).map_err(|source| Error::Template {
            path: path.to_path_buf(),
            source,
        })?;

        let before = docx.document.children.len();
        docx.document.children.retain(|child| {
            !matches!(child, DocumentChild::Paragraph(_) | DocumentChild::Table(_))
        });
        debug!(
            "loaded template {} ({} body elements removed)",
            path.display(),
            before - docx.document.children.len()
        );

        let mut template = Self::from_docx(docx);
        template.ensure_default_styles();
        Ok(template)
    }

    /// The template at `path`, or the built-in document when there is none
    /// or it cannot be read.
    pub fn open_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::builtin();
        };
        if !path.exists() {
            warn!("template {} not found, using default styles", path.display());
            return Self::builtin();
        }
        match Self::load(path) {
            Ok(template) => template,
            Err(e) => {
                warn!("{e}, using default styles");
                Self::builtin()
            }
        }
    }

    /// Numbering id for `ListNumber` paragraphs, if the style needs one
    /// attached explicitly.
    pub fn list_numbering(&self) -> Option<usize> {
        self.list_numbering
    }

    pub fn into_docx(self) -> Docx {
        self.docx
    }

    fn from_docx(docx: Docx) -> Self {
        let mut styles = StyleSet::default();
        for style in &docx.styles.styles {
            styles.insert(&style.style_id);
        }
        // Localized templates keep English names under ids like `a5`
        for style in &docx.styles.styles {
            if let Some(name) = style_name(style) {
                styles.insert_name(&style.style_id, &name);
            }
        }
        Self {
            docx,
            styles,
            list_numbering: None,
        }
    }

    /// Headings always resolve. The numbered list style is only added to
    /// the built-in document; a template without it gets manual numbers.
    fn ensure_default_styles(&mut self) {
        for level in 1..=6u8 {
            self.ensure_style(heading_style(level));
        }
    }

    fn ensure_list_number_style(&mut self) {
        let id = ParagraphStyle::ListNumber.style_id();
        if self.styles.has_style(&id) {
            return;
        }
        let style = Style::new(&id, StyleType::Paragraph).name("List Number");
        let docx = std::mem::replace(&mut self.docx, Docx::new());
        self.docx = docx
            .add_style(style)
            .add_abstract_numbering(decimal_numbering(LIST_NUMBER_ID))
            .add_numbering(Numbering::new(LIST_NUMBER_ID, LIST_NUMBER_ID));
        self.styles.insert(&id);
        self.styles.insert_name(&id, "List Number");
        self.list_numbering = Some(LIST_NUMBER_ID);
    }

    fn ensure_style(&mut self, style: Style) {
        if self.styles.has_style(&style.style_id) {
            return;
        }
        self.styles.insert(&style.style_id);
        if let Some(name) = style_name(&style) {
            self.styles.insert_name(&style.style_id, &name);
        }
        let docx = std::mem::replace(&mut self.docx, Docx::new());
        self.docx = docx.add_style(style);
    }
}

impl StyleSource for Template {
    fn resolve(&self, style: &str) -> Option<&str> {
        self.styles.resolve(style)
    }
}

fn heading_style(level: u8) -> Style {
    let size = match level {
        1 => 32,
        2 => 28,
        3 => 26,
        4 => 24,
        5 => 22,
        _ => 20,
    };
    Style::new(
        &ParagraphStyle::Heading(level).style_id(),
        StyleType::Paragraph,
    )
    .name(format!("Heading {level}"))
    .size(size)
    .bold()
}

fn decimal_numbering(id: usize) -> AbstractNumbering {
    AbstractNumbering::new(id).add_level(
        Level::new(
            0,
            Start::new(1),
            NumberFormat::new("decimal"),
            LevelText::new("%1."),
            LevelJc::new("left"),
        )
        .indent(
            Some(720),
            Some(SpecialIndentType::Hanging(360)),
            None,
            None,
        ),
    )
}
