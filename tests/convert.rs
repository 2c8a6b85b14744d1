use std::fs;
use std::path::Path;

use puredoc::{Error, OrderedListStyle, Settings, Template};

fn settings(ignore_bullets: bool, ordered_list_style: OrderedListStyle) -> Settings {
    Settings {
        ignore_bullets,
        ordered_list_style,
    }
}

fn body_texts(path: &Path) -> Vec<String> {
    let bytes = fs::read(path).unwrap();
    let docx = docx_rs::read_docx(&bytes).unwrap();
    docx.document
        .children
        .iter()
        .filter_map(|child| match child {
            docx_rs::DocumentChild::Paragraph(p) => Some(p.raw_text()),
            _ => None,
        })
        .collect()
}

/// Paragraph style id and numbering id of each body paragraph.
fn body_styles(path: &Path) -> Vec<(Option<String>, Option<usize>)> {
    let bytes = fs::read(path).unwrap();
    let docx = docx_rs::read_docx(&bytes).unwrap();
    docx.document
        .children
        .iter()
        .filter_map(|child| match child {
            docx_rs::DocumentChild::Paragraph(p) => Some((
                p.property.style.as_ref().map(|s| s.val.clone()),
                p.property
                    .numbering_property
                    .as_ref()
                    .and_then(|n| n.id.as_ref())
                    .map(|id| id.id),
            )),
            _ => None,
        })
        .collect()
}

fn write_template(path: &Path, styles: &[(&str, &str)]) {
    let mut docx = docx_rs::Docx::new();
    for (id, name) in styles {
        docx = docx.add_style(docx_rs::Style::new(*id, docx_rs::StyleType::Paragraph).name(*name));
    }
    let mut buffer = Vec::new();
    docx.build()
        .pack(&mut std::io::Cursor::new(&mut buffer))
        .unwrap();
    fs::write(path, buffer).unwrap();
}

const SAMPLE: &str = "# Report\n\nIntro with **bold** text.\n\n- first point\nstill first\n- second point\n\n3. three\n4. four\n";

#[test]
fn export_writes_docx() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("report.docx");

    puredoc::export_docx(
        SAMPLE,
        &output,
        &settings(false, OrderedListStyle::Text),
        None,
    )
    .unwrap();

    assert_eq!(
        body_texts(&output),
        vec![
            "Report",
            "Intro with bold text.",
            "• first point",
            "still first",
            "• second point",
            "3. three",
            "4. four",
        ]
    );
}

#[test]
fn empty_input_is_rejected_before_touching_disk() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("empty.docx");

    let err = puredoc::export_docx("", &output, &Settings::default(), None).unwrap_err();
    assert!(matches!(err, Error::EmptyInput));
    assert!(!output.exists());
    assert_eq!(puredoc::markdown_to_preview("", &Settings::default()), "");
}

#[test]
fn missing_template_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.docx");
    let template = dir.path().join("nope.docx");

    puredoc::export_docx("1. a\n2. b", &output, &Settings::default(), Some(&template)).unwrap();
    assert_eq!(body_texts(&output), vec!["1. a", "2. b"]);
}

#[test]
fn template_without_list_style_numbers_manually() {
    let dir = tempfile::tempdir().unwrap();

    // A template whose only style is Normal
    let mut buffer = Vec::new();
    docx_rs::Docx::new()
        .add_style(docx_rs::Style::new("Normal", docx_rs::StyleType::Paragraph).name("Normal"))
        .add_paragraph(
            docx_rs::Paragraph::new().add_run(docx_rs::Run::new().add_text("template body")),
        )
        .build()
        .pack(&mut std::io::Cursor::new(&mut buffer))
        .unwrap();
    let template = dir.path().join("plain.docx");
    fs::write(&template, buffer).unwrap();

    let output = dir.path().join("out.docx");
    puredoc::export_docx(
        "1. alpha\n2. beta",
        &output,
        &settings(true, OrderedListStyle::List),
        Some(&template),
    )
    .unwrap();

    assert_eq!(body_texts(&output), vec!["1. alpha", "2. beta"]);
}

#[test]
fn native_list_style_with_builtin_template() {
    let template = Template::builtin();
    let doc = puredoc::markdown_to_document(
        "1. alpha\n2. beta",
        &settings(true, OrderedListStyle::List),
        &template,
    );
    assert_eq!(doc.text(), "alpha\nbeta");
    assert!(
        doc.paragraphs
            .iter()
            .all(|p| p.style == Some(puredoc::ParagraphStyle::ListNumber))
    );
}

#[test]
fn progress_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("progress.docx");
    let mut seen = Vec::new();

    puredoc::export_docx_with_progress(
        "hello",
        &output,
        &Settings::default(),
        None,
        |p| seen.push(p),
    )
    .unwrap();

    assert_eq!(seen, vec![10, 30, 100]);
}

#[test]
fn convert_file_reads_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.md");
    let output = dir.path().join("notes.docx");
    fs::write(&input, "## Notes\n\n- a\n- b\n").unwrap();

    puredoc::convert_file(&input, &output, &Settings::default(), None).unwrap();
    assert_eq!(body_texts(&output), vec!["Notes", "a", "b"]);
}

#[test]
fn convert_file_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let err = puredoc::convert_file(
        &dir.path().join("missing.md"),
        &dir.path().join("out.docx"),
        &Settings::default(),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, Error::InputNotFound(_)));
}

#[test]
fn export_is_repeatable() {
    let settings = settings(false, OrderedListStyle::Text);
    let first = puredoc::markdown_to_document(SAMPLE, &settings, &Template::builtin());
    let second = puredoc::markdown_to_document(SAMPLE, &settings, &Template::builtin());
    assert_eq!(first, second);
    assert_eq!(
        puredoc::markdown_to_preview(SAMPLE, &settings),
        puredoc::markdown_to_preview(SAMPLE, &settings)
    );
}

#[test]
fn preview_and_export_agree_on_markers() {
    let settings = settings(false, OrderedListStyle::Text);
    let md = "- one\n- two\n\n1. x\n2. y";
    assert_eq!(
        puredoc::markdown_to_preview(md, &settings),
        "• one\n• two\n1. x\n2. y"
    );
    let doc = puredoc::markdown_to_document(md, &settings, &Template::builtin());
    assert_eq!(doc.text(), "• one\n• two\n1. x\n2. y");
}

#[test]
fn list_style_export_sets_numbering() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("list.docx");

    puredoc::export_docx(
        "1. alpha\n2. beta",
        &output,
        &settings(true, OrderedListStyle::List),
        None,
    )
    .unwrap();

    assert_eq!(body_texts(&output), vec!["alpha", "beta"]);
    let numbered = (
        Some("ListNumber".to_string()),
        Some(puredoc::LIST_NUMBER_ID),
    );
    assert_eq!(body_styles(&output), vec![numbered.clone(), numbered]);
}

#[test]
fn localized_template_styles_are_used() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("localized.docx");
    write_template(
        &template,
        &[("a", "Normal"), ("1", "heading 1"), ("a5", "List Number")],
    );

    let output = dir.path().join("out.docx");
    puredoc::export_docx(
        "# Title\n\n1. a\n2. b",
        &output,
        &settings(true, OrderedListStyle::List),
        Some(&template),
    )
    .unwrap();

    assert_eq!(body_texts(&output), vec!["Title", "a", "b"]);
    assert_eq!(
        body_styles(&output),
        vec![
            (Some("1".to_string()), None),
            (Some("a5".to_string()), None),
            (Some("a5".to_string()), None),
        ]
    );
}
