//! DOCX output tests
//!
//! Parses the sample essay, renders it, reopens the package and reads the
//! paragraphs back to check order, styles and layout.

use std::io::Cursor;

use essaydoc_ooxml::writer::{STYLE_HEADING, STYLE_METADATA, STYLE_NORMAL, STYLE_TITLE};
use essaydoc_ooxml::{
    read_archive_paragraphs, read_paragraph_texts, DocxWriter, OoxmlArchive, StyleProfile,
};

const SAMPLE_ESSAY: &str = include_str!("../../../demos/essay.txt");

fn render(profile: StyleProfile) -> OoxmlArchive {
    let doc = essaydoc_core::parse(SAMPLE_ESSAY).unwrap();
    let bytes = DocxWriter::new(profile).generate(&doc).unwrap();
    OoxmlArchive::from_reader(Cursor::new(bytes)).unwrap()
}

#[test]
fn test_paragraph_order_and_styles() {
    let doc = essaydoc_core::parse(SAMPLE_ESSAY).unwrap();
    let archive = render(StyleProfile::default());
    let paras = read_archive_paragraphs(&archive).unwrap();

    // Title page
    assert_eq!(paras[0].style_id.as_deref(), Some(STYLE_TITLE));
    assert_eq!(paras[0].text, doc.title);
    for (i, line) in doc.metadata_lines.iter().enumerate() {
        assert_eq!(paras[1 + i].style_id.as_deref(), Some(STYLE_METADATA));
        assert_eq!(&paras[1 + i].text, line);
    }
    assert!(paras[5].page_break);

    // Body mirrors the document exactly
    let body: Vec<(&str, &str)> = paras[6..]
        .iter()
        .map(|p| (p.style_id.as_deref().unwrap_or(""), p.text.as_str()))
        .collect();

    let mut expected = Vec::new();
    for section in &doc.sections {
        expected.push((STYLE_HEADING, section.heading.as_str()));
        for paragraph in &section.paragraphs {
            expected.push((STYLE_NORMAL, paragraph.as_str()));
        }
    }
    assert_eq!(body, expected);
}

#[test]
fn test_reference_line_kept_inside_paragraph() {
    let archive = render(StyleProfile::default());
    let paras = read_archive_paragraphs(&archive).unwrap();

    let first_body = paras
        .iter()
        .find(|p| p.text.starts_with("Idiopathic short stature (ISS)"))
        .unwrap();
    assert!(first_body.text.contains("excluded.\nReference: Cohen P"));
}

#[test]
fn test_no_sentinels_in_output() {
    let archive = render(StyleProfile::default());
    let texts = read_paragraph_texts(archive.document_xml().unwrap()).unwrap();
    assert!(!texts.is_empty());
    assert!(texts.iter().all(|t| t != "[" && t != "]" && t != "---"));
}

#[test]
fn test_profile_margins_and_spacing() {
    let profile = StyleProfile::from_toml_str(
        r#"
line_spacing = "single"

[margins]
top = 0.5
"#,
    )
    .unwrap();
    let archive = render(profile);

    let document = archive.text("word/document.xml").unwrap();
    assert!(document.contains(r#"w:top="720""#));
    assert!(document.contains(r#"w:left="1440""#));

    let styles = archive.text("word/styles.xml").unwrap();
    assert!(styles.contains(r#"w:line="240""#));
}

#[test]
fn test_write_to_file_and_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("essay.docx");

    let doc = essaydoc_core::parse(SAMPLE_ESSAY).unwrap();
    DocxWriter::default().write_to_file(&doc, &path).unwrap();

    let archive = OoxmlArchive::open(&path).unwrap();
    assert!(archive.contains("[Content_Types].xml"));
    assert!(archive.contains("docProps/core.xml"));
    assert_eq!(
        read_archive_paragraphs(&archive).unwrap().len(),
        1 + doc.metadata_lines.len() + 1 + doc.heading_count() + doc.paragraph_count()
    );
}
