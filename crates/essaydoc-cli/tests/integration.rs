//! Integration tests for the essaydoc CLI
//!
//! Each test copies the sample essay into a temp directory, runs a command
//! function and reopens what it wrote.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use essaydoc_cli::{
    build_command, docx_command, inspect_command, parse_command, pptx_command, OutputFormat,
    CONFIG_FILE_NAME,
};
use tempfile::TempDir;
use zip::ZipArchive;

const SAMPLE_ESSAY: &str = include_str!("../../../demos/essay.txt");

fn setup() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("short-stature.txt");
    fs::write(&input, SAMPLE_ESSAY).unwrap();
    (dir, input)
}

fn read_zip_entry(path: &Path, name: &str) -> Option<String> {
    let file = fs::File::open(path).unwrap();
    let mut archive = ZipArchive::new(file).unwrap();
    let mut entry = archive.by_name(name).ok()?;
    let mut content = String::new();
    entry.read_to_string(&mut content).unwrap();
    Some(content)
}

#[test]
fn test_parse_text_summary() {
    let (_dir, input) = setup();
    let summary = parse_command(&input, OutputFormat::Text, None).unwrap();

    assert!(summary.starts_with(
        "Title: Perspectives on Idiopathic Short Stature: An Academic Essay for Medical Trainees\n"
    ));
    assert!(summary.contains("  Student: [Your Name Here]\n"));
    assert!(summary.contains("Sections: 3\n"));
    assert!(summary.contains("  1. Introduction (3 paragraph(s))\n"));
}

#[test]
fn test_parse_json_output() {
    let (_dir, input) = setup();
    let json = parse_command(&input, OutputFormat::Json, None).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["metadata_lines"].as_array().unwrap().len(), 4);
    assert_eq!(value["sections"].as_array().unwrap().len(), 3);
    assert_eq!(value["sections"][0]["heading"], "1. Introduction");
}

#[test]
fn test_parse_failure_has_context() {
    let (dir, _) = setup();
    let input = dir.path().join("bad.txt");
    fs::write(&input, "Title only\n").unwrap();

    let err = parse_command(&input, OutputFormat::Text, None).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("Failed to parse essay"));
    assert!(message.contains("Missing metadata"));
}

#[test]
fn test_missing_input() {
    let dir = TempDir::new().unwrap();
    let err = docx_command(&dir.path().join("absent.txt"), None, None).unwrap_err();
    assert!(err.to_string().contains("Input file not found"));
}

#[test]
fn test_docx_default_output_name() {
    let (dir, input) = setup();
    let path = docx_command(&input, None, None).unwrap();

    assert_eq!(path, dir.path().join("short-stature.docx"));
    let document = read_zip_entry(&path, "word/document.xml").unwrap();
    assert!(document.contains("1. Introduction"));
    assert!(document.contains("3. Conclusion"));
}

#[test]
fn test_pptx_explicit_output() {
    let (dir, input) = setup();
    let output = dir.path().join("deck.pptx");
    let path = pptx_command(&input, Some(&output), None).unwrap();

    assert_eq!(path, output);
    assert!(read_zip_entry(&path, "ppt/slides/slide4.xml").is_some());
    assert!(read_zip_entry(&path, "ppt/slides/slide5.xml").is_none());
}

#[test]
fn test_build_writes_both_files() {
    let (dir, input) = setup();
    let out_dir = dir.path().join("out").join("nested");

    let (docx, pptx) = build_command(&input, Some(&out_dir), None).unwrap();

    assert_eq!(docx, out_dir.join("short-stature.docx"));
    assert_eq!(pptx, out_dir.join("short-stature.pptx"));
    assert!(read_zip_entry(&docx, "word/styles.xml").is_some());
    assert!(read_zip_entry(&pptx, "ppt/presentation.xml").is_some());
}

#[test]
fn test_config_file_applies_to_both_outputs() {
    let (dir, input) = setup();
    let config = dir.path().join("custom.toml");
    fs::write(
        &config,
        r#"
[docx]
font_name = "Georgia"

[pptx.fonts]
family = "Verdana"

[pptx.bullets]
limit = 1
"#,
    )
    .unwrap();

    let (docx, pptx) = build_command(&input, None, Some(&config)).unwrap();

    let styles = read_zip_entry(&docx, "word/styles.xml").unwrap();
    assert!(styles.contains(r#"w:ascii="Georgia""#));

    let slide = read_zip_entry(&pptx, "ppt/slides/slide2.xml").unwrap();
    assert!(slide.contains(r#"typeface="Verdana""#));
    assert_eq!(slide.matches(r#"<a:pPr lvl="0"/>"#).count(), 1);
}

#[test]
fn test_sibling_config_is_discovered() {
    let (dir, input) = setup();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[docx]\ntitle_page_break = false\n",
    )
    .unwrap();

    let path = docx_command(&input, None, None).unwrap();
    let document = read_zip_entry(&path, "word/document.xml").unwrap();
    assert!(!document.contains(r#"w:type="page""#));
}

#[test]
fn test_inspect_generated_docx() {
    let (_dir, input) = setup();
    let path = docx_command(&input, None, None).unwrap();

    let listing = inspect_command(&path, OutputFormat::Text).unwrap();
    let lines: Vec<&str> = listing.lines().collect();

    assert!(lines[0].starts_with("[Title] Perspectives on Idiopathic Short Stature"));
    assert_eq!(lines[1], "[EssayMetadata] Prepared for: Faculty of Medicine");
    assert!(lines.contains(&"--- page break ---"));
    assert!(lines.contains(&"[Heading1] 2. Normal Growth and Physiology"));
}

#[test]
fn test_inspect_json_listing() {
    let (_dir, input) = setup();
    let path = docx_command(&input, None, None).unwrap();

    let json = inspect_command(&path, OutputFormat::Json).unwrap();
    let paragraphs: serde_json::Value = serde_json::from_str(&json).unwrap();
    let paragraphs = paragraphs.as_array().unwrap();

    assert_eq!(paragraphs[0]["style_id"], "Title");
    assert!(paragraphs
        .iter()
        .any(|p| p["style_id"] == "Heading1" && p["text"] == "2. Normal Growth and Physiology"));
    assert!(paragraphs.iter().any(|p| p["page_break"] == true));
}

#[test]
fn test_inspect_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = inspect_command(&dir.path().join("absent.docx"), OutputFormat::Text).unwrap_err();
    assert!(err.to_string().contains("Input file not found"));
}
