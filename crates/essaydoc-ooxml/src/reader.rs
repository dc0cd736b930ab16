//! Paragraph reader for word/document.xml
//!
//! A flat view of a generated (or hand-edited) document: one entry per
//! `<w:p>` with its paragraph style and visible text. Line breaks become
//! `'\n'`; page breaks mark the paragraph but add no text.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;

use crate::archive::OoxmlArchive;
use crate::error::{OoxmlError, Result};

/// A paragraph as read back from WordprocessingML
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DocxParagraph {
    /// Value of `w:pStyle`, if any
    pub style_id: Option<String>,
    /// Concatenated run text
    pub text: String,
    /// Paragraph contains a `<w:br w:type="page"/>`
    pub page_break: bool,
}

/// Read all body paragraphs from document.xml bytes
pub fn read_paragraphs(xml: &[u8]) -> Result<Vec<DocxParagraph>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut paragraphs = Vec::new();
    let mut buf = Vec::new();
    let mut current: Option<DocxParagraph> = None;
    let mut in_text_element = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"p" => current = Some(DocxParagraph::default()),
                b"t" => in_text_element = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => {
                if let Some(ref mut para) = current {
                    match e.local_name().as_ref() {
                        b"pStyle" => para.style_id = get_attr(e, b"w:val"),
                        b"br" => {
                            if get_attr(e, b"w:type").as_deref() == Some("page") {
                                para.page_break = true;
                            } else {
                                para.text.push('\n');
                            }
                        }
                        b"tab" => para.text.push('\t'),
                        _ => {}
                    }
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"p" => {
                    if let Some(para) = current.take() {
                        paragraphs.push(para);
                    }
                }
                b"t" => in_text_element = false,
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                if in_text_element {
                    if let Some(ref mut para) = current {
                        let text = e.unescape().unwrap_or_default();
                        para.text.push_str(&text);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

/// Paragraph texts only, in document order
pub fn read_paragraph_texts(xml: &[u8]) -> Result<Vec<String>> {
    Ok(read_paragraphs(xml)?.into_iter().map(|p| p.text).collect())
}

/// Read body paragraphs from an opened package
pub fn read_archive_paragraphs(archive: &OoxmlArchive) -> Result<Vec<DocxParagraph>> {
    read_paragraphs(archive.document_xml()?)
}

fn get_attr(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.as_ref() == name)
        .and_then(|a| String::from_utf8(a.value.to_vec()).ok())
}
