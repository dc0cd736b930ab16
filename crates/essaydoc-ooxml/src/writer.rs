//! DOCX Writer
//!
//! This module writes an `essaydoc_ast::Document` as a self-contained DOCX
//! package. All typography comes from the [`StyleProfile`]: body text uses
//! the `Normal` style, section headings `Heading1`, and the title page the
//! `Title` and `EssayMetadata` styles, so the output stays editable through
//! Word's style gallery.
//!
//! # Example
//!
//! ```no_run
//! use essaydoc_ast::Document;
//! use essaydoc_ooxml::{DocxWriter, StyleProfile};
//!
//! let doc = Document::with_title("Essay");
//! let mut writer = DocxWriter::new(StyleProfile::default());
//! writer.write_to_file(&doc, "essay.docx")?;
//! # Ok::<(), essaydoc_ooxml::OoxmlError>(())
//! ```

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use essaydoc_ast::{Document, MetadataRole};
use log::debug;

use crate::archive::OoxmlArchive;
use crate::error::{OoxmlError, Result};
use crate::style_profile::{half_points, inches_to_twips, points_to_twips, Emphasis, StyleProfile};

/// WordprocessingML main namespace
const NS_WORD: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Style IDs written to word/styles.xml
pub const STYLE_NORMAL: &str = "Normal";
pub const STYLE_HEADING: &str = "Heading1";
pub const STYLE_TITLE: &str = "Title";
pub const STYLE_METADATA: &str = "EssayMetadata";

/// US Letter page size in twips
const PAGE_WIDTH_TWIPS: u32 = 12240;
const PAGE_HEIGHT_TWIPS: u32 = 15840;

/// DOCX Writer for generating DOCX files from a parsed essay
pub struct DocxWriter {
    /// Typography and page layout
    profile: StyleProfile,
    /// XML output buffer for word/document.xml
    output: String,
    /// Timestamp for docProps/core.xml (defaults to now)
    timestamp: Option<DateTime<Utc>>,
}

impl Default for DocxWriter {
    fn default() -> Self {
        Self::new(StyleProfile::default())
    }
}

impl DocxWriter {
    /// Create a writer using the given profile
    pub fn new(profile: StyleProfile) -> Self {
        Self {
            profile,
            output: String::new(),
            timestamp: None,
        }
    }

    /// Fix the creation timestamp (for reproducible output)
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// The profile this writer renders with
    pub fn profile(&self) -> &StyleProfile {
        &self.profile
    }

    /// Generate the DOCX package as bytes
    pub fn generate(&mut self, doc: &Document) -> Result<Vec<u8>> {
        self.build_archive(doc)?.to_bytes()
    }

    /// Generate and persist the DOCX package
    pub fn write_to_file<P: AsRef<Path>>(&mut self, doc: &Document, path: P) -> Result<()> {
        self.build_archive(doc)?.write_to_file(path)
    }

    /// Assemble every package part
    pub fn build_archive(&mut self, doc: &Document) -> Result<OoxmlArchive> {
        if doc.title.trim().is_empty() {
            return Err(OoxmlError::InvalidStructure(
                "document has no title".to_string(),
            ));
        }

        let mut archive = OoxmlArchive::new();
        archive.insert("[Content_Types].xml", CONTENT_TYPES_XML);
        archive.insert("_rels/.rels", ROOT_RELS_XML);
        archive.insert("word/_rels/document.xml.rels", DOCUMENT_RELS_XML);
        archive.insert("docProps/app.xml", APP_XML);
        archive.insert("docProps/core.xml", self.generate_core_xml(doc));
        archive.insert("word/styles.xml", self.generate_styles_xml());
        archive.insert("word/document.xml", self.generate_document_xml(doc));

        debug!(
            "Built DOCX package: {} sections, {} paragraphs",
            doc.heading_count(),
            doc.paragraph_count()
        );

        Ok(archive)
    }

    /// Generate docProps/core.xml
    fn generate_core_xml(&self, doc: &Document) -> String {
        let creator = doc
            .metadata_value(MetadataRole::Student)
            .unwrap_or("essaydoc");
        let now = self
            .timestamp
            .unwrap_or_else(Utc::now)
            .to_rfc3339_opts(SecondsFormat::Secs, true);

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:title>{}</dc:title>
  <dc:creator>{}</dc:creator>
  <cp:lastModifiedBy>{}</cp:lastModifiedBy>
  <dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>
  <dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>
</cp:coreProperties>"#,
            escape_xml(&doc.title),
            escape_xml(creator),
            escape_xml(creator),
            now,
            now
        )
    }

    /// Generate word/styles.xml from the profile
    fn generate_styles_xml(&self) -> String {
        let p = &self.profile;
        let fonts = format!(
            r#"<w:rFonts w:ascii="{0}" w:hAnsi="{0}" w:eastAsia="{0}" w:cs="{0}"/>"#,
            escape_xml(&p.font_name)
        );
        let size = |pt: f32| {
            let hp = half_points(pt);
            format!(r#"<w:sz w:val="{hp}"/><w:szCs w:val="{hp}"/>"#)
        };
        let bold = |on: bool| if on { "<w:b/><w:bCs/>" } else { "" };

        let metadata_emphasis = match p.metadata_emphasis {
            Emphasis::None => "",
            Emphasis::Bold => "<w:b/><w:bCs/>",
            Emphasis::Italic => "<w:i/><w:iCs/>",
        };

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{ns}">
  <w:docDefaults>
    <w:rPrDefault><w:rPr>{fonts}{body_size}</w:rPr></w:rPrDefault>
    <w:pPrDefault><w:pPr/></w:pPrDefault>
  </w:docDefaults>
  <w:style w:type="paragraph" w:default="1" w:styleId="{normal}">
    <w:name w:val="Normal"/>
    <w:qFormat/>
    <w:pPr>
      <w:spacing w:after="{space_after}" w:line="{line}" w:lineRule="auto"/>
      <w:ind w:firstLine="{indent}"/>
      <w:jc w:val="{jc}"/>
    </w:pPr>
    <w:rPr>{fonts}{body_size}</w:rPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="{heading}">
    <w:name w:val="heading 1"/>
    <w:basedOn w:val="{normal}"/>
    <w:next w:val="{normal}"/>
    <w:qFormat/>
    <w:pPr>
      <w:keepNext/>
      <w:ind w:firstLine="0"/>
      <w:jc w:val="left"/>
      <w:outlineLvl w:val="0"/>
    </w:pPr>
    <w:rPr>{fonts}{heading_bold}{heading_size}</w:rPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="{title}">
    <w:name w:val="Title"/>
    <w:basedOn w:val="{normal}"/>
    <w:next w:val="{metadata}"/>
    <w:qFormat/>
    <w:pPr>
      <w:ind w:firstLine="0"/>
      <w:jc w:val="center"/>
    </w:pPr>
    <w:rPr>{fonts}{title_bold}{title_size}</w:rPr>
  </w:style>
  <w:style w:type="paragraph" w:customStyle="1" w:styleId="{metadata}">
    <w:name w:val="Essay Metadata"/>
    <w:basedOn w:val="{normal}"/>
    <w:qFormat/>
    <w:pPr>
      <w:ind w:firstLine="0"/>
      <w:jc w:val="center"/>
    </w:pPr>
    <w:rPr>{fonts}{metadata_emphasis}{metadata_size}</w:rPr>
  </w:style>
</w:styles>"#,
            ns = NS_WORD,
            fonts = fonts,
            body_size = size(p.body_size_pt),
            normal = STYLE_NORMAL,
            heading = STYLE_HEADING,
            title = STYLE_TITLE,
            metadata = STYLE_METADATA,
            space_after = points_to_twips(p.space_after_pt),
            line = p.line_spacing.line_value(),
            indent = inches_to_twips(p.first_line_indent_in),
            jc = p.alignment.jc_value(),
            heading_bold = bold(p.heading_bold),
            heading_size = size(p.heading_size_pt),
            title_bold = bold(p.title_bold),
            title_size = size(p.title_size_pt),
            metadata_emphasis = metadata_emphasis,
            metadata_size = size(p.metadata_size_pt),
        )
    }

    /// Generate the complete document.xml content
    fn generate_document_xml(&mut self, doc: &Document) -> String {
        self.output.clear();

        self.output
            .push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        self.output.push('\n');
        self.output
            .push_str(&format!(r#"<w:document xmlns:w="{}">"#, NS_WORD));
        self.output.push('\n');
        self.output.push_str("<w:body>\n");

        self.generate_title_page(doc);

        for paragraph in &doc.preamble {
            self.generate_paragraph(STYLE_NORMAL, paragraph);
        }

        for section in &doc.sections {
            self.generate_paragraph(STYLE_HEADING, &section.heading);
            for paragraph in &section.paragraphs {
                self.generate_paragraph(STYLE_NORMAL, paragraph);
            }
        }

        self.generate_section_properties();

        self.output.push_str("</w:body>\n");
        self.output.push_str("</w:document>");

        self.output.clone()
    }

    /// Centered title, one centered paragraph per metadata line, page break
    fn generate_title_page(&mut self, doc: &Document) {
        self.generate_paragraph(STYLE_TITLE, &doc.title);

        for line in &doc.metadata_lines {
            self.generate_paragraph(STYLE_METADATA, line);
        }

        if self.profile.title_page_break {
            self.output.push_str("<w:p>\n<w:r>\n");
            self.output.push_str(r#"<w:br w:type="page"/>"#);
            self.output.push('\n');
            self.output.push_str("</w:r>\n</w:p>\n");
        }
    }

    /// Generate a styled paragraph; embedded newlines become line breaks
    fn generate_paragraph(&mut self, style: &str, text: &str) {
        self.output.push_str("<w:p>\n");
        self.output.push_str("<w:pPr>\n");
        self.output
            .push_str(&format!("<w:pStyle w:val=\"{}\"/>\n", escape_xml(style)));
        self.output.push_str("</w:pPr>\n");

        self.output.push_str("<w:r>\n");
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.output.push_str("<w:br/>\n");
            }
            self.output.push_str("<w:t xml:space=\"preserve\">");
            self.output.push_str(&escape_xml(line));
            self.output.push_str("</w:t>\n");
        }
        self.output.push_str("</w:r>\n");

        self.output.push_str("</w:p>\n");
    }

    /// Page size and margins
    fn generate_section_properties(&mut self) {
        let m = self.profile.margins;
        self.output.push_str(&format!(
            "<w:sectPr>\n<w:pgSz w:w=\"{}\" w:h=\"{}\"/>\n<w:pgMar w:top=\"{}\" w:right=\"{}\" w:bottom=\"{}\" w:left=\"{}\" w:header=\"720\" w:footer=\"720\" w:gutter=\"0\"/>\n</w:sectPr>\n",
            PAGE_WIDTH_TWIPS,
            PAGE_HEIGHT_TWIPS,
            inches_to_twips(m.top),
            inches_to_twips(m.right),
            inches_to_twips(m.bottom),
            inches_to_twips(m.left),
        ));
    }
}

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
  <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
  <Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
</Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;

const APP_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
  <Application>essaydoc</Application>
  <DocSecurity>0</DocSecurity>
  <ScaleCrop>false</ScaleCrop>
  <LinksUpToDate>false</LinksUpToDate>
  <SharedDoc>false</SharedDoc>
  <HyperlinksChanged>false</HyperlinksChanged>
  <AppVersion>1.0</AppVersion>
</Properties>"#;

/// Escape special XML characters
pub(crate) fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use essaydoc_ast::Section;
    use std::io::Cursor;

    use crate::style_profile::{Alignment, LineSpacing, Margins};

    fn sample_doc() -> Document {
        let mut doc = Document::with_title("Short Stature & Growth");
        doc.metadata_lines = vec![
            "Prepared for: Faculty".to_string(),
            "Student: Jane Roe".to_string(),
            "Course: Pediatrics".to_string(),
            "Date: May 2025".to_string(),
        ];
        doc.push(
            Section::new("1. Introduction")
                .with_paragraph("First line\nReference: Cohen P. <2008>")
                .with_paragraph("Second paragraph."),
        );
        doc.push(Section::new("2. Conclusion").with_paragraph("Done."));
        doc
    }

    fn document_xml(writer: &mut DocxWriter, doc: &Document) -> String {
        let archive = writer.build_archive(doc).unwrap();
        archive.text("word/document.xml").unwrap()
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("Hello & World"), "Hello &amp; World");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
        assert_eq!(escape_xml("\"quoted\""), "&quot;quoted&quot;");
    }

    #[test]
    fn test_generate_valid_zip() {
        let bytes = DocxWriter::default().generate(&sample_doc()).unwrap();
        let archive = OoxmlArchive::from_reader(Cursor::new(bytes)).unwrap();

        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "word/_rels/document.xml.rels",
            "word/document.xml",
            "word/styles.xml",
            "docProps/core.xml",
            "docProps/app.xml",
        ] {
            assert!(archive.contains(part), "missing part {part}");
        }
    }

    #[test]
    fn test_title_page_comes_first() {
        let xml = document_xml(&mut DocxWriter::default(), &sample_doc());

        let title = xml.find("Short Stature &amp; Growth").unwrap();
        let student = xml.find("Student: Jane Roe").unwrap();
        let page_break = xml.find(r#"<w:br w:type="page"/>"#).unwrap();
        let heading = xml.find("1. Introduction").unwrap();

        assert!(title < student && student < page_break && page_break < heading);
        assert_eq!(xml.matches(STYLE_METADATA).count(), 4);
    }

    #[test]
    fn test_no_page_break_when_disabled() {
        let profile = StyleProfile {
            title_page_break: false,
            ..Default::default()
        };
        let xml = document_xml(&mut DocxWriter::new(profile), &sample_doc());
        assert!(!xml.contains(r#"w:type="page""#));
    }

    #[test]
    fn test_sections_in_order_with_styles() {
        let xml = document_xml(&mut DocxWriter::default(), &sample_doc());

        assert_eq!(xml.matches(r#"<w:pStyle w:val="Heading1"/>"#).count(), 2);
        assert_eq!(xml.matches(r#"<w:pStyle w:val="Normal"/>"#).count(), 3);

        let intro = xml.find("1. Introduction").unwrap();
        let second = xml.find("Second paragraph.").unwrap();
        let conclusion = xml.find("2. Conclusion").unwrap();
        assert!(intro < second && second < conclusion);
    }

    #[test]
    fn test_multiline_paragraph_uses_line_break() {
        let xml = document_xml(&mut DocxWriter::default(), &sample_doc());
        assert!(xml.contains(
            "First line</w:t>\n<w:br/>\n<w:t xml:space=\"preserve\">Reference: Cohen P. &lt;2008&gt;"
        ));
    }

    #[test]
    fn test_styles_follow_profile() {
        let profile = StyleProfile {
            font_name: "Georgia".to_string(),
            body_size_pt: 11.0,
            line_spacing: LineSpacing::Single,
            first_line_indent_in: 0.5,
            alignment: Alignment::Justify,
            metadata_emphasis: Emphasis::Italic,
            ..Default::default()
        };
        let archive = DocxWriter::new(profile)
            .build_archive(&sample_doc())
            .unwrap();
        let styles = archive.text("word/styles.xml").unwrap();

        assert!(styles.contains(r#"w:ascii="Georgia""#));
        assert!(styles.contains(r#"<w:sz w:val="22"/>"#));
        assert!(styles.contains(r#"w:line="240" w:lineRule="auto""#));
        assert!(styles.contains(r#"<w:ind w:firstLine="720"/>"#));
        assert!(styles.contains(r#"<w:jc w:val="both"/>"#));
        assert!(styles.contains("<w:i/>"));
    }

    #[test]
    fn test_default_styles() {
        let archive = DocxWriter::default().build_archive(&sample_doc()).unwrap();
        let styles = archive.text("word/styles.xml").unwrap();

        assert!(styles.contains(r#"w:ascii="Times New Roman""#));
        assert!(styles.contains(r#"w:after="240" w:line="480""#));
        assert!(styles.contains(r#"<w:ind w:firstLine="360"/>"#));
        // Heading 14pt, title 16pt
        assert!(styles.contains(r#"<w:sz w:val="28"/>"#));
        assert!(styles.contains(r#"<w:sz w:val="32"/>"#));
    }

    #[test]
    fn test_margins_in_section_properties() {
        let profile = StyleProfile {
            margins: Margins {
                left: 1.5,
                ..Margins::uniform(1.0)
            },
            ..Default::default()
        };
        let xml = document_xml(&mut DocxWriter::new(profile), &sample_doc());
        assert!(xml.contains(r#"w:top="1440" w:right="1440" w:bottom="1440" w:left="2160""#));
    }

    #[test]
    fn test_core_properties() {
        let timestamp = Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap();
        let archive = DocxWriter::default()
            .with_timestamp(timestamp)
            .build_archive(&sample_doc())
            .unwrap();
        let core = archive.text("docProps/core.xml").unwrap();

        assert!(core.contains("<dc:title>Short Stature &amp; Growth</dc:title>"));
        assert!(core.contains("<dc:creator>Jane Roe</dc:creator>"));
        assert!(core.contains("2025-05-01T12:00:00Z"));
    }

    #[test]
    fn test_empty_title_rejected() {
        let result = DocxWriter::default().generate(&Document::default());
        assert!(matches!(result, Err(OoxmlError::InvalidStructure(_))));
    }
}
