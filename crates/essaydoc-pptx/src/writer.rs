//! PPTX generation from slide data.
//!
//! This module generates a 4:3 PPTX package from a [`Deck`]: one slide
//! master, a "Title Slide" and a "Title and Content" layout, the slides and
//! their speaker notes.
//!
//! Parts are assembled as strings and streamed into the zip in package
//! order; every part gets the same XML declaration.

use crate::constants::*;
use crate::contract::DeckContract;
use crate::error::{PptxError, Result};
use crate::extractor::Deck;
use crate::slide::{inches_to_emu, Rect, Slide, SlideLayoutHint};
use chrono::{DateTime, SecondsFormat, Utc};
use log::debug;
use std::io::{Cursor, Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Vertical position of the body placeholder (matches the layout)
const BODY_TOP_EMU: i64 = 1_600_200;

/// Height of the body placeholder (matches the layout)
const BODY_HEIGHT_EMU: i64 = 4_525_963;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const REL_TYPE_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_TYPE_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_TYPE_EXTENDED_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";

const PML: &str = "application/vnd.openxmlformats-officedocument.presentationml";

/// Parts present in every deck, with their content types
const FIXED_PARTS: &[(&str, &str)] = &[
    ("/ppt/presentation.xml", "presentation.main+xml"),
    ("/ppt/presProps.xml", "presProps+xml"),
    ("/ppt/tableStyles.xml", "tableStyles+xml"),
    ("/ppt/viewProps.xml", "viewProps+xml"),
    ("/ppt/slideMasters/slideMaster1.xml", "slideMaster+xml"),
    ("/ppt/slideLayouts/slideLayout1.xml", "slideLayout+xml"),
    ("/ppt/slideLayouts/slideLayout2.xml", "slideLayout+xml"),
];

/// Locked placeholder (`noGrp`), shared by every `p:ph` shape
const PLACEHOLDER_LOCKS: &str = r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#;

/// Root group of every shape tree
const SHAPE_TREE_ROOT: &str = r#"      <p:nvGrpSpPr>
        <p:cNvPr id="1" name=""/>
        <p:cNvGrpSpPr/>
        <p:nvPr/>
      </p:nvGrpSpPr>
      <p:grpSpPr/>
"#;

/// PPTX document writer
pub struct PptxWriter {
    /// Deck contract for fonts, sizes and geometry
    contract: DeckContract,

    /// Slides to render
    slides: Vec<Slide>,

    /// Presentation title
    title: Option<String>,

    /// Presentation author
    author: Option<String>,

    /// Timestamp for docProps/core.xml (defaults to now)
    timestamp: Option<DateTime<Utc>>,
}

impl Default for PptxWriter {
    fn default() -> Self {
        Self::new(DeckContract::default())
    }
}

impl PptxWriter {
    /// Create a writer driven by `contract`
    pub fn new(contract: DeckContract) -> Self {
        Self {
            contract,
            slides: Vec::new(),
            title: None,
            author: None,
            timestamp: None,
        }
    }

    /// Take title, author and slides from an extracted deck
    pub fn with_deck(mut self, deck: Deck) -> Self {
        self.title = deck.title;
        self.author = deck.author;
        self.slides = deck.slides;
        self
    }

    /// Override the `dc:title` property
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Override the `dc:creator` property
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Fix the creation timestamp (for reproducible output)
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Append one slide
    pub fn add_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    /// Number of slides queued for rendering
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Render the deck and save it at `path`
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.generate()?)?;
        Ok(())
    }

    /// Render the deck into PPTX bytes
    pub fn generate(&self) -> Result<Vec<u8>> {
        self.contract.validate()?;
        if self.slides.is_empty() {
            return Err(PptxError::invalid_deck("deck has no slides"));
        }

        let mut package = Package::new(Cursor::new(Vec::new()));

        package.add("[Content_Types].xml", &self.content_types_xml())?;
        package.add("_rels/.rels", &root_relationships_xml())?;
        package.add("docProps/app.xml", &self.app_xml())?;
        package.add("docProps/core.xml", &self.core_xml())?;
        package.add("ppt/presentation.xml", &self.presentation_xml())?;
        package.add(
            "ppt/_rels/presentation.xml.rels",
            &self.presentation_relationships_xml(),
        )?;
        package.add("ppt/presProps.xml", &pres_props_xml())?;
        package.add("ppt/tableStyles.xml", &table_styles_xml())?;
        package.add("ppt/viewProps.xml", &view_props_xml())?;
        package.add("ppt/theme/theme1.xml", &self.theme_xml())?;
        package.add("ppt/slideMasters/slideMaster1.xml", &slide_master_xml())?;
        package.add(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            &relationships_xml([
                (REL_TYPE_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml".to_string()),
                (REL_TYPE_SLIDE_LAYOUT, "../slideLayouts/slideLayout2.xml".to_string()),
                (REL_TYPE_THEME, "../theme/theme1.xml".to_string()),
            ]),
        )?;

        let layout_rels = relationships_xml([(
            REL_TYPE_SLIDE_MASTER,
            "../slideMasters/slideMaster1.xml".to_string(),
        )]);
        for hint in [SlideLayoutHint::Title, SlideLayoutHint::Content] {
            let n = hint.layout_index();
            package.add(
                &format!("ppt/slideLayouts/slideLayout{}.xml", n),
                &self.slide_layout_xml(hint),
            )?;
            package.add(
                &format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", n),
                &layout_rels,
            )?;
        }

        for (i, slide) in self.slides.iter().enumerate() {
            let n = i + 1;
            package.add(&format!("ppt/slides/slide{}.xml", n), &self.slide_xml(slide))?;
            package.add(
                &format!("ppt/slides/_rels/slide{}.xml.rels", n),
                &slide_relationships_xml(n, slide),
            )?;

            if let Some(notes) = &slide.notes {
                package.add(
                    &format!("ppt/notesSlides/notesSlide{}.xml", n),
                    &self.notes_xml(&notes.paragraphs),
                )?;
                package.add(
                    &format!("ppt/notesSlides/_rels/notesSlide{}.xml.rels", n),
                    &relationships_xml([(REL_TYPE_SLIDE, format!("../slides/slide{}.xml", n))]),
                )?;
            }
        }

        let bytes = package.finish()?.into_inner();
        debug!(
            "Generated PPTX: {} slides, {} with notes",
            self.slides.len(),
            self.notes_count()
        );
        Ok(bytes)
    }

    fn notes_count(&self) -> usize {
        self.slides.iter().filter(|s| s.has_notes()).count()
    }

    fn content_types_xml(&self) -> String {
        let mut xml = format!(
            r#"<Types xmlns="{}">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
  <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
  <Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
"#,
            NS_CONTENT_TYPES
        );

        let mut push_override = |part: &str, kind: &str| {
            xml.push_str(&format!(
                "  <Override PartName=\"{}\" ContentType=\"{}.{}\"/>\n",
                part, PML, kind
            ));
        };

        for (part, kind) in FIXED_PARTS {
            push_override(part, kind);
        }
        for (i, slide) in self.slides.iter().enumerate() {
            push_override(&format!("/ppt/slides/slide{}.xml", i + 1), "slide+xml");
            if slide.has_notes() {
                push_override(
                    &format!("/ppt/notesSlides/notesSlide{}.xml", i + 1),
                    "notesSlide+xml",
                );
            }
        }

        xml.push_str("</Types>");
        xml
    }

    fn app_xml(&self) -> String {
        format!(
            r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
  <TotalTime>0</TotalTime>
  <Application>essaydoc</Application>
  <PresentationFormat>On-screen Show (4:3)</PresentationFormat>
  <Slides>{}</Slides>
  <Notes>{}</Notes>
  <HiddenSlides>0</HiddenSlides>
  <ScaleCrop>false</ScaleCrop>
  <SharedDoc>false</SharedDoc>
  <AppVersion>{}</AppVersion>
</Properties>"#,
            self.slides.len(),
            self.notes_count(),
            env!("CARGO_PKG_VERSION")
        )
    }

    fn core_xml(&self) -> String {
        let title = escape_xml(self.title.as_deref().unwrap_or("Essay"));
        let author = escape_xml(self.author.as_deref().unwrap_or("essaydoc"));
        let stamp = self
            .timestamp
            .unwrap_or_else(Utc::now)
            .to_rfc3339_opts(SecondsFormat::Secs, true);

        format!(
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:title>{title}</dc:title>
  <dc:creator>{author}</dc:creator>
  <dcterms:created xsi:type="dcterms:W3CDTF">{stamp}</dcterms:created>
  <dcterms:modified xsi:type="dcterms:W3CDTF">{stamp}</dcterms:modified>
</cp:coreProperties>"#
        )
    }

    /// Slide ids start at 256; slide rIds follow master, presProps and theme
    fn presentation_xml(&self) -> String {
        let slide_ids: String = (1..=self.slides.len())
            .map(|n| format!("    <p:sldId id=\"{}\" r:id=\"rId{}\"/>\n", 255 + n, n + 3))
            .collect();

        // Notes pages are portrait: the slide size transposed
        format!(
            r#"<p:presentation {ns} saveSubsetFonts="1">
  <p:sldMasterIdLst>
    <p:sldMasterId id="2147483648" r:id="rId1"/>
  </p:sldMasterIdLst>
  <p:sldIdLst>
{slide_ids}  </p:sldIdLst>
  <p:sldSz cx="{w}" cy="{h}" type="screen4x3"/>
  <p:notesSz cx="{h}" cy="{w}"/>
</p:presentation>"#,
            ns = pml_namespaces(),
            w = SLIDE_WIDTH_EMU,
            h = SLIDE_HEIGHT_EMU,
        )
    }

    fn presentation_relationships_xml(&self) -> String {
        let fixed = [
            (REL_TYPE_SLIDE_MASTER, "slideMasters/slideMaster1.xml".to_string()),
            (REL_TYPE_PRES_PROPS, "presProps.xml".to_string()),
            (REL_TYPE_THEME, "theme/theme1.xml".to_string()),
        ];
        let slides =
            (1..=self.slides.len()).map(|n| (REL_TYPE_SLIDE, format!("slides/slide{}.xml", n)));

        relationships_xml(fixed.into_iter().chain(slides))
    }

    /// Office color scheme with the contract font as both major and minor
    fn theme_xml(&self) -> String {
        let font = escape_xml(&self.contract.fonts.family);
        let colors: String = [
            ("dk2", "44546A"),
            ("lt2", "E7E6E6"),
            ("accent1", "4472C4"),
            ("accent2", "ED7D31"),
            ("accent3", "A5A5A5"),
            ("accent4", "FFC000"),
            ("accent5", "5B9BD5"),
            ("accent6", "70AD47"),
            ("hlink", "0563C1"),
            ("folHlink", "954F72"),
        ]
        .iter()
        .map(|(name, rgb)| format!("      <a:{name}><a:srgbClr val=\"{rgb}\"/></a:{name}>\n"))
        .collect();

        let scheme_fill = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#;
        let fills = format!("        {scheme_fill}\n").repeat(3);
        let lines: String = [6350, 12700, 19050]
            .iter()
            .map(|w| format!("        <a:ln w=\"{w}\">{scheme_fill}</a:ln>\n"))
            .collect();
        let effects = "        <a:effectStyle><a:effectLst/></a:effectStyle>\n".repeat(3);

        format!(
            r#"<a:theme xmlns:a="{ns}" name="essaydoc">
  <a:themeElements>
    <a:clrScheme name="essaydoc">
      <a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>
      <a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>
{colors}    </a:clrScheme>
    <a:fontScheme name="essaydoc">
      <a:majorFont><a:latin typeface="{font}"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>
      <a:minorFont><a:latin typeface="{font}"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>
    </a:fontScheme>
    <a:fmtScheme name="essaydoc">
      <a:fillStyleLst>
{fills}      </a:fillStyleLst>
      <a:lnStyleLst>
{lines}      </a:lnStyleLst>
      <a:effectStyleLst>
{effects}      </a:effectStyleLst>
      <a:bgFillStyleLst>
{fills}      </a:bgFillStyleLst>
    </a:fmtScheme>
  </a:themeElements>
</a:theme>"#,
            ns = NS_DRAWING,
        )
    }

    /// Layout 1 is "Title Slide", layout 2 "Title and Content"
    fn slide_layout_xml(&self, hint: SlideLayoutHint) -> String {
        let empty = self.empty_paragraph();

        let (kind, name, shapes) = match hint {
            SlideLayoutHint::Title => (
                "title",
                "Title Slide",
                Shape::placeholder(2, "Title 1", r#"<p:ph type="ctrTitle"/>"#)
                    .at(Rect {
                        x: 685_800,
                        y: 2_130_425,
                        cx: 7_772_400,
                        cy: 1_470_025,
                    })
                    .text("<a:bodyPr/>", empty.clone())
                    .render()
                    + &Shape::placeholder(3, "Subtitle 2", r#"<p:ph type="subTitle" idx="1"/>"#)
                        .at(Rect {
                            x: 1_371_600,
                            y: 3_886_200,
                            cx: 6_400_800,
                            cy: 1_752_600,
                        })
                        .text("<a:bodyPr/>", empty)
                        .render(),
            ),
            SlideLayoutHint::Content => (
                "obj",
                "Title and Content",
                Shape::placeholder(2, "Title 1", r#"<p:ph type="title"/>"#)
                    .at(Rect {
                        x: 457_200,
                        y: 274_638,
                        cx: 8_229_600,
                        cy: 1_143_000,
                    })
                    .text("<a:bodyPr/>", empty.clone())
                    .render()
                    + &Shape::placeholder(3, "Content Placeholder 2", r#"<p:ph idx="1"/>"#)
                        .at(Rect {
                            x: 457_200,
                            y: BODY_TOP_EMU,
                            cx: 8_229_600,
                            cy: BODY_HEIGHT_EMU,
                        })
                        .text("<a:bodyPr/>", empty)
                        .render(),
            ),
        };

        format!(
            r#"<p:sldLayout {ns} type="{kind}" preserve="1">
  <p:cSld name="{name}">
    <p:spTree>
{root}{shapes}    </p:spTree>
  </p:cSld>
  <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sldLayout>"#,
            ns = pml_namespaces(),
            root = SHAPE_TREE_ROOT,
        )
    }

    fn slide_xml(&self, slide: &Slide) -> String {
        let fonts = &self.contract.fonts;
        let mut shapes = String::new();

        match slide.layout_hint {
            SlideLayoutHint::Title => {
                shapes.push_str(&self.title_shape(&slide.title, "ctrTitle", fonts.title_size));
                if !slide.subtitle.is_empty() {
                    shapes.push_str(&self.subtitle_shape(&slide.subtitle));
                }
                if let Some(footer) = &slide.footer {
                    shapes.push_str(&self.footer_shape(footer));
                }
            }
            SlideLayoutHint::Content => {
                shapes.push_str(&self.title_shape(
                    &slide.title,
                    "title",
                    fonts.section_title_size,
                ));
                shapes.push_str(&self.body_shape(&slide.bullets));
                if slide.image_placeholder {
                    shapes.push_str(&self.image_placeholder_shape());
                }
            }
        }

        format!(
            r#"<p:sld {ns}>
  <p:cSld>
    <p:spTree>
{root}{shapes}    </p:spTree>
  </p:cSld>
  <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sld>"#,
            ns = pml_namespaces(),
            root = SHAPE_TREE_ROOT,
        )
    }

    fn title_shape(&self, title: &str, ph_type: &str, size_pt: u32) -> String {
        Shape::placeholder(2, "Title 1", &format!(r#"<p:ph type="{}"/>"#, ph_type))
            .text("<a:bodyPr/>", self.paragraph(title, size_pt, None, None))
            .render()
    }

    /// One paragraph per metadata line
    fn subtitle_shape(&self, lines: &[String]) -> String {
        let size = self.contract.fonts.subtitle_size;
        let paragraphs: String = lines
            .iter()
            .map(|line| self.paragraph(line, size, None, None))
            .collect();

        Shape::placeholder(3, "Subtitle 2", r#"<p:ph type="subTitle" idx="1"/>"#)
            .text("<a:bodyPr/>", paragraphs)
            .render()
    }

    /// Right-aligned text box along the bottom edge
    fn footer_shape(&self, footer: &str) -> String {
        Shape::text_box(4, "Footer TextBox 3")
            .at(Rect::from_inches(0.5, 6.8, 9.0, 0.3))
            .fill("<a:noFill/>".to_string())
            .text(
                r#"<a:bodyPr wrap="none" rtlCol="0"/>"#,
                self.paragraph(footer, self.contract.fonts.footer_size, Some("r"), None),
            )
            .render()
    }

    /// Body placeholder holding the bullets
    fn body_shape(&self, bullets: &[String]) -> String {
        let body = &self.contract.body;
        let rect = Rect {
            x: inches_to_emu(body.left),
            y: BODY_TOP_EMU,
            cx: inches_to_emu(body.width),
            cy: BODY_HEIGHT_EMU,
        };

        let paragraphs = if bullets.is_empty() {
            self.empty_paragraph()
        } else {
            bullets
                .iter()
                .map(|b| self.paragraph(b, self.contract.fonts.bullet_size, None, Some(0)))
                .collect()
        };

        Shape::placeholder(3, "Content Placeholder 2", r#"<p:ph idx="1"/>"#)
            .at(rect)
            .text("<a:bodyPr><a:normAutofit/></a:bodyPr>", paragraphs)
            .render()
    }

    /// Shaded rectangle reserving room for a figure
    fn image_placeholder_shape(&self) -> String {
        let cfg = &self.contract.image_placeholder;
        let size = self.contract.fonts.placeholder_size;

        let paragraphs: String = cfg
            .text
            .split('\n')
            .map(|line| self.paragraph(line, size, Some("ctr"), None))
            .collect();

        Shape::new(4, "Image Placeholder 3", "<p:cNvSpPr/>", "<p:nvPr/>")
            .at(Rect::from_inches(cfg.left, cfg.top, cfg.width, cfg.height))
            .fill(format!(
                "<a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill>\n          <a:ln><a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill></a:ln>",
                escape_xml(&cfg.fill_color),
                escape_xml(&cfg.line_color)
            ))
            .text(r#"<a:bodyPr rtlCol="0" anchor="ctr"/>"#, paragraphs)
            .render()
    }

    fn notes_xml(&self, paragraphs: &[String]) -> String {
        let locale = &self.contract.meta.locale;
        let rpr = format!("<a:rPr lang=\"{}\"/>", locale);
        let text: String = paragraphs
            .iter()
            .map(|p| format!("          <a:p>{}</a:p>\n", line_runs(p, &rpr, "")))
            .collect();

        let shapes = Shape::new(
            2,
            "Slide Image Placeholder 1",
            r#"<p:cNvSpPr><a:spLocks noGrp="1" noRot="1" noChangeAspect="1"/></p:cNvSpPr>"#,
            r#"<p:nvPr><p:ph type="sldImg"/></p:nvPr>"#,
        )
        .render()
            + &Shape::placeholder(3, "Notes Placeholder 2", r#"<p:ph type="body" idx="1"/>"#)
                .text("<a:bodyPr/>", text)
                .render();

        format!(
            r#"<p:notes {ns}>
  <p:cSld>
    <p:spTree>
{root}{shapes}    </p:spTree>
  </p:cSld>
</p:notes>"#,
            ns = pml_namespaces(),
            root = SHAPE_TREE_ROOT,
        )
    }

    fn empty_paragraph(&self) -> String {
        format!(
            "          <a:p><a:endParaRPr lang=\"{}\"/></a:p>\n",
            self.contract.meta.locale
        )
    }

    /// Paragraph in the contract font; embedded newlines become line breaks
    fn paragraph(&self, text: &str, size_pt: u32, align: Option<&str>, level: Option<u32>) -> String {
        let mut ppr = String::new();
        if let Some(lvl) = level {
            ppr.push_str(&format!(" lvl=\"{}\"", lvl));
        }
        if let Some(algn) = align {
            ppr.push_str(&format!(" algn=\"{}\"", algn));
        }

        let mut xml = String::from("          <a:p>\n");
        if !ppr.is_empty() {
            xml.push_str(&format!("            <a:pPr{}/>\n", ppr));
        }
        let rpr = format!(
            "<a:rPr lang=\"{}\" sz=\"{}\" dirty=\"0\"><a:latin typeface=\"{}\"/></a:rPr>",
            self.contract.meta.locale,
            size_pt * 100,
            escape_xml(&self.contract.fonts.family),
        );
        xml.push_str(&line_runs(text, &rpr, "            "));
        xml.push('\n');
        xml.push_str("          </a:p>\n");
        xml
    }
}

/// Zip writer that prefixes each part with the XML declaration
struct Package<W: Write + Seek> {
    zip: ZipWriter<W>,
    options: SimpleFileOptions,
}

impl<W: Write + Seek> Package<W> {
    fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            options: SimpleFileOptions::default()
                .compression_method(zip::CompressionMethod::Deflated),
        }
    }

    fn add(&mut self, name: &str, xml: &str) -> Result<()> {
        self.zip.start_file(name, self.options)?;
        self.zip.write_all(XML_DECLARATION.as_bytes())?;
        self.zip.write_all(b"\n")?;
        self.zip.write_all(xml.as_bytes())?;
        Ok(())
    }

    fn finish(self) -> Result<W> {
        Ok(self.zip.finish()?)
    }
}

/// A `<p:sp>` element
struct Shape<'a> {
    id: u32,
    name: &'a str,
    c_nv_sp_pr: &'a str,
    nv_pr: String,
    rect: Option<Rect>,
    fill: Option<String>,
    text: Option<(&'a str, String)>,
}

impl<'a> Shape<'a> {
    fn new(id: u32, name: &'a str, c_nv_sp_pr: &'a str, nv_pr: &str) -> Self {
        Self {
            id,
            name,
            c_nv_sp_pr,
            nv_pr: nv_pr.to_string(),
            rect: None,
            fill: None,
            text: None,
        }
    }

    /// Shape bound to a layout placeholder
    fn placeholder(id: u32, name: &'a str, ph: &str) -> Self {
        Self::new(id, name, PLACEHOLDER_LOCKS, &format!("<p:nvPr>{}</p:nvPr>", ph))
    }

    /// Free-standing text box
    fn text_box(id: u32, name: &'a str) -> Self {
        Self::new(id, name, r#"<p:cNvSpPr txBox="1"/>"#, "<p:nvPr/>")
    }

    fn at(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }

    /// Rectangle geometry plus fill/line markup
    fn fill(mut self, fill: String) -> Self {
        self.fill = Some(fill);
        self
    }

    fn text(mut self, body_pr: &'a str, paragraphs: String) -> Self {
        self.text = Some((body_pr, paragraphs));
        self
    }

    fn render(&self) -> String {
        let mut xml = format!(
            "      <p:sp>\n        <p:nvSpPr>\n          <p:cNvPr id=\"{}\" name=\"{}\"/>\n          {}\n          {}\n        </p:nvSpPr>\n",
            self.id, self.name, self.c_nv_sp_pr, self.nv_pr
        );

        match (&self.rect, &self.fill) {
            (None, None) => xml.push_str("        <p:spPr/>\n"),
            (rect, fill) => {
                xml.push_str("        <p:spPr>\n");
                if let Some(rect) = rect {
                    xml.push_str(&xfrm(*rect));
                }
                if let Some(fill) = fill {
                    xml.push_str(&format!(
                        "          <a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom>\n          {}\n",
                        fill
                    ));
                }
                xml.push_str("        </p:spPr>\n");
            }
        }

        if let Some((body_pr, paragraphs)) = &self.text {
            xml.push_str(&format!(
                "        <p:txBody>\n          {}\n          <a:lstStyle/>\n{}        </p:txBody>\n",
                body_pr, paragraphs
            ));
        }

        xml.push_str("      </p:sp>\n");
        xml
    }
}

fn pml_namespaces() -> String {
    format!(
        r#"xmlns:a="{}" xmlns:r="{}" xmlns:p="{}""#,
        NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
    )
}

/// `.rels` part; ids are assigned rId1, rId2, ... in order
fn relationships_xml<'t>(targets: impl IntoIterator<Item = (&'t str, String)>) -> String {
    let mut xml = format!("<Relationships xmlns=\"{}\">\n", NS_PACKAGE_RELATIONSHIPS);
    for (i, (rel_type, target)) in targets.into_iter().enumerate() {
        xml.push_str(&format!(
            "  <Relationship Id=\"rId{}\" Type=\"{}\" Target=\"{}\"/>\n",
            i + 1,
            rel_type,
            target
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

fn root_relationships_xml() -> String {
    relationships_xml([
        (REL_TYPE_OFFICE_DOCUMENT, "ppt/presentation.xml".to_string()),
        (REL_TYPE_CORE_PROPERTIES, "docProps/core.xml".to_string()),
        (REL_TYPE_EXTENDED_PROPERTIES, "docProps/app.xml".to_string()),
    ])
}

/// Layout first (rId1), then the notes slide when present
fn slide_relationships_xml(slide_num: usize, slide: &Slide) -> String {
    let layout = (
        REL_TYPE_SLIDE_LAYOUT,
        format!("../slideLayouts/slideLayout{}.xml", slide.layout_hint.layout_index()),
    );
    let notes = slide.has_notes().then(|| {
        (
            REL_TYPE_NOTES_SLIDE,
            format!("../notesSlides/notesSlide{}.xml", slide_num),
        )
    });

    relationships_xml(std::iter::once(layout).chain(notes))
}

fn pres_props_xml() -> String {
    format!("<p:presentationPr {}/>", pml_namespaces())
}

fn table_styles_xml() -> String {
    format!(
        r#"<a:tblStyleLst xmlns:a="{}" def="{{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}}"/>"#,
        NS_DRAWING
    )
}

fn view_props_xml() -> String {
    format!(
        r#"<p:viewPr {}>
  <p:normalViewPr>
    <p:restoredLeft sz="15620"/>
    <p:restoredTop sz="94660"/>
  </p:normalViewPr>
  <p:slideViewPr>
    <p:cSldViewPr>
      <p:cViewPr>
        <p:scale><a:sx n="100" d="100"/><a:sy n="100" d="100"/></p:scale>
        <p:origin x="0" y="0"/>
      </p:cViewPr>
    </p:cSldViewPr>
  </p:slideViewPr>
</p:viewPr>"#,
        pml_namespaces()
    )
}

/// Blank master; placeholders live on the layouts
fn slide_master_xml() -> String {
    format!(
        r#"<p:sldMaster {ns}>
  <p:cSld>
    <p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>
    <p:spTree>
{root}    </p:spTree>
  </p:cSld>
  <p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>
  <p:sldLayoutIdLst>
    <p:sldLayoutId id="2147483649" r:id="rId1"/>
    <p:sldLayoutId id="2147483650" r:id="rId2"/>
  </p:sldLayoutIdLst>
</p:sldMaster>"#,
        ns = pml_namespaces(),
        root = SHAPE_TREE_ROOT,
    )
}

/// One `<a:r>` per line of `text`, joined by `<a:br>` carrying the same
/// run properties
fn line_runs(text: &str, rpr: &str, indent: &str) -> String {
    let br = format!("<a:br>{rpr}</a:br>");
    text.split('\n')
        .map(|line| format!("{indent}<a:r>{rpr}<a:t>{}</a:t></a:r>", escape_xml(line)))
        .collect::<Vec<_>>()
        .join(&format!("\n{indent}{br}\n"))
}

/// `<a:xfrm>` for a shape rectangle
fn xfrm(rect: Rect) -> String {
    format!(
        "          <a:xfrm>\n            <a:off x=\"{}\" y=\"{}\"/>\n            <a:ext cx=\"{}\" cy=\"{}\"/>\n          </a:xfrm>\n",
        rect.x, rect.y, rect.cx, rect.cy
    )
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
