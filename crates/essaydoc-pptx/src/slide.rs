//! Slides as the writer consumes them.
//!
//! [`crate::SlideExtractor`] builds these from a `Document`;
//! [`crate::PptxWriter`] turns them into slide parts.

use crate::constants::EMU_PER_INCH;

/// One slide of the deck
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slide {
    /// 1-based position in the deck
    pub number: u32,

    /// Essay title or section heading
    pub title: String,

    /// Metadata lines under the title (title slide only)
    pub subtitle: Vec<String>,

    /// Right-aligned text along the bottom edge (title slide only)
    pub footer: Option<String>,

    pub bullets: Vec<String>,

    /// Reserve a shaded rectangle for a figure
    pub image_placeholder: bool,

    pub notes: Option<SpeakerNotes>,

    pub layout_hint: SlideLayoutHint,
}

/// Which of the two layouts a slide uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlideLayoutHint {
    /// "Title Slide": centered title and subtitle
    Title,

    /// "Title and Content": heading plus bullet body
    #[default]
    Content,
}

impl SlideLayoutHint {
    /// N in `slideLayoutN.xml`
    pub fn layout_index(self) -> u32 {
        match self {
            Self::Title => 1,
            Self::Content => 2,
        }
    }
}

/// Notes page text, one entry per paragraph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeakerNotes {
    pub paragraphs: Vec<String>,
}

impl SpeakerNotes {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::from_paragraphs(vec![text.into()])
    }

    pub fn from_paragraphs(paragraphs: Vec<String>) -> Self {
        Self { paragraphs }
    }
}

/// Shape position and size in EMU
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl Rect {
    pub fn from_inches(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            x: inches_to_emu(left),
            y: inches_to_emu(top),
            cx: inches_to_emu(width),
            cy: inches_to_emu(height),
        }
    }
}

/// Inches to EMU, rounded to the nearest unit
pub fn inches_to_emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH as f64).round() as i64
}

impl Slide {
    /// Title slide with metadata lines as subtitle
    pub fn title_slide(number: u32, title: impl Into<String>, subtitle: Vec<String>) -> Self {
        Self {
            number,
            title: title.into(),
            subtitle,
            layout_hint: SlideLayoutHint::Title,
            ..Default::default()
        }
    }

    /// Heading-and-bullets slide
    pub fn content_slide(number: u32, title: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_bullets(mut self, bullets: Vec<String>) -> Self {
        self.bullets = bullets;
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn with_image_placeholder(mut self) -> Self {
        self.image_placeholder = true;
        self
    }

    pub fn with_notes(mut self, notes: SpeakerNotes) -> Self {
        self.notes = Some(notes);
        self
    }

    pub fn is_title_slide(&self) -> bool {
        matches!(self.layout_hint, SlideLayoutHint::Title)
    }

    pub fn has_notes(&self) -> bool {
        self.notes.is_some()
    }
}
