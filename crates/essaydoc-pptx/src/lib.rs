//! # essaydoc-pptx
//!
//! PowerPoint (PPTX) slide decks from parsed essays.
//!
//! ## Features
//!
//! - **Title slide**: title, metadata subtitle, date footer
//! - **Section slides**: first-sentence bullets with length and count limits
//! - **Image placeholders**: a shaded rectangle reserving room for a figure
//! - **Speaker notes**: each section's `Reference:` citations
//! - **DeckContract**: TOML-based fonts, sizes and geometry
//!
//! ## Example
//!
//! ```no_run
//! use essaydoc_pptx::{DeckContract, PptxWriter, SlideExtractor};
//!
//! let doc = essaydoc_core::parse(&std::fs::read_to_string("essay.txt")?)?;
//! let contract = DeckContract::default();
//! let deck = SlideExtractor::extract_with_contract(&doc, &contract);
//!
//! let pptx_bytes = PptxWriter::new(contract).with_deck(deck).generate()?;
//! std::fs::write("essay.pptx", pptx_bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod contract;
pub mod error;
pub mod extractor;
pub mod slide;
pub mod writer;

// Re-exports
pub use contract::DeckContract;
pub use error::{PptxError, Result};
pub use extractor::{extract_bullets, truncate_bullet, Deck, SlideExtractor};
pub use slide::{Rect, Slide, SlideLayoutHint, SpeakerNotes};
pub use writer::PptxWriter;

/// PPTX-related constants
pub mod constants {
    /// Slide width in EMU (914400 EMU = 1 inch, standard 10" width)
    pub const SLIDE_WIDTH_EMU: i64 = 9_144_000;

    /// Slide height in EMU (standard 7.5" height for 4:3)
    pub const SLIDE_HEIGHT_EMU: i64 = 6_858_000;

    /// EMU per inch
    pub const EMU_PER_INCH: i64 = 914_400;

    /// EMU per point
    pub const EMU_PER_POINT: i64 = 12_700;

    /// PresentationML namespace
    pub const NS_PRESENTATION: &str =
        "http://schemas.openxmlformats.org/presentationml/2006/main";

    /// DrawingML namespace
    pub const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

    /// Relationships namespace (`r:` prefix inside parts)
    pub const NS_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

    /// Package relationships namespace (`.rels` parts)
    pub const NS_PACKAGE_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships";

    /// Content Types namespace
    pub const NS_CONTENT_TYPES: &str =
        "http://schemas.openxmlformats.org/package/2006/content-types";

    /// Slide relationship type
    pub const REL_TYPE_SLIDE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";

    /// Slide layout relationship type
    pub const REL_TYPE_SLIDE_LAYOUT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";

    /// Slide master relationship type
    pub const REL_TYPE_SLIDE_MASTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";

    /// Notes slide relationship type
    pub const REL_TYPE_NOTES_SLIDE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/notesSlide";

    /// Theme relationship type
    pub const REL_TYPE_THEME: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";

    /// Presentation properties relationship type
    pub const REL_TYPE_PRES_PROPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps";
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
