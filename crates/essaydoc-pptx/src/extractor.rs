//! Slide extraction from a parsed essay.
//!
//! The deck mirrors the essay's structure:
//!
//! - **Title slide**: essay title, metadata lines as subtitle, the last
//!   metadata line (the date) as a right-aligned footer
//! - **Section slides**: one per section, the heading as title and the
//!   first sentence of each paragraph as a bullet
//! - **Speaker notes**: the section's `Reference:` citations

use essaydoc_ast::{split_reference, Document, MetadataRole, Section};
use log::debug;

use crate::contract::DeckContract;
use crate::slide::{Slide, SpeakerNotes};

/// Suffix appended to truncated bullets
const ELLIPSIS: &str = "...";

/// A complete slide deck (collection of slides)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Deck {
    /// Presentation title
    pub title: Option<String>,

    /// Author, from the student metadata line
    pub author: Option<String>,

    /// All slides in the deck
    pub slides: Vec<Slide>,
}

impl Deck {
    /// Create a deck with a title
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Add a slide to the deck
    pub fn push(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    /// Get the number of slides
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Check if the deck is empty
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

/// Extracts slides from a parsed essay
pub struct SlideExtractor<'c> {
    contract: &'c DeckContract,
    slide_number: u32,
}

impl<'c> SlideExtractor<'c> {
    /// Create an extractor driven by a contract
    pub fn new(contract: &'c DeckContract) -> Self {
        Self {
            contract,
            slide_number: 0,
        }
    }

    /// Extract slides using the default contract
    pub fn extract(doc: &Document) -> Deck {
        Self::extract_with_contract(doc, &DeckContract::default())
    }

    /// Extract slides with a custom contract
    pub fn extract_with_contract(doc: &Document, contract: &DeckContract) -> Deck {
        let mut extractor = SlideExtractor::new(contract);
        extractor.process_document(doc)
    }

    /// Process the entire document
    fn process_document(&mut self, doc: &Document) -> Deck {
        let mut deck = Deck::with_title(doc.title.clone());
        deck.author = doc
            .metadata_value(MetadataRole::Student)
            .map(str::to_string);

        let title_slide = self.title_slide(doc);
        deck.push(title_slide);

        for section in &doc.sections {
            let slide = self.section_slide(section);
            deck.push(slide);
        }

        debug!(
            "Extracted {} slides from {} sections",
            deck.len(),
            doc.sections.len()
        );

        deck
    }

    fn next_number(&mut self) -> u32 {
        self.slide_number += 1;
        self.slide_number
    }

    /// Title, metadata subtitle and date footer
    fn title_slide(&mut self, doc: &Document) -> Slide {
        let number = self.next_number();
        let mut subtitle = doc.metadata_lines.clone();

        let footer = if self.contract.title_slide.footer_from_last_metadata {
            subtitle.pop()
        } else {
            None
        };

        let slide = Slide::title_slide(number, doc.title.clone(), subtitle);
        match footer {
            Some(footer) => slide.with_footer(footer),
            None => slide,
        }
    }

    /// Heading, bullets, image placeholder and reference notes
    fn section_slide(&mut self, section: &Section) -> Slide {
        let number = self.next_number();
        let bullets = extract_bullets(
            &section.paragraphs,
            self.contract.bullets.limit,
            self.contract.bullets.max_chars,
        );

        let mut slide = Slide::content_slide(number, section.heading.clone()).with_bullets(bullets);

        if self.contract.image_placeholder.enabled {
            slide = slide.with_image_placeholder();
        }

        if self.contract.notes.reference_notes {
            let references: Vec<String> = section
                .paragraphs
                .iter()
                .filter_map(|p| split_reference(p).1)
                .map(str::to_string)
                .collect();

            if !references.is_empty() {
                slide = slide.with_notes(SpeakerNotes::from_paragraphs(references));
            }
        }

        slide
    }
}

/// One bullet per paragraph, up to `limit`.
///
/// A bullet is the paragraph's first sentence (through the first `.`),
/// ignoring any `Reference:` citation. Paragraphs with no prose are skipped.
pub fn extract_bullets(paragraphs: &[String], limit: usize, max_chars: usize) -> Vec<String> {
    paragraphs
        .iter()
        .filter_map(|p| first_sentence(split_reference(p).0))
        .map(|sentence| truncate_bullet(sentence, max_chars))
        .take(limit)
        .collect()
}

fn first_sentence(text: &str) -> Option<&str> {
    let sentence = match text.find('.') {
        Some(idx) => text[..=idx].trim(),
        None => text.trim(),
    };
    (!sentence.is_empty()).then_some(sentence)
}

/// Cut to `max_chars - 3` characters plus "..." when longer than `max_chars`
pub fn truncate_bullet(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let truncated: String = text.chars().take(keep).collect();
    format!("{}{}", truncated.trim_end(), ELLIPSIS)
}
