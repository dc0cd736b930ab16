//! essaydoc-ooxml - DOCX generation
//!
//! Renders a parsed essay as a Word document: a centered title page,
//! then each section as a `Heading1` paragraph followed by `Normal` body
//! paragraphs. Typography is driven by a [`StyleProfile`].
//!
//! # Example
//!
//! ```no_run
//! use essaydoc_ooxml::{DocxWriter, StyleProfile};
//!
//! let doc = essaydoc_core::parse(&std::fs::read_to_string("essay.txt")?)?;
//! let bytes = DocxWriter::new(StyleProfile::default()).generate(&doc)?;
//! std::fs::write("essay.docx", bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod archive;
pub mod error;
pub mod reader;
pub mod style_profile;
pub mod writer;

pub use archive::OoxmlArchive;
pub use error::{OoxmlError, Result};
pub use reader::{read_archive_paragraphs, read_paragraph_texts, read_paragraphs, DocxParagraph};
pub use style_profile::{Alignment, Emphasis, LineSpacing, Margins, StyleProfile};
pub use writer::DocxWriter;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
