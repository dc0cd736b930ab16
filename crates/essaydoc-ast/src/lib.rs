//! essaydoc-ast - Document model definitions
//!
//! This crate provides the types produced by the essay parser and consumed
//! by the DOCX and PPTX renderers.

pub mod document;
pub mod reference;

pub use document::{Document, MetadataRole, Section};
pub use reference::{split_reference, REFERENCE_MARKER};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
