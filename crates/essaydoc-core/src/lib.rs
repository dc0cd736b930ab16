//! essaydoc-core - Essay structure parsing
//!
//! Turns a semi-structured essay (title line, metadata block, numbered
//! sections of prose) into an [`essaydoc_ast::Document`].
//!
//! # Example
//!
//! ```
//! use essaydoc_core::parse;
//!
//! let text = "Title\nLine A\nLine B\nLine C\nLine D\n\n1. Intro\n\nPara one.\n\nPara two.";
//! let doc = parse(text)?;
//! assert_eq!(doc.title, "Title");
//! assert_eq!(doc.sections[0].heading, "1. Intro");
//! assert_eq!(doc.sections[0].paragraphs, vec!["Para one.", "Para two."]);
//! # Ok::<(), essaydoc_core::ParseError>(())
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod parser;

// Re-export main types and functions
pub use config::{HeadingPolicy, MetadataBlankLines, ParserConfig};
pub use error::{ParseError, ParseErrorKind, Result};
pub use generator::generate;
pub use parser::{parse, parse_with_config};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "0.1.0");
    }
}
