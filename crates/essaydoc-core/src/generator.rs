//! Plain-text generator
//!
//! Writes a [`Document`] back out in the essay layout the parser reads:
//! title, metadata block, then headings and paragraphs separated by single
//! blank lines. Parsing the output with the [`ParserConfig`] the document
//! was parsed with yields the same document; [`parse`] alone only
//! reproduces documents parsed with the default config.
//!
//! [`ParserConfig`]: crate::ParserConfig
//! [`parse`]: crate::parse
//!
//! # Example
//!
//! ```
//! use essaydoc_ast::{Document, Section};
//! use essaydoc_core::{generate, parse};
//!
//! let mut doc = Document::with_title("Essay");
//! doc.metadata_lines = vec!["A".into(), "B".into(), "C".into(), "D".into()];
//! doc.push(Section::new("1. Intro").with_paragraph("Hello."));
//!
//! let text = generate(&doc);
//! assert_eq!(parse(&text)?, doc);
//! # Ok::<(), essaydoc_core::ParseError>(())
//! ```

use std::fmt::Write;

use essaydoc_ast::Document;

/// Render a document as essay text.
///
/// The layout is config-independent. Metadata lines are written one per
/// line, so a config with a different `metadata_lines` count or heading
/// policy can read the output back differently.
pub fn generate(doc: &Document) -> String {
    let mut output = String::new();

    writeln!(output, "{}", doc.title).unwrap();
    for line in &doc.metadata_lines {
        writeln!(output, "{}", line).unwrap();
    }

    for paragraph in &doc.preamble {
        write!(output, "\n{}\n", paragraph).unwrap();
    }

    for section in &doc.sections {
        write!(output, "\n{}\n", section.heading).unwrap();
        for paragraph in &section.paragraphs {
            write!(output, "\n{}\n", paragraph).unwrap();
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use essaydoc_ast::Section;

    #[test]
    fn test_generate_layout() {
        let mut doc = Document::with_title("T");
        doc.metadata_lines = vec!["M".to_string()];
        doc.push(Section::new("1. A").with_paragraph("p1").with_paragraph("p2"));
        doc.push(Section::new("2. B"));

        assert_eq!(generate(&doc), "T\nM\n\n1. A\n\np1\n\np2\n\n2. B\n");
    }
}
