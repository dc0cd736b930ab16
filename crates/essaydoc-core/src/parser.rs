//! Essay structure parser
//!
//! Scans the essay line by line:
//!
//! 1. the first non-blank, non-sentinel line is the title;
//! 2. the next N lines are the metadata block;
//! 3. every heading line (see [`HeadingPolicy`]) opens a section;
//! 4. runs of blank lines separate paragraphs.
//!
//! Whitespace-only lines and sentinel lines (`[`, `]`, `---` by default)
//! count as blank. A line that is not a heading always belongs to the
//! current paragraph.
//!
//! [`HeadingPolicy`]: crate::HeadingPolicy

use std::collections::HashSet;

use essaydoc_ast::{Document, Section};

use crate::config::{MetadataBlankLines, ParserConfig};
use crate::error::{ParseError, Result};

/// Which part of the essay the parser is reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Looking for the title line
    Title,
    /// Collecting metadata lines
    Metadata,
    /// Reading preamble and sections
    Body,
}

/// Line-scanning state machine
struct Parser<'c> {
    config: &'c ParserConfig,
    phase: Phase,
    title: Option<String>,
    metadata: Vec<String>,
    preamble: Vec<String>,
    sections: Vec<Section>,
    /// Lines of the paragraph being built
    paragraph: Vec<String>,
    /// Headings seen so far, for the uniqueness check
    seen_headings: HashSet<String>,
}

impl<'c> Parser<'c> {
    fn new(config: &'c ParserConfig) -> Self {
        Self {
            config,
            phase: Phase::Title,
            title: None,
            metadata: Vec::new(),
            preamble: Vec::new(),
            sections: Vec::new(),
            paragraph: Vec::new(),
            seen_headings: HashSet::new(),
        }
    }

    /// Parse the entire document
    fn parse(mut self, text: &str) -> Result<Document> {
        // Normalize line endings
        let text = text.replace("\r\n", "\n");

        for (index, line) in text.lines().enumerate() {
            self.process_line(index + 1, line)?;
        }

        self.flush_paragraph();
        self.finish()
    }

    /// Process a single line (1-based `line_no`)
    fn process_line(&mut self, line_no: usize, line: &str) -> Result<()> {
        let trimmed = line.trim();
        let blank = trimmed.is_empty() || self.config.is_sentinel(trimmed);

        match self.phase {
            Phase::Title => {
                if !blank {
                    self.title = Some(trimmed.to_string());
                    self.phase = if self.config.metadata_lines == 0 {
                        Phase::Body
                    } else {
                        Phase::Metadata
                    };
                }
            }
            Phase::Metadata => {
                if blank {
                    if self.config.metadata_blank_lines == MetadataBlankLines::Reject {
                        return Err(ParseError::malformed(
                            line_no,
                            "blank line inside metadata block",
                        ));
                    }
                    return Ok(());
                }

                // Taken verbatim, even when it looks like a heading
                self.metadata.push(trimmed.to_string());
                if self.metadata.len() == self.config.metadata_lines {
                    self.phase = Phase::Body;
                }
            }
            Phase::Body => {
                if blank {
                    self.flush_paragraph();
                } else if self.config.headings.matches(trimmed) {
                    self.start_section(line_no, trimmed)?;
                } else {
                    self.paragraph.push(trimmed.to_string());
                }
            }
        }

        Ok(())
    }

    /// Close the current section's paragraph and open a new section
    fn start_section(&mut self, line_no: usize, heading: &str) -> Result<()> {
        self.flush_paragraph();

        if !self.seen_headings.insert(heading.to_string()) {
            return Err(ParseError::DuplicateHeading {
                heading: heading.to_string(),
                line: line_no,
            });
        }

        self.sections.push(Section::new(heading));
        Ok(())
    }

    /// Move accumulated lines into the current section (or the preamble)
    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }

        let text = std::mem::take(&mut self.paragraph).join("\n");
        match self.sections.last_mut() {
            Some(section) => section.paragraphs.push(text),
            None => self.preamble.push(text),
        }
    }

    fn missing_metadata(&self) -> ParseError {
        ParseError::MissingMetadata {
            expected: self.config.metadata_lines,
            found: self.metadata.len(),
        }
    }

    /// Validate end-of-input state and assemble the document
    fn finish(self) -> Result<Document> {
        match self.phase {
            Phase::Title => return Err(ParseError::MissingTitle),
            Phase::Metadata => return Err(self.missing_metadata()),
            Phase::Body => {}
        }

        if self.sections.is_empty() && self.config.require_sections {
            return Err(ParseError::NoSectionsFound);
        }

        Ok(Document {
            title: self.title.unwrap_or_default(),
            metadata_lines: self.metadata,
            preamble: self.preamble,
            sections: self.sections,
        })
    }
}

/// Parse essay text with the default [`ParserConfig`].
///
/// # Errors
///
/// Returns a [`ParseError`] when the title, the metadata block, or (in
/// strict mode) every heading is missing, or when a heading repeats.
pub fn parse(text: &str) -> Result<Document> {
    parse_with_config(text, &ParserConfig::default())
}

/// Parse essay text with an explicit configuration.
pub fn parse_with_config(text: &str, config: &ParserConfig) -> Result<Document> {
    Parser::new(config).parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeadingPolicy;
    use crate::error::ParseErrorKind;

    const HEADER: &str = "Title\nA\nB\nC\nD\n";

    #[test]
    fn test_title_skips_opening_bracket() {
        let doc = parse("[\n\n  My Essay  \nA\nB\nC\nD\n1. One\nText").unwrap();
        assert_eq!(doc.title, "My Essay");
        assert_eq!(doc.metadata_lines, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse("").unwrap_err(), ParseError::MissingTitle);
        assert_eq!(parse(" \n[\n\n]").unwrap_err(), ParseError::MissingTitle);
    }

    #[test]
    fn test_metadata_skips_blank_lines_by_default() {
        let doc = parse("Title\n\nA\n\nB\nC\n\nD\n\n1. One").unwrap();
        assert_eq!(doc.metadata_lines, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_metadata_reject_blank_lines() {
        let config =
            ParserConfig::default().with_metadata_blank_lines(MetadataBlankLines::Reject);
        let err = parse_with_config("Title\nA\n\nB\nC\nD\n1. One", &config).unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::MalformedInput);
        assert!(matches!(err, ParseError::MalformedInput { line: 3, .. }));
    }

    #[test]
    fn test_input_ends_inside_metadata_block() {
        let err = parse("Title\nA\nB\n\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingMetadata {
                expected: 4,
                found: 2
            }
        );
    }

    #[test]
    fn test_numbered_metadata_line_is_metadata() {
        let doc = parse(
            "Title\nPrepared for: Faculty\nStudent: Jane\nCourse: Peds\n12. May 2025\n\n1. Intro\n\nBody.",
        )
        .unwrap();
        assert_eq!(doc.metadata_lines[3], "12. May 2025");
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].heading, "1. Intro");
        assert_eq!(doc.sections[0].paragraphs, vec!["Body."]);
    }

    #[test]
    fn test_short_metadata_swallows_heading() {
        let err = parse("Title\nA\nB\n\n1. Intro\nText").unwrap_err();
        assert_eq!(err, ParseError::NoSectionsFound);
    }

    #[test]
    fn test_zero_metadata_lines() {
        let config = ParserConfig::default().with_metadata_lines(0);
        let doc = parse_with_config("Title\n1. One\nBody", &config).unwrap();
        assert!(doc.metadata_lines.is_empty());
        assert_eq!(doc.sections[0].paragraphs, vec!["Body"]);
    }

    #[test]
    fn test_multiline_paragraph_is_trimmed_per_line() {
        let doc = parse(&format!("{HEADER}1. One\n  first line  \n\tsecond line\n")).unwrap();
        assert_eq!(doc.sections[0].paragraphs, vec!["first line\nsecond line"]);
    }

    #[test]
    fn test_sentinels_in_body_act_as_blank() {
        let doc = parse(&format!("{HEADER}---\n1. One\nFirst\n---\nSecond\n]")).unwrap();
        assert_eq!(doc.sections[0].paragraphs, vec!["First", "Second"]);
    }

    #[test]
    fn test_preamble_before_first_heading() {
        let doc = parse(&format!("{HEADER}\nAbstract text.\n\n1. One\nBody")).unwrap();
        assert_eq!(doc.preamble, vec!["Abstract text."]);
        assert_eq!(doc.sections.len(), 1);
    }

    #[test]
    fn test_duplicate_heading() {
        let err = parse(&format!("{HEADER}1. One\n\n1. One\n")).unwrap_err();
        assert_eq!(
            err,
            ParseError::DuplicateHeading {
                heading: "1. One".to_string(),
                line: 8
            }
        );
    }

    #[test]
    fn test_recognized_policy_ignores_other_numbered_lines() {
        let config = ParserConfig::default().with_headings(HeadingPolicy::recognized(["1. One"]));
        let doc = parse_with_config(&format!("{HEADER}1. One\nText\n2. Not a heading\n"), &config)
            .unwrap();
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].paragraphs, vec!["Text\n2. Not a heading"]);
    }

    #[test]
    fn test_numbered_policy_splits_inside_paragraph() {
        let doc = parse(&format!("{HEADER}1. One\nText\n2. Two\nMore")).unwrap();
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[0].paragraphs, vec!["Text"]);
        assert_eq!(doc.sections[1].paragraphs, vec!["More"]);
    }

    #[test]
    fn test_crlf_input() {
        let doc = parse("Title\r\nA\r\nB\r\nC\r\nD\r\n\r\n1. One\r\n\r\nBody\r\n").unwrap();
        assert_eq!(doc.sections[0].heading, "1. One");
        assert_eq!(doc.sections[0].paragraphs, vec!["Body"]);
    }
}
