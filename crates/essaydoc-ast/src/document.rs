//! Document root and section definitions
//!
//! A [`Document`] is built once from the essay text, handed to the
//! renderers, and dropped. Nothing mutates it after parsing.

use serde::{Deserialize, Serialize};

/// A parsed essay
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Displayed title (never empty once parsed)
    pub title: String,
    /// Lines of the metadata block, in display order
    pub metadata_lines: Vec<String>,
    /// Paragraphs that appear before the first heading
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preamble: Vec<String>,
    /// Sections in reading order
    pub sections: Vec<Section>,
}

/// A titled, ordered group of paragraphs
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Section {
    /// Heading line, e.g. `"1. Introduction"`
    pub heading: String,
    /// Blank-line-delimited prose blocks
    pub paragraphs: Vec<String>,
}

/// Display role of a metadata line, by position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataRole {
    /// "Prepared for: ..."
    PreparedFor,
    /// "Student: ..."
    Student,
    /// "Course: ..."
    Course,
    /// "Date: ..."
    Date,
    /// Any position past the four standard roles
    Other(usize),
}

impl MetadataRole {
    /// Role of the metadata line at `index`
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Self::PreparedFor,
            1 => Self::Student,
            2 => Self::Course,
            3 => Self::Date,
            n => Self::Other(n),
        }
    }

    /// Position of this role in the metadata block
    pub fn index(self) -> usize {
        match self {
            Self::PreparedFor => 0,
            Self::Student => 1,
            Self::Course => 2,
            Self::Date => 3,
            Self::Other(n) => n,
        }
    }
}

impl Document {
    /// Create a document with a title and no content
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Add a section
    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Metadata line for a display role, if present
    pub fn metadata(&self, role: MetadataRole) -> Option<&str> {
        self.metadata_lines.get(role.index()).map(|s| s.as_str())
    }

    /// Value part of a "Label: value" metadata line.
    ///
    /// Lines without a colon are returned whole.
    pub fn metadata_value(&self, role: MetadataRole) -> Option<&str> {
        self.metadata(role).map(|line| match line.split_once(':') {
            Some((_, value)) => value.trim(),
            None => line,
        })
    }

    /// Look up a section by its heading
    pub fn section(&self, heading: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.heading == heading)
    }

    /// Number of sections
    pub fn heading_count(&self) -> usize {
        self.sections.len()
    }

    /// Total paragraphs across preamble and sections
    pub fn paragraph_count(&self) -> usize {
        self.preamble.len() + self.sections.iter().map(|s| s.paragraphs.len()).sum::<usize>()
    }

    /// Check if the document has no sections
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl Section {
    /// Create a section with no paragraphs
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            paragraphs: Vec::new(),
        }
    }

    /// Builder-style paragraph append
    pub fn with_paragraph(mut self, paragraph: impl Into<String>) -> Self {
        self.paragraphs.push(paragraph.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let mut doc = Document::with_title("Short Stature");
        doc.metadata_lines = vec![
            "Prepared for: Faculty".to_string(),
            "Student: A. Student".to_string(),
            "Course: Pediatrics".to_string(),
            "Date: May 2025".to_string(),
        ];
        doc.push(
            Section::new("1. Introduction")
                .with_paragraph("First.")
                .with_paragraph("Second."),
        );
        doc.push(Section::new("2. Conclusion"));
        doc
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::default();
        assert!(doc.is_empty());
        assert_eq!(doc.heading_count(), 0);
        assert_eq!(doc.paragraph_count(), 0);
    }

    #[test]
    fn test_metadata_roles() {
        let doc = sample();
        assert_eq!(doc.metadata(MetadataRole::Student), Some("Student: A. Student"));
        assert_eq!(doc.metadata(MetadataRole::Date), Some("Date: May 2025"));
        assert_eq!(doc.metadata(MetadataRole::Other(7)), None);
    }

    #[test]
    fn test_metadata_value_strips_label() {
        let mut doc = sample();
        assert_eq!(doc.metadata_value(MetadataRole::Student), Some("A. Student"));

        doc.metadata_lines[2] = "Pediatrics".to_string();
        assert_eq!(doc.metadata_value(MetadataRole::Course), Some("Pediatrics"));
    }

    #[test]
    fn test_role_index_round_trip() {
        for i in 0..6 {
            assert_eq!(MetadataRole::from_index(i).index(), i);
        }
    }

    #[test]
    fn test_counts() {
        let doc = sample();
        assert_eq!(doc.heading_count(), 2);
        assert_eq!(doc.paragraph_count(), 2);
        assert!(doc.section("2. Conclusion").unwrap().paragraphs.is_empty());
    }

    #[test]
    fn test_json_omits_empty_preamble() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(!json.contains("preamble"));

        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }
}
