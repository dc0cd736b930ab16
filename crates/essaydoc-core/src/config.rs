//! Parser configuration
//!
//! Loaded from the `[parser]` table of `essaydoc.toml`; every field has a
//! default matching the usual essay layout (four metadata lines, numbered
//! headings, `[` / `]` / `---` delimiters).

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Pattern for "N. Title" headings
const NUMBERED_HEADING_PATTERN: &str = r"^\d+\.\s+\S.*$";

fn numbered_heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(NUMBERED_HEADING_PATTERN).expect("heading pattern is valid"))
}

/// How heading lines are recognized
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum HeadingPolicy {
    /// Any line shaped like "one or more digits, period, space, text"
    #[default]
    Numbered,
    /// Only lines that exactly match one of these strings
    Recognized { headings: Vec<String> },
}

impl HeadingPolicy {
    /// Build a recognized-set policy
    pub fn recognized<I, S>(headings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Recognized {
            headings: headings.into_iter().map(Into::into).collect(),
        }
    }

    /// Check whether a trimmed line is a heading under this policy
    pub fn matches(&self, line: &str) -> bool {
        match self {
            Self::Numbered => numbered_heading_regex().is_match(line),
            Self::Recognized { headings } => headings.iter().any(|h| h.trim() == line),
        }
    }
}

/// What to do with blank lines inside the metadata block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataBlankLines {
    /// Ignore them and keep collecting
    #[default]
    Skip,
    /// Fail with `MalformedInput`
    Reject,
}

/// Configuration for [`crate::parse_with_config`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Number of metadata lines following the title
    pub metadata_lines: usize,
    /// Blank-line handling inside the metadata block
    pub metadata_blank_lines: MetadataBlankLines,
    /// Heading recognition policy
    pub headings: HeadingPolicy,
    /// Lines treated as blank wherever they appear (compared trimmed)
    pub sentinels: Vec<String>,
    /// Fail with `NoSectionsFound` when no heading is recognized
    pub require_sections: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            metadata_lines: 4,
            metadata_blank_lines: MetadataBlankLines::Skip,
            headings: HeadingPolicy::Numbered,
            sentinels: vec!["[".to_string(), "]".to_string(), "---".to_string()],
            require_sections: true,
        }
    }
}

impl ParserConfig {
    /// Parse a configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Set the metadata block size
    pub fn with_metadata_lines(mut self, count: usize) -> Self {
        self.metadata_lines = count;
        self
    }

    /// Set the heading policy
    pub fn with_headings(mut self, headings: HeadingPolicy) -> Self {
        self.headings = headings;
        self
    }

    /// Set the metadata blank-line policy
    pub fn with_metadata_blank_lines(mut self, policy: MetadataBlankLines) -> Self {
        self.metadata_blank_lines = policy;
        self
    }

    /// Accept documents without any heading
    pub fn lenient(mut self) -> Self {
        self.require_sections = false;
        self
    }

    /// Check whether a trimmed line is a configured sentinel
    pub fn is_sentinel(&self, line: &str) -> bool {
        self.sentinels.iter().any(|s| s.trim() == line)
    }
}
