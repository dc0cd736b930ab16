//! Error types for essay parsing

use thiserror::Error;

/// Structural failures of [`crate::parse`]. None of them carry a partial result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input has no non-blank, non-sentinel line
    #[error("Missing title: input contains no title line")]
    MissingTitle,

    /// Input ended before the metadata block was complete
    #[error("Missing metadata: expected {expected} line(s) after the title, found {found}")]
    MissingMetadata { expected: usize, found: usize },

    /// No heading was recognized and the configuration requires one
    #[error("No sections found: no heading line was recognized")]
    NoSectionsFound,

    /// Two sections share the same heading
    #[error("Duplicate heading '{heading}' at line {line}")]
    DuplicateHeading { heading: String, line: usize },

    /// Anything else the configuration forbids
    #[error("Malformed input at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },
}

/// Discriminant of a [`ParseError`], for callers that branch on the failure kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    MissingTitle,
    MissingMetadata,
    NoSectionsFound,
    DuplicateHeading,
    MalformedInput,
}

impl ParseError {
    /// Create a malformed input error
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            line,
            reason: reason.into(),
        }
    }

    /// Kind of this error
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            Self::MissingTitle => ParseErrorKind::MissingTitle,
            Self::MissingMetadata { .. } => ParseErrorKind::MissingMetadata,
            Self::NoSectionsFound => ParseErrorKind::NoSectionsFound,
            Self::DuplicateHeading { .. } => ParseErrorKind::DuplicateHeading,
            Self::MalformedInput { .. } => ParseErrorKind::MalformedInput,
        }
    }
}

/// Result type for parse operations
pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ParseError::MissingMetadata {
            expected: 4,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "Missing metadata: expected 4 line(s) after the title, found 2"
        );

        let err = ParseError::malformed(3, "blank line inside metadata block");
        assert_eq!(
            err.to_string(),
            "Malformed input at line 3: blank line inside metadata block"
        );
    }

    #[test]
    fn test_kind() {
        assert_eq!(ParseError::MissingTitle.kind(), ParseErrorKind::MissingTitle);
        assert_eq!(
            ParseError::DuplicateHeading {
                heading: "1. A".into(),
                line: 9
            }
            .kind(),
            ParseErrorKind::DuplicateHeading
        );
        assert_eq!(
            ParseError::NoSectionsFound.kind(),
            ParseErrorKind::NoSectionsFound
        );
    }
}
