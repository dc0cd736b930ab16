//! Failures while building a deck.

use thiserror::Error;

/// Result alias for deck operations
pub type Result<T> = std::result::Result<T, PptxError>;

#[derive(Error, Debug)]
pub enum PptxError {
    /// Contract values the writer cannot honor
    #[error("DeckContract error: {reason}")]
    ContractError { reason: String },

    /// The deck cannot be rendered as given
    #[error("Invalid deck: {reason}")]
    InvalidDeck { reason: String },

    #[error("Archive error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Contract file is not valid TOML
    #[error("Invalid contract TOML: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl PptxError {
    pub fn contract_error(reason: impl Into<String>) -> Self {
        Self::ContractError {
            reason: reason.into(),
        }
    }

    pub fn invalid_deck(reason: impl Into<String>) -> Self {
        Self::InvalidDeck {
            reason: reason.into(),
        }
    }

    /// Stable code for diagnostics, PPTX001 to PPTX005
    pub fn code(&self) -> &'static str {
        match self {
            Self::ContractError { .. } => "PPTX001",
            Self::InvalidDeck { .. } => "PPTX002",
            Self::ZipError(_) => "PPTX003",
            Self::IoError(_) => "PPTX004",
            Self::TomlError(_) => "PPTX005",
        }
    }
}
