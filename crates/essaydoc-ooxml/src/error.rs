//! Failures while writing or reading DOCX packages

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OoxmlError {
    /// Zip container could not be read or written
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// `document.xml` or another part is not well-formed
    #[error("Malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// TOML style profile rejected by the deserializer
    #[error("Invalid style profile: {0}")]
    Profile(#[from] toml::de::Error),

    /// Package lacks a required part
    #[error("Package has no part named '{0}'")]
    MissingFile(String),

    /// Document cannot be rendered (e.g. empty title)
    #[error("Cannot render document: {0}")]
    InvalidStructure(String),
}

/// Result alias for package operations
pub type Result<T> = std::result::Result<T, OoxmlError>;
