//! DeckContract configuration for PPTX generation.
//!
//! DeckContract fixes everything about the deck that is not taken from the
//! essay: fonts and sizes, bullet limits, the image placeholder and where
//! the title-slide footer comes from. It plays the same role for slides
//! that `StyleProfile` plays for the DOCX output.

use crate::error::{PptxError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default text of the image placeholder rectangle
pub const DEFAULT_PLACEHOLDER_TEXT: &str =
    "Insert relevant image here\n(e.g., growth chart, physiology,\ngenetics, clinic, psychosocial, etc.)";

/// DeckContract configuration for PPTX generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckContract {
    /// Metadata about the contract
    #[serde(default)]
    pub meta: ContractMeta,

    /// Font family and sizes
    #[serde(default)]
    pub fonts: FontConfig,

    /// Bullet extraction limits
    #[serde(default)]
    pub bullets: BulletConfig,

    /// Body placeholder geometry on content slides
    #[serde(default)]
    pub body: BodyConfig,

    /// Image placeholder rectangle on content slides
    #[serde(default)]
    pub image_placeholder: ImagePlaceholderConfig,

    /// Title slide options
    #[serde(default)]
    pub title_slide: TitleSlideConfig,

    /// Speaker notes options
    #[serde(default)]
    pub notes: NotesConfig,
}

/// Contract metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractMeta {
    /// Locale code (e.g., "en-US", "it-IT")
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Description
    #[serde(default)]
    pub description: String,
}

fn default_locale() -> String {
    "en-US".to_string()
}

/// Font family and sizes in points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontConfig {
    /// Font family for every run
    #[serde(default = "default_font_family")]
    pub family: String,

    /// Title on the title slide
    #[serde(default = "default_title_size")]
    pub title_size: u32,

    /// Title on section slides
    #[serde(default = "default_section_title_size")]
    pub section_title_size: u32,

    /// Metadata lines on the title slide
    #[serde(default = "default_subtitle_size")]
    pub subtitle_size: u32,

    /// Title slide footer
    #[serde(default = "default_footer_size")]
    pub footer_size: u32,

    /// Bullet text
    #[serde(default = "default_bullet_size")]
    pub bullet_size: u32,

    /// Image placeholder text
    #[serde(default = "default_placeholder_size")]
    pub placeholder_size: u32,
}

fn default_font_family() -> String {
    "Calibri".to_string()
}
fn default_title_size() -> u32 {
    36
}
fn default_section_title_size() -> u32 {
    34
}
fn default_subtitle_size() -> u32 {
    24
}
fn default_footer_size() -> u32 {
    14
}
fn default_bullet_size() -> u32 {
    22
}
fn default_placeholder_size() -> u32 {
    12
}

/// Bullet extraction limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletConfig {
    /// Maximum bullets per section slide
    #[serde(default = "default_bullet_limit")]
    pub limit: usize,

    /// Bullets longer than this (in characters) are truncated with "..."
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

fn default_bullet_limit() -> usize {
    4
}
fn default_max_chars() -> usize {
    150
}

/// Body placeholder geometry in inches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    pub left: f64,
    pub width: f64,
}

/// Image placeholder rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagePlaceholderConfig {
    /// Draw the rectangle on section slides
    pub enabled: bool,
    /// Centered text; newlines start new paragraphs
    pub text: String,
    /// Fill color (hex RGB)
    pub fill_color: String,
    /// Outline color (hex RGB)
    pub line_color: String,
    /// Geometry in inches
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Title slide options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleSlideConfig {
    /// Move the last metadata line (the date) into a right-aligned footer
    #[serde(default = "default_true")]
    pub footer_from_last_metadata: bool,
}

/// Speaker notes options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotesConfig {
    /// Put each section's reference citations into its speaker notes
    #[serde(default = "default_true")]
    pub reference_notes: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ContractMeta {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            description: String::new(),
        }
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: default_font_family(),
            title_size: default_title_size(),
            section_title_size: default_section_title_size(),
            subtitle_size: default_subtitle_size(),
            footer_size: default_footer_size(),
            bullet_size: default_bullet_size(),
            placeholder_size: default_placeholder_size(),
        }
    }
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            limit: default_bullet_limit(),
            max_chars: default_max_chars(),
        }
    }
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            left: 0.7,
            width: 5.5,
        }
    }
}

impl Default for ImagePlaceholderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            text: DEFAULT_PLACEHOLDER_TEXT.to_string(),
            fill_color: "F2F2F2".to_string(),
            line_color: "C8C8C8".to_string(),
            left: 6.5,
            top: 1.5,
            width: 3.0,
            height: 4.5,
        }
    }
}

impl Default for TitleSlideConfig {
    fn default() -> Self {
        Self {
            footer_from_last_metadata: true,
        }
    }
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            reference_notes: true,
        }
    }
}

impl DeckContract {
    /// Load a DeckContract from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse a DeckContract from TOML content
    pub fn parse(toml_content: &str) -> Result<Self> {
        let contract: DeckContract = toml::from_str(toml_content)?;
        Ok(contract)
    }

    /// Validate values the writer and extractor rely on
    pub fn validate(&self) -> Result<()> {
        if self.fonts.family.trim().is_empty() {
            return Err(PptxError::contract_error("font family must not be empty"));
        }

        // Truncation keeps max_chars - 3 characters plus "..."
        if self.bullets.max_chars < 4 {
            return Err(PptxError::contract_error(format!(
                "bullets.max_chars must be at least 4, got {}",
                self.bullets.max_chars
            )));
        }

        for (name, color) in [
            ("fill_color", &self.image_placeholder.fill_color),
            ("line_color", &self.image_placeholder.line_color),
        ] {
            if !is_hex_color(color) {
                return Err(PptxError::contract_error(format!(
                    "image_placeholder.{} must be 6 hex digits, got '{}'",
                    name, color
                )));
            }
        }

        let sizes = [
            self.fonts.title_size,
            self.fonts.section_title_size,
            self.fonts.subtitle_size,
            self.fonts.footer_size,
            self.fonts.bullet_size,
            self.fonts.placeholder_size,
        ];
        if sizes.contains(&0) {
            return Err(PptxError::contract_error("font sizes must be positive"));
        }

        Ok(())
    }
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 6 && value.chars().all(|c| c.is_ascii_hexdigit())
}
