//! Style profile for DOCX output
//!
//! A [`StyleProfile`] is the one place where typography and page layout are
//! configured: fonts, sizes, spacing, indentation, alignment and margins.
//! Every field has a default matching a conventional academic essay
//! (Times New Roman 12pt, double spacing, 0.25" first-line indent,
//! 1" margins), so a `[docx]` table in `essaydoc.toml` only lists overrides.
//!
//! # Example
//!
//! ```
//! use essaydoc_ooxml::{LineSpacing, StyleProfile};
//!
//! let profile = StyleProfile::from_toml_str(r#"
//! font_name = "Georgia"
//! line_spacing = "one_and_half"
//! "#)?;
//! assert_eq!(profile.font_name, "Georgia");
//! assert_eq!(profile.line_spacing, LineSpacing::OneAndHalf);
//! assert_eq!(profile.body_size_pt, 12.0);
//! # Ok::<(), essaydoc_ooxml::OoxmlError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Twentieths of a point per inch
pub const TWIPS_PER_INCH: f32 = 1440.0;

/// Twentieths of a point per point
pub const TWIPS_PER_POINT: f32 = 20.0;

/// Body line spacing rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineSpacing {
    Single,
    OneAndHalf,
    #[default]
    Double,
}

impl LineSpacing {
    /// Value of `w:spacing/@w:line` with `w:lineRule="auto"` (240 = single)
    pub fn line_value(self) -> u32 {
        match self {
            LineSpacing::Single => 240,
            LineSpacing::OneAndHalf => 360,
            LineSpacing::Double => 480,
        }
    }
}

/// Paragraph alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// Value of `w:jc/@w:val`
    pub fn jc_value(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "both",
        }
    }
}

/// Emphasis applied to metadata lines on the title page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    #[default]
    None,
    Bold,
    Italic,
}

/// Page margins in inches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

impl Margins {
    /// Same margin on all four sides
    pub fn uniform(inches: f32) -> Self {
        Self {
            top: inches,
            bottom: inches,
            left: inches,
            right: inches,
        }
    }
}

/// Typography and layout for generated documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleProfile {
    /// Font family for every style
    pub font_name: String,
    /// Body text size
    pub body_size_pt: f32,
    /// Section heading size
    pub heading_size_pt: f32,
    /// Bold section headings
    pub heading_bold: bool,
    /// Title size on the title page
    pub title_size_pt: f32,
    /// Bold title
    pub title_bold: bool,
    /// Metadata line size on the title page
    pub metadata_size_pt: f32,
    /// Metadata line emphasis
    pub metadata_emphasis: Emphasis,
    /// Body line spacing
    pub line_spacing: LineSpacing,
    /// First-line indent of body paragraphs
    pub first_line_indent_in: f32,
    /// Space after each body paragraph
    pub space_after_pt: f32,
    /// Body paragraph alignment
    pub alignment: Alignment,
    /// Page margins
    pub margins: Margins,
    /// Page break between the title page and the body
    pub title_page_break: bool,
}

impl Default for StyleProfile {
    fn default() -> Self {
        Self {
            font_name: "Times New Roman".to_string(),
            body_size_pt: 12.0,
            heading_size_pt: 14.0,
            heading_bold: true,
            title_size_pt: 16.0,
            title_bold: true,
            metadata_size_pt: 12.0,
            metadata_emphasis: Emphasis::None,
            line_spacing: LineSpacing::Double,
            first_line_indent_in: 0.25,
            space_after_pt: 12.0,
            alignment: Alignment::Left,
            margins: Margins::default(),
            title_page_break: true,
        }
    }
}

impl StyleProfile {
    /// Parse a profile from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }
}

/// Convert points to half-points (`w:sz`)
pub fn half_points(pt: f32) -> u32 {
    (pt * 2.0).round() as u32
}

/// Convert inches to twips
pub fn inches_to_twips(inches: f32) -> u32 {
    (inches * TWIPS_PER_INCH).round() as u32
}

/// Convert points to twips
pub fn points_to_twips(pt: f32) -> u32 {
    (pt * TWIPS_PER_POINT).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversions() {
        assert_eq!(half_points(12.0), 24);
        assert_eq!(half_points(10.5), 21);
        assert_eq!(inches_to_twips(1.0), 1440);
        assert_eq!(inches_to_twips(0.25), 360);
        assert_eq!(points_to_twips(12.0), 240);
    }

    #[test]
    fn test_line_spacing_values() {
        assert_eq!(LineSpacing::Single.line_value(), 240);
        assert_eq!(LineSpacing::OneAndHalf.line_value(), 360);
        assert_eq!(LineSpacing::Double.line_value(), 480);
    }

    #[test]
    fn test_justify_maps_to_both() {
        assert_eq!(Alignment::Justify.jc_value(), "both");
    }

    #[test]
    fn test_partial_margins() {
        let profile = StyleProfile::from_toml_str(
            r#"
metadata_emphasis = "italic"

[margins]
left = 1.5
"#,
        )
        .unwrap();

        assert_eq!(profile.metadata_emphasis, Emphasis::Italic);
        assert_eq!(profile.margins.left, 1.5);
        assert_eq!(profile.margins.top, 1.0);
    }

    #[test]
    fn test_invalid_profile() {
        assert!(StyleProfile::from_toml_str("line_spacing = \"triple\"").is_err());
    }
}
