//! Citation handling
//!
//! Essay paragraphs may end with a `Reference:` line citing their source.
//! The renderers treat the citation separately from the prose.

/// Marker that introduces a citation inside a paragraph
pub const REFERENCE_MARKER: &str = "Reference:";

/// Split a paragraph into its prose and its citation.
///
/// The citation is everything after the first [`REFERENCE_MARKER`], trimmed.
/// Both halves are trimmed; an empty citation is reported as `None`.
pub fn split_reference(paragraph: &str) -> (&str, Option<&str>) {
    match paragraph.find(REFERENCE_MARKER) {
        Some(pos) => {
            let body = paragraph[..pos].trim();
            let reference = paragraph[pos + REFERENCE_MARKER.len()..].trim();
            (body, (!reference.is_empty()).then_some(reference))
        }
        None => (paragraph.trim(), None),
    }
}
