//! skillscope-report — Standalone vector-image chart export.
//!
//! Serializes the evaluation views as self-contained SVG files: a radar
//! chart of one member's competencies (with optional ideal-profile
//! overlay) and a scatter chart placing members by their composite axes.

pub mod scatter;
pub mod svg;

/// Escape a string for safe insertion into SVG text nodes and attributes.
pub(crate) fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
