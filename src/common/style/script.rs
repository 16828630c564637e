//! Vertical text position.

use serde::Serialize;

/// Font script: vertical position of text relative to the baseline.
///
/// Corresponds to `w:vertAlign` on run properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Script {
    /// Normal position
    #[default]
    Baseline,
    /// Superscript
    Superscript,
    /// Subscript
    Subscript,
}

impl Script {
    /// Parse from a `w:vertAlign/@w:val` attribute value.
    ///
    /// Returns `None` if the value is not recognized.
    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "baseline" => Some(Self::Baseline),
            "superscript" => Some(Self::Superscript),
            "subscript" => Some(Self::Subscript),
            _ => None,
        }
    }

    /// Check if this is the normal (baseline) position.
    #[inline]
    pub fn is_baseline(&self) -> bool {
        matches!(self, Script::Baseline)
    }
}
