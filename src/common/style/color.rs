use serde::Serialize;
use std::fmt;

/// RGB color representation.
///
/// Represents a font color using red, green, and blue components, each in the
/// range 0-255. The default is black, which is what `auto` resolves to for
/// text on a white page.
///
/// # Examples
///
/// ```rust
/// use litchi_outline::common::RGBColor;
///
/// let red = RGBColor::new(255, 0, 0);
/// assert_eq!(RGBColor::from_hex("FF0000"), Some(red));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct RGBColor {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl RGBColor {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create an RGB color from a hex string (e.g., "FF0000" or "#FF0000").
    ///
    /// Returns `None` for malformed input.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Self::new(r, g, b))
    }

    /// Parse a `w:color/@w:val` attribute.
    ///
    /// `auto` means "let the consumer decide" and is treated as unset, so the
    /// inherited color stays in effect.
    pub fn from_xml(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("auto") {
            return None;
        }
        Self::from_hex(value)
    }

    /// Convert to hex string (without # prefix).
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for RGBColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}
