use serde::{Deserialize, Serialize};
use std::fmt;

/// RGB color representation.
///
/// Serialized as a `[r, g, b]` triple in configuration files.
///
/// # Examples
///
/// ```rust
/// use deckforge::common::RGBColor;
///
/// let navy = RGBColor::new(5, 35, 70);
/// assert_eq!(navy.to_hex(), "052346");
/// assert_eq!(RGBColor::from_hex("#052346"), Some(navy));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct RGBColor {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl RGBColor {
    pub const WHITE: RGBColor = RGBColor::new(255, 255, 255);
    pub const BLACK: RGBColor = RGBColor::new(0, 0, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a six-digit hex string, with or without a leading `#`.
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

    /// Uppercase hex without `#`, the form `<a:srgbClr val="..."/>` expects.
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Linear blend toward `other`; `t` is clamped to `0.0..=1.0`.
    ///
    /// Each channel is `floor(a + (b - a) * t)`: exact at both endpoints and
    /// monotonic in `t`.
    pub fn lerp(&self, other: RGBColor, t: f64) -> RGBColor {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t) as u8;
        RGBColor::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    #[inline]
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for RGBColor {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<RGBColor> for [u8; 3] {
    fn from(color: RGBColor) -> Self {
        color.to_array()
    }
}

impl fmt::Display for RGBColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}
