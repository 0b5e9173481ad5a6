//! 8-bit sRGB color type
//!
//! [`Rgb`] is the boundary color: palettes arrive as hex strings and leave
//! the suggester as hex strings, and every quantized pixel is one of these.

use std::fmt;
use std::str::FromStr;

use super::lab::{rgb_to_lab, Lab};
use crate::palette::ParseColorError;

/// A color in sRGB with one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    /// Create a color from 8-bit channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array `[R, G, B]`.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array `[R, G, B]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Round and clamp floating point channels into a color.
    ///
    /// Used wherever a continuous value (k-means centroid, interpolated
    /// sample) is consumed as a concrete color.
    ///
    /// # Example
    /// ```
    /// use pixel_quant::Rgb;
    /// assert_eq!(Rgb::from_f64([12.4, 300.0, -3.0]), Rgb::new(12, 255, 0));
    /// ```
    #[inline]
    pub fn from_f64(channels: [f64; 3]) -> Self {
        Self::new(
            clamp_channel(channels[0]),
            clamp_channel(channels[1]),
            clamp_channel(channels[2]),
        )
    }

    /// Channels as floats in the 0..255 scale.
    #[inline]
    pub fn to_f64(self) -> [f64; 3] {
        [self.r as f64, self.g as f64, self.b as f64]
    }

    /// Convert to CIE Lab.
    #[inline]
    pub fn to_lab(self) -> Lab {
        rgb_to_lab(self.r as f64, self.g as f64, self.b as f64)
    }

    /// Format as a lowercase `#rrggbb` string.
    ///
    /// # Example
    /// ```
    /// use pixel_quant::Rgb;
    /// assert_eq!(Rgb::new(255, 128, 0).to_hex(), "#ff8000");
    /// ```
    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

/// Round to nearest and saturate into a byte.
#[inline]
pub(crate) fn clamp_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`, case-insensitive,
    /// with surrounding whitespace trimmed.
    ///
    /// ```
    /// use pixel_quant::Rgb;
    ///
    /// let red: Rgb = "#F00".parse().unwrap();
    /// assert_eq!(red, Rgb::new(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        if !matches!(s.len(), 3 | 6) {
            return Err(ParseColorError::InvalidLength(s.to_string()));
        }
        // from_str_radix alone would accept a leading '+'
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidHex(s.to_string()));
        }
        let v = u32::from_str_radix(s, 16)
            .map_err(|_| ParseColorError::InvalidHex(s.to_string()))?;

        match s.len() {
            3 => {
                // Shorthand: each digit expands to a byte (0xF -> 0xFF)
                let digit = |shift: u32| ((v >> shift) & 0xF) as u8 * 17;
                Ok(Self::new(digit(8), digit(4), digit(0)))
            }
            6 => Ok(Self::new((v >> 16) as u8, (v >> 8) as u8, v as u8)),
            _ => Err(ParseColorError::InvalidLength(s.to_string())),
        }
    }
}
