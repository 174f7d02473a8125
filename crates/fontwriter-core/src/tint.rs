//! Marker/tint color selection.
//!
//! The palette of an encoded atlas is 256 copies of one color, with opacity
//! carried by the transparency ramp. [`Tint`] picks that color.

use std::str::FromStr;

use crate::error::EncodeError;
use crate::raster::unpack_rgba;

/// Packed value that selects [`Tint::FromTransparency`] in [`Tint::from_rgba`].
///
/// As RGBA8888 it is a fully transparent near-black, never a useful tint.
pub const TRANSPARENCY_SENTINEL: u32 = 256;

/// Color used for every palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tint {
    /// White palette. The marker block is validated and stamped white.
    #[default]
    FromTransparency,
    /// Palette of this packed RGBA8888 color's RGB. The marker block is left
    /// as the caller prepared it.
    Solid(u32),
}

impl Tint {
    /// Map a packed color to a tint, honoring [`TRANSPARENCY_SENTINEL`].
    pub fn from_rgba(rgba: u32) -> Self {
        if rgba == TRANSPARENCY_SENTINEL {
            Tint::FromTransparency
        } else {
            Tint::Solid(rgba)
        }
    }

    /// RGB triple written to all 256 palette entries.
    pub fn palette_rgb(self) -> [u8; 3] {
        match self {
            Tint::FromTransparency => [255, 255, 255],
            Tint::Solid(rgba) => {
                let [r, g, b, _] = unpack_rgba(rgba);
                [r, g, b]
            }
        }
    }

    /// Whether the marker block is validated and stamped before encoding.
    pub fn stamps_marker(self) -> bool {
        matches!(self, Tint::FromTransparency)
    }

    /// Parse a hex color.
    ///
    /// Accepted forms, each with or without a leading `#` and optionally
    /// wrapped in quotes: `RRGGBBAA`, `RRGGBB` (opaque) and `RGB` (each
    /// nibble doubled, opaque). `transparency` selects
    /// [`Tint::FromTransparency`].
    pub fn parse(text: &str) -> Result<Self, EncodeError> {
        let trimmed = text.trim().trim_matches(|c: char| c == '\'' || c == '"');
        if trimmed.eq_ignore_ascii_case("transparency") {
            return Ok(Tint::FromTransparency);
        }
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let invalid = || EncodeError::InvalidTint(text.to_string());

        let rgba = match hex.len() {
            8 => parse_hex(hex).ok_or_else(invalid)?,
            6 => parse_hex(hex).ok_or_else(invalid)? << 8 | 0xFF,
            3 => {
                let rgb = parse_hex(hex).ok_or_else(invalid)?;
                let r = (rgb >> 8 & 0xF) * 0x11;
                let g = (rgb >> 4 & 0xF) * 0x11;
                let b = (rgb & 0xF) * 0x11;
                r << 24 | g << 16 | b << 8 | 0xFF
            }
            _ => return Err(invalid()),
        };
        Ok(Tint::Solid(rgba))
    }
}

fn parse_hex(digits: &str) -> Option<u32> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

impl FromStr for Tint {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tint::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_selects_transparency() {
        assert_eq!(Tint::from_rgba(256), Tint::FromTransparency);
        assert_eq!(Tint::from_rgba(0xFF0000FF), Tint::Solid(0xFF0000FF));
        assert_eq!(Tint::default(), Tint::FromTransparency);
    }

    #[test]
    fn test_palette_rgb() {
        assert_eq!(Tint::FromTransparency.palette_rgb(), [255, 255, 255]);
        assert_eq!(Tint::Solid(0x12345678).palette_rgb(), [0x12, 0x34, 0x56]);
    }

    #[test]
    fn test_stamps_marker() {
        assert!(Tint::FromTransparency.stamps_marker());
        assert!(!Tint::Solid(0xFFFFFFFF).stamps_marker());
    }

    #[test]
    fn test_parse_eight_digits() {
        assert_eq!(Tint::parse("#E7420080").unwrap(), Tint::Solid(0xE7420080));
        assert_eq!(Tint::parse("e7420080").unwrap(), Tint::Solid(0xE7420080));
    }

    #[test]
    fn test_parse_six_digits_is_opaque() {
        assert_eq!(Tint::parse("#E74200").unwrap(), Tint::Solid(0xE74200FF));
        assert_eq!(Tint::parse("'E74200'").unwrap(), Tint::Solid(0xE74200FF));
    }

    #[test]
    fn test_parse_three_digits_doubles_nibbles() {
        assert_eq!(Tint::parse("#ABC").unwrap(), Tint::Solid(0xAABBCCFF));
        assert_eq!(Tint::parse("\"f00\"").unwrap(), Tint::Solid(0xFF0000FF));
    }

    #[test]
    fn test_parse_transparency_keyword() {
        assert_eq!(
            Tint::parse("Transparency").unwrap(),
            Tint::FromTransparency
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Tint::parse("dark dullest violet-blue"),
            Err(EncodeError::InvalidTint(_))
        ));
        assert!(Tint::parse("#12").is_err());
        assert!(Tint::parse("#GGGGGG").is_err());
        assert!(Tint::parse("+12345").is_err());
    }

    #[test]
    fn test_from_str() {
        let tint: Tint = "#000".parse().unwrap();
        assert_eq!(tint, Tint::Solid(0x000000FF));
    }
}
