use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty color string")]
    Empty,
    #[error("expected 6 hex digits, got {len} bytes in '{input}'")]
    InvalidLength { input: String, len: usize },
    #[error("invalid hex digits in '{input}'")]
    InvalidHex { input: String },
}

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse exactly six hex digits (`RRGGBB`, any case, no `#`).
    pub fn parse(hex: &str) -> Result<Self, ParseError> {
        if hex.is_empty() {
            return Err(ParseError::Empty);
        }
        let [r, g, b] = hex_channels::<3>(hex)?;
        Ok(Self { r, g, b })
    }

    /// Like [`Color::parse`], but tolerates surrounding whitespace and one leading `#`.
    pub fn parse_prefixed(s: &str) -> Result<Self, ParseError> {
        let s = s.trim();
        Self::parse(s.strip_prefix('#').unwrap_or(s))
    }

    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Channels scaled to 0.0..=1.0.
    pub fn to_srgb(self) -> [f32; 3] {
        self.channels().map(|c| f32::from(c) / 255.0)
    }

    /// CSS form, e.g. `rgb(255, 0, 0)`.
    pub fn css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_prefixed(s)
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

/// Split `hex` into `N` two-digit groups and decode each one.
pub(crate) fn hex_channels<const N: usize>(hex: &str) -> Result<[u8; N], ParseError> {
    if hex.len() != N * 2 {
        return Err(ParseError::InvalidLength {
            input: hex.to_string(),
            len: hex.len(),
        });
    }
    // from_str_radix would accept a leading '+', so check digits first
    if !hex.bytes().all(|c| c.is_ascii_hexdigit()) {
        return Err(ParseError::InvalidHex {
            input: hex.to_string(),
        });
    }

    let mut out = [0u8; N];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| {
            ParseError::InvalidHex {
                input: hex.to_string(),
            }
        })?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_upper_and_lower_case() -> anyhow::Result<()> {
        assert_eq!(Color::parse("FF0000")?, Color::new(255, 0, 0));
        assert_eq!(Color::parse("00ff00")?, Color::new(0, 255, 0));
        assert_eq!(Color::parse("1a2B3c")?, Color::new(0x1a, 0x2b, 0x3c));
        Ok(())
    }

    #[test]
    fn rejects_non_hex() {
        assert_eq!(
            Color::parse("GG0000"),
            Err(ParseError::InvalidHex {
                input: "GG0000".into()
            })
        );
        assert!(matches!(
            Color::parse("+F0000"),
            Err(ParseError::InvalidHex { .. })
        ));
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(matches!(
            Color::parse("FFF"),
            Err(ParseError::InvalidLength { len: 3, .. })
        ));
        assert!(matches!(
            Color::parse("FF00000"),
            Err(ParseError::InvalidLength { len: 7, .. })
        ));
        assert_eq!(Color::parse(""), Err(ParseError::Empty));
    }

    #[test]
    fn multibyte_input_is_rejected_not_sliced() {
        // six bytes, but not six hex digits
        assert!(matches!(
            Color::parse("ééé"),
            Err(ParseError::InvalidHex { .. })
        ));
        // length is reported in bytes, the same unit the check uses
        assert!(matches!(
            Color::parse("éé"),
            Err(ParseError::InvalidLength { len: 4, .. })
        ));
        assert!(matches!(
            crate::srgb::hex_to_srgb("éé"),
            Err(ParseError::InvalidLength { len: 4, .. })
        ));
    }

    #[test]
    fn plain_parse_does_not_strip_hash() {
        assert!(Color::parse("#FF000").is_err());
        assert!(Color::parse("#FF0000").is_err());
    }

    #[test]
    fn prefixed_parse_strips_hash() -> anyhow::Result<()> {
        assert_eq!(Color::parse_prefixed("#ff8800")?, Color::new(255, 136, 0));
        assert_eq!(Color::parse_prefixed("  ff8800 ")?, Color::new(255, 136, 0));
        assert_eq!("#000000".parse::<Color>()?, Color::BLACK);
        Ok(())
    }

    #[test]
    fn display_and_css() {
        let c = Color::new(10, 200, 255);
        assert_eq!(c.to_string(), "0AC8FF");
        assert_eq!(c.css(), "rgb(10, 200, 255)");
    }

    #[test]
    fn srgb_is_normalized() {
        assert_eq!(Color::WHITE.to_srgb(), [1.0, 1.0, 1.0]);
        assert_eq!(Color::BLACK.to_srgb(), [0.0, 0.0, 0.0]);
    }
}
