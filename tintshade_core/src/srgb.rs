//! Normalized float colors for renderers that want `0.0..=1.0` components
//! instead of bytes. No rounding happens here.

use crate::ParseError;
use crate::color::hex_channels;

/// Decode `RRGGBB` or `RRGGBBAA` (optional `#`) into normalized components.
pub fn hex_to_srgb(hex: &str) -> Result<Vec<f32>, ParseError> {
    let hex = hex.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);

    let bytes: Vec<u8> = match hex.len() {
        0 => return Err(ParseError::Empty),
        6 => hex_channels::<3>(hex)?.to_vec(),
        8 => hex_channels::<4>(hex)?.to_vec(),
        len => {
            return Err(ParseError::InvalidLength {
                input: hex.to_string(),
                len,
            });
        }
    };

    Ok(bytes.into_iter().map(|c| f32::from(c) / 255.0).collect())
}

/// Continuous blend of two normalized colors. `None` if the arities differ.
pub fn blend_srgb(base: &[f32], target: &[f32], ratio: f32) -> Option<Vec<f32>> {
    if base.len() != target.len() {
        return None;
    }
    Some(
        base.iter()
            .zip(target)
            .map(|(b, t)| b + (t - b) * ratio)
            .collect(),
    )
}
