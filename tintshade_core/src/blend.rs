use crate::Color;

/// Result of [`blend`]. Channels are not clamped, so extrapolated mixes
/// (ratio outside 0..=1) can leave the byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mix {
    pub r: i32,
    pub g: i32,
    pub b: i32,
}

impl Mix {
    pub const fn new(r: i32, g: i32, b: i32) -> Self {
        Self { r, g, b }
    }

    /// `Some` only if every channel already fits in a byte.
    pub fn to_color(self) -> Option<Color> {
        let r = u8::try_from(self.r).ok()?;
        let g = u8::try_from(self.g).ok()?;
        let b = u8::try_from(self.b).ok()?;
        Some(Color::new(r, g, b))
    }

    pub fn clamped(self) -> Color {
        let c = |v: i32| v.clamp(0, 255) as u8;
        Color::new(c(self.r), c(self.g), c(self.b))
    }
}

impl From<Color> for Mix {
    fn from(c: Color) -> Self {
        Self::new(i32::from(c.r), i32::from(c.g), i32::from(c.b))
    }
}

impl PartialEq<Color> for Mix {
    fn eq(&self, other: &Color) -> bool {
        *self == Mix::from(*other)
    }
}

/// Move each channel of `base` toward `target` by `ratio`.
///
/// Ratios outside `0.0..=1.0` extrapolate past the endpoints instead of
/// being rejected. Channels saturate at the `i32` range.
pub fn blend(base: Color, target: Color, ratio: f64) -> Mix {
    let channel = |from: u8, to: u8| {
        let delta = f64::from(to) - f64::from(from);
        // float -> int `as` saturates, so huge ratios cannot overflow
        (f64::from(from) + round_half_up(delta * ratio)) as i32
    };

    Mix {
        r: channel(base.r, target.r),
        g: channel(base.g, target.g),
        b: channel(base.b, target.b),
    }
}

// Halves go toward +inf for either sign: 2.5 -> 3, -2.5 -> -2.
// `x + 0.5` would round 0.49999999999999994 up, so only fix exact ties.
fn round_half_up(x: f64) -> f64 {
    let r = x.round();
    if r - x == -0.5 { r + 1.0 } else { r }
}
