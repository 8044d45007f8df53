use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::{Color, ParseError, blend};

/// Gap left between the last generated step and the target.
pub const DEFAULT_FLOOR: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    #[error("{field} color: {source}")]
    Parse {
        field: &'static str,
        #[source]
        source: ParseError,
    },
    #[error("count must be at least 2, got {count}")]
    InvalidCount { count: i64 },
    #[error("count '{input}' is not a whole number")]
    CountNotANumber { input: String },
    #[error("floor must be strictly between 0 and 1, got {floor}")]
    InvalidFloor { floor: f64 },
    #[error("step {index} is past the last step of a {count}-step curve")]
    StepOutOfRange { index: usize, count: usize },
}

impl PaletteError {
    pub(crate) fn base(source: ParseError) -> Self {
        Self::Parse {
            field: "base",
            source,
        }
    }

    pub(crate) fn target(source: ParseError) -> Self {
        Self::Parse {
            field: "target",
            source,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub base: Color,
    pub target: Color,
    pub count: usize,
    #[serde(default = "default_floor")]
    pub floor: f64,
}

fn default_floor() -> f64 {
    DEFAULT_FLOOR
}

impl GenerationRequest {
    /// Request with the default curve floor.
    pub fn new(base: Color, target: Color, count: usize) -> Result<Self, PaletteError> {
        Self::with_floor(base, target, count, DEFAULT_FLOOR)
    }

    pub fn with_floor(
        base: Color,
        target: Color,
        count: usize,
        floor: f64,
    ) -> Result<Self, PaletteError> {
        let req = Self {
            base,
            target,
            count,
            floor,
        };
        req.validate()?;
        Ok(req)
    }

    /// Build a request from raw adapter inputs: two hex strings (optional `#`)
    /// and the count as typed by the user.
    pub fn from_inputs(base: &str, target: &str, count: &str) -> Result<Self, PaletteError> {
        let base = Color::parse_prefixed(base).map_err(PaletteError::base)?;
        let target = Color::parse_prefixed(target).map_err(PaletteError::target)?;
        let count = parse_count(count)?;
        Self::new(base, target, count)
    }

    /// Fields are public, so `generate` re-checks before using them.
    pub fn validate(&self) -> Result<(), PaletteError> {
        check_curve(self.count, self.floor)
    }
}

fn check_curve(count: usize, floor: f64) -> Result<(), PaletteError> {
    if count < 2 {
        return Err(PaletteError::InvalidCount {
            count: count as i64,
        });
    }
    if !(floor > 0.0 && floor < 1.0) {
        return Err(PaletteError::InvalidFloor { floor });
    }
    Ok(())
}

/// Parse a user-typed step count. Zero, one and negatives are `InvalidCount`.
pub fn parse_count(input: &str) -> Result<usize, PaletteError> {
    let n: i64 = input
        .trim()
        .parse()
        .map_err(|_| PaletteError::CountNotANumber {
            input: input.to_string(),
        })?;
    if n < 2 {
        return Err(PaletteError::InvalidCount { count: n });
    }
    usize::try_from(n).map_err(|_| PaletteError::InvalidCount { count: n })
}

/// One generated box: the color and the percentage it sits at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub color: Color,
    pub ratio: f64,
    pub label: String,
}

impl PaletteEntry {
    fn new(color: Color, ratio: f64) -> Self {
        Self {
            color,
            ratio,
            label: format!("{:.2}", ratio * 100.0),
        }
    }
}

/// Position of step `i` on the tint/shade curve: `1 - floor^(i / (count - 1))`.
///
/// Steps are dense near the base and compress toward `1 - floor`. Fewer than
/// two steps leave the curve undefined and are rejected.
pub fn curve_ratio(i: usize, count: usize, floor: f64) -> Result<f64, PaletteError> {
    check_curve(count, floor)?;
    if i >= count {
        return Err(PaletteError::StepOutOfRange { index: i, count });
    }
    let last = (count - 1) as f64;
    Ok(1.0 - floor.powf(i as f64 / last))
}

/// The tinted/shaded colors from `base` toward `target`, in step order.
pub fn generate(req: &GenerationRequest) -> Result<Vec<PaletteEntry>, PaletteError> {
    req.validate()?;
    log::debug!(
        "generating {} steps {} -> {} (floor {})",
        req.count,
        req.base,
        req.target,
        req.floor
    );

    (0..req.count)
        .map(|i| -> Result<PaletteEntry, PaletteError> {
            let ratio = curve_ratio(i, req.count, req.floor)?;
            Ok(PaletteEntry::new(
                blend(req.base, req.target, ratio).clamped(),
                ratio,
            ))
        })
        .collect()
}

/// A single step without building the whole palette. `i` must be below `count`.
pub fn step_color(
    base: Color,
    target: Color,
    i: usize,
    count: usize,
) -> Result<Color, PaletteError> {
    let ratio = curve_ratio(i, count, DEFAULT_FLOOR)?;
    Ok(blend(base, target, ratio).clamped())
}

/// A generated palette together with the request that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub request: GenerationRequest,
    pub entries: Vec<PaletteEntry>,
}

impl Palette {
    pub fn generate(request: GenerationRequest) -> Result<Self, PaletteError> {
        let entries = generate(&request)?;
        Ok(Self { request, entries })
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("serialize palette to json")
    }

    /// Export the palette as JSON.
    pub fn save_json_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let json = self.to_json()?;
        fs::write(path.as_ref(), json).context("write palette json file")?;
        Ok(())
    }

    pub fn load_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path.as_ref()).context("read palette json file")?;
        let palette = serde_json::from_str::<Palette>(&text).context("parse palette json")?;
        Ok(palette)
    }
}
