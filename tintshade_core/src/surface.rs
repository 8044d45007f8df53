use crate::{DEFAULT_FLOOR, GenerationRequest, PaletteEntry, PaletteError, generate};

/// Where the "generate" trigger reads its raw inputs from.
pub trait PaletteInputs {
    /// Base color as typed or picked, `#` optional.
    fn base_hex(&self) -> String;
    fn target_hex(&self) -> String;
    fn count_text(&self) -> String;

    fn floor(&self) -> f64 {
        DEFAULT_FLOOR
    }
}

/// Where generated boxes go.
pub trait PaletteSurface {
    fn clear(&mut self);
    fn push(&mut self, entry: &PaletteEntry);
}

impl PaletteSurface for Vec<PaletteEntry> {
    fn clear(&mut self) {
        Vec::clear(self);
    }

    fn push(&mut self, entry: &PaletteEntry) {
        Vec::push(self, entry.clone());
    }
}

/// Handle one "generate" trigger and return the request that was rendered.
///
/// The surface is cleared and repopulated only after the whole palette has
/// been computed; on error it is left exactly as it was.
pub fn on_generate(
    inputs: &impl PaletteInputs,
    surface: &mut impl PaletteSurface,
) -> Result<GenerationRequest, PaletteError> {
    let req = GenerationRequest::from_inputs(
        &inputs.base_hex(),
        &inputs.target_hex(),
        &inputs.count_text(),
    )
    .and_then(|req| {
        GenerationRequest::with_floor(req.base, req.target, req.count, inputs.floor())
    })
    .inspect_err(|e| log::warn!("generate rejected: {e}"))?;
    let entries = generate(&req)?;

    surface.clear();
    for entry in &entries {
        surface.push(entry);
    }
    Ok(req)
}
