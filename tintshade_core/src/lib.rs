pub mod blend;
pub mod color;
pub mod generator;
pub mod settings;
pub mod srgb;
pub mod surface;

pub use blend::{Mix, blend};
pub use color::{Color, ParseError};
pub use generator::{
    DEFAULT_FLOOR, GenerationRequest, Palette, PaletteEntry, PaletteError, curve_ratio, generate,
    parse_count, step_color,
};
pub use settings::PaletteSettings;
pub use surface::{PaletteInputs, PaletteSurface, on_generate};

pub fn version() -> &'static str {
    "0.1.0"
}
