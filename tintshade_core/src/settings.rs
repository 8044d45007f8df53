use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::{Color, DEFAULT_FLOOR, GenerationRequest, PaletteError};

/// Saved generator inputs, stored as JSON.
///
/// Colors are kept as the strings the user typed so a file with a bad
/// color still loads and reports the problem at generation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteSettings {
    #[serde(default = "default_base")]
    pub base: String,
    #[serde(default = "default_target")]
    pub target: String,
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default = "default_floor")]
    pub floor: f64,
}

fn default_base() -> String {
    "000000".into()
}

fn default_target() -> String {
    "FFFFFF".into()
}

fn default_count() -> usize {
    5
}

fn default_floor() -> f64 {
    DEFAULT_FLOOR
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Self {
            base: default_base(),
            target: default_target(),
            count: default_count(),
            floor: default_floor(),
        }
    }
}

impl PaletteSettings {
    pub fn to_request(&self) -> Result<GenerationRequest, PaletteError> {
        let base = Color::parse_prefixed(&self.base).map_err(PaletteError::base)?;
        let target = Color::parse_prefixed(&self.target).map_err(PaletteError::target)?;
        GenerationRequest::with_floor(base, target, self.count, self.floor)
    }

    pub fn save_json_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self).context("serialize settings to json")?;
        fs::write(path.as_ref(), json).context("write settings json file")?;
        Ok(())
    }

    pub fn load_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path.as_ref()).context("read settings json file")?;
        let settings =
            serde_json::from_str::<PaletteSettings>(&text).context("parse settings json")?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() -> anyhow::Result<()> {
        let s: PaletteSettings = serde_json::from_str(r##"{ "base": "#336699" }"##)?;
        assert_eq!(s.base, "#336699");
        assert_eq!(s.target, "FFFFFF");
        assert_eq!(s.count, 5);
        assert_eq!(s.floor, DEFAULT_FLOOR);

        let req = s.to_request()?;
        assert_eq!(req.base, Color::new(0x33, 0x66, 0x99));
        Ok(())
    }

    #[test]
    fn bad_color_fails_at_request_time() -> anyhow::Result<()> {
        let s: PaletteSettings = serde_json::from_str(r#"{ "target": "nope" }"#)?;
        assert!(matches!(
            s.to_request(),
            Err(PaletteError::Parse { field: "target", .. })
        ));
        Ok(())
    }

    #[test]
    fn save_then_load() -> anyhow::Result<()> {
        let path = std::env::temp_dir()
            .join(format!("tintshade-settings-{}.json", std::process::id()));
        let s = PaletteSettings {
            count: 9,
            ..Default::default()
        };
        s.save_json_file(&path)?;
        let back = PaletteSettings::load_json_file(&path)?;
        fs::remove_file(&path)?;
        assert_eq!(back, s);
        Ok(())
    }

    #[test]
    fn loading_a_missing_file_has_context() {
        let err = PaletteSettings::load_json_file("/definitely/not/here.json")
            .err()
            .map(|e| format!("{e:#}"));
        assert!(err.is_some_and(|e| e.starts_with("read settings json file")));
    }
}
