use eframe::egui;
use tintshade_core::{Color, PaletteEntry, PaletteInputs, PaletteSettings, on_generate};

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // optional settings file to prefill the form
    let settings = match std::env::args().nth(1) {
        Some(path) => PaletteSettings::load_json_file(&path).unwrap_or_else(|e| {
            log::warn!("ignoring settings '{path}': {e:#}");
            PaletteSettings::default()
        }),
        None => PaletteSettings::default(),
    };

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Tintshade",
        options,
        Box::new(|_cc| Ok(Box::new(TintApp::new(&settings)))),
    )
}

/// The two pickers and the count field.
#[derive(Debug, Clone)]
struct Form {
    base: [u8; 3],
    target: [u8; 3],
    count_text: String,
    floor: f64,
}

impl PaletteInputs for Form {
    fn base_hex(&self) -> String {
        format!("#{}", Color::from(self.base))
    }

    fn target_hex(&self) -> String {
        format!("#{}", Color::from(self.target))
    }

    fn count_text(&self) -> String {
        self.count_text.clone()
    }

    fn floor(&self) -> f64 {
        self.floor
    }
}

/// Picker value for a settings color; a bad hex falls back with a warning.
fn picker_channels(field: &str, hex: &str, fallback: Color) -> [u8; 3] {
    Color::parse_prefixed(hex)
        .unwrap_or_else(|e| {
            log::warn!("ignoring {field} color '{hex}' from settings: {e}");
            fallback
        })
        .channels()
}

struct TintApp {
    form: Form,
    boxes: Vec<PaletteEntry>,
    last_error: Option<String>,
}

impl TintApp {
    fn new(settings: &PaletteSettings) -> Self {
        Self {
            form: Form {
                base: picker_channels("base", &settings.base, Color::BLACK),
                target: picker_channels("target", &settings.target, Color::WHITE),
                count_text: settings.count.to_string(),
                floor: settings.floor,
            },
            boxes: Vec::new(),
            last_error: None,
        }
    }

    fn safe_generate(&mut self) {
        match on_generate(&self.form, &mut self.boxes) {
            Ok(_) => self.last_error = None,
            Err(e) => self.last_error = Some(e.to_string()),
        }
    }
}

// Dark text on light boxes, light text on dark ones.
fn label_color(c: Color) -> egui::Color32 {
    let sum = u16::from(c.r) + u16::from(c.g) + u16::from(c.b);
    if sum > 382 {
        egui::Color32::BLACK
    } else {
        egui::Color32::WHITE
    }
}

fn color_box(ui: &mut egui::Ui, entry: &PaletteEntry) {
    let Color { r, g, b } = entry.color;
    egui::Frame::none()
        .fill(egui::Color32::from_rgb(r, g, b))
        .inner_margin(egui::Margin::same(8.0))
        .show(ui, |ui| {
            ui.set_min_size(egui::vec2(96.0, 64.0));
            ui.label(
                egui::RichText::new(format!("{}%", entry.label)).color(label_color(entry.color)),
            )
            .on_hover_text(entry.color.css());
        });
}

impl eframe::App for TintApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Tintshade");
                ui.separator();

                ui.label("Base:");
                ui.color_edit_button_srgb(&mut self.form.base);
                ui.label("Target:");
                ui.color_edit_button_srgb(&mut self.form.target);

                ui.separator();

                ui.label("Count:");
                ui.add(egui::TextEdit::singleline(&mut self.form.count_text).desired_width(48.0));

                if ui.button("Generate").clicked() {
                    self.safe_generate();
                }
            });

            if let Some(err) = &self.last_error {
                ui.colored_label(egui::Color32::RED, format!("Error: {err}"));
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.boxes.is_empty() {
                ui.label("(nothing generated yet)");
                return;
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for entry in &self.boxes {
                        color_box(ui, entry);
                    }
                });
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_fills_boxes() {
        let mut app = TintApp::new(&PaletteSettings::default());
        app.form.count_text = "3".into();
        app.safe_generate();

        assert_eq!(app.last_error, None);
        let labels: Vec<&str> = app.boxes.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["0.00", "77.64", "95.00"]);
    }

    #[test]
    fn bad_count_keeps_old_boxes_and_reports() {
        let mut app = TintApp::new(&PaletteSettings::default());
        app.safe_generate();
        assert_eq!(app.boxes.len(), 5);

        app.form.count_text = "1".into();
        app.safe_generate();
        assert_eq!(app.boxes.len(), 5);
        assert!(app.last_error.is_some_and(|e| e.contains("at least 2")));
    }

    #[test]
    fn pickers_become_hex_inputs() {
        let app = TintApp::new(&PaletteSettings {
            base: "#336699".into(),
            ..Default::default()
        });
        assert_eq!(app.form.base_hex(), "#336699");
        assert_eq!(app.form.target_hex(), "#FFFFFF");
    }

    #[test]
    fn label_contrast() {
        assert_eq!(label_color(Color::WHITE), egui::Color32::BLACK);
        assert_eq!(label_color(Color::BLACK), egui::Color32::WHITE);
    }

    #[test]
    fn bad_settings_colors_fall_back() {
        let app = TintApp::new(&PaletteSettings {
            base: "nothex".into(),
            target: "#12".into(),
            ..Default::default()
        });
        assert_eq!(app.form.base, [0, 0, 0]);
        assert_eq!(app.form.target, [255, 255, 255]);
        assert_eq!(picker_channels("base", "#0a0b0c", Color::WHITE), [10, 11, 12]);
    }
}
