use anyhow::Context;
use std::env;
use std::io::{self, Write};
use tintshade_core::{
    Color, GenerationRequest, Palette, PaletteEntry, PaletteError, PaletteInputs,
    PaletteSettings, PaletteSurface, on_generate,
};

fn help_text() -> String {
    format!(
        r##"Tintshade CLI {}

            Commands:
            generate <base> <target> <count> [--json]
            settings-default <settings.json>
            from <settings.json>
            export <settings.json> <palette.json>
            repl

            Examples:
            cargo run -p tintshade_cli -- generate 000000 FFFFFF 5
            cargo run -p tintshade_cli -- generate "#ff8800" "#1e1e2e" 8 --json
            cargo run -p tintshade_cli -- settings-default tints.json
            cargo run -p tintshade_cli -- export tints.json palette.json
        "##,
        tintshade_core::version()
    )
}

fn print_help() {
    println!("{}", help_text());
}

/// One box per line: a truecolor swatch, the css color and the percentage.
fn render_line(entry: &PaletteEntry) -> String {
    let Color { r, g, b } = entry.color;
    format!(
        "\x1b[48;2;{r};{g};{b}m      \x1b[0m {:<20} {:>6}%",
        entry.color.css(),
        entry.label
    )
}

/// Prints boxes to stdout as they arrive and keeps the last batch.
#[derive(Debug, Default)]
struct Terminal {
    shown: Vec<PaletteEntry>,
    request: Option<GenerationRequest>,
}

impl Terminal {
    /// Run one trigger and remember the request behind the boxes on screen.
    fn generate(&mut self, form: &Form) -> Result<(), PaletteError> {
        let request = on_generate(form, self)?;
        self.request = Some(request);
        Ok(())
    }

    /// The palette currently shown, if anything has been generated.
    fn palette(&self) -> Option<Palette> {
        let request = self.request?;
        Some(Palette {
            request,
            entries: self.shown.clone(),
        })
    }
}

impl PaletteSurface for Terminal {
    fn clear(&mut self) {
        self.shown.clear();
    }

    fn push(&mut self, entry: &PaletteEntry) {
        println!("{}", render_line(entry));
        self.shown.push(entry.clone());
    }
}

fn print_palette(palette: &Palette) {
    let mut term = Terminal::default();
    for entry in &palette.entries {
        term.push(entry);
    }
}

/// Interactive form state, mirroring the base/target/count inputs.
#[derive(Debug, Clone)]
struct Form {
    settings: PaletteSettings,
    count_text: String,
}

impl Form {
    fn new(settings: PaletteSettings) -> Self {
        let count_text = settings.count.to_string();
        Self {
            settings,
            count_text,
        }
    }
}

impl PaletteInputs for Form {
    fn base_hex(&self) -> String {
        self.settings.base.clone()
    }

    fn target_hex(&self) -> String {
        self.settings.target.clone()
    }

    fn count_text(&self) -> String {
        self.count_text.clone()
    }

    fn floor(&self) -> f64 {
        self.settings.floor
    }
}

fn repl() -> anyhow::Result<()> {
    let mut form = Form::new(PaletteSettings::default());
    let mut term = Terminal::default();

    println!("Type 'help' for commands. 'quit' to exit.");

    loop {
        print!("ts> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            // EOF (Ctrl+D)
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();

        match cmd.as_str() {
            "help" => {
                println!(
                    r#"Commands:
                        base <hex>
                        target <hex>
                        count <n>
                        floor <0..1>
                        show
                        gen
                        save <palette.json>
                        load <settings.json>
                        quit
                        "#
                );
            }
            "quit" | "exit" => break,

            "base" | "target" => {
                if parts.len() != 2 {
                    println!("Usage: {cmd} <hex>");
                    continue;
                }
                let value = parts[1].to_string();
                if cmd == "base" {
                    form.settings.base = value;
                } else {
                    form.settings.target = value;
                }
            }

            "count" => {
                if parts.len() != 2 {
                    println!("Usage: count <n>");
                    continue;
                }
                // validated on `gen`, like a text field
                form.count_text = parts[1].to_string();
            }

            "floor" => {
                if parts.len() != 2 {
                    println!("Usage: floor <0..1>");
                    continue;
                }
                form.settings.floor = parts[1].parse().context("floor must be a number")?;
            }

            "show" => {
                println!(
                    "base={} target={} count={} floor={}",
                    form.settings.base, form.settings.target, form.count_text, form.settings.floor
                );
            }

            "gen" | "generate" => {
                if let Err(e) = term.generate(&form) {
                    println!("Error: {e}");
                }
            }

            "save" => {
                if parts.len() != 2 {
                    println!("Usage: save <palette.json>");
                    continue;
                }
                let Some(palette) = term.palette() else {
                    println!("Nothing generated yet. Use: gen");
                    continue;
                };
                palette.save_json_file(parts[1])?;
                println!("Saved palette: {}", parts[1]);
            }

            "load" => {
                if parts.len() != 2 {
                    println!("Usage: load <settings.json>");
                    continue;
                }
                let settings = PaletteSettings::load_json_file(parts[1])
                    .with_context(|| format!("failed to load settings '{}'", parts[1]))?;
                form = Form::new(settings);
                println!("Loaded settings: {}", parts[1]);
            }

            _ => println!("Unknown command. Type 'help'."),
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_help();
        return Ok(());
    }

    match args[1].as_str() {
        "generate" => {
            let base = args.get(2).context("missing <base>")?;
            let target = args.get(3).context("missing <target>")?;
            let count = args.get(4).context("missing <count>")?;
            let json = args.iter().skip(5).any(|a| a == "--json");

            let request = GenerationRequest::from_inputs(base, target, count)?;
            let palette = Palette::generate(request)?;
            if json {
                println!("{}", palette.to_json()?);
            } else {
                print_palette(&palette);
            }
        }
        "settings-default" => {
            let path = args.get(2).context("missing <settings.json>")?;
            PaletteSettings::default().save_json_file(path)?;
            println!("Saved default settings to: {}", path);
        }
        "from" => {
            let path = args.get(2).context("missing <settings.json>")?;
            let settings = PaletteSettings::load_json_file(path)
                .with_context(|| format!("failed to load settings '{path}'"))?;
            let palette = Palette::generate(settings.to_request()?)?;
            print_palette(&palette);
        }
        "export" => {
            let settings_path = args.get(2).context("missing <settings.json>")?;
            let out_path = args.get(3).context("missing <palette.json>")?;
            let settings = PaletteSettings::load_json_file(settings_path)
                .with_context(|| format!("failed to load settings '{settings_path}'"))?;
            let palette = Palette::generate(settings.to_request()?)?;
            palette.save_json_file(out_path)?;
            log::info!("exported {} colors", palette.entries.len());
            println!("Saved palette to: {}", out_path);
        }
        "repl" => repl()?,

        _ => print_help(),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_has_swatch_css_and_label() -> anyhow::Result<()> {
        let palette = Palette::generate(GenerationRequest::new(Color::BLACK, Color::WHITE, 3)?)?;
        let line = render_line(&palette.entries[1]);
        assert!(line.starts_with("\x1b[48;2;198;198;198m"));
        assert!(line.contains("rgb(198, 198, 198)"));
        assert!(line.ends_with(" 77.64%"));
        Ok(())
    }

    #[test]
    fn form_feeds_on_generate() -> anyhow::Result<()> {
        let mut form = Form::new(PaletteSettings::default());
        form.settings.base = "#ff0000".into();
        form.count_text = "4".into();

        let mut boxes: Vec<PaletteEntry> = Vec::new();
        assert_eq!(on_generate(&form, &mut boxes)?.count, 4);
        assert_eq!(boxes[0].color, Color::new(255, 0, 0));
        Ok(())
    }

    #[test]
    fn help_mentions_hash_prefixed_colors() {
        let help = help_text();
        assert!(help.contains(r##"generate "#ff8800" "#1e1e2e" 8 --json"##));
        assert!(help.contains(tintshade_core::version()));
    }

    #[test]
    fn saved_palette_matches_what_was_shown() -> anyhow::Result<()> {
        let mut form = Form::new(PaletteSettings::default());
        form.count_text = "3".into();
        let mut term = Terminal::default();
        assert!(term.palette().is_none());

        term.generate(&form)?;

        // edits after `gen` must not leak into the export
        form.settings.base = "ff0000".into();
        form.count_text = "1".into();
        form.settings.floor = 0.5;

        let palette = term.palette().context("palette after gen")?;
        assert_eq!(palette.request.base, Color::BLACK);
        assert_eq!(palette.request.count, 3);
        assert_eq!(palette.entries.len(), 3);
        assert_eq!(palette.entries[0].color, palette.request.base);

        // a failed trigger keeps the previous palette
        assert!(term.generate(&form).is_err());
        assert_eq!(term.palette(), Some(palette));
        Ok(())
    }
}
