use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use codeshot::{
    new_studio, Background, ExportOptions, FileExtension, FontOptions, RenderConfig, Theme,
    WindowOptions,
};

/// Render source code into a styled, shareable image.
#[derive(Parser, Debug)]
#[command(name = "codeshot", version, about)]
struct Cli {
    /// Source file to render; reads stdin when omitted
    input: Option<PathBuf>,

    /// Language or file extension (inferred from the input path when omitted)
    #[arg(short, long)]
    language: Option<String>,

    /// Builtin theme id, path to a theme JSON file, or "none"
    #[arg(short, long, default_value = "night-owl")]
    theme: String,

    /// Output format: png, jpeg, svg or blob
    #[arg(short, long, default_value = "png")]
    format: String,

    /// Output path (defaults to snappy.<ext> in the working directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Size multiplier applied to every output length
    #[arg(short, long, default_value_t = 1.0)]
    scale: f32,

    /// Backdrop color (CSS color string)
    #[arg(long, default_value = "#abb8c3")]
    background: String,

    /// Backdrop picture, cover-scaled behind the window
    #[arg(long)]
    background_image: Option<PathBuf>,

    /// Horizontal window padding
    #[arg(long, default_value_t = 25)]
    padding_x: u32,

    /// Vertical window padding
    #[arg(long, default_value_t = 25)]
    padding_y: u32,

    /// Window corner radius
    #[arg(long, default_value_t = 10)]
    radius: u32,

    /// Backdrop margin around the window
    #[arg(long, default_value_t = 32)]
    margin: u32,

    /// Font size in pixels
    #[arg(long, default_value_t = 14.0)]
    font_size: f32,

    /// Line height as a multiple of the font size
    #[arg(long, default_value_t = 1.5)]
    line_height: f32,

    /// Path to a custom monospace font file
    #[arg(long)]
    font: Option<PathBuf>,

    /// Window title shown next to the controls
    #[arg(long)]
    title: Option<String>,

    /// Hide the line-number gutter
    #[arg(long)]
    no_line_numbers: bool,

    /// Hide the traffic-light window controls
    #[arg(long)]
    no_window_controls: bool,

    /// List builtin themes and exit
    #[arg(long)]
    list_themes: bool,

    /// Copy the rendered image to the clipboard instead of writing a file
    #[cfg(feature = "clipboard")]
    #[arg(long)]
    copy: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.list_themes {
        for id in Theme::builtin_ids() {
            println!("{id}");
        }
        return Ok(());
    }

    let code = read_source(&cli)?;
    let language = resolve_language(&cli);
    let theme = resolve_theme(&cli.theme)?;

    let config = RenderConfig {
        language,
        theme,
        font: FontOptions {
            custom_font_path: cli.font.as_ref().map(|p| p.display().to_string()),
            size: cli.font_size,
            line_height: cli.line_height,
        },
        window: WindowOptions {
            padding_x: cli.padding_x,
            padding_y: cli.padding_y,
            border_radius: cli.radius,
            margin: cli.margin,
            controls: !cli.no_window_controls,
            title: cli.title.clone(),
        },
        line_numbers: !cli.no_line_numbers,
    };

    let background = match &cli.background_image {
        Some(path) => Background::image(path.clone()),
        None => Background::color(cli.background.clone()),
    };
    let options = ExportOptions {
        extension: cli.format.parse::<FileExtension>()?,
        size_multiplier: cli.scale,
        background,
    };

    let mut studio = new_studio(config)?;
    studio.set_code(&code);

    #[cfg(feature = "clipboard")]
    if cli.copy {
        studio
            .copy_to_clipboard(&options)
            .context("could not copy the image to the clipboard")?;
        eprintln!("copied to clipboard");
        return Ok(());
    }

    let artifact = studio.export(&options)?;
    let path = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(artifact.file_name()));
    artifact
        .write_to(&path)
        .with_context(|| format!("could not write {}", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn read_source(cli: &Cli) -> anyhow::Result<String> {
    match &cli.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display())),
        None => {
            let mut code = String::new();
            std::io::stdin()
                .read_to_string(&mut code)
                .context("could not read stdin")?;
            Ok(code)
        }
    }
}

fn resolve_language(cli: &Cli) -> String {
    if let Some(language) = &cli.language {
        return language.clone();
    }
    cli.input
        .as_ref()
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .and_then(codeshot::syntax::canonical_language)
        .unwrap_or("javascript")
        .to_string()
}

fn resolve_theme(selector: &str) -> anyhow::Result<Option<Theme>> {
    if selector == "none" {
        return Ok(None);
    }
    if selector.ends_with(".json") {
        return Ok(Some(Theme::from_path(selector)?));
    }
    match Theme::builtin(selector) {
        Some(theme) => Ok(Some(theme)),
        None => bail!(
            "unknown theme '{selector}'; builtins: {}",
            Theme::builtin_ids().join(", ")
        ),
    }
}
