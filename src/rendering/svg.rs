//! SVG backend: serialize a display list into a standalone SVG document.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::color::Rgba8;
use crate::error::{Error, Result};
use crate::rendering::paint::{PaintCommand, Scene};

/// Font stack written into text elements.
const FONT_STACK: &str = "DejaVu Sans Mono, monospace";

/// Serialize a scene into an SVG document string.
pub fn render_svg(scene: &Scene) -> Result<String> {
    let mut out = String::with_capacity(4096);
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" \
         viewBox=\"0 0 {w} {h}\">\n",
        w = scene.width,
        h = scene.height
    ));

    for command in &scene.commands {
        match command {
            PaintCommand::SolidRect {
                x,
                y,
                width,
                height,
                rgba,
            } => {
                out.push_str(&format!(
                    "  <rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" \
                     fill=\"{}\"/>\n",
                    fill(*rgba)
                ));
            }
            PaintCommand::RoundedRect {
                x,
                y,
                width,
                height,
                radius,
                rgba,
            } => {
                out.push_str(&format!(
                    "  <rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" \
                     rx=\"{radius}\" fill=\"{}\"/>\n",
                    fill(*rgba)
                ));
            }
            PaintCommand::Circle {
                cx,
                cy,
                radius,
                rgba,
            } => {
                out.push_str(&format!(
                    "  <circle cx=\"{cx}\" cy=\"{cy}\" r=\"{radius}\" fill=\"{}\"/>\n",
                    fill(*rgba)
                ));
            }
            PaintCommand::BackdropImage { path } => {
                let href = data_uri(path)?;
                out.push_str(&format!(
                    "  <image x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\" \
                     preserveAspectRatio=\"xMidYMid slice\" href=\"{href}\"/>\n",
                    w = scene.width,
                    h = scene.height
                ));
            }
            PaintCommand::Text {
                x,
                baseline,
                size,
                rgba,
                bold,
                italic,
                underline,
                content,
            } => {
                let mut attrs = String::new();
                if *bold {
                    attrs.push_str(" font-weight=\"bold\"");
                }
                if *italic {
                    attrs.push_str(" font-style=\"italic\"");
                }
                if *underline {
                    attrs.push_str(" text-decoration=\"underline\"");
                }
                out.push_str(&format!(
                    "  <text x=\"{x:.2}\" y=\"{baseline:.2}\" font-family=\"{FONT_STACK}\" \
                     font-size=\"{size:.2}\" fill=\"{}\"{attrs} \
                     xml:space=\"preserve\">{}</text>\n",
                    fill(*rgba),
                    escape(content)
                ));
            }
        }
    }

    out.push_str("</svg>\n");
    Ok(out)
}

/// CSS fill value for a color; opaque colors use hex, translucent rgba().
fn fill((r, g, b, a): Rgba8) -> String {
    if a == 255 {
        format!("#{r:02x}{g:02x}{b:02x}")
    } else {
        format!("rgba({r}, {g}, {b}, {:.3})", a as f32 / 255.0)
    }
}

/// Inline a picture file as a base64 data URI.
fn data_uri(path: &std::path::Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .map_err(|e| Error::RenderError(format!("backdrop {}: {e}", path.display())))?;
    let mime = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        _ => "image/png",
    };
    Ok(format!("data:{mime};base64,{}", BASE64.encode(bytes)))
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// [`crate::ExportBackend`] producing SVG documents.
pub struct SvgBackend;

impl crate::ExportBackend for SvgBackend {
    fn extension(&self) -> crate::FileExtension {
        crate::FileExtension::Svg
    }

    fn render(
        &self,
        scene: &Scene,
        _fonts: &crate::rendering::font::FontFamily,
    ) -> Result<Vec<u8>> {
        Ok(render_svg(scene)?.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_command(content: &str) -> PaintCommand {
        PaintCommand::Text {
            x: 1.0,
            baseline: 10.0,
            size: 14.0,
            rgba: (255, 0, 0, 255),
            bold: false,
            italic: true,
            underline: false,
            content: content.to_string(),
        }
    }

    #[test]
    fn document_has_svg_envelope() {
        let scene = Scene {
            width: 100,
            height: 50,
            commands: vec![],
        };
        let svg = render_svg(&scene).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("width=\"100\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn text_is_escaped_and_styled() {
        let scene = Scene {
            width: 100,
            height: 50,
            commands: vec![text_command("a < b && c")],
        };
        let svg = render_svg(&scene).unwrap();
        assert!(svg.contains("a &lt; b &amp;&amp; c"));
        assert!(svg.contains("font-style=\"italic\""));
        assert!(svg.contains("fill=\"#ff0000\""));
    }

    #[test]
    fn rounded_rect_uses_rx() {
        let scene = Scene {
            width: 100,
            height: 50,
            commands: vec![PaintCommand::RoundedRect {
                x: 4,
                y: 4,
                width: 80,
                height: 40,
                radius: 9,
                rgba: (1, 2, 3, 255),
            }],
        };
        let svg = render_svg(&scene).unwrap();
        assert!(svg.contains("rx=\"9\""));
        assert!(svg.contains("fill=\"#010203\""));
    }

    #[test]
    fn translucent_fill_uses_rgba() {
        assert_eq!(fill((255, 0, 0, 128)), "rgba(255, 0, 0, 0.502)");
        assert_eq!(fill((255, 0, 0, 255)), "#ff0000");
    }

    #[test]
    fn missing_backdrop_is_an_error() {
        let scene = Scene {
            width: 10,
            height: 10,
            commands: vec![PaintCommand::BackdropImage {
                path: std::path::PathBuf::from("/nonexistent/pic.png"),
            }],
        };
        assert!(render_svg(&scene).is_err());
    }
}
