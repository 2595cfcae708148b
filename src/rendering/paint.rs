//! Display-list construction: flatten a snippet layout into ordered paint
//! commands consumed by the raster and SVG backends.

use crate::color::{self, Rgba8};
use crate::export::{Background, BackgroundMode};
use crate::rendering::layout::SnippetLayout;
use crate::style::Style;

/// Fallback foreground when neither theme nor override supplies one.
const DEFAULT_FOREGROUND: Rgba8 = (0xf8, 0xf8, 0xf2, 0xff);
/// Fallback window background when no theme is active.
const DEFAULT_WINDOW_BG: Rgba8 = (0x1e, 0x1e, 0x1e, 0xff);
/// Traffic-light window controls, left to right.
const CONTROL_COLORS: [Rgba8; 3] = [
    (0xff, 0x5f, 0x56, 0xff),
    (0xff, 0xbd, 0x2e, 0xff),
    (0x27, 0xc9, 0x3f, 0xff),
];

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    SolidRect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        rgba: Rgba8,
    },
    RoundedRect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        radius: u32,
        rgba: Rgba8,
    },
    Circle {
        cx: i32,
        cy: i32,
        radius: i32,
        rgba: Rgba8,
    },
    /// Cover-scaled backdrop picture spanning the whole frame
    BackdropImage { path: std::path::PathBuf },
    Text {
        x: f32,
        baseline: f32,
        size: f32,
        rgba: Rgba8,
        bold: bool,
        italic: bool,
        underline: bool,
        content: String,
    },
}

/// An ordered display list plus the frame it fills.
#[derive(Debug, Clone)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<PaintCommand>,
}

/// Flatten a layout into a display list, back to front: backdrop, window,
/// controls, gutter numbers, token runs.
pub fn build_display_list(layout: &SnippetLayout, background: &Background) -> Scene {
    let s = layout.scale;
    let mut commands = Vec::new();

    match background.mode {
        BackgroundMode::Color => {
            if let Some(rgba) = color::parse(&background.color) {
                commands.push(PaintCommand::SolidRect {
                    x: layout.frame.x,
                    y: layout.frame.y,
                    width: layout.frame.width,
                    height: layout.frame.height,
                    rgba,
                });
            }
        }
        BackgroundMode::Image => {
            if let Some(path) = &background.image {
                commands.push(PaintCommand::BackdropImage { path: path.clone() });
            }
        }
    }

    let window_bg = layout
        .line_style
        .as_ref()
        .and_then(|style| style.background_color.as_deref())
        .and_then(color::parse)
        .unwrap_or(DEFAULT_WINDOW_BG);
    commands.push(PaintCommand::RoundedRect {
        x: layout.window.x,
        y: layout.window.y,
        width: layout.window.width,
        height: layout.window.height,
        radius: layout.radius,
        rgba: window_bg,
    });

    let foreground = layout
        .line_style
        .as_ref()
        .and_then(|style| style.color.as_deref())
        .and_then(color::parse)
        .unwrap_or(DEFAULT_FOREGROUND);

    if layout.controls {
        let dot_radius = (6.0 * s).round() as i32;
        let cy = layout.window.y + (14.0 * s).round() as i32;
        for (i, rgba) in CONTROL_COLORS.iter().enumerate() {
            let cx = layout.window.x + ((18.0 + i as f32 * 20.0) * s).round() as i32;
            commands.push(PaintCommand::Circle {
                cx,
                cy,
                radius: dot_radius,
                rgba: *rgba,
            });
        }
        if let Some(title) = &layout.title {
            commands.push(PaintCommand::Text {
                x: layout.window.x as f32 + (18.0 + 3.0 * 20.0) * s,
                baseline: cy as f32 + layout.font_size * 0.35,
                size: layout.font_size,
                rgba: color::mix(window_bg, foreground, 0.7),
                bold: false,
                italic: false,
                underline: false,
                content: title.clone(),
            });
        }
    }

    // Gutter numbers render at half strength, like the line-number cells of
    // the source editor.
    let gutter_color = color::mix(window_bg, foreground, 0.5);

    for line in &layout.lines {
        if layout.line_numbers {
            let label = line.number.to_string();
            let label_width = label.len() as f32 * layout.digit_width;
            let gutter_right = layout.content_x - layout.font_size;
            commands.push(PaintCommand::Text {
                x: gutter_right - label_width,
                baseline: line.y + (line.height - layout.metrics.height) / 2.0
                    + layout.metrics.ascent,
                size: layout.font_size,
                rgba: gutter_color,
                bold: false,
                italic: false,
                underline: false,
                content: label,
            });
        }

        for run in &line.runs {
            if run.content.is_empty() {
                continue;
            }
            let style = effective_style(layout.line_style.as_ref(), run.style.as_ref());

            if let Some(bg) = style.background_color.as_deref().and_then(color::parse) {
                // Token-level backgrounds sit behind the run only.
                commands.push(PaintCommand::SolidRect {
                    x: run.x.floor() as i32,
                    y: line.y.floor() as i32,
                    width: run.width.ceil() as u32,
                    height: line.height.ceil() as u32,
                    rgba: bg,
                });
            }

            let rgba = text_color(&style, window_bg, foreground);
            commands.push(PaintCommand::Text {
                x: run.x,
                baseline: run.baseline,
                size: layout.font_size,
                rgba,
                bold: style.is_bold(),
                italic: style.is_italic(),
                underline: style.is_underlined(),
                content: run.content.clone(),
            });
        }
    }

    Scene {
        width: layout.frame.width,
        height: layout.frame.height,
        commands,
    }
}

/// Line style with the token override merged on top (token wins).
fn effective_style(line: Option<&Style>, token: Option<&Style>) -> Style {
    match (line, token) {
        (Some(l), Some(t)) => l.merged(t),
        (Some(l), None) => l.clone(),
        (None, Some(t)) => t.clone(),
        (None, None) => Style::default(),
    }
}

/// Resolve the draw color for a run: the style color (with its alpha and any
/// opacity composited against the window background) or the line foreground.
fn text_color(style: &Style, window_bg: Rgba8, foreground: Rgba8) -> Rgba8 {
    let base = style
        .color
        .as_deref()
        .and_then(color::parse)
        .unwrap_or(foreground);
    let mut strength = base.3 as f32 / 255.0;
    if let Some(opacity) = style.opacity {
        strength *= opacity.clamp(0.0, 1.0);
    }
    if strength >= 1.0 {
        return base;
    }
    color::mix(window_bg, (base.0, base.1, base.2, 0xff), strength)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::font::FontFamily;
    use crate::rendering::layout::layout_snippet;
    use crate::theme;
    use crate::token::Token;
    use crate::RenderConfig;

    fn scene_for(background: &Background) -> Scene {
        let fonts = FontFamily::embedded().unwrap();
        let config = RenderConfig::default();
        let theme = theme::builtin::monokai();
        let lines = vec![vec![
            Token::new(vec!["keyword".to_string()], "const"),
            Token::plain(" x;"),
        ]];
        let layout = layout_snippet(&lines, Some(&theme), &fonts, &config, 1.0);
        build_display_list(&layout, background)
    }

    #[test]
    fn backdrop_comes_first_then_window() {
        let scene = scene_for(&Background::default());
        assert!(matches!(scene.commands[0], PaintCommand::SolidRect { .. }));
        assert!(matches!(
            scene.commands[1],
            PaintCommand::RoundedRect { .. }
        ));
    }

    #[test]
    fn keyword_run_carries_theme_color() {
        let scene = scene_for(&Background::default());
        let keyword = scene
            .commands
            .iter()
            .find_map(|cmd| match cmd {
                PaintCommand::Text { content, rgba, .. } if content == "const" => Some(*rgba),
                _ => None,
            })
            .expect("keyword run");
        // Monokai keyword: #F92672
        assert_eq!((keyword.0, keyword.1, keyword.2), (0xf9, 0x26, 0x72));
    }

    #[test]
    fn window_background_matches_theme_plain() {
        let scene = scene_for(&Background::default());
        let window = scene
            .commands
            .iter()
            .find_map(|cmd| match cmd {
                PaintCommand::RoundedRect { rgba, .. } => Some(*rgba),
                _ => None,
            })
            .unwrap();
        assert_eq!((window.0, window.1, window.2), (0x27, 0x28, 0x22));
    }

    #[test]
    fn controls_paint_three_dots() {
        let scene = scene_for(&Background::default());
        let dots = scene
            .commands
            .iter()
            .filter(|cmd| matches!(cmd, PaintCommand::Circle { .. }))
            .count();
        assert_eq!(dots, 3);
    }

    #[test]
    fn image_background_emits_backdrop_command() {
        let background = Background {
            mode: BackgroundMode::Image,
            image: Some(std::path::PathBuf::from("backdrop.png")),
            ..Background::default()
        };
        let scene = scene_for(&background);
        assert!(matches!(
            scene.commands[0],
            PaintCommand::BackdropImage { .. }
        ));
    }

    #[test]
    fn faded_colors_composite_against_window_bg() {
        let style = Style {
            color: Some("rgba(255, 255, 255, 0.5)".to_string()),
            ..Style::default()
        };
        let rgba = text_color(&style, (0, 0, 0, 255), DEFAULT_FOREGROUND);
        assert!(rgba.0 > 100 && rgba.0 < 160);
        assert_eq!(rgba.3, 255);
    }
}
