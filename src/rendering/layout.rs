//! Snippet layout: window chrome, gutter and per-line text run geometry.

use crate::rendering::font::{FontFamily, FontMetrics};
use crate::style::{resolve_line_style, resolve_token_style, Style};
use crate::theme::Theme;
use crate::token::TokenLine;
use crate::RenderConfig;

/// Height reserved for the window control row, in unscaled pixels.
const CONTROLS_ROW: f32 = 28.0;
/// Minimum width of the control row (three dots plus spacing), unscaled.
const CONTROLS_MIN_WIDTH: f32 = 60.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

/// A run of equally-styled text positioned on a baseline.
#[derive(Debug, Clone)]
pub struct TextRun {
    pub x: f32,
    pub baseline: f32,
    pub width: f32,
    pub content: String,
    /// Token-resolved style override; `None` inherits the line style
    pub style: Option<Style>,
}

/// One laid-out source line.
#[derive(Debug, Clone)]
pub struct LineBox {
    /// 1-based line number
    pub number: usize,
    /// Top of the line box
    pub y: f32,
    pub height: f32,
    pub runs: Vec<TextRun>,
}

/// Full geometry of a rendered snippet.
#[derive(Debug, Clone)]
pub struct SnippetLayout {
    /// The exported image area, including the backdrop margin
    pub frame: Rect,
    /// The code window inside the frame
    pub window: Rect,
    pub radius: u32,
    pub controls: bool,
    pub title: Option<String>,
    pub line_numbers: bool,
    /// Width of the line-number gutter (zero when disabled)
    pub gutter_width: f32,
    /// Advance of a single digit, used to right-align gutter numbers
    pub digit_width: f32,
    /// Left edge of token text
    pub content_x: f32,
    pub font_size: f32,
    pub line_height: f32,
    pub metrics: FontMetrics,
    /// Base style shared by every line container
    pub line_style: Option<Style>,
    pub lines: Vec<LineBox>,
    pub scale: f32,
}

/// Lay out token lines inside the configured window chrome.
///
/// All lengths scale with `scale` (the export size multiplier). Token styles
/// are resolved here, once per token per render pass.
pub fn layout_snippet(
    lines: &[TokenLine],
    theme: Option<&Theme>,
    fonts: &FontFamily,
    config: &RenderConfig,
    scale: f32,
) -> SnippetLayout {
    let s = scale.max(0.1);
    let font_size = config.font.size * s;
    let line_height = font_size * config.font.line_height;
    let metrics = fonts.metrics(font_size);

    let padding_x = config.window.padding_x as f32 * s;
    let padding_y = config.window.padding_y as f32 * s;
    let margin = config.window.margin as f32 * s;
    let controls_height = if config.window.controls { CONTROLS_ROW * s } else { 0.0 };

    let digit_width = fonts.char_width('0', font_size);
    let gutter_width = if config.line_numbers {
        let digits = lines.len().max(1).to_string().len() as f32;
        // Digits plus a 1em gap between the gutter and the code
        digits * digit_width + font_size
    } else {
        0.0
    };

    let mut content_width: f32 = 0.0;
    let mut line_boxes = Vec::with_capacity(lines.len());
    let line_style = resolve_line_style(theme, None);

    // Window position is fixed; line geometry is computed relative to it.
    let window_x = margin;
    let window_y = margin;
    let content_x = window_x + padding_x + gutter_width;

    for (i, line) in lines.iter().enumerate() {
        let y = window_y + padding_y + controls_height + i as f32 * line_height;
        let baseline = y + (line_height - metrics.height) / 2.0 + metrics.ascent;

        let mut runs = Vec::with_capacity(line.len());
        let mut x = content_x;
        for token in line {
            let width = fonts.string_width(&token.content, font_size);
            runs.push(TextRun {
                x,
                baseline,
                width,
                content: token.content.clone(),
                style: resolve_token_style(token, theme),
            });
            x += width;
        }
        content_width = content_width.max(x - content_x);
        line_boxes.push(LineBox {
            number: i + 1,
            y,
            height: line_height,
            runs,
        });
    }

    let mut window_width = padding_x * 2.0 + gutter_width + content_width;
    if config.window.controls {
        let title_width = config
            .window
            .title
            .as_deref()
            .map(|t| fonts.string_width(t, font_size))
            .unwrap_or(0.0);
        window_width = window_width.max(padding_x * 2.0 + CONTROLS_MIN_WIDTH * s + title_width);
    }
    let window_height = padding_y * 2.0 + controls_height + lines.len() as f32 * line_height;

    let window = Rect::new(
        window_x.round() as i32,
        window_y.round() as i32,
        window_width.ceil() as u32,
        window_height.ceil() as u32,
    );
    let frame = Rect::new(
        0,
        0,
        (window_width + margin * 2.0).ceil() as u32,
        (window_height + margin * 2.0).ceil() as u32,
    );

    SnippetLayout {
        frame,
        window,
        radius: (config.window.border_radius as f32 * s).round() as u32,
        controls: config.window.controls,
        title: config.window.title.clone(),
        line_numbers: config.line_numbers,
        gutter_width,
        digit_width,
        content_x,
        font_size,
        line_height,
        metrics,
        line_style,
        lines: line_boxes,
        scale: s,
    }
}
