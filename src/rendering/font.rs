//! Embedded monospace font family and text measurement.
//!
//! DejaVu Sans Mono ships inside the binary so rendering never depends on
//! system font discovery. A custom regular face can be loaded from disk; the
//! bold/oblique variants always come from the embedded family.

use ab_glyph::{Font, FontRef, PxScale, ScaleFont};

use crate::error::{Error, Result};

const REGULAR_BYTES: &[u8] = include_bytes!("../../assets/fonts/DejaVuSansMono.ttf");
const BOLD_BYTES: &[u8] = include_bytes!("../../assets/fonts/DejaVuSansMono-Bold.ttf");
const OBLIQUE_BYTES: &[u8] = include_bytes!("../../assets/fonts/DejaVuSansMono-Oblique.ttf");
const BOLD_OBLIQUE_BYTES: &[u8] =
    include_bytes!("../../assets/fonts/DejaVuSansMono-BoldOblique.ttf");

/// Font selection options.
#[derive(Debug, Clone)]
pub struct FontOptions {
    /// Path to a custom regular face; the embedded family is used when unset
    pub custom_font_path: Option<String>,
    /// Font size in pixels
    pub size: f32,
    /// Line height as a multiple of the font size
    pub line_height: f32,
}

impl Default for FontOptions {
    fn default() -> Self {
        Self {
            custom_font_path: None,
            size: 14.0,
            line_height: 1.5,
        }
    }
}

/// Vertical metrics for a scaled face.
#[derive(Debug, Clone, Copy)]
pub struct FontMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub line_gap: f32,
    pub height: f32,
    pub font_size: f32,
}

/// The four faces used for rendering: regular, bold, oblique, bold-oblique.
pub struct FontFamily {
    regular: FontRef<'static>,
    bold: FontRef<'static>,
    italic: FontRef<'static>,
    bold_italic: FontRef<'static>,
}

impl FontFamily {
    /// Build the embedded DejaVu Sans Mono family.
    pub fn embedded() -> Result<Self> {
        Ok(Self {
            regular: face(REGULAR_BYTES)?,
            bold: face(BOLD_BYTES)?,
            italic: face(OBLIQUE_BYTES)?,
            bold_italic: face(BOLD_OBLIQUE_BYTES)?,
        })
    }

    /// Build a family from the given options, loading a custom regular face
    /// when a path is set.
    pub fn from_options(options: &FontOptions) -> Result<Self> {
        let mut family = Self::embedded()?;
        if let Some(path) = &options.custom_font_path {
            family.regular = load_font_from_path(path)?;
        }
        Ok(family)
    }

    /// Select the face for a weight/slant combination.
    pub fn select(&self, bold: bool, italic: bool) -> &FontRef<'static> {
        match (bold, italic) {
            (false, false) => &self.regular,
            (true, false) => &self.bold,
            (false, true) => &self.italic,
            (true, true) => &self.bold_italic,
        }
    }

    pub fn regular(&self) -> &FontRef<'static> {
        &self.regular
    }

    /// Horizontal advance of a single character at the given size.
    pub fn char_width(&self, c: char, font_size: f32) -> f32 {
        let scaled = self.regular.as_scaled(PxScale::from(font_size));
        scaled.h_advance(self.regular.glyph_id(c))
    }

    /// Total advance of a string at the given size. The faces are monospace,
    /// so the regular face's advances hold for every variant.
    pub fn string_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().map(|c| self.char_width(c, font_size)).sum()
    }

    /// Vertical metrics at the given size.
    pub fn metrics(&self, font_size: f32) -> FontMetrics {
        let scaled = self.regular.as_scaled(PxScale::from(font_size));
        FontMetrics {
            ascent: scaled.ascent(),
            descent: scaled.descent(),
            line_gap: scaled.line_gap(),
            height: scaled.height(),
            font_size,
        }
    }
}

fn face(bytes: &'static [u8]) -> Result<FontRef<'static>> {
    FontRef::try_from_slice(bytes)
        .map_err(|e| Error::InitializationError(format!("embedded font: {e}")))
}

/// Load a font face from a file on disk. The bytes are leaked to obtain the
/// `'static` lifetime the glyph cache requires; faces are loaded once per
/// engine, not per render.
pub fn load_font_from_path(path: impl AsRef<std::path::Path>) -> Result<FontRef<'static>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| Error::InitializationError(format!("font {}: {e}", path.display())))?;
    let leaked: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    FontRef::try_from_slice(leaked)
        .map_err(|e| Error::InitializationError(format!("font {}: {e}", path.display())))
}
