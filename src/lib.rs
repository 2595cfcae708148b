//! Codeshot Rendering Engine
//!
//! A headless code-to-image engine: tokenize source text through tree-sitter,
//! resolve per-token styles from a declarative theme, lay the result out in
//! window chrome over a backdrop, and export PNG/JPEG/SVG bytes or a
//! clipboard image.
//!
//! # Features
//!
//! - **Raster backend** (default): ab_glyph + imageproc rasterization to PNG/JPEG
//! - **SVG backend** (default): vector output with inlined backdrop pictures
//! - **Modular design**: backends sit behind the [`ExportBackend`] seam
//!
//! # Example
//!
//! ```no_run
//! use codeshot::{new_studio, ExportOptions, RenderConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut studio = new_studio(RenderConfig::default())?;
//! studio.set_code("const answer = 42;");
//! let artifact = studio.export(&ExportOptions::default())?;
//! std::fs::write(artifact.file_name(), &artifact.bytes)?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod color;
pub mod export;
pub mod style;
pub mod syntax;
pub mod theme;
pub mod token;

pub mod rendering;

// Async-friendly facade (worker-thread backed); export is the only async
// operation in the engine.
pub mod async_api;

pub use async_api::AsyncStudio;
pub use export::{Artifact, Background, BackgroundMode, ExportOptions, FileExtension};
pub use rendering::font::FontOptions;
pub use style::{resolve_line_style, resolve_token_style, Style};
pub use theme::Theme;
pub use token::Token;

use log::debug;

use crate::rendering::font::FontFamily;
use crate::rendering::layout::layout_snippet;
use crate::rendering::paint::{build_display_list, Scene};
use crate::syntax::{canonical_language, GrammarRegistry};
use crate::token::TokenLine;

/// Configuration for the rendering engine
///
/// The defaults match the interactive editor this engine grew out of: the
/// Night Owl theme, a 14px monospace face at 1.5 line height, padded window
/// chrome with traffic-light controls, and a line-number gutter.
///
/// # Examples
///
/// ```
/// let cfg = codeshot::RenderConfig::default();
/// assert_eq!(cfg.language, "javascript");
/// assert!(cfg.theme.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Language name or file extension used to select a grammar
    pub language: String,
    /// Active theme; `None` renders unstyled (transparent passthrough)
    pub theme: Option<Theme>,
    /// Font face and sizing
    pub font: FontOptions,
    /// Window chrome geometry
    pub window: WindowOptions,
    /// Whether to render the line-number gutter
    pub line_numbers: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            language: "javascript".to_string(),
            theme: Some(Theme::default()),
            font: FontOptions::default(),
            window: WindowOptions::default(),
            line_numbers: true,
        }
    }
}

/// Window chrome geometry, in unscaled pixels
#[derive(Debug, Clone)]
pub struct WindowOptions {
    /// Horizontal padding between the window edge and the code
    pub padding_x: u32,
    /// Vertical padding between the window edge and the code
    pub padding_y: u32,
    /// Window corner radius
    pub border_radius: u32,
    /// Backdrop margin around the window
    pub margin: u32,
    /// Whether to draw the traffic-light control dots
    pub controls: bool,
    /// Optional window title next to the controls
    pub title: Option<String>,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            padding_x: 25,
            padding_y: 25,
            border_radius: 10,
            margin: 32,
            controls: true,
            title: None,
        }
    }
}

/// Backend seam: turn a painted scene into encoded artifact bytes.
pub trait ExportBackend {
    /// The format this backend produces
    fn extension(&self) -> FileExtension;

    /// Encode the scene
    fn render(&self, scene: &Scene, fonts: &FontFamily) -> Result<Vec<u8>>;
}

/// Pick the backend for a format. Fails when the matching cargo feature is
/// compiled out.
pub fn backend_for(extension: FileExtension) -> Result<Box<dyn ExportBackend>> {
    match extension {
        #[cfg(feature = "raster")]
        FileExtension::Png | FileExtension::Jpeg | FileExtension::Blob => {
            Ok(Box::new(rendering::raster::RasterBackend::new(extension)))
        }
        #[cfg(feature = "svg")]
        FileExtension::Svg => Ok(Box::new(rendering::svg::SvgBackend)),
        #[allow(unreachable_patterns)]
        other => Err(Error::ExportError(format!(
            "no backend compiled in for {other}"
        ))),
    }
}

/// The synchronous rendering engine.
///
/// Owns the compiled grammars, the font family and the current source text.
/// Rendering is a pure pipeline per pass: tokenize, resolve styles against
/// the configured theme, lay out, paint, encode. The token stream is cached
/// only until the source or language changes.
pub struct Studio {
    config: RenderConfig,
    fonts: FontFamily,
    registry: GrammarRegistry,
    code: String,
    tokens: Option<Vec<TokenLine>>,
}

impl Studio {
    /// Create a new engine instance with the given configuration.
    pub fn new(config: RenderConfig) -> Result<Self> {
        if config.font.size <= 0.0 {
            return Err(Error::ConfigError("font size must be positive".into()));
        }
        if config.font.line_height <= 0.0 {
            return Err(Error::ConfigError("line height must be positive".into()));
        }
        if canonical_language(&config.language).is_none() {
            return Err(Error::UnsupportedLanguage(config.language.clone()));
        }
        let fonts = FontFamily::from_options(&config.font)?;
        Ok(Self {
            config,
            fonts,
            registry: GrammarRegistry::new(),
            code: String::new(),
            tokens: None,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Replace the source text.
    pub fn set_code(&mut self, code: &str) {
        if self.code != code {
            self.code = code.to_string();
            self.tokens = None;
        }
    }

    /// Switch the grammar used for tokenization.
    pub fn set_language(&mut self, language: &str) -> Result<()> {
        let name = canonical_language(language)
            .ok_or_else(|| Error::UnsupportedLanguage(language.to_string()))?;
        if self.config.language != name {
            self.config.language = name.to_string();
            self.tokens = None;
        }
        Ok(())
    }

    /// Swap the active theme. `None` renders unstyled.
    pub fn set_theme(&mut self, theme: Option<Theme>) {
        self.config.theme = theme;
    }

    /// Token lines for the current source, tokenizing on first use after a
    /// change (referentially-unchanged inputs skip the lexer).
    pub fn tokens(&mut self) -> Result<&[TokenLine]> {
        if self.tokens.is_none() {
            debug!(
                "tokenizing {} bytes as {}",
                self.code.len(),
                self.config.language
            );
            let lines = self.registry.tokenize(&self.code, &self.config.language)?;
            self.tokens = Some(lines);
        }
        Ok(self.tokens.as_deref().unwrap())
    }

    /// Lay out and paint the current source into a display list.
    pub fn scene(&mut self, options: &ExportOptions) -> Result<Scene> {
        if options.size_multiplier <= 0.0 {
            return Err(Error::ConfigError("size multiplier must be positive".into()));
        }
        self.tokens()?;
        let lines = self.tokens.as_deref().unwrap();
        let layout = layout_snippet(
            lines,
            self.config.theme.as_ref(),
            &self.fonts,
            &self.config,
            options.size_multiplier,
        );
        Ok(build_display_list(&layout, &options.background))
    }

    /// Rasterize the current source into an RGBA frame.
    #[cfg(feature = "raster")]
    pub fn render_frame(&mut self, options: &ExportOptions) -> Result<rendering::Frame> {
        let scene = self.scene(options)?;
        rendering::raster::rasterize(&scene, &self.fonts)
    }

    /// Render PNG bytes.
    #[cfg(feature = "raster")]
    pub fn to_png(&mut self, options: &ExportOptions) -> Result<Vec<u8>> {
        let frame = self.render_frame(options)?;
        export::encode_png(&frame)
    }

    /// Render JPEG bytes.
    #[cfg(feature = "raster")]
    pub fn to_jpeg(&mut self, options: &ExportOptions) -> Result<Vec<u8>> {
        let frame = self.render_frame(options)?;
        export::encode_jpeg(&frame)
    }

    /// Render raw image bytes with no file-name mapping (PNG encoded).
    #[cfg(feature = "raster")]
    pub fn to_blob(&mut self, options: &ExportOptions) -> Result<Vec<u8>> {
        self.to_png(options)
    }

    /// Render an SVG document.
    #[cfg(feature = "svg")]
    pub fn to_svg(&mut self, options: &ExportOptions) -> Result<String> {
        let scene = self.scene(options)?;
        rendering::svg::render_svg(&scene)
    }

    /// Render an artifact in the format the options ask for.
    pub fn export(&mut self, options: &ExportOptions) -> Result<Artifact> {
        let backend = backend_for(options.extension)?;
        let scene = self.scene(options)?;
        let bytes = backend.render(&scene, &self.fonts)?;
        debug!(
            "exported {} bytes as {}",
            bytes.len(),
            options.extension
        );
        Ok(Artifact {
            extension: options.extension,
            bytes,
        })
    }

    /// Render the snippet and place it on the platform clipboard (PNG pixels).
    #[cfg(feature = "clipboard")]
    pub fn copy_to_clipboard(&mut self, options: &ExportOptions) -> Result<()> {
        let frame = self.render_frame(options)?;
        export::copy_to_clipboard(&frame)
    }
}

/// Create a new engine instance with the default backend set.
pub fn new_studio(config: RenderConfig) -> Result<Studio> {
    Studio::new(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.language, "javascript");
        assert!(config.line_numbers);
        assert!(config.window.controls);
        assert_eq!(config.window.border_radius, 10);
        assert_eq!(config.theme.as_ref().unwrap().id, "night-owl");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = RenderConfig::default();
        config.font.size = 0.0;
        assert!(matches!(Studio::new(config), Err(Error::ConfigError(_))));

        let mut config = RenderConfig::default();
        config.language = "cobol-2077".to_string();
        assert!(matches!(
            Studio::new(config),
            Err(Error::UnsupportedLanguage(_))
        ));
    }

    #[test]
    fn test_token_cache_invalidation() {
        let mut studio = new_studio(RenderConfig::default()).unwrap();
        studio.set_code("let a = 1;");
        let first = studio.tokens().unwrap().len();
        studio.set_code("let a = 1;\nlet b = 2;");
        let second = studio.tokens().unwrap().len();
        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[test]
    fn test_scene_rejects_bad_multiplier() {
        let mut studio = new_studio(RenderConfig::default()).unwrap();
        studio.set_code("1");
        let mut options = ExportOptions::default();
        options.size_multiplier = 0.0;
        assert!(matches!(
            studio.scene(&options),
            Err(Error::ConfigError(_))
        ));
    }

    #[cfg(not(feature = "raster"))]
    #[test]
    fn test_missing_backend_is_reported() {
        assert!(backend_for(FileExtension::Png).is_err());
    }
}
