//! Export options, artifact encoding, file naming and clipboard hand-off.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[cfg(feature = "raster")]
use crate::rendering::Frame;

/// Default artifact file stem; exports land in `snappy.<ext>`.
pub const DEFAULT_FILE_STEM: &str = "snappy";

/// JPEG encode quality.
#[cfg(feature = "raster")]
const JPEG_QUALITY: u8 = 90;

/// Export file formats. `Blob` is PNG bytes with no file-name mapping; it
/// backs clipboard copies and is not offered as a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileExtension {
    Png,
    Jpeg,
    Svg,
    Blob,
}

impl FileExtension {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileExtension::Png => "png",
            FileExtension::Jpeg => "jpeg",
            FileExtension::Svg => "svg",
            FileExtension::Blob => "blob",
        }
    }

    /// The default artifact name for this format.
    pub fn default_file_name(&self) -> String {
        match self {
            // A blob is PNG bytes; if it does land in a file, name it as one.
            FileExtension::Blob => format!("{DEFAULT_FILE_STEM}.png"),
            other => format!("{DEFAULT_FILE_STEM}.{}", other.as_str()),
        }
    }
}

impl fmt::Display for FileExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileExtension {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(FileExtension::Png),
            "jpeg" | "jpg" => Ok(FileExtension::Jpeg),
            "svg" => Ok(FileExtension::Svg),
            "blob" => Ok(FileExtension::Blob),
            other => Err(Error::ConfigError(format!("unknown format: {other}"))),
        }
    }
}

/// How the area behind the window is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundMode {
    Color,
    Image,
}

/// Backdrop configuration for an export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Background {
    pub mode: BackgroundMode,
    /// CSS color used in `Color` mode
    pub color: String,
    /// Picture path used in `Image` mode, cover-scaled over the frame
    pub image: Option<PathBuf>,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            mode: BackgroundMode::Color,
            color: "#abb8c3".to_string(),
            image: None,
        }
    }
}

impl Background {
    pub fn color(color: impl Into<String>) -> Self {
        Self {
            mode: BackgroundMode::Color,
            color: color.into(),
            image: None,
        }
    }

    pub fn image(path: impl Into<PathBuf>) -> Self {
        Self {
            mode: BackgroundMode::Image,
            color: String::new(),
            image: Some(path.into()),
        }
    }
}

/// Options for one export: format, size multiplier and backdrop.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub extension: FileExtension,
    /// Scales every length in the output, like a device pixel ratio
    pub size_multiplier: f32,
    pub background: Background,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            extension: FileExtension::Png,
            size_multiplier: 1.0,
            background: Background::default(),
        }
    }
}

/// A finished export: the format and its encoded bytes.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub extension: FileExtension,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn file_name(&self) -> String {
        self.extension.default_file_name()
    }

    /// Write the artifact to an explicit path.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), &self.bytes)?;
        Ok(())
    }

    /// Write the artifact into a directory under its default name.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(self.file_name());
        self.write_to(&path)?;
        Ok(path)
    }
}

/// Encode a frame as PNG bytes.
#[cfg(feature = "raster")]
pub fn encode_png(frame: &Frame) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(frame.image.clone())
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| Error::ExportError(format!("png encode: {e}")))?;
    Ok(bytes)
}

/// Encode a frame as JPEG bytes. JPEG carries no alpha; transparent frame
/// areas flatten to black, so exports should always paint a backdrop first.
#[cfg(feature = "raster")]
pub fn encode_jpeg(frame: &Frame) -> Result<Vec<u8>> {
    let rgb = image::DynamicImage::ImageRgba8(frame.image.clone()).to_rgb8();
    let mut bytes = Vec::new();
    let mut encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY);
    encoder
        .encode_image(&rgb)
        .map_err(|e| Error::ExportError(format!("jpeg encode: {e}")))?;
    Ok(bytes)
}

/// Hand a frame's pixels to the platform clipboard as an image.
///
/// Fails with [`Error::ClipboardError`] on platforms where no clipboard
/// backend is reachable (headless sessions, Wayland compositors without the
/// data-control protocol); the limitation is surfaced, never skipped.
#[cfg(feature = "clipboard")]
pub fn copy_to_clipboard(frame: &Frame) -> Result<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| Error::ClipboardError(e.to_string()))?;
    let image = arboard::ImageData {
        width: frame.width as usize,
        height: frame.height as usize,
        bytes: std::borrow::Cow::Borrowed(frame.image.as_raw().as_slice()),
    };
    clipboard
        .set_image(image)
        .map_err(|e| Error::ClipboardError(e.to_string()))
}
