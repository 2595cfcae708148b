//! Error types for the rendering engine

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the rendering engine
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to initialize the engine (fonts, grammars)
    #[error("Engine initialization failed: {0}")]
    InitializationError(String),

    /// No grammar is registered for the requested language
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// The external lexer failed to produce a token stream
    #[error("Tokenization failed: {0}")]
    TokenizeError(String),

    /// Failed to render the snippet
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Failed to encode or write an export artifact
    #[error("Export failed: {0}")]
    ExportError(String),

    /// The platform clipboard rejected or cannot take an image
    #[error("Clipboard error: {0}")]
    ClipboardError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::ExportError(err.to_string())
    }
}
