//! Async-friendly rendering facade backed by a dedicated worker thread.
//!
//! Export is the only asynchronous operation in the engine: the worker owns a
//! synchronous [`Studio`] and executes commands sent from async tasks, so
//! callers get an async interface without the engine being `Send` across
//! threads. Failed exports surface as `Err` values; the studio stays usable.

use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::thread;

use tokio::sync::oneshot;

use crate::{Artifact, Error, ExportOptions, RenderConfig, Result, Studio, Theme};

enum Command {
    SetCode(String, oneshot::Sender<()>),
    SetLanguage(String, oneshot::Sender<Result<()>>),
    SetTheme(Box<Option<Theme>>, oneshot::Sender<()>),
    Export(
        ExportOptions,
        Option<PathBuf>,
        oneshot::Sender<Result<Artifact>>,
    ),
    #[cfg(feature = "clipboard")]
    Copy(ExportOptions, oneshot::Sender<Result<()>>),
    Close(oneshot::Sender<Result<()>>),
}

/// An async studio handle backed by a worker thread that owns the engine.
#[derive(Clone)]
pub struct AsyncStudio {
    cmd_tx: Sender<Command>,
}

impl AsyncStudio {
    /// Create a new studio (spawns a background thread that owns the engine).
    pub async fn new(config: Option<RenderConfig>) -> Result<Self> {
        let config = config.unwrap_or_default();

        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (init_tx, init_rx): (oneshot::Sender<Result<()>>, oneshot::Receiver<Result<()>>) =
            oneshot::channel();

        thread::spawn(move || {
            // Initialize the engine on the worker thread
            let mut studio = match Studio::new(config) {
                Ok(s) => s,
                Err(err) => {
                    let _ = init_tx.send(Err(err));
                    return;
                }
            };

            let _ = init_tx.send(Ok(()));

            // Command loop
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::SetCode(code, resp) => {
                        studio.set_code(&code);
                        let _ = resp.send(());
                    }
                    Command::SetLanguage(language, resp) => {
                        let _ = resp.send(studio.set_language(&language));
                    }
                    Command::SetTheme(theme, resp) => {
                        studio.set_theme(*theme);
                        let _ = resp.send(());
                    }
                    Command::Export(options, path_opt, resp) => {
                        let res = studio.export(&options);
                        // If a path is provided, also write to disk
                        if let (Ok(artifact), Some(path)) = (&res, path_opt) {
                            let _ = artifact.write_to(path);
                        }
                        let _ = resp.send(res);
                    }
                    #[cfg(feature = "clipboard")]
                    Command::Copy(options, resp) => {
                        let _ = resp.send(studio.copy_to_clipboard(&options));
                    }
                    Command::Close(resp) => {
                        let _ = resp.send(Ok(()));
                        break;
                    }
                }
            }
        });

        // Wait for the worker to report initialization success or failure
        let init_res = init_rx
            .await
            .map_err(|e| Error::Other(format!("Worker init canceled: {e}")))?;
        init_res?;

        Ok(Self { cmd_tx })
    }

    /// Replace the source text.
    pub async fn set_code(&self, code: &str) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::SetCode(code.to_string(), tx));
        rx.await
            .map_err(|e| Error::Other(format!("SetCode canceled: {e}")))
    }

    /// Switch the grammar used for tokenization.
    pub async fn set_language(&self, language: &str) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self
            .cmd_tx
            .send(Command::SetLanguage(language.to_string(), tx));
        rx.await
            .map_err(|e| Error::Other(format!("SetLanguage canceled: {e}")))?
    }

    /// Swap the active theme.
    pub async fn set_theme(&self, theme: Option<Theme>) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::SetTheme(Box::new(theme), tx));
        rx.await
            .map_err(|e| Error::Other(format!("SetTheme canceled: {e}")))
    }

    /// Export an artifact; if `path` is Some, the bytes are also saved there.
    pub async fn export(&self, options: ExportOptions, path: Option<&str>) -> Result<Artifact> {
        let (tx, rx) = oneshot::channel();
        let path_opt = path.map(PathBuf::from);
        let _ = self.cmd_tx.send(Command::Export(options, path_opt, tx));
        rx.await
            .map_err(|e| Error::Other(format!("Export canceled: {e}")))?
    }

    /// Render and place the snippet on the platform clipboard.
    #[cfg(feature = "clipboard")]
    pub async fn copy_to_clipboard(&self, options: ExportOptions) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Copy(options, tx));
        rx.await
            .map_err(|e| Error::Other(format!("Copy canceled: {e}")))?
    }

    /// Shut down the background worker.
    pub async fn close(self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Close(tx));
        rx.await
            .map_err(|e| Error::Other(format!("Close canceled: {e}")))?
    }
}
