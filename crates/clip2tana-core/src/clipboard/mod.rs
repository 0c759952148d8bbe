//! System clipboard access: writing paste documents and reading Tana URLs.

mod tana_url;

pub use tana_url::{
    open_from_clipboard, tana_url_from_clipboard, OpenError, SystemBrowser, UrlOpener,
};

use thiserror::Error;

use crate::convert::PasteDocument;

/// Clipboard errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard access failed: {0}")]
    Access(String),

    #[error("no text in clipboard")]
    NoText,
}

/// Text clipboard used by the clip and open commands.
pub trait Clipboard {
    fn read_text(&mut self) -> Result<String, ClipboardError>;

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard, backed by `arboard`.
pub struct SystemClipboard {
    clipboard: arboard::Clipboard,
    #[cfg_attr(not(target_os = "linux"), allow(dead_code))]
    hold: bool,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        Self::open(false)
    }

    /// A clipboard whose writes block until another program replaces the contents.
    ///
    /// X11 and Wayland serve the clipboard from the owning process, so a
    /// paste document only outlives `clip2tana clip` while a holder keeps it.
    /// Elsewhere this behaves like [`SystemClipboard::new`].
    pub fn holding() -> Result<Self, ClipboardError> {
        Self::open(true)
    }

    fn open(hold: bool) -> Result<Self, ClipboardError> {
        let clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Access(e.to_string()))?;
        Ok(Self { clipboard, hold })
    }
}

impl Clipboard for SystemClipboard {
    fn read_text(&mut self) -> Result<String, ClipboardError> {
        self.clipboard.get_text().map_err(|e| match e {
            arboard::Error::ContentNotAvailable => ClipboardError::NoText,
            other => ClipboardError::Access(other.to_string()),
        })
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        #[cfg(target_os = "linux")]
        {
            use arboard::SetExtLinux;

            if self.hold {
                return self
                    .clipboard
                    .set()
                    .wait()
                    .text(text)
                    .map_err(|e| ClipboardError::Access(e.to_string()));
            }
        }
        self.clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::Access(e.to_string()))
    }
}

/// Places `doc` on the clipboard. Failures are logged and returned, never retried.
pub fn deliver<C: Clipboard + ?Sized>(
    clipboard: &mut C,
    doc: &PasteDocument,
) -> Result<(), ClipboardError> {
    match clipboard.write_text(doc.as_str()) {
        Ok(()) => {
            tracing::info!(
                children = doc.child_count(),
                "copied paste document to clipboard"
            );
            Ok(())
        }
        Err(err) => {
            tracing::error!("error copying paste document to clipboard: {err}");
            Err(err)
        }
    }
}
