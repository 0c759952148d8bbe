//! Opening a Tana node whose URL was copied to the clipboard.

use thiserror::Error;

use super::{Clipboard, ClipboardError};

#[derive(Debug, Error)]
pub enum OpenError {
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    #[error("clipboard content is not a Tana URL (expected prefix {prefix})")]
    NotTanaUrl { prefix: String },

    #[error("failed to open {url}: {source}")]
    Launch {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

/// Launches a URL in the user's browser.
pub trait UrlOpener {
    fn open_url(&mut self, url: &str) -> std::io::Result<()>;
}

/// Default browser via the platform opener (`xdg-open`, `open`, `start`).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl UrlOpener for SystemBrowser {
    fn open_url(&mut self, url: &str) -> std::io::Result<()> {
        open::that(url)
    }
}

/// Reads the clipboard and returns its text if it is a Tana URL.
///
/// Surrounding whitespace is ignored; the URL must start with `prefix`.
pub fn tana_url_from_clipboard<C: Clipboard + ?Sized>(
    clipboard: &mut C,
    prefix: &str,
) -> Result<String, OpenError> {
    let text = clipboard.read_text()?;
    let candidate = text.trim();
    if candidate.starts_with(prefix) {
        Ok(candidate.to_string())
    } else {
        Err(OpenError::NotTanaUrl {
            prefix: prefix.to_string(),
        })
    }
}

/// Opens the Tana URL on the clipboard and returns it.
pub fn open_from_clipboard<C, O>(
    clipboard: &mut C,
    opener: &mut O,
    prefix: &str,
) -> Result<String, OpenError>
where
    C: Clipboard + ?Sized,
    O: UrlOpener + ?Sized,
{
    let url = match tana_url_from_clipboard(clipboard, prefix) {
        Ok(url) => url,
        Err(err) => {
            tracing::error!("cannot open Tana URL from clipboard: {err}");
            return Err(err);
        }
    };

    opener.open_url(&url).map_err(|source| OpenError::Launch {
        url: url.clone(),
        source,
    })?;
    tracing::info!(url = %url, "opened Tana URL from clipboard");
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::testing::MemoryClipboard;
    use crate::config::DEFAULT_TANA_URL_PREFIX;

    #[derive(Default)]
    struct RecordingOpener {
        opened: Vec<String>,
        fail: bool,
    }

    impl UrlOpener for RecordingOpener {
        fn open_url(&mut self, url: &str) -> std::io::Result<()> {
            if self.fail {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no browser",
                ));
            }
            self.opened.push(url.to_string());
            Ok(())
        }
    }

    fn clipboard_with(text: &str) -> MemoryClipboard {
        MemoryClipboard {
            text: Some(text.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn accepts_tana_node_url() {
        let mut clipboard = clipboard_with("https://app.tana.inc?nodeid=abc123\n");
        let url = tana_url_from_clipboard(&mut clipboard, DEFAULT_TANA_URL_PREFIX).unwrap();
        assert_eq!(url, "https://app.tana.inc?nodeid=abc123");
    }

    #[test]
    fn rejects_other_text() {
        let mut clipboard = clipboard_with("https://example.com/?nodeid=abc");
        let err = tana_url_from_clipboard(&mut clipboard, DEFAULT_TANA_URL_PREFIX).unwrap_err();
        assert!(matches!(err, OpenError::NotTanaUrl { .. }));
    }

    #[test]
    fn empty_clipboard_is_a_clipboard_error() {
        let mut clipboard = MemoryClipboard::default();
        let err = tana_url_from_clipboard(&mut clipboard, DEFAULT_TANA_URL_PREFIX).unwrap_err();
        assert!(matches!(err, OpenError::Clipboard(ClipboardError::NoText)));
    }

    #[test]
    fn opens_only_valid_urls() {
        let mut opener = RecordingOpener::default();

        let mut good = clipboard_with("https://app.tana.inc?nodeid=xyz");
        open_from_clipboard(&mut good, &mut opener, DEFAULT_TANA_URL_PREFIX).unwrap();

        let mut bad = clipboard_with("just some notes");
        assert!(open_from_clipboard(&mut bad, &mut opener, DEFAULT_TANA_URL_PREFIX).is_err());

        assert_eq!(opener.opened, vec!["https://app.tana.inc?nodeid=xyz"]);
    }

    #[test]
    fn launch_failure_is_reported() {
        let mut opener = RecordingOpener {
            fail: true,
            ..Default::default()
        };
        let mut clipboard = clipboard_with("https://app.tana.inc?nodeid=xyz");
        let err = open_from_clipboard(&mut clipboard, &mut opener, DEFAULT_TANA_URL_PREFIX)
            .unwrap_err();
        assert!(matches!(err, OpenError::Launch { .. }));
    }
}
