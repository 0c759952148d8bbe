//! Shared input/output for the clipping commands.

use anyhow::{Context, Result};
use clip2tana_core::clipboard::{self, SystemClipboard};
use clip2tana_core::config::Clip2TanaConfig;
use clip2tana_core::PasteDocument;
use std::path::Path;
use tokio::io::AsyncReadExt;

use super::hold;

/// Reads an HTML source file; `-` reads stdin.
pub async fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("read stdin")?;
        return Ok(buf);
    }
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read {}", path.display()))
}

/// Reads the optional selection argument.
pub async fn read_selection(path: Option<&Path>) -> Result<Option<String>> {
    match path {
        Some(p) => Ok(Some(read_source(p).await?)),
        None => Ok(None),
    }
}

/// Prints and/or copies a finished paste document according to flags and config.
///
/// On Linux a detached `hold-clipboard` child keeps the copy alive after exit.
pub async fn emit(cfg: &Clip2TanaConfig, doc: PasteDocument, print: bool) -> Result<()> {
    if print || cfg.echo {
        println!("{doc}");
    }
    if print || !cfg.write_clipboard {
        return Ok(());
    }

    let children = doc.child_count();
    let text = doc.as_str().to_owned();
    tokio::task::spawn_blocking(move || {
        let mut clipboard = SystemClipboard::new()?;
        clipboard::deliver(&mut clipboard, &doc)
    })
    .await?
    .context("copy paste document to clipboard")?;

    // The X11/Wayland clipboard empties when its owner exits.
    if cfg!(target_os = "linux") {
        hold::spawn_holder(&text).await?;
    }

    eprintln!("Copied clip with {children} selection line(s) to the clipboard.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clip2tana_core::{convert, PageMetadata};

    #[tokio::test]
    async fn read_selection_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sel.html");
        std::fs::write(&path, "<p>Hello</p>").unwrap();

        let selection = read_selection(Some(&path)).await.unwrap();
        assert_eq!(selection.as_deref(), Some("<p>Hello</p>"));
        assert!(read_selection(None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_source_names_the_path() {
        let err = read_source(Path::new("/nonexistent/clip2tana/sel.html"))
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/clip2tana/sel.html"));
    }

    #[tokio::test]
    async fn print_never_touches_the_clipboard() {
        let meta = PageMetadata::new("Example", "https://ex.com/p", None).unwrap();
        let doc = convert(&meta, None).unwrap();
        let cfg = Clip2TanaConfig::default();
        emit(&cfg, doc, true).await.unwrap();
    }
}
