//! `clip2tana hold-clipboard` – keep a paste document on a Linux clipboard.
//!
//! Started by `clip` and `page` as a detached child. Reads the text from
//! stdin and owns the clipboard until another program replaces it.

use anyhow::{Context, Result};
use clip2tana_core::clipboard::{Clipboard, SystemClipboard};
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::emit::read_source;

/// Subcommand name the holder is started with.
pub const HOLD_COMMAND: &str = "hold-clipboard";

pub async fn run_hold_clipboard() -> Result<()> {
    let text = read_source(Path::new("-")).await?;
    tokio::task::spawn_blocking(move || {
        let mut clipboard = SystemClipboard::holding()?;
        clipboard.write_text(&text)
    })
    .await?
    .context("hold clipboard contents")?;

    tracing::debug!("clipboard replaced by another program, holder exiting");
    Ok(())
}

/// Command line for a holder that outlives the current process.
pub(super) fn holder_command(exe: &Path) -> Command {
    let mut cmd = Command::new(exe);
    cmd.arg(HOLD_COMMAND)
        .current_dir("/")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    cmd
}

/// Starts a holder for `text` without waiting for it.
pub(super) async fn spawn_holder(text: &str) -> Result<()> {
    let exe = std::env::current_exe().context("locate clip2tana executable")?;
    let mut child = holder_command(&exe)
        .spawn()
        .with_context(|| format!("spawn clipboard holder {}", exe.display()))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .await
            .context("send paste document to clipboard holder")?;
    }

    tracing::debug!(pid = ?child.id(), "clipboard holder started");
    Ok(())
}
