//! `clip2tana open` – open the Tana URL on the clipboard.

use anyhow::Result;
use clip2tana_core::clipboard::{self, SystemBrowser, SystemClipboard};
use clip2tana_core::config::Clip2TanaConfig;

pub async fn run_open(cfg: &Clip2TanaConfig, print: bool) -> Result<()> {
    let prefix = cfg.tana_url_prefix.clone();
    let url = tokio::task::spawn_blocking(move || -> Result<String> {
        let mut clipboard = SystemClipboard::new()?;
        let url = if print {
            clipboard::tana_url_from_clipboard(&mut clipboard, &prefix)?
        } else {
            clipboard::open_from_clipboard(&mut clipboard, &mut SystemBrowser, &prefix)?
        };
        Ok(url)
    })
    .await??;

    if print {
        println!("{url}");
    } else {
        eprintln!("Opened {url}");
    }
    Ok(())
}
