//! `clip2tana page <document>` – clip a saved HTML document.

use anyhow::Result;
use clip2tana_core::capture::capture_page;
use clip2tana_core::config::Clip2TanaConfig;
use clip2tana_core::convert;
use std::path::Path;

use super::emit::{emit, read_selection, read_source};

pub async fn run_page(
    cfg: &Clip2TanaConfig,
    document: &Path,
    url: &str,
    selection: Option<&Path>,
    print: bool,
) -> Result<()> {
    let html = read_source(document).await?;
    let meta = capture_page(&html, url)?;
    tracing::info!(title = meta.title(), site = meta.site_name(), "captured {}", document.display());

    let selection = read_selection(selection).await?;
    let doc = convert(&meta, selection.as_deref())?;
    emit(cfg, doc, print).await
}
