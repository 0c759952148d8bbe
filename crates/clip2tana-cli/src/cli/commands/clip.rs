//! `clip2tana clip` – clip a page from explicit metadata.

use anyhow::Result;
use clip2tana_core::config::Clip2TanaConfig;
use clip2tana_core::{convert, PageMetadata};
use std::path::Path;

use super::emit::{emit, read_selection};

pub async fn run_clip(
    cfg: &Clip2TanaConfig,
    title: &str,
    url: &str,
    site_name: Option<&str>,
    selection: Option<&Path>,
    print: bool,
) -> Result<()> {
    let meta = PageMetadata::new(title, url, site_name)?;
    let selection = read_selection(selection).await?;
    let doc = convert(&meta, selection.as_deref())?;
    emit(cfg, doc, print).await
}
