//! CLI for clip2tana.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clip2tana_core::config;
use std::path::PathBuf;

use commands::{run_clip, run_hold_clipboard, run_open, run_page};

/// Top-level CLI for clip2tana.
#[derive(Debug, Parser)]
#[command(name = "clip2tana")]
#[command(about = "clip2tana: copy web pages into Tana paste format", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Clip a page from explicit metadata and an optional HTML selection.
    Clip {
        /// Page title.
        #[arg(long)]
        title: String,
        /// Absolute page URL; relative links in the selection resolve against it.
        #[arg(long)]
        url: String,
        /// Site name shown in the "view in" link (defaults to the URL host).
        #[arg(long)]
        site_name: Option<String>,
        /// HTML selection file, or `-` for stdin.
        #[arg(long, value_name = "PATH")]
        selection: Option<PathBuf>,
        /// Print the paste document instead of copying it.
        #[arg(long)]
        print: bool,
    },

    /// Clip a saved HTML document, taking title and site name from its head.
    Page {
        /// Saved HTML document.
        document: PathBuf,
        /// URL the document was loaded from.
        #[arg(long)]
        url: String,
        /// HTML selection file, or `-` for stdin.
        #[arg(long, value_name = "PATH")]
        selection: Option<PathBuf>,
        /// Print the paste document instead of copying it.
        #[arg(long)]
        print: bool,
    },

    /// Open the Tana node URL currently on the clipboard.
    Open {
        /// Print the URL instead of launching the browser.
        #[arg(long)]
        print: bool,
    },

    /// Keep text from stdin on the clipboard until it is replaced (Linux).
    #[command(name = "hold-clipboard", hide = true)]
    HoldClipboard,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Clip {
                title,
                url,
                site_name,
                selection,
                print,
            } => {
                run_clip(
                    &cfg,
                    &title,
                    &url,
                    site_name.as_deref(),
                    selection.as_deref(),
                    print,
                )
                .await?
            }
            CliCommand::Page {
                document,
                url,
                selection,
                print,
            } => run_page(&cfg, &document, &url, selection.as_deref(), print).await?,
            CliCommand::Open { print } => run_open(&cfg, print).await?,
            CliCommand::HoldClipboard => run_hold_clipboard().await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
