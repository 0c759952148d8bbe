//! HTML selection → Tana paste format.
//!
//! A paste document is the sentinel line, one top bullet describing the page,
//! and one nested bullet per non-empty line of the converted selection:
//!
//! ```text
//! %%tana%%
//! - Example [view in Example Site](https://ex.com/p) #link
//!   - Hi
//!   - Hello [there](https://ex.com/x)
//! ```

mod error;
mod flatten;
mod rules;

use std::fmt;

use url::Url;

use crate::metadata::PageMetadata;

pub use error::ConvertError;
pub use flatten::{flatten, strip_heading_markers};

/// First line of every paste document; Tana's importer keys on it.
pub const SENTINEL: &str = "%%tana%%";

/// Prefix of every converted selection line.
pub const CHILD_BULLET: &str = "  - ";

/// A converted clip, ready for the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteDocument {
    text: String,
    children: usize,
}

impl PasteDocument {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Number of nested bullets below the page bullet.
    pub fn child_count(&self) -> usize {
        self.children
    }
}

impl fmt::Display for PasteDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// The top bullet: `- {title} [view in {site}]({url}) #link`.
pub fn page_bullet(meta: &PageMetadata) -> String {
    format!(
        "- {} [view in {}]({}) #link",
        meta.title(),
        meta.site_name(),
        meta.url()
    )
}

/// Converts `selection` to Markdown, resolving every `<a href>` and
/// `<img src>` against `base`.
///
/// Fails on the first anchor or image whose reference is missing or cannot be
/// joined onto `base`.
pub fn html_to_markdown(selection: &str, base: &Url) -> Result<String, ConvertError> {
    let failure = rules::FailureSlot::default();
    let markdown = {
        let rules = rules::paste_rules(base, &failure);
        html2md::parse_html_custom(selection, &rules)
    };
    match failure.take() {
        Some(err) => Err(err),
        None => Ok(markdown),
    }
}

/// Builds the paste document for a page and an optional HTML selection.
///
/// An absent or empty selection yields just the sentinel and the page bullet.
pub fn convert(meta: &PageMetadata, selection: Option<&str>) -> Result<PasteDocument, ConvertError> {
    let mut text = format!("{SENTINEL}\n{}", page_bullet(meta));
    let mut children = 0;

    if let Some(html) = selection.filter(|html| !html.is_empty()) {
        let markdown = html_to_markdown(html, meta.url())?;
        for line in flatten(&markdown) {
            text.push('\n');
            text.push_str(CHILD_BULLET);
            text.push_str(line);
            children += 1;
        }
    }

    tracing::debug!(
        url = %meta.url(),
        children,
        "converted clip to paste format"
    );

    Ok(PasteDocument { text, children })
}
