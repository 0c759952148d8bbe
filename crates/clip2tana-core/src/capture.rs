//! Page metadata from a saved HTML document.
//!
//! Reads the first `<title>` and the `og:site_name` meta tag; the URL host is
//! the site name fallback and the URL itself stands in for a missing title.

use html2md::common::get_tag_attr;
use html2md::{Handle, NodeData, RcDom};
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};

use crate::convert::ConvertError;
use crate::metadata::{collapse_whitespace, PageMetadata};

const SITE_NAME_PROPERTY: &str = "og:site_name";

#[derive(Debug, Default)]
struct Captured {
    title: Option<String>,
    site_name: Option<String>,
}

/// Builds [`PageMetadata`] for `document`, which was loaded from `url`.
pub fn capture_page(document: &str, url: &str) -> Result<PageMetadata, ConvertError> {
    let captured = scan(document);

    let title = captured
        .title
        .map(|t| collapse_whitespace(&t))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| url.trim().to_string());

    tracing::debug!(
        title = %title,
        site_name = ?captured.site_name,
        "captured page metadata"
    );

    PageMetadata::new(&title, url, captured.site_name.as_deref())
}

fn scan(document: &str) -> Captured {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(document);
    let mut captured = Captured::default();
    visit(&dom.document, &mut captured);
    captured
}

/// Document-order walk; the first match of each field wins.
fn visit(node: &Handle, captured: &mut Captured) {
    if let NodeData::Element { ref name, .. } = node.data {
        match &*name.local {
            "title" if captured.title.is_none() => captured.title = Some(text_of(node)),
            "meta" if captured.site_name.is_none() && is_site_name(node) => {
                captured.site_name = get_tag_attr(node, "content")
                    .map(|c| collapse_whitespace(&c))
                    .filter(|c| !c.is_empty());
            }
            _ => {}
        }
    }
    for child in node.children.borrow().iter() {
        visit(child, captured);
    }
}

fn is_site_name(meta: &Handle) -> bool {
    ["property", "name"]
        .into_iter()
        .any(|attr| get_tag_attr(meta, attr).as_deref() == Some(SITE_NAME_PROPERTY))
}

fn text_of(tag: &Handle) -> String {
    let mut out = String::new();
    for child in tag.children.borrow().iter() {
        if let NodeData::Text { ref contents } = child.data {
            out.push_str(&contents.borrow());
        }
    }
    out
}
