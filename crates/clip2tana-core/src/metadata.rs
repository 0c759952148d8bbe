//! Page metadata captured once per clip.

use url::Url;

use crate::convert::ConvertError;

/// Title, location and site name of the page being clipped.
///
/// Built through [`PageMetadata::new`], which guarantees an absolute URL and
/// single-line, non-empty title and site name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    title: String,
    url: Url,
    site_name: String,
}

impl PageMetadata {
    /// Validates and normalizes page metadata.
    ///
    /// `site_name` is a hint (e.g. `og:site_name`); when absent or blank the
    /// URL host is used instead.
    pub fn new(title: &str, url: &str, site_name: Option<&str>) -> Result<Self, ConvertError> {
        let url = Url::parse(url.trim())
            .map_err(|e| ConvertError::InvalidInput(format!("page url {url:?}: {e}")))?;

        let title = collapse_whitespace(title);
        if title.is_empty() {
            return Err(ConvertError::InvalidInput("page title is empty".into()));
        }

        let site_name = site_name
            .map(collapse_whitespace)
            .filter(|s| !s.is_empty())
            .or_else(|| url.host_str().map(str::to_string))
            .ok_or_else(|| {
                ConvertError::InvalidInput(format!("no site name hint and {url} has no host"))
            })?;

        Ok(Self {
            title,
            url,
            site_name,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }
}

/// Collapses whitespace runs (including newlines) into single spaces and trims.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_name_hint_wins() {
        let meta = PageMetadata::new("Post", "https://example.com/blog", Some("Example")).unwrap();
        assert_eq!(meta.site_name(), "Example");
        assert_eq!(meta.url().as_str(), "https://example.com/blog");
    }

    #[test]
    fn site_name_falls_back_to_host() {
        let meta = PageMetadata::new("Post", "https://news.example.org/a?b=c", None).unwrap();
        assert_eq!(meta.site_name(), "news.example.org");

        let blank = PageMetadata::new("Post", "https://example.org/", Some("   ")).unwrap();
        assert_eq!(blank.site_name(), "example.org");
    }

    #[test]
    fn title_is_single_line() {
        let meta =
            PageMetadata::new("  Multi\n  line\ttitle ", "https://example.com", None).unwrap();
        assert_eq!(meta.title(), "Multi line title");
    }

    #[test]
    fn rejects_relative_or_garbage_url() {
        assert!(matches!(
            PageMetadata::new("T", "/just/a/path", None),
            Err(ConvertError::InvalidInput(_))
        ));
        assert!(matches!(
            PageMetadata::new("T", "not a url", None),
            Err(ConvertError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_empty_title() {
        assert!(matches!(
            PageMetadata::new(" \n ", "https://example.com", None),
            Err(ConvertError::InvalidInput(_))
        ));
    }

    #[test]
    fn hostless_url_needs_a_hint() {
        assert!(PageMetadata::new("Notes", "file:///home/me/notes.html", None).is_err());
        let meta = PageMetadata::new("Notes", "file:///home/me/notes.html", Some("Local")).unwrap();
        assert_eq!(meta.site_name(), "Local");
    }
}
