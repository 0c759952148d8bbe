//! Error type for page metadata validation and HTML conversion.

use thiserror::Error;

/// Failure to build page metadata or to convert a selection.
///
/// Conversion never returns partial output: the first reference that cannot
/// be resolved fails the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// Page metadata is unusable (bad URL, empty title, no site name).
    #[error("invalid page metadata: {0}")]
    InvalidInput(String),

    /// An `<a>` or `<img>` has no reference attribute to resolve.
    #[error("<{tag}> element has no {attribute} attribute")]
    MissingReference {
        tag: &'static str,
        attribute: &'static str,
    },

    /// The reference could not be joined onto the page URL.
    #[error("cannot resolve <{tag}> reference {reference:?}: {source}")]
    UnresolvableReference {
        tag: &'static str,
        reference: String,
        #[source]
        source: url::ParseError,
    },
}
