pub mod config;
pub mod logging;

pub mod capture;
pub mod clipboard;
pub mod convert;
pub mod metadata;

pub use convert::{convert, ConvertError, PasteDocument};
pub use metadata::PageMetadata;
