//! CLI command handlers, one file per command.

mod clip;
mod emit;
mod hold;
mod open;
mod page;

pub use clip::run_clip;
pub use hold::{run_hold_clipboard, HOLD_COMMAND};
pub use open::run_open;
pub use page::run_page;
