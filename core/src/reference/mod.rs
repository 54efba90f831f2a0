//! Builtin command documentation and the hover built on it.

mod hover;
mod store;
#[cfg(test)]
mod reference_test;

pub use hover::{DEFAULT_HELP_URL_BASE, HoverInfo, help_url, hover, word_at};
pub use store::{CommandDoc, CommandReference};
