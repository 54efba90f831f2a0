//! Outline extraction.
//!
//! The extractor works on whitespace tokens only. It never parses expressions,
//! strings or comments; procedures and variable assignments are recognised from
//! keyword and sigil heuristics, and scope is tracked with a single global brace
//! counter.

mod extractor;
mod symbol;

pub use extractor::{OutlineScanner, extract, extract_cancellable, extract_text};
pub use symbol::{Symbol, SymbolKind};
