pub mod index;
pub mod outline;
pub mod reference;
pub mod token;

pub use index::{CompletionEntry, CompletionKind, CompletionSession, IdentifierIndex, IndexDelta};
pub use outline::{OutlineScanner, Symbol, SymbolKind, extract, extract_cancellable, extract_text};
pub use reference::{CommandDoc, CommandReference, DEFAULT_HELP_URL_BASE, HoverInfo, hover};
pub use token::{LineToken, Position, Span, scan_line};
