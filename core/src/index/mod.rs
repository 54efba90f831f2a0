mod completion;
mod identifier;
mod session;

pub use completion::{CompletionEntry, CompletionKind};
pub use identifier::{IdentifierIndex, IndexDelta};
pub use session::CompletionSession;
