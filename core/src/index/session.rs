use std::sync::Arc;

use super::completion::CompletionEntry;
use super::identifier::{IdentifierIndex, IndexDelta};
use crate::reference::CommandReference;

/// Completion state for one open document.
///
/// Owns the document's [`IdentifierIndex`] and the command items of the table it
/// was created with. Drop the session when the document closes.
#[derive(Debug, Clone)]
pub struct CompletionSession {
    index: IdentifierIndex,
    command_items: Arc<[CompletionEntry]>,
}

impl CompletionSession {
    pub fn new(reference: Arc<CommandReference>) -> Self {
        let index = IdentifierIndex::with_reserved(reference.all_triggers().map(str::to_string));
        let command_items: Arc<[CompletionEntry]> = reference.completion_items().into();
        tracing::debug!(commands = command_items.len(), "completion session created");
        Self { index, command_items }
    }

    pub fn index(&self) -> &IdentifierIndex {
        &self.index
    }

    /// Re-scan the full document text into the session index.
    pub fn refresh(&mut self, text: &str) -> IndexDelta {
        self.index.index(text)
    }

    /// Words seen in the document, every known command, then the document's variables.
    pub fn general_items(&self) -> Vec<CompletionEntry> {
        let index = &self.index;
        let mut items =
            Vec::with_capacity(index.word_items().len() + self.command_items.len() + index.variable_items().len());
        items.extend_from_slice(index.word_items());
        items.extend_from_slice(&self.command_items);
        items.extend_from_slice(index.variable_items());
        items
    }

    pub fn variable_items(&self) -> Vec<CompletionEntry> {
        self.index.variable_items().to_vec()
    }

    pub fn general_completions(&mut self, text: &str) -> Vec<CompletionEntry> {
        self.refresh(text);
        self.general_items()
    }

    /// List offered when completion is triggered by `$`.
    pub fn variable_completions(&mut self, text: &str) -> Vec<CompletionEntry> {
        self.refresh(text);
        self.variable_items()
    }
}
