use std::time::Instant;

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;

use super::completion::CompletionEntry;

// `0` is not part of the word class, so `x10` splits into `x1` and an empty tail.
static FRAGMENT_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z$1-9]+").expect("fragment separator pattern is valid"));

/// Number of entries a single [`IdentifierIndex::index`] call added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexDelta {
    pub variables: usize,
    pub words: usize,
}

impl IndexDelta {
    pub fn is_empty(&self) -> bool {
        self.variables == 0 && self.words == 0
    }
}

/// Append-only identifier vocabulary for one document session.
///
/// Entries are never removed: text that disappears from the document keeps
/// its completion entries until the index is dropped. Empty fragments are
/// accepted like any other, so a bare `$` yields a variable with an empty label.
#[derive(Debug, Clone)]
pub struct IdentifierIndex {
    seen_tokens: FxHashSet<String>,
    vocabulary: FxHashSet<String>,
    variable_items: Vec<CompletionEntry>,
    word_items: Vec<CompletionEntry>,
}

impl Default for IdentifierIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentifierIndex {
    pub fn new() -> Self {
        Self {
            seen_tokens: FxHashSet::default(),
            vocabulary: FxHashSet::default(),
            variable_items: Vec::new(),
            word_items: Vec::new(),
        }
    }

    /// Index whose vocabulary already holds `reserved`, so those names are
    /// never offered as plain words or variables.
    pub fn with_reserved<I, S>(reserved: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = Self::new();
        index.vocabulary.extend(reserved.into_iter().map(Into::into));
        index
    }

    /// Merge the identifiers of `text` into the index.
    pub fn index(&mut self, text: &str) -> IndexDelta {
        let started = Instant::now();
        let mut delta = IndexDelta::default();
        if text.is_empty() {
            return delta;
        }

        for fragment in FRAGMENT_SEPARATOR.split(text) {
            if self.seen_tokens.contains(fragment) {
                continue;
            }
            self.seen_tokens.insert(fragment.to_string());

            let word = fragment.trim();
            let (word, is_variable) = match word.strip_prefix('$') {
                Some(rest) => (rest, true),
                None => (word, false),
            };

            if is_numeric(word) || self.vocabulary.contains(word) {
                continue;
            }
            self.vocabulary.insert(word.to_string());

            if is_variable {
                self.variable_items.push(CompletionEntry::variable(word));
                delta.variables += 1;
            } else {
                self.word_items.push(CompletionEntry::text(word));
                delta.words += 1;
            }
        }

        tracing::debug!(
            variables = delta.variables,
            words = delta.words,
            elapsed_us = started.elapsed().as_micros() as u64,
            "identifier index updated"
        );
        delta
    }

    pub fn variable_items(&self) -> &[CompletionEntry] {
        &self.variable_items
    }

    pub fn word_items(&self) -> &[CompletionEntry] {
        &self.word_items
    }

    /// Whether `word` (without sigil) has been accepted or reserved.
    pub fn contains(&self, word: &str) -> bool {
        self.vocabulary.contains(word)
    }

    pub fn seen_fragments(&self) -> usize {
        self.seen_tokens.len()
    }

    /// Number of completion entries produced from document text.
    pub fn len(&self) -> usize {
        self.variable_items.len() + self.word_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Optional leading `-` followed by ASCII digits only.
fn is_numeric(word: &str) -> bool {
    let digits = word.strip_prefix('-').unwrap_or(word);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
pub(super) fn split_fragments(text: &str) -> Vec<&str> {
    FRAGMENT_SEPARATOR.split(text).collect()
}

#[cfg(test)]
pub(super) fn numeric(word: &str) -> bool {
    is_numeric(word)
}
