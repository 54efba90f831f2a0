use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::index::CompletionEntry;

const BUILTIN_TABLE: &str = include_str!("../../data/commands.json");

static BUILTIN: Lazy<Arc<CommandReference>> = Lazy::new(|| match CommandReference::from_json_str(BUILTIN_TABLE) {
    Ok(reference) => {
        tracing::debug!(commands = reference.len(), "builtin command table loaded");
        Arc::new(reference)
    }
    Err(err) => {
        tracing::error!("failed to parse builtin command table: {:#}", err);
        Arc::new(CommandReference::default())
    }
});

/// One record of the command table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDoc {
    pub trigger: String,
    #[serde(rename = "comment", default)]
    pub documentation: String,
}

impl CommandDoc {
    pub fn new(trigger: impl Into<String>, documentation: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            documentation: documentation.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ReferenceTable {
    Records(Vec<CommandDoc>),
    Wrapped { completions: Vec<CommandDoc> },
}

/// Immutable command table keyed by trigger.
#[derive(Debug, Clone, Default)]
pub struct CommandReference {
    entries: Vec<CommandDoc>,
    by_trigger: FxHashMap<String, usize>,
    triggers: Vec<String>,
}

impl CommandReference {
    /// Table bundled with the crate. Parsed once per process.
    pub fn builtin() -> Arc<CommandReference> {
        BUILTIN.clone()
    }

    pub fn from_entries(entries: Vec<CommandDoc>) -> Self {
        let mut by_trigger = FxHashMap::with_capacity_and_hasher(entries.len(), Default::default());
        let mut triggers = Vec::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            // Later records replace earlier ones for lookups.
            if by_trigger.insert(entry.trigger.clone(), i).is_none() {
                triggers.push(entry.trigger.clone());
            }
        }
        Self {
            entries,
            by_trigger,
            triggers,
        }
    }

    /// Parse either a bare array of `{trigger, comment}` records or an object
    /// holding them under `completions`.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let table: ReferenceTable = serde_json::from_str(json).context("invalid command table")?;
        let entries = match table {
            ReferenceTable::Records(entries) | ReferenceTable::Wrapped { completions: entries } => entries,
        };
        Ok(Self::from_entries(entries))
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read command table '{}'", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("Failed to load command table '{}'", path.display()))
    }

    pub fn lookup(&self, trigger: &str) -> Option<&CommandDoc> {
        self.by_trigger.get(trigger).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, trigger: &str) -> bool {
        self.by_trigger.contains_key(trigger)
    }

    /// Distinct trigger names in table order.
    pub fn all_triggers(&self) -> impl Iterator<Item = &str> + '_ {
        self.triggers.iter().map(String::as_str)
    }

    pub fn entries(&self) -> &[CommandDoc] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One `Function` entry per record, in table order.
    pub fn completion_items(&self) -> Vec<CompletionEntry> {
        self.entries
            .iter()
            .map(|entry| CompletionEntry::Function {
                label: entry.trigger.clone(),
                detail: Some(entry.trigger.clone()),
                documentation: Some(entry.documentation.clone()),
            })
            .collect()
    }
}
