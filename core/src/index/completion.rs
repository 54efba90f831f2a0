use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionKind {
    Function,
    Variable,
    Text,
}

/// One entry of a completion list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CompletionEntry {
    /// A builtin command from the reference table.
    Function {
        label: String,
        detail: Option<String>,
        documentation: Option<String>,
    },
    /// A `$` variable seen in the document, stored without its sigil.
    Variable { label: String },
    /// Any other word seen in the document.
    Text { label: String },
}

impl CompletionEntry {
    pub fn variable(label: impl Into<String>) -> Self {
        Self::Variable { label: label.into() }
    }

    pub fn text(label: impl Into<String>) -> Self {
        Self::Text { label: label.into() }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Function { label, .. } | Self::Variable { label } | Self::Text { label } => label,
        }
    }

    pub fn kind(&self) -> CompletionKind {
        match self {
            Self::Function { .. } => CompletionKind::Function,
            Self::Variable { .. } => CompletionKind::Variable,
            Self::Text { .. } => CompletionKind::Text,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Function { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn documentation(&self) -> Option<&str> {
        match self {
            Self::Function { documentation, .. } => documentation.as_deref(),
            _ => None,
        }
    }
}
