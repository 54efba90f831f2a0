use serde::{Deserialize, Serialize};

use crate::token::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Procedure,
    Variable,
}

/// A node of the document outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    /// Where the name itself sits on the declaring line.
    pub declaration_range: Span,
    /// Whole procedure body for procedures; same as `declaration_range` for variables.
    pub body_range: Span,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Symbol>,
}

impl Symbol {
    pub fn procedure(name: impl Into<String>, declaration_range: Span, body_range: Span) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Procedure,
            declaration_range,
            body_range,
            children: Vec::new(),
        }
    }

    pub fn variable(name: impl Into<String>, range: Span) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Variable,
            declaration_range: range,
            body_range: range,
            children: Vec::new(),
        }
    }

    pub fn is_procedure(&self) -> bool {
        self.kind == SymbolKind::Procedure
    }

    pub fn child(&self, name: &str) -> Option<&Symbol> {
        self.children.iter().find(|s| s.name == name)
    }

    /// Depth-first walk over `symbols` and all of their descendants, paired with their depth.
    pub fn walk(symbols: &[Symbol]) -> Vec<(usize, &Symbol)> {
        fn visit<'a>(symbols: &'a [Symbol], depth: usize, out: &mut Vec<(usize, &'a Symbol)>) {
            for symbol in symbols {
                out.push((depth, symbol));
                visit(&symbol.children, depth + 1, out);
            }
        }

        let mut out = Vec::new();
        visit(symbols, 0, &mut out);
        out
    }
}
