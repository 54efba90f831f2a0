use std::fmt::Write as _;

use mel_core::{CompletionEntry, IdentifierIndex, Span, Symbol, SymbolKind};

/// `line:column-line:column`, both 1-based; the end is exclusive.
pub(crate) fn span_label(span: Span) -> String {
    format!(
        "{}:{}-{}:{}",
        span.start.line + 1,
        span.start.column + 1,
        span.end.line + 1,
        span.end.column + 1
    )
}

pub(crate) fn outline_text(symbols: &[Symbol]) -> String {
    let mut out = String::new();
    for (depth, symbol) in Symbol::walk(symbols) {
        let indent = "  ".repeat(depth);
        let _ = match symbol.kind {
            SymbolKind::Procedure => writeln!(
                out,
                "{}proc {} {} (body {})",
                indent,
                symbol.name,
                span_label(symbol.declaration_range),
                span_label(symbol.body_range)
            ),
            SymbolKind::Variable => writeln!(
                out,
                "{}${} {}",
                indent,
                symbol.name,
                span_label(symbol.declaration_range)
            ),
        };
    }
    out
}

/// Labels as an editor would list them; empty names are left out.
pub(crate) fn labels(items: &[CompletionEntry]) -> Vec<&str> {
    items
        .iter()
        .map(CompletionEntry::label)
        .filter(|label| !label.is_empty())
        .collect()
}

pub(crate) fn index_text(index: &IdentifierIndex) -> String {
    let mut out = String::new();
    let sections = [("variables", index.variable_items()), ("words", index.word_items())];
    for (title, items) in sections {
        let shown = labels(items);
        let _ = writeln!(out, "{} ({}):", title, shown.len());
        for label in shown {
            let _ = writeln!(out, "  {}", label);
        }
    }
    out
}
