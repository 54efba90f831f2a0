//! Mapping from `mel-core` results to LSP wire types.

use mel_core::{CompletionEntry, CompletionKind, HoverInfo, Position as CorePosition, Span, Symbol, SymbolKind as CoreSymbolKind};
use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, DocumentSymbol, Documentation, Hover, HoverContents, MarkupContent, MarkupKind,
    Position, Range, SymbolKind,
};

pub fn to_position(pos: CorePosition) -> Position {
    Position::new(pos.line, pos.column)
}

pub fn to_range(span: Span) -> Range {
    Range::new(to_position(span.start), to_position(span.end))
}

/// Procedures become functions whose range is the body; variables keep a single range.
pub fn to_document_symbol(symbol: &Symbol) -> DocumentSymbol {
    let kind = match symbol.kind {
        CoreSymbolKind::Procedure => SymbolKind::FUNCTION,
        CoreSymbolKind::Variable => SymbolKind::VARIABLE,
    };
    let children = (!symbol.children.is_empty()).then(|| symbol.children.iter().map(to_document_symbol).collect());

    #[allow(deprecated)]
    DocumentSymbol {
        name: symbol.name.clone(),
        detail: None,
        kind,
        tags: None,
        deprecated: None,
        range: to_range(symbol.body_range),
        selection_range: to_range(symbol.declaration_range),
        children,
    }
}

pub fn to_completion_item(entry: &CompletionEntry) -> CompletionItem {
    let kind = match entry.kind() {
        CompletionKind::Function => CompletionItemKind::FUNCTION,
        CompletionKind::Variable => CompletionItemKind::VARIABLE,
        CompletionKind::Text => CompletionItemKind::TEXT,
    };
    CompletionItem {
        label: entry.label().to_string(),
        kind: Some(kind),
        detail: entry.detail().map(str::to_string),
        documentation: entry.documentation().map(|doc| Documentation::String(doc.to_string())),
        ..Default::default()
    }
}

pub fn to_hover(info: &HoverInfo) -> Hover {
    Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: info.markdown.clone(),
        }),
        range: Some(to_range(info.range)),
    }
}
