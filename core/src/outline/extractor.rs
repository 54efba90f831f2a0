use std::sync::atomic::{AtomicBool, Ordering};

use super::symbol::Symbol;
use crate::token::{LineToken, Position, Span, scan_line, utf16_len};

const PROC_KEYWORD: &str = "proc";
/// Return-type annotations that may sit between `proc` and the procedure name.
const PROC_RETURN_TYPES: [&str; 2] = ["string", "string[]"];

#[derive(Debug, Clone, Copy)]
struct OpenProcedure {
    /// Index into the root list. Only a root-level procedure can own a scope.
    root_index: usize,
    start_line: u32,
}

/// Single-pass outline builder.
///
/// Feed lines in order with [`OutlineScanner::feed_line`], then call
/// [`OutlineScanner::finish`]. The active-target stack holds at most two
/// entries (the root list and one open procedure), so it is stored as an
/// optional open procedure rather than a real stack.
#[derive(Debug, Default)]
pub struct OutlineScanner {
    roots: Vec<Symbol>,
    nested_level: i32,
    open: Option<OpenProcedure>,
    next_line: u32,
}

impl OutlineScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current global brace depth. May go negative on unbalanced input.
    pub fn nested_level(&self) -> i32 {
        self.nested_level
    }

    pub fn inside_procedure(&self) -> bool {
        self.open.is_some()
    }

    /// Scan the next line of the document.
    pub fn feed_line(&mut self, line: &str) {
        let line_index = self.next_line;
        self.next_line += 1;

        let text = line.trim_end_matches(['\n', '\r']);
        let tokens = scan_line(text);
        for (i, token) in tokens.iter().enumerate() {
            if token.opens_block() {
                self.nested_level += 1;
            }
            if token.text == PROC_KEYWORD {
                self.declare_procedure(line_index, text, &tokens[i + 1..]);
            }
            if token.closes_block() {
                self.nested_level -= 1;
                self.close_if_balanced(line_index, text);
            }
            if token.text.starts_with('$') {
                self.declare_variable(line_index, token, tokens.get(i + 1));
            }
        }
    }

    pub fn finish(self) -> Vec<Symbol> {
        self.roots
    }

    fn active_target(&mut self) -> &mut Vec<Symbol> {
        match self.open {
            Some(open) => &mut self.roots[open.root_index].children,
            None => &mut self.roots,
        }
    }

    fn declare_procedure(&mut self, line_index: u32, text: &str, rest: &[LineToken<'_>]) {
        let mut candidates = rest.iter();
        let Some(mut name_token) = candidates.next() else {
            return;
        };
        if PROC_RETURN_TYPES.contains(&name_token.text) {
            match candidates.next() {
                Some(next) => name_token = next,
                None => return,
            }
        }

        let name = name_token.text.split('(').next().unwrap_or_default();
        if name.is_empty() {
            return;
        }

        let declaration = Span::on_line(line_index, name_token.column, name_token.column + utf16_len(name));
        let body = Span::on_line(line_index, 0, utf16_len(text));
        let symbol = Symbol::procedure(name, declaration, body);

        if self.open.is_some() {
            // Only one level of procedure scope is tracked: a nested `proc` joins
            // the open procedure's list without opening a scope of its own.
            self.active_target().push(symbol);
        } else {
            self.roots.push(symbol);
            self.open = Some(OpenProcedure {
                root_index: self.roots.len() - 1,
                start_line: line_index,
            });
        }
    }

    fn close_if_balanced(&mut self, line_index: u32, text: &str) {
        if self.nested_level != 0 {
            return;
        }
        if let Some(open) = self.open.take() {
            let body = Span::new(
                Position::new(open.start_line, 0),
                Position::new(line_index, utf16_len(text)),
            );
            self.roots[open.root_index].body_range = body;
        }
    }

    fn declare_variable(&mut self, line_index: u32, token: &LineToken<'_>, next: Option<&LineToken<'_>>) {
        let assigns = token.text.contains('=') || next.is_some_and(|t| t.text == "=");
        if !assigns {
            return;
        }

        let target = token.text.split('=').next().unwrap_or_default();
        let name = target.strip_prefix('$').unwrap_or(target);
        if name.is_empty() {
            return;
        }

        let range = Span::on_line(line_index, token.column, token.column + utf16_len(target));
        self.active_target().push(Symbol::variable(name, range));
    }
}

/// Build the outline for a document given as a sequence of lines.
pub fn extract<I, S>(lines: I) -> Vec<Symbol>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scanner = OutlineScanner::new();
    for line in lines {
        scanner.feed_line(line.as_ref());
    }
    scanner.finish()
}

/// Build the outline for a document held in one string.
pub fn extract_text(text: &str) -> Vec<Symbol> {
    extract(text.lines())
}

/// Like [`extract`], but checks `cancelled` before every line.
///
/// Returns `None` as soon as cancellation is observed; partial outlines are dropped.
pub fn extract_cancellable<I, S>(lines: I, cancelled: &AtomicBool) -> Option<Vec<Symbol>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scanner = OutlineScanner::new();
    for line in lines {
        if cancelled.load(Ordering::Relaxed) {
            tracing::debug!("outline extraction cancelled");
            return None;
        }
        scanner.feed_line(line.as_ref());
    }
    if cancelled.load(Ordering::Relaxed) {
        return None;
    }
    Some(scanner.finish())
}
