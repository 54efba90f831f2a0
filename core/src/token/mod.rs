use serde::{Deserialize, Serialize};

mod scanner;
#[cfg(test)]
mod scanner_test;

pub use scanner::{LineToken, scan_line, utf16_len};

/// Zero-based location inside a document.
///
/// Columns count UTF-16 code units, which is what editors speaking LSP use by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// Half-open `[start, end)` region of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Span covering `start_column..end_column` of a single line.
    pub const fn on_line(line: u32, start_column: u32, end_column: u32) -> Self {
        Self {
            start: Position::new(line, start_column),
            end: Position::new(line, end_column),
        }
    }

    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn line_count(&self) -> u32 {
        self.end.line.saturating_sub(self.start.line) + 1
    }
}
