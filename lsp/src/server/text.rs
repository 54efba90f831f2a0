use once_cell::sync::Lazy;
use regex::Regex;
use ropey::Rope;
use tower_lsp::lsp_types::{Position, TextDocumentContentChangeEvent};

// A `$` followed by identifier characters, ending at the cursor.
static VARIABLE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$[A-Za-z1-9]*$").expect("variable prefix pattern is valid"));

// Convert LSP UTF-16 position to Rope char index (scalar values), clamped to the end of the line.
pub(crate) fn position_to_char_idx(text: &Rope, pos: Position) -> usize {
    let line_idx = pos.line as usize;
    if line_idx >= text.len_lines() {
        return text.len_chars();
    }
    let line_start_char = text.line_to_char(line_idx);
    let line_slice = text.line(line_idx);
    let target_utf16 = pos.character as usize;

    let mut seen_utf16 = 0usize;
    let mut chars_in_line = 0usize;
    for ch in line_slice.chars() {
        if ch == '\n' || ch == '\r' {
            break;
        }
        let u16_len = ch.len_utf16();
        if seen_utf16 + u16_len > target_utf16 {
            break;
        }
        seen_utf16 += u16_len;
        chars_in_line += 1;
    }
    line_start_char + chars_in_line
}

// Apply one LSP content change; a change without a range replaces the whole buffer.
pub(crate) fn apply_incremental_change_rope(text: &mut Rope, change: &TextDocumentContentChangeEvent) {
    let Some(range) = &change.range else {
        *text = Rope::from_str(&change.text);
        return;
    };
    let start_char = position_to_char_idx(text, range.start);
    let end_char = position_to_char_idx(text, range.end);
    let (s, e) = if start_char <= end_char {
        (start_char, end_char)
    } else {
        (end_char, start_char)
    };
    if s != e {
        text.remove(s..e);
    }
    if !change.text.is_empty() {
        text.insert(s, &change.text);
    }
}

/// Text of `line` without its line terminator.
pub(crate) fn line_text(text: &Rope, line: u32) -> Option<String> {
    let line_idx = line as usize;
    if line_idx >= text.len_lines() {
        return None;
    }
    let mut s = text.line(line_idx).to_string();
    let trimmed = s.trim_end_matches(['\n', '\r']).len();
    s.truncate(trimmed);
    Some(s)
}

/// Whether the cursor sits right after a `$` sigil or inside a `$name` being typed.
pub(crate) fn typing_variable(text: &Rope, pos: Position) -> bool {
    let line_idx = pos.line as usize;
    if line_idx >= text.len_lines() {
        return false;
    }
    let line_start = text.line_to_char(line_idx);
    let cursor = position_to_char_idx(text, pos);
    let prefix = text.slice(line_start..cursor).to_string();
    VARIABLE_PREFIX.is_match(&prefix)
}
