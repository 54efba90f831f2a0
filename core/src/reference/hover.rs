use serde::Serialize;

use super::store::CommandReference;
use crate::token::Span;

pub const DEFAULT_HELP_URL_BASE: &str = "http://help.autodesk.com/cloudhelp/2017/ENU/Maya-Tech-Docs/Commands/";

// Characters that end a word, on top of whitespace. Mirrors the default word
// definition editors use for "word under cursor".
const WORD_SEPARATORS: &str = "`~!@#$%^&*()-=+[{]}\\|;:'\",.<>/?";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoverInfo {
    pub trigger: String,
    pub help_url: String,
    /// Documentation followed by the help link, as markdown.
    pub markdown: String,
    pub range: Span,
}

#[inline]
fn is_word_char(ch: char) -> bool {
    !ch.is_whitespace() && !WORD_SEPARATORS.contains(ch)
}

/// Word touching UTF-16 `column` on `line`, with its start and end columns.
///
/// A cursor placed right after the last character still selects the word.
pub fn word_at(line: &str, column: u32) -> Option<(u32, u32, &str)> {
    let mut col = 0u32;
    let mut current: Option<(usize, u32)> = None;

    for (idx, ch) in line.char_indices() {
        if is_word_char(ch) {
            if current.is_none() {
                current = Some((idx, col));
            }
        } else if let Some((start, start_col)) = current.take() {
            if start_col <= column && column <= col {
                return Some((start_col, col, &line[start..idx]));
            }
            if start_col > column {
                return None;
            }
        }
        col += ch.len_utf16() as u32;
    }

    match current {
        Some((start, start_col)) if start_col <= column && column <= col => Some((start_col, col, &line[start..])),
        _ => None,
    }
}

pub fn help_url(base: &str, trigger: &str) -> String {
    if base.is_empty() || base.ends_with('/') {
        format!("{}{}.html", base, trigger)
    } else {
        format!("{}/{}.html", base, trigger)
    }
}

/// Documentation for the command under the cursor.
///
/// Only exact trigger matches produce a hover; every other word yields `None`.
pub fn hover(
    reference: &CommandReference,
    line_index: u32,
    line: &str,
    column: u32,
    help_url_base: &str,
) -> Option<HoverInfo> {
    let (start, end, word) = word_at(line, column)?;
    let doc = reference.lookup(word)?;

    let url = help_url(help_url_base, &doc.trigger);
    let markdown = format!(
        "{}\n\n[Read Online Help]({})",
        doc.documentation.replace('\n', "  \n"),
        url
    );
    Some(HoverInfo {
        trigger: doc.trigger.clone(),
        help_url: url,
        markdown,
        range: Span::on_line(line_index, start, end),
    })
}
