/// A whitespace-delimited fragment of one source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineToken<'a> {
    pub text: &'a str,
    /// UTF-16 column of the first character.
    pub column: u32,
}

impl LineToken<'_> {
    pub fn end_column(&self) -> u32 {
        self.column + utf16_len(self.text)
    }

    #[inline]
    pub fn opens_block(&self) -> bool {
        self.text.contains('{')
    }

    #[inline]
    pub fn closes_block(&self) -> bool {
        self.text.contains('}')
    }
}

/// Split a line on runs of whitespace. No state is carried between lines.
pub fn scan_line(line: &str) -> Vec<LineToken<'_>> {
    let mut tokens = Vec::new();
    let mut column = 0u32;
    let mut pending: Option<(usize, u32)> = None;

    for (idx, ch) in line.char_indices() {
        if ch.is_whitespace() {
            if let Some((start, start_column)) = pending.take() {
                tokens.push(LineToken {
                    text: &line[start..idx],
                    column: start_column,
                });
            }
        } else if pending.is_none() {
            pending = Some((idx, column));
        }
        column += ch.len_utf16() as u32;
    }

    if let Some((start, start_column)) = pending {
        tokens.push(LineToken {
            text: &line[start..],
            column: start_column,
        });
    }
    tokens
}

#[inline]
pub fn utf16_len(text: &str) -> u32 {
    if text.is_ascii() {
        text.len() as u32
    } else {
        text.encode_utf16().count() as u32
    }
}
