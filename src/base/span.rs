//! Byte ranges and line/column conversion.

pub use text_size::{TextRange, TextSize};

/// A 0-indexed line/column pair. Columns count chars, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

impl LineCol {
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }

    /// 1-based `(line, character)` as used by diagnostic logs.
    pub fn one_based(self) -> (u32, u32) {
        (self.line + 1, self.col + 1)
    }
}

/// Maps byte offsets to line/column positions for one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset of the first char of every line.
    line_starts: Vec<TextSize>,
    text: std::sync::Arc<str>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        let bytes = text.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' => line_starts.push(TextSize::new(i as u32 + 1)),
                b'\r' if bytes.get(i + 1) != Some(&b'\n') => {
                    line_starts.push(TextSize::new(i as u32 + 1))
                }
                _ => {}
            }
            i += 1;
        }
        Self {
            line_starts,
            text: text.into(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset into a line/column pair.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let start = usize::from(self.line_starts[line]);
        let end = usize::from(offset).min(self.text.len());
        let col = self.text.get(start..end).map_or(0, |s| s.chars().count());
        LineCol::new(line as u32, col as u32)
    }

    /// Convert a line/column pair back into a byte offset.
    pub fn offset(&self, pos: LineCol) -> Option<TextSize> {
        let start = *self.line_starts.get(pos.line as usize)?;
        let line_text = &self.text[usize::from(start)..];
        let mut byte = 0usize;
        for (count, ch) in line_text.chars().enumerate() {
            if count == pos.col as usize {
                return Some(start + TextSize::new(byte as u32));
            }
            if ch == '\n' || ch == '\r' {
                return None;
            }
            byte += ch.len_utf8();
        }
        (pos.col as usize == line_text.chars().count())
            .then(|| start + TextSize::new(byte as u32))
    }

    /// Byte offset of the start of the line containing `offset`.
    pub fn line_start(&self, offset: TextSize) -> TextSize {
        let line = self.line_col(offset).line as usize;
        self.line_starts[line]
    }
}
