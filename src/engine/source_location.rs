//! Source Location Utilities
//!
//! Maps character offsets to 1-based line and column numbers under a
//! configurable newline convention. A newline sequence belongs to the line
//! it ends, so the `\n` of `"ab\ncd"` is column 3 of line 1.

use memchr::memchr2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourcePosition {
    /// Character offset from start of input
    pub offset: usize,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based, in characters)
    pub column: usize,
}

impl SourcePosition {
    /// Create a new source position
    #[inline]
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Position at the start of input
    #[inline]
    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self::start()
    }
}

/// A range in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceSpan {
    /// Start position
    pub start: SourcePosition,
    /// End position (exclusive)
    pub end: SourcePosition,
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(
                f,
                "{}:{}-{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(
                f,
                "{}:{}-{}:{}",
                self.start.line, self.start.column, self.end.line, self.end.column
            )
        }
    }
}

/// Newline convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NewlineStyle {
    /// `\r`
    Cr,
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
    /// No newline is recognized; everything is on line 1
    Unsupported,
}

impl NewlineStyle {
    /// Character sequence of the newline
    pub fn newline(&self) -> &'static str {
        match self {
            NewlineStyle::Cr => "\r",
            NewlineStyle::Lf => "\n",
            NewlineStyle::CrLf => "\r\n",
            NewlineStyle::Unsupported => "",
        }
    }

    /// Style whose newline sequence is exactly `newline`
    pub fn from_newline(newline: &str) -> Self {
        match newline {
            "\r" => NewlineStyle::Cr,
            "\n" => NewlineStyle::Lf,
            "\r\n" => NewlineStyle::CrLf,
            _ => NewlineStyle::Unsupported,
        }
    }

    /// Convention of the host platform
    pub fn from_system() -> Self {
        if cfg!(windows) {
            NewlineStyle::CrLf
        } else {
            NewlineStyle::Lf
        }
    }

    /// Guess from the first line break in `text`
    pub fn guess(text: &str, fallback: NewlineStyle) -> Self {
        let bytes = text.as_bytes();
        match memchr2(b'\r', b'\n', bytes) {
            Some(i) => Self::classify(bytes[i] == b'\r', bytes.get(i + 1) == Some(&b'\n')),
            None => fallback,
        }
    }

    /// [`guess`](NewlineStyle::guess) over a character buffer
    pub fn guess_chars(chars: &[char], fallback: NewlineStyle) -> Self {
        match chars.iter().position(|&c| c == '\r' || c == '\n') {
            Some(i) => Self::classify(chars[i] == '\r', chars.get(i + 1) == Some(&'\n')),
            None => fallback,
        }
    }

    fn classify(is_cr: bool, followed_by_lf: bool) -> Self {
        match (is_cr, followed_by_lf) {
            (true, true) => NewlineStyle::CrLf,
            (true, false) => NewlineStyle::Cr,
            (false, _) => NewlineStyle::Lf,
        }
    }

    /// Whether a line ends at `chars[i]`
    #[inline]
    fn ends_line(&self, chars: &[char], i: usize) -> bool {
        match self {
            NewlineStyle::Cr => chars[i] == '\r',
            NewlineStyle::Lf => chars[i] == '\n',
            NewlineStyle::CrLf => chars[i] == '\n' && i > 0 && chars[i - 1] == '\r',
            NewlineStyle::Unsupported => false,
        }
    }
}

/// Pre-computed line and column of every offset
///
/// Both tables have one entry per character plus one for the end of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinesAndColumns {
    lines: Vec<usize>,
    columns: Vec<usize>,
}

impl LinesAndColumns {
    /// Compute the tables for `chars`
    pub fn new(chars: &[char], style: NewlineStyle) -> Self {
        let mut lines = Vec::with_capacity(chars.len() + 1);
        let mut columns = Vec::with_capacity(chars.len() + 1);
        let (mut line, mut column) = (1, 1);

        for i in 0..chars.len() {
            lines.push(line);
            columns.push(column);
            if style.ends_line(chars, i) {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        lines.push(line);
        columns.push(column);

        Self { lines, columns }
    }

    /// Line of each offset
    #[inline]
    pub fn lines(&self) -> &[usize] {
        &self.lines
    }

    /// Column of each offset
    #[inline]
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    /// Position of `offset`, clamped to the end of input
    pub fn position(&self, offset: usize) -> SourcePosition {
        let i = offset.min(self.lines.len() - 1);
        SourcePosition::new(i, self.lines[i], self.columns[i])
    }

    /// Span covering `[start, end)`
    pub fn span(&self, start: usize, end: usize) -> SourceSpan {
        SourceSpan {
            start: self.position(start),
            end: self.position(end),
        }
    }
}

/// Content range `[start, end)` of every line, newline sequences excluded
pub fn line_ranges(chars: &[char], style: NewlineStyle) -> Vec<(usize, usize)> {
    let newline_len = style.newline().chars().count();
    let mut ranges = Vec::new();
    let mut start = 0;

    for i in 0..chars.len() {
        if style.ends_line(chars, i) {
            ranges.push((start, i + 1 - newline_len));
            start = i + 1;
        }
    }
    ranges.push((start, chars.len()));
    ranges
}

/// Text of the line containing `offset`, without its newline
pub fn line_at_offset(chars: &[char], offset: usize, style: NewlineStyle) -> String {
    let line = LinesAndColumns::new(chars, style).position(offset).line;
    line_ranges(chars, style)
        .get(line - 1)
        .map(|&(start, end)| chars[start..end].iter().collect())
        .unwrap_or_default()
}
