//! Source position index
//!
//! Tokens and AST nodes store a compact [`Pos`] (a byte offset into the
//! source) instead of a full line/column pair. The [`SourceFile`] records
//! where every line begins as the scanner walks the text, and converts a
//! [`Pos`] back into a human-readable [`Position`] on demand.

use std::fmt;

/// Opaque offset into a single source file.
///
/// The stored value is `offset + 1`, so that `0` can serve as the
/// [`Pos::NONE`] sentinel for nodes that do not come from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Pos(usize);

impl Pos {
    /// Position of synthesized nodes.
    pub const NONE: Pos = Pos(0);

    pub fn is_valid(self) -> bool {
        self != Pos::NONE
    }

    /// The position `n` bytes further along. `NONE` stays `NONE`.
    pub fn advance(self, n: usize) -> Pos {
        if self.is_valid() {
            Pos(self.0 + n)
        } else {
            self
        }
    }
}

/// Resolved source location, suitable for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Position {
    pub filename: String,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn is_valid(&self) -> bool {
        self.line > 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "-");
        }
        if self.filename.is_empty() {
            write!(f, "{}:{}", self.line, self.column)
        } else {
            write!(f, "{}:{}:{}", self.filename, self.line, self.column)
        }
    }
}

/// Line table for one source file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceFile {
    name: String,
    size: usize,
    /// Offsets at which a new line begins, strictly increasing.
    lines: Vec<usize>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        Self {
            name: name.into(),
            size,
            lines: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of line starts recorded so far.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Records that a new line begins at `offset`.
    ///
    /// Offsets must arrive in increasing order; anything at or before the
    /// last recorded line start is ignored.
    pub fn add_line(&mut self, offset: usize) {
        if self.lines.last().map_or(true, |&last| offset > last) {
            self.lines.push(offset);
        }
    }

    /// Converts a byte offset into a [`Pos`], clamping to the file size.
    pub fn pos(&self, offset: usize) -> Pos {
        Pos(offset.min(self.size) + 1)
    }

    /// Byte offset of `pos`. `Pos::NONE` maps to offset 0.
    pub fn offset(&self, pos: Pos) -> usize {
        pos.0.saturating_sub(1).min(self.size)
    }

    /// Resolves `pos` into a filename/line/column triple.
    pub fn position(&self, pos: Pos) -> Position {
        if !pos.is_valid() {
            return Position::default();
        }
        let offset = self.offset(pos);
        // Number of recorded line starts at or before `offset`.
        let passed = self.lines.partition_point(|&start| start <= offset);
        let line_start = if passed == 0 { 0 } else { self.lines[passed - 1] };

        Position {
            filename: self.name.clone(),
            line: passed + 1,
            column: offset - line_start + 1,
        }
    }
}
