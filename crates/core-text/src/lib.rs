//! Rope-based text buffer abstraction.
//!
//! All public offsets are *char* offsets into the whole document, matching the
//! addressing used by editor hosts for selections and scope lookups. Line
//! regions never include the trailing newline unless the name says so
//! (`full_line_region`).

use anyhow::Result;
use ropey::Rope;

pub mod segment;

pub use segment::word_at;

/// A selection range expressed as two char offsets. `a` is the anchor and `b`
/// the caret; either may be the larger one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Region {
    pub a: usize,
    pub b: usize,
}

impl Region {
    pub fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }
    pub fn point(offset: usize) -> Self {
        Self {
            a: offset,
            b: offset,
        }
    }
    pub fn begin(&self) -> usize {
        self.a.min(self.b)
    }
    pub fn end(&self) -> usize {
        self.a.max(self.b)
    }
    pub fn len(&self) -> usize {
        self.end() - self.begin()
    }
    pub fn is_empty(&self) -> bool {
        self.a == self.b
    }
    /// Inclusive on both ends so a caret sitting at a line end still counts.
    pub fn contains(&self, offset: usize) -> bool {
        self.begin() <= offset && offset <= self.end()
    }
    pub fn intersects(&self, other: &Region) -> bool {
        self.begin() <= other.end() && other.begin() <= self.end()
    }
}

/// A text buffer backed by a `ropey::Rope`.
#[derive(Clone)]
pub struct Buffer {
    rope: Rope,
    pub name: String,
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("name", &self.name)
            .field("len_chars", &self.rope.len_chars())
            .field("line_count", &self.rope.len_lines())
            .finish()
    }
}

impl Buffer {
    /// Construct a buffer from an in-memory string slice.
    pub fn from_str(name: impl Into<String>, content: &str) -> Result<Self> {
        Ok(Self {
            rope: Rope::from_str(content),
            name: name.into(),
        })
    }

    /// Total number of chars in the buffer.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Return the requested line as an owned `String` (including trailing newline if present).
    pub fn line(&self, idx: usize) -> Option<String> {
        if idx < self.rope.len_lines() {
            Some(self.rope.line(idx).to_string())
        } else {
            None
        }
    }

    /// Line index containing `offset` (clamped to the document end).
    pub fn line_of(&self, offset: usize) -> usize {
        self.rope.char_to_line(offset.min(self.rope.len_chars()))
    }

    /// Char offset of the first char of line `idx` (clamped to the last line).
    pub fn line_start(&self, idx: usize) -> usize {
        let last = self.rope.len_lines().saturating_sub(1);
        self.rope.line_to_char(idx.min(last))
    }

    /// Region of the line containing `offset`, excluding its newline.
    pub fn line_region(&self, offset: usize) -> Region {
        let idx = self.line_of(offset);
        let start = self.rope.line_to_char(idx);
        let line = self.rope.line(idx);
        let mut len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len -= 1;
            if len > 0 && line.char(len - 1) == '\r' {
                len -= 1;
            }
        }
        Region::new(start, start + len)
    }

    /// Region of the line containing `offset`, including its newline when present.
    pub fn full_line_region(&self, offset: usize) -> Region {
        let idx = self.line_of(offset);
        let start = self.rope.line_to_char(idx);
        Region::new(start, start + self.rope.line(idx).len_chars())
    }

    /// Every line region (newline excluded) touched by `region`, top to bottom.
    pub fn lines_in(&self, region: Region) -> Vec<Region> {
        let first = self.line_of(region.begin());
        let last = self.line_of(region.end());
        (first..=last)
            .map(|idx| self.line_region(self.rope.line_to_char(idx)))
            .collect()
    }

    /// Text of `region`, clamped to the document.
    pub fn substr(&self, region: Region) -> String {
        let total = self.rope.len_chars();
        let s = region.begin().min(total);
        let e = region.end().min(total);
        if s >= e {
            return String::new();
        }
        self.rope.slice(s..e).to_string()
    }

    /// Insert `text` at char `offset` (clamped). Returns the number of chars inserted.
    pub fn insert(&mut self, offset: usize, text: &str) -> usize {
        let at = offset.min(self.rope.len_chars());
        self.rope.insert(at, text);
        text.chars().count()
    }

    /// Remove `region` (clamped). Returns the removed text for logging / undo integration.
    pub fn erase(&mut self, region: Region) -> String {
        let removed = self.substr(region);
        if removed.is_empty() {
            return removed;
        }
        let s = region.begin().min(self.rope.len_chars());
        self.rope.remove(s..s + removed.chars().count());
        removed
    }

    /// Full document text.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }
}
