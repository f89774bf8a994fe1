//! Read-only view of one file's text
//!
//! The host owns the text; a [`SourceBuffer`] only borrows it. Scanning
//! never mutates it.

use super::scanner::Scanner;

/// The full text of one open file at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceBuffer<'a> {
    text: &'a str,
}

impl<'a> SourceBuffer<'a> {
    /// Wrap borrowed text
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the buffer holds no text
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Scan the whole buffer
    pub fn scan(&self) -> Scanner<'a> {
        Scanner::new(self.text)
    }

    /// Scan from a byte offset to the end of the buffer
    pub fn scan_from(&self, offset: usize) -> Scanner<'a> {
        Scanner::at(self.text, offset)
    }
}

impl<'a> From<&'a str> for SourceBuffer<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text)
    }
}

/// Largest char boundary not greater than `offset`, clamped to the text length
pub fn floor_char_boundary(text: &str, offset: usize) -> usize {
    if offset >= text.len() {
        return text.len();
    }
    let mut pos = offset;
    while !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

/// Byte offsets of line starts, for offset to line/column conversion
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    /// Build the index for a text
    pub fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    /// Zero-based line and line start offset containing `offset`
    pub fn line_of(&self, offset: usize) -> (usize, usize) {
        let line = match self.starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        (line, self.starts[line])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_basics() {
        let buf = SourceBuffer::new("rule");
        assert_eq!(buf.len(), 4);
        assert!(!buf.is_empty());
        assert!(SourceBuffer::from("").is_empty());
    }

    #[test]
    fn test_scan_from_end_is_empty() {
        let buf = SourceBuffer::new("rule x");
        assert_eq!(buf.scan_from(6).count(), 0);
        assert_eq!(buf.scan_from(100).count(), 0);
    }

    #[test]
    fn test_floor_char_boundary() {
        let text = "aé b";
        assert_eq!(floor_char_boundary(text, 0), 0);
        assert_eq!(floor_char_boundary(text, 1), 1);
        // inside the two-byte 'é'
        assert_eq!(floor_char_boundary(text, 2), 1);
        assert_eq!(floor_char_boundary(text, 3), 3);
        assert_eq!(floor_char_boundary(text, 99), text.len());
    }

    #[test]
    fn test_line_index() {
        let index = LineIndex::new("rule\n  when\n");
        assert_eq!(index.line_of(0), (0, 0));
        assert_eq!(index.line_of(4), (0, 0));
        assert_eq!(index.line_of(5), (1, 5));
        assert_eq!(index.line_of(9), (1, 5));
        assert_eq!(index.line_of(12), (2, 12));
    }
}
