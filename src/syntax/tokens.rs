//! Token definitions
//!
//! This module defines the lexical categories recognized in Drools
//! rule files and the token value the scanner produces.

use std::fmt;
use std::ops::Range;

/// Lexical category of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Language keywords and rule attributes (rule, when, no-loop, etc.)
    Keyword,
    /// Plain identifiers (type names, fields, functions)
    Identifier,
    /// Bound variables ($p, $order)
    Variable,
    /// Annotations (@role, @watch)
    Annotation,
    /// String literals ("..." or '...')
    String,
    /// String literal with no closing quote before end of input
    UnterminatedString,
    /// Numeric literals (integers, decimals, hex)
    Number,
    /// Operators (==, &&, ->, :, ., etc.)
    Operator,
    /// Separators (, and ;)
    Punctuation,
    /// Block delimiters ({ } ( ) [ ])
    Delimiter,
    /// Line (// or #) and block (/* */) comments
    Comment,
    /// Block comment with no closing */ before end of input
    UnterminatedComment,
    /// Runs of whitespace, newlines included
    Whitespace,
    /// A single character that starts no other token
    Unknown,
}

impl TokenKind {
    /// All token kinds, in declaration order
    pub const ALL: [TokenKind; 14] = [
        TokenKind::Keyword,
        TokenKind::Identifier,
        TokenKind::Variable,
        TokenKind::Annotation,
        TokenKind::String,
        TokenKind::UnterminatedString,
        TokenKind::Number,
        TokenKind::Operator,
        TokenKind::Punctuation,
        TokenKind::Delimiter,
        TokenKind::Comment,
        TokenKind::UnterminatedComment,
        TokenKind::Whitespace,
        TokenKind::Unknown,
    ];

    /// Get a human-readable name for this token kind
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Identifier => "identifier",
            TokenKind::Variable => "variable",
            TokenKind::Annotation => "annotation",
            TokenKind::String => "string",
            TokenKind::UnterminatedString => "unterminated_string",
            TokenKind::Number => "number",
            TokenKind::Operator => "operator",
            TokenKind::Punctuation => "punctuation",
            TokenKind::Delimiter => "delimiter",
            TokenKind::Comment => "comment",
            TokenKind::UnterminatedComment => "unterminated_comment",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Unknown => "unknown",
        }
    }

    /// Parse a token kind from its name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// True for the kinds that run to end of input because they were never closed
    pub fn is_unterminated(&self) -> bool {
        matches!(self, TokenKind::UnterminatedString | TokenKind::UnterminatedComment)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified slice of source text
///
/// `text` borrows from the scanned source; `start..end` is its byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

impl<'a> Token<'a> {
    /// Byte range of this token in the source
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Always false for scanner output
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
