//! Scanner for Drools rule files
//!
//! The scanner is a lazy iterator of [`Token`]s. It is total: every input
//! produces a token sequence whose spans tile the scanned text, with
//! unrecognized characters reported as [`TokenKind::Unknown`] and unclosed
//! strings or block comments running to the end of input.
//!
//! No state is carried from one token to the next, so scanning can be
//! restarted at any token boundary and reproduces the same tail. The
//! incremental document highlighter relies on this.

use std::sync::LazyLock;

use regex::Regex;
use unscanny::Scanner as Cursor;

use super::keywords::{self, is_ident_continue, is_ident_start};
use super::source::floor_char_boundary;
use super::tokens::{Token, TokenKind};

/// Numeric literal body; any identifier characters after it are taken as a suffix
static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:0[xX][0-9a-fA-F]+|[0-9]+(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?)")
        .expect("number pattern is valid")
});

/// Lazy token iterator over a source string
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    s: Cursor<'a>,
}

impl<'a> Scanner<'a> {
    /// Scan `text` from the beginning
    pub fn new(text: &'a str) -> Self {
        Self::at(text, 0)
    }

    /// Scan `text` from a byte offset
    ///
    /// An offset past the end yields nothing; an offset inside a multi-byte
    /// character is moved back to that character's start.
    pub fn at(text: &'a str, offset: usize) -> Self {
        let mut s = Cursor::new(text);
        s.jump(floor_char_boundary(text, offset));
        Self { text, s }
    }

    /// Byte offset of the next token
    pub fn offset(&self) -> usize {
        self.s.cursor()
    }

    fn identify_token(&mut self, start: usize) -> TokenKind {
        let c = match self.s.eat() {
            Some(c) => c,
            None => return TokenKind::Unknown,
        };
        match c {
            c if c.is_whitespace() => self.whitespace(),
            c if c.is_ascii_digit() => self.number(start),
            c if is_ident_start(c) => self.ident(start),
            '"' | '\'' => self.string_literal(c),
            '/' if self.s.eat_if('/') => self.line_comment(),
            '/' if self.s.eat_if('*') => self.block_comment(),
            '#' => self.line_comment(),
            '$' => self.prefixed_name(TokenKind::Variable),
            '@' => self.prefixed_name(TokenKind::Annotation),
            '{' | '}' | '(' | ')' | '[' | ']' => TokenKind::Delimiter,
            ',' | ';' => TokenKind::Punctuation,
            '=' | '!' | '<' | '>' | '+' | '-' | '*' | '/' | '%' | '&' | '|' | '^' | '~'
            | '?' | ':' | '.' => self.operator(c),
            _ => TokenKind::Unknown,
        }
    }

    fn whitespace(&mut self) -> TokenKind {
        self.s.eat_while(char::is_whitespace);
        TokenKind::Whitespace
    }

    fn line_comment(&mut self) -> TokenKind {
        self.s.eat_until(|c| c == '\n' || c == '\r');
        TokenKind::Comment
    }

    fn block_comment(&mut self) -> TokenKind {
        self.s.eat_until("*/");
        if self.s.eat_if("*/") {
            TokenKind::Comment
        } else {
            TokenKind::UnterminatedComment
        }
    }

    fn string_literal(&mut self, quote: char) -> TokenKind {
        loop {
            match self.s.eat() {
                Some(c) if c == quote => return TokenKind::String,
                Some('\\') => {
                    self.s.eat();
                }
                Some(_) => {}
                None => return TokenKind::UnterminatedString,
            }
        }
    }

    fn ident(&mut self, start: usize) -> TokenKind {
        let rest = &self.text[start..];
        if let Some(len) = keywords::hyphenated_keyword_len(rest) {
            self.s.jump(start + len);
            return TokenKind::Keyword;
        }
        self.s.eat_while(is_ident_continue);
        if keywords::is_keyword(self.s.from(start)) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        }
    }

    fn prefixed_name(&mut self, kind: TokenKind) -> TokenKind {
        if self.s.eat_while(is_ident_continue).is_empty() {
            TokenKind::Unknown
        } else {
            kind
        }
    }

    fn number(&mut self, start: usize) -> TokenKind {
        if let Some(m) = NUMBER.find(&self.text[start..]) {
            self.s.jump(start + m.end());
        }
        // type suffix (10L, 2.5d, 7B) and malformed tails such as 12abc
        self.s.eat_while(is_ident_continue);
        TokenKind::Number
    }

    fn operator(&mut self, first: char) -> TokenKind {
        let second = match self.s.peek() {
            Some(c) => c,
            None => return TokenKind::Operator,
        };
        let pair = matches!(
            (first, second),
            ('=', '=')
                | ('!', '=')
                | ('!', '.')
                | ('<', '=')
                | ('>', '=')
                | ('&', '&')
                | ('|', '|')
                | ('-', '>')
                | (':', ':')
                | (':', '=')
                | ('+', '=')
                | ('-', '=')
                | ('*', '=')
                | ('/', '=')
                | ('+', '+')
                | ('-', '-')
        );
        if pair {
            self.s.eat();
        }
        TokenKind::Operator
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.s.done() {
            return None;
        }
        let start = self.s.cursor();
        let kind = self.identify_token(start);
        let end = self.s.cursor();
        Some(Token {
            kind,
            text: self.s.from(start),
            start,
            end,
        })
    }
}

impl std::iter::FusedIterator for Scanner<'_> {}

/// Scan a whole string into a token list
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    Scanner::new(text).collect()
}
