//! Lexing and highlighting for Drools rule files
//!
//! This module provides:
//! - the token scanner and its keyword tables
//! - the mapping from token kinds to highlight attributes and styles
//! - incremental re-highlighting of an edited document

mod document;
mod highlight;
mod keywords;
mod scanner;
mod source;
mod style;
mod tokens;

pub use document::{Document, TextEdit, TokenSpan};
pub use highlight::{highlight, AttributeKey, Theme};
pub use keywords::MAX_LOOKAHEAD;
pub use scanner::{tokenize, Scanner};
pub use source::{floor_char_boundary, LineIndex, SourceBuffer};
pub use style::{Color, Span, Style};
pub use tokens::{Token, TokenKind};
