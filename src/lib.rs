//! drl-highlight - lexer and syntax highlighter for Drools rule files
//!
//! The core is [`syntax::Scanner`], a total, restartable tokenizer, and
//! [`syntax::AttributeKey::for_kind`], the token-to-attribute lookup. Both are
//! pure and hold no shared state, so independent buffers can be scanned from
//! any number of threads.
//!
//! ```
//! use drl_highlight::syntax::{tokenize, TokenKind};
//!
//! let tokens = tokenize("rule \"abc");
//! assert_eq!(tokens[0].kind, TokenKind::Keyword);
//! assert_eq!(tokens[2].kind, TokenKind::UnterminatedString);
//! ```

pub mod config;
pub mod error;
pub mod file_type;
pub mod render;
pub mod syntax;

pub use error::{HighlightError, Result};
