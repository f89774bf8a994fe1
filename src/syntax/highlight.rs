//! Highlight mapping
//!
//! Token kinds map to display attribute keys through a fixed table. A
//! [`Theme`] then resolves attribute keys to concrete [`Style`]s, starting
//! from built-in defaults that the user config may override.

use std::collections::HashMap;

use super::source::SourceBuffer;
use super::style::{Color, Span, Style};
use super::tokens::TokenKind;

/// Display attribute assigned to a token kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKey {
    Keyword,
    Identifier,
    Variable,
    Annotation,
    String,
    BadString,
    Number,
    Operator,
    Punctuation,
    Braces,
    Comment,
    BadComment,
    /// Plain text, the fallback for anything without its own attribute
    Text,
}

impl AttributeKey {
    /// All attribute keys, in declaration order
    pub const ALL: [AttributeKey; 13] = [
        AttributeKey::Keyword,
        AttributeKey::Identifier,
        AttributeKey::Variable,
        AttributeKey::Annotation,
        AttributeKey::String,
        AttributeKey::BadString,
        AttributeKey::Number,
        AttributeKey::Operator,
        AttributeKey::Punctuation,
        AttributeKey::Braces,
        AttributeKey::Comment,
        AttributeKey::BadComment,
        AttributeKey::Text,
    ];

    /// Attribute for a token kind
    pub fn for_kind(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Keyword => AttributeKey::Keyword,
            TokenKind::Identifier => AttributeKey::Identifier,
            TokenKind::Variable => AttributeKey::Variable,
            TokenKind::Annotation => AttributeKey::Annotation,
            TokenKind::String => AttributeKey::String,
            TokenKind::UnterminatedString => AttributeKey::BadString,
            TokenKind::Number => AttributeKey::Number,
            TokenKind::Operator => AttributeKey::Operator,
            TokenKind::Punctuation => AttributeKey::Punctuation,
            TokenKind::Delimiter => AttributeKey::Braces,
            TokenKind::Comment => AttributeKey::Comment,
            TokenKind::UnterminatedComment => AttributeKey::BadComment,
            TokenKind::Whitespace | TokenKind::Unknown => AttributeKey::Text,
        }
    }

    /// Stable external name, used as the key in the config `[styles]` table
    pub fn name(&self) -> &'static str {
        match self {
            AttributeKey::Keyword => "DRL_KEYWORD",
            AttributeKey::Identifier => "DRL_IDENTIFIER",
            AttributeKey::Variable => "DRL_VARIABLE",
            AttributeKey::Annotation => "DRL_ANNOTATION",
            AttributeKey::String => "DRL_STRING",
            AttributeKey::BadString => "DRL_BAD_STRING",
            AttributeKey::Number => "DRL_NUMBER",
            AttributeKey::Operator => "DRL_OPERATOR",
            AttributeKey::Punctuation => "DRL_PUNCTUATION",
            AttributeKey::Braces => "DRL_BRACES",
            AttributeKey::Comment => "DRL_COMMENT",
            AttributeKey::BadComment => "DRL_BAD_COMMENT",
            AttributeKey::Text => "TEXT",
        }
    }

    /// Parse an attribute key from its external name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }

    /// Built-in style for this attribute
    pub fn default_style(&self) -> Style {
        match self {
            AttributeKey::Keyword => Style::fg(Color::Magenta).with_bold(),
            AttributeKey::Identifier => Style::default(),
            AttributeKey::Variable => Style::fg(Color::BrightCyan),
            AttributeKey::Annotation => Style::fg(Color::BrightBlue),
            AttributeKey::String => Style::fg(Color::Green),
            AttributeKey::BadString => Style::fg(Color::Green).with_underline(),
            AttributeKey::Number => Style::fg(Color::Cyan),
            AttributeKey::Operator => Style::fg(Color::BrightWhite),
            AttributeKey::Punctuation => Style::default(),
            AttributeKey::Braces => Style::fg(Color::Yellow),
            AttributeKey::Comment => Style::fg(Color::BrightBlack).with_italic(),
            AttributeKey::BadComment => Style::fg(Color::BrightBlack).with_italic().with_underline(),
            AttributeKey::Text => Style::default(),
        }
    }
}

/// Resolves attribute keys to styles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Theme {
    overrides: HashMap<AttributeKey, Style>,
}

impl Theme {
    /// Theme with only the built-in styles
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the style of one attribute
    pub fn set(&mut self, key: AttributeKey, style: Style) {
        self.overrides.insert(key, style);
    }

    /// Style for an attribute, falling back to its built-in style
    pub fn style(&self, key: AttributeKey) -> Style {
        self.overrides
            .get(&key)
            .copied()
            .unwrap_or_else(|| key.default_style())
    }

    /// Style for a token kind
    pub fn style_for(&self, kind: TokenKind) -> Style {
        self.style(AttributeKey::for_kind(kind))
    }
}

/// Highlight a whole buffer, returning a span for every token with a
/// non-default style
pub fn highlight<'a>(source: impl Into<SourceBuffer<'a>>, theme: &Theme) -> Vec<Span> {
    source
        .into()
        .scan()
        .filter_map(|token| {
            let style = theme.style_for(token.kind);
            (!style.is_default()).then(|| Span::new(token.start, token.end, style))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapper_is_total() {
        for kind in TokenKind::ALL {
            // every kind resolves to some declared key
            assert!(AttributeKey::ALL.contains(&AttributeKey::for_kind(kind)));
        }
    }

    #[test]
    fn test_plain_text_fallback() {
        assert_eq!(AttributeKey::for_kind(TokenKind::Whitespace), AttributeKey::Text);
        assert_eq!(AttributeKey::for_kind(TokenKind::Unknown), AttributeKey::Text);
        assert!(AttributeKey::Text.default_style().is_default());
    }

    #[test]
    fn test_unterminated_kinds_have_own_attributes() {
        assert_eq!(AttributeKey::for_kind(TokenKind::UnterminatedString), AttributeKey::BadString);
        assert_eq!(AttributeKey::for_kind(TokenKind::UnterminatedComment), AttributeKey::BadComment);
    }

    #[test]
    fn test_name_roundtrip() {
        for key in AttributeKey::ALL {
            assert_eq!(AttributeKey::from_name(key.name()), Some(key));
        }
        assert_eq!(AttributeKey::from_name("DRL_WHATEVER"), None);
    }

    #[test]
    fn test_theme_override() {
        let mut theme = Theme::new();
        assert_eq!(theme.style(AttributeKey::Keyword), AttributeKey::Keyword.default_style());

        let custom = Style::fg(Color::Blue);
        theme.set(AttributeKey::Keyword, custom);
        assert_eq!(theme.style_for(TokenKind::Keyword), custom);
        assert_eq!(theme.style(AttributeKey::Number), AttributeKey::Number.default_style());
    }

    #[test]
    fn test_highlight_spans() {
        let spans = highlight("rule x 1", &Theme::new());
        // identifier and whitespace are plain, so only keyword and number remain
        assert_eq!(spans.len(), 2);
        assert_eq!((spans[0].start, spans[0].end), (0, 4));
        assert_eq!(spans[0].style, AttributeKey::Keyword.default_style());
        assert_eq!((spans[1].start, spans[1].end), (7, 8));
    }

    #[test]
    fn test_highlight_empty() {
        assert!(highlight("", &Theme::new()).is_empty());
    }

    #[test]
    fn test_highlight_buffer() {
        let text = "when $p then";
        let spans = highlight(SourceBuffer::new(text), &Theme::new());
        assert_eq!(spans, highlight(text, &Theme::new()));
        assert_eq!(spans[1], Span::new(5, 7, AttributeKey::Variable.default_style()));
    }
}
