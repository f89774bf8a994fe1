//! Style types for text rendering
//!
//! Styles are what a highlight attribute finally resolves to. They are
//! terminal-oriented (ANSI 16-color palette) but carry no terminal code.

/// Terminal colors (ANSI 16-color palette for compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Color {
    /// Parse a color from its config name (`"bright-blue"`, `"red"`, ...)
    pub fn from_name(name: &str) -> Option<Self> {
        let color = match name.to_ascii_lowercase().replace('_', "-").as_str() {
            "default" => Color::Default,
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            "bright-black" | "gray" | "grey" => Color::BrightBlack,
            "bright-red" => Color::BrightRed,
            "bright-green" => Color::BrightGreen,
            "bright-yellow" => Color::BrightYellow,
            "bright-blue" => Color::BrightBlue,
            "bright-magenta" => Color::BrightMagenta,
            "bright-cyan" => Color::BrightCyan,
            "bright-white" => Color::BrightWhite,
            _ => return None,
        };
        Some(color)
    }
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Builder: set background color
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Builder: set underline
    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// A styled span of source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// Style to apply to this span
    pub style: Style,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, style: Style) -> Self {
        Self { start, end, style }
    }

    /// Get the length of this span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}
