//! Terminal output of highlighted text
//!
//! Writes to any `io::Write`, so the same code serves stdout and tests.

use std::io::Write;

use crossterm::queue;
use crossterm::style::{
    Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use unicode_width::UnicodeWidthChar;

use crate::error::Result;
use crate::syntax::{Color, LineIndex, SourceBuffer, Style, Theme};

/// Convert a palette color to a crossterm color
fn term_color(color: Color) -> TermColor {
    match color {
        Color::Default => TermColor::Reset,
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::White => TermColor::Grey,
        Color::BrightBlack => TermColor::DarkGrey,
        Color::BrightRed => TermColor::Red,
        Color::BrightGreen => TermColor::Green,
        Color::BrightYellow => TermColor::Yellow,
        Color::BrightBlue => TermColor::Blue,
        Color::BrightMagenta => TermColor::Magenta,
        Color::BrightCyan => TermColor::Cyan,
        Color::BrightWhite => TermColor::White,
    }
}

/// Write `text` with one styled run per token
pub fn write_highlighted<W: Write>(out: &mut W, text: &str, theme: &Theme) -> Result<()> {
    for token in SourceBuffer::new(text).scan() {
        let style = theme.style_for(token.kind);
        if style.is_default() {
            queue!(out, Print(token.text))?;
            continue;
        }
        set_style(out, style)?;
        queue!(out, Print(token.text), SetAttribute(Attribute::Reset), ResetColor)?;
    }
    out.flush()?;
    Ok(())
}

fn set_style<W: Write>(out: &mut W, style: Style) -> Result<()> {
    if style.fg != Color::Default {
        queue!(out, SetForegroundColor(term_color(style.fg)))?;
    }
    if style.bg != Color::Default {
        queue!(out, SetBackgroundColor(term_color(style.bg)))?;
    }
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.italic {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    if style.underline {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    Ok(())
}

/// Write one line per token: `line:col kind text`
///
/// Lines and columns are 1-based; columns count display cells, with tabs
/// advancing to the next multiple of `tab_width`.
pub fn write_token_dump<W: Write>(out: &mut W, text: &str, tab_width: usize) -> Result<()> {
    let index = LineIndex::new(text);
    for token in SourceBuffer::new(text).scan() {
        let (line, line_start) = index.line_of(token.start);
        let col = display_column(&text[line_start..token.start], tab_width);
        writeln!(out, "{}:{} {} {:?}", line + 1, col + 1, token.kind, token.text)?;
    }
    out.flush()?;
    Ok(())
}

/// Display width of a line prefix; a zero tab width counts as one
fn display_column(prefix: &str, tab_width: usize) -> usize {
    let tab_width = tab_width.max(1);
    prefix.chars().fold(0, |col, ch| {
        if ch == '\t' {
            (col / tab_width + 1) * tab_width
        } else {
            col + ch.width().unwrap_or(0)
        }
    })
}
