//! Configuration file support
//!
//! Loads settings from ~/.drlhl.toml (or %USERPROFILE%\.drlhl.toml on
//! Windows). The `DRLHL_CONFIG` environment variable points at another file.
//!
//! Example:
//! ```toml
//! # drlhl configuration
//! color = true
//! tab-width = 4
//!
//! [styles]
//! DRL_KEYWORD = { fg = "blue", bold = true }
//! DRL_COMMENT = "bright-black"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use toml::{Table, Value};
use tracing::{debug, warn};

use crate::error::{HighlightError, Result};
use crate::syntax::{AttributeKey, Color, Style, Theme};

/// Configuration settings
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether to emit ANSI colors
    pub color: bool,
    /// Tab width for display columns
    pub tab_width: usize,
    /// Styles for highlight attributes
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: true,
            tab_width: 4,
            theme: Theme::new(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os("DRLHL_CONFIG") {
            return Some(PathBuf::from(path));
        }

        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".drlhl.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".drlhl.toml"))
        }
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a file; a missing file gives the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let table: Table = contents.parse().map_err(|e: toml::de::Error| HighlightError::Config {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })?;

        let mut config = Config::default();
        config.apply(&table)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Apply settings from a parsed config table
    fn apply(&mut self, table: &Table) -> Result<()> {
        for (key, value) in table {
            match key.as_str() {
                "color" => match value.as_bool() {
                    Some(b) => self.color = b,
                    None => warn!(key = "color", %value, "ignoring non-boolean config value"),
                },
                "tab-width" => match value.as_integer() {
                    Some(n) => self.tab_width = n.clamp(1, 16) as usize, // Between 1 and 16
                    None => warn!(key = "tab-width", %value, "ignoring non-integer config value"),
                },
                "styles" => {
                    let styles = value
                        .as_table()
                        .ok_or_else(|| HighlightError::UnknownStyle("styles must be a table".into()))?;
                    for (name, value) in styles {
                        let attr = AttributeKey::from_name(name)
                            .ok_or_else(|| HighlightError::UnknownStyle(name.clone()))?;
                        self.theme.set(attr, parse_style(value)?);
                    }
                }
                other => warn!(key = other, "ignoring unknown config key"),
            }
        }
        Ok(())
    }
}

/// Parse a style from a color name or a `{ fg, bg, bold, italic, underline }` table
fn parse_style(value: &Value) -> Result<Style> {
    match value {
        Value::String(name) => Ok(Style::fg(parse_color(name)?)),
        Value::Table(table) => {
            let color = |key: &str| match table.get(key).and_then(Value::as_str) {
                Some(name) => parse_color(name),
                None => Ok(Color::Default),
            };
            let mut style = Style::fg(color("fg")?).with_bg(color("bg")?);
            let flag = |key: &str| table.get(key).and_then(Value::as_bool).unwrap_or(false);
            if flag("bold") {
                style = style.with_bold();
            }
            if flag("italic") {
                style = style.with_italic();
            }
            if flag("underline") {
                style = style.with_underline();
            }
            Ok(style)
        }
        other => Err(HighlightError::UnknownStyle(other.to_string())),
    }
}

fn parse_color(name: &str) -> Result<Color> {
    Color::from_name(name).ok_or_else(|| HighlightError::UnknownStyle(name.to_string()))
}
