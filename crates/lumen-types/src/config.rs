//! Redraw theme and options.
//!
//! Both are plain values handed to each redraw pass. Front ends that want
//! their scrollbars to match the desktop load a theme from `theme.toml`;
//! everything has a built-in default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{RedrawError, Result};

/// Colours and metrics for the chrome the redraw pass draws itself:
/// scrollbars, form widgets, the caret and debug outlines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedrawTheme {
    /// Scrollbar thumb and arrow button face.
    pub scrollbar_fg: Color,
    /// Scrollbar well.
    pub scrollbar_bg: Color,
    /// Scrollbar arrow glyphs.
    pub scrollbar_arrow: Color,
    /// Unscaled scrollbar thickness in CSS pixels.
    pub scrollbar_width: i32,

    /// Face colour of checkboxes and radio buttons.
    pub widget_base: Color,
    /// Tick / selection blob colour.
    pub widget_blob: Color,

    pub caret: Color,

    pub debug_padding: Color,
    pub debug_content: Color,
    pub debug_margin: Color,

    /// Label drawn in an empty file input.
    pub file_drop_label: String,
}

impl Default for RedrawTheme {
    fn default() -> Self {
        Self {
            scrollbar_fg: Color::rgb(0xd9, 0xd9, 0xd9),
            scrollbar_bg: Color::rgb(0x6b, 0x6b, 0x6b),
            scrollbar_arrow: Color::rgb(0x44, 0x44, 0x44),
            scrollbar_width: 16,
            widget_base: Color::rgb(0xd9, 0xd9, 0xd9),
            widget_blob: Color::BLACK,
            caret: Color::rgb(0x80, 0x80, 0x80),
            debug_padding: Color::RED,
            debug_content: Color::BLUE,
            debug_margin: Color::YELLOW,
            file_drop_label: "Drop a file here".to_string(),
        }
    }
}

impl RedrawTheme {
    /// Parse a theme from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let theme: Self = toml::from_str(s)?;
        theme.validate()?;
        Ok(theme)
    }

    /// Load a theme from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        log::debug!("loading redraw theme from {}", path.display());
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<()> {
        if self.scrollbar_width <= 0 {
            return Err(RedrawError::Config(format!(
                "scrollbar_width must be positive, got {}",
                self.scrollbar_width
            )));
        }
        Ok(())
    }
}

/// Behaviour switches for a redraw pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedrawOptions {
    /// Outline padding, content and margin boxes of every visible box.
    pub debug_outlines: bool,
    /// Skip background colours and images when printing.
    pub remove_backgrounds_when_printing: bool,
}

impl RedrawOptions {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }
}
