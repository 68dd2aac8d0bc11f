//! Resolved style values the redraw pass reads.
//!
//! These are the already-cascaded, already-computed values for one box.
//! Lengths are in CSS pixels.

use serde::{Deserialize, Serialize};

use lumen_types::color::Color;
use lumen_types::plotter::FontStyle;

/// Border line style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BorderStyle {
    #[default]
    None,
    Hidden,
    Dotted,
    Dashed,
    Solid,
    Double,
    Groove,
    Ridge,
    Inset,
    Outset,
}

/// Colour and style of one border edge. The width lives on the box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderSide {
    pub color: Color,
    pub style: BorderStyle,
}

impl BorderSide {
    pub const fn new(color: Color, style: BorderStyle) -> Self {
        Self { color, style }
    }

    pub const fn solid(color: Color) -> Self {
        Self::new(color, BorderStyle::Solid)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundRepeat {
    #[default]
    Repeat,
    RepeatX,
    RepeatY,
    NoRepeat,
}

impl BackgroundRepeat {
    /// `(repeat_x, repeat_y)`.
    pub const fn axes(self) -> (bool, bool) {
        match self {
            Self::Repeat => (true, true),
            Self::RepeatX => (true, false),
            Self::RepeatY => (false, true),
            Self::NoRepeat => (false, false),
        }
    }
}

/// One axis of `background-position`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PositionValue {
    /// Percentage of the free space (area size minus image size).
    Percent(f32),
    /// Absolute offset in CSS pixels.
    Length(f32),
}

impl Default for PositionValue {
    fn default() -> Self {
        Self::Percent(0.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundPosition {
    pub horz: PositionValue,
    pub vert: PositionValue,
}

/// `text-decoration` lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextDecoration {
    pub underline: bool,
    pub overline: bool,
    pub line_through: bool,
}

impl TextDecoration {
    pub const NONE: Self = Self {
        underline: false,
        overline: false,
        line_through: false,
    };

    pub const fn is_none(&self) -> bool {
        !(self.underline || self.overline || self.line_through)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Scroll,
    Auto,
}

impl Overflow {
    /// Content is clipped to the padding box.
    pub const fn clips(self) -> bool {
        !matches!(self, Self::Visible)
    }

    /// The box gets scrollbar chrome.
    pub const fn scrolls(self) -> bool {
        matches!(self, Self::Scroll | Self::Auto)
    }
}

/// `border-spacing` of a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderSpacing {
    pub horz: i32,
    pub vert: i32,
}

/// Computed style of one box, reduced to what painting needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxStyle {
    pub background_color: Color,
    pub background_repeat: BackgroundRepeat,
    pub background_position: BackgroundPosition,
    /// Indexed top, right, bottom, left.
    pub border: [BorderSide; 4],
    pub border_spacing: BorderSpacing,
    pub text_decoration: TextDecoration,
    pub visibility: Visibility,
    pub overflow: Overflow,
    pub color: Color,
    pub font: FontStyle,
}

impl BoxStyle {
    /// Initial values: transparent background, no borders, black text.
    pub const fn initial() -> Self {
        Self {
            background_color: Color::TRANSPARENT,
            background_repeat: BackgroundRepeat::Repeat,
            background_position: BackgroundPosition {
                horz: PositionValue::Percent(0.0),
                vert: PositionValue::Percent(0.0),
            },
            border: [BorderSide::new(Color::TRANSPARENT, BorderStyle::None); 4],
            border_spacing: BorderSpacing { horz: 0, vert: 0 },
            text_decoration: TextDecoration::NONE,
            visibility: Visibility::Visible,
            overflow: Overflow::Visible,
            color: Color::BLACK,
            font: FontStyle {
                size_px: 16,
                weight: 400,
                italic: false,
            },
        }
    }

    /// Same border on all four edges.
    pub fn with_border(mut self, side: BorderSide) -> Self {
        self.border = [side; 4];
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self::initial()
    }
}

/// Style used for boxes that carry no computed style of their own.
pub static INITIAL_STYLE: BoxStyle = BoxStyle::initial();
