//! Colours and the shade arithmetic used for bevelled borders and widgets.
//!
//! Shades are integer arithmetic per channel so that painted output is
//! stable across platforms:
//!
//! | function          | channel value        |
//! |-------------------|----------------------|
//! | [`darken`]        | `3c / 4`             |
//! | [`double_darken`] | `c / 2`              |
//! | [`lighten`]       | `(3c + 255) / 4`     |
//! | [`double_lighten`]| `(c + 255) / 2`      |
//! | [`blend`]         | `(a + b) / 2`        |

use serde::{Deserialize, Serialize};

/// A colour in RGBA format (0-255 per channel).
///
/// Alpha is only used to express transparency: a colour with `a == 0` is
/// transparent and is never plotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Build an opaque colour from a `0xRRGGBB` value.
    pub const fn from_rgb_u32(v: u32) -> Self {
        Self::rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    /// The `0xRRGGBB` value of this colour (alpha ignored).
    pub const fn to_rgb_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Returns `true` when every channel has its top bit set.
    ///
    /// Selection highlights over a light background are drawn black, over
    /// anything else white.
    pub const fn is_light(self) -> bool {
        self.to_rgb_u32() & 0x0080_8080 == 0x0080_8080
    }

    /// The colour with every RGB channel inverted.
    pub const fn inverted(self) -> Self {
        Self::rgba(!self.r, !self.g, !self.b, self.a)
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

fn map_channels(c: Color, f: impl Fn(u32) -> u32) -> Color {
    Color::rgba(
        f(u32::from(c.r)) as u8,
        f(u32::from(c.g)) as u8,
        f(u32::from(c.b)) as u8,
        c.a,
    )
}

/// Three quarters of each channel.
pub fn darken(c: Color) -> Color {
    map_channels(c, |v| (3 * v) >> 2)
}

/// Half of each channel.
pub fn double_darken(c: Color) -> Color {
    map_channels(c, |v| v >> 1)
}

/// Move each channel a quarter of the way to white.
pub fn lighten(c: Color) -> Color {
    map_channels(c, |v| (3 * v + 255) >> 2)
}

/// Move each channel half way to white.
pub fn double_lighten(c: Color) -> Color {
    map_channels(c, |v| (v + 255) >> 1)
}

/// Per-channel average of two colours. Used to anti-alias decoration lines
/// against the background they are drawn over.
pub fn blend(a: Color, b: Color) -> Color {
    Color::rgba(
        ((u32::from(a.r) + u32::from(b.r)) >> 1) as u8,
        ((u32::from(a.g) + u32::from(b.g)) >> 1) as u8,
        ((u32::from(a.b) + u32::from(b.b)) >> 1) as u8,
        a.a.max(b.a),
    )
}

/// Parse `#rgb`, `#rrggbb` or `transparent`.
pub fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("transparent") {
        return Some(Color::TRANSPARENT);
    }
    let hex = s.strip_prefix('#')?;
    match hex.len() {
        6 => u32::from_str_radix(hex, 16).ok().map(Color::from_rgb_u32),
        3 => {
            let v = u32::from_str_radix(hex, 16).ok()?;
            let expand = |n: u32| ((n & 0xf) * 0x11) as u8;
            Some(Color::rgb(expand(v >> 8), expand(v >> 4), expand(v)))
        },
        _ => None,
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        parse_hex_color(&s).ok_or_else(|| format!("invalid colour {s:?}"))
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        if c.is_transparent() {
            "transparent".to_string()
        } else {
            format!("#{:06x}", c.to_rgb_u32())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn darken_is_three_quarters() {
        let c = Color::rgb(200, 100, 4);
        assert_eq!(darken(c), Color::rgb(150, 75, 3));
    }

    #[test]
    fn double_darken_halves() {
        let c = Color::rgb(200, 101, 0);
        assert_eq!(double_darken(c), Color::rgb(100, 50, 0));
    }

    #[test]
    fn lighten_moves_toward_white() {
        assert_eq!(lighten(Color::BLACK), Color::rgb(63, 63, 63));
        assert_eq!(lighten(Color::WHITE), Color::WHITE);
    }

    #[test]
    fn double_lighten_half_way() {
        assert_eq!(double_lighten(Color::BLACK), Color::rgb(127, 127, 127));
    }

    #[test]
    fn blend_averages() {
        let b = blend(Color::rgb(0, 100, 255), Color::rgb(255, 200, 255));
        assert_eq!(b, Color::rgb(127, 150, 255));
    }

    #[test]
    fn light_test_uses_top_bits() {
        assert!(Color::WHITE.is_light());
        assert!(Color::rgb(0x80, 0x80, 0x80).is_light());
        assert!(!Color::rgb(0x7f, 0xff, 0xff).is_light());
        assert!(!Color::BLACK.is_light());
    }

    #[test]
    fn inverted_flips_rgb() {
        assert_eq!(Color::BLACK.inverted(), Color::WHITE);
        assert_eq!(Color::rgb(0x12, 0x34, 0x56).inverted(), Color::rgb(0xed, 0xcb, 0xa9));
    }

    #[test]
    fn parse_forms() {
        assert_eq!(parse_hex_color("#d9d9d9"), Some(Color::rgb(0xd9, 0xd9, 0xd9)));
        assert_eq!(parse_hex_color("#f00"), Some(Color::RED));
        assert_eq!(parse_hex_color("transparent"), Some(Color::TRANSPARENT));
        assert_eq!(parse_hex_color("d9d9d9"), None);
        assert_eq!(parse_hex_color("#12345"), None);
    }

    #[test]
    fn string_round_trip_through_serde_forms() {
        let s: String = Color::rgb(1, 2, 3).into();
        assert_eq!(s, "#010203");
        assert_eq!(Color::try_from(s), Ok(Color::rgb(1, 2, 3)));
    }
}
