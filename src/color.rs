//! Cell color attributes
//!
//! A cell's color is a small bit-set in the classic text-console layout: the
//! low nibble describes the glyph (foreground), the high nibble the cell
//! background. Each nibble has red, green and blue channel bits plus an
//! intensity bit.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorAttr(u16);

impl ColorAttr {
    pub const FG_BLUE: Self = Self(0x01);
    pub const FG_GREEN: Self = Self(0x02);
    pub const FG_RED: Self = Self(0x04);
    pub const FG_INTENSITY: Self = Self(0x08);
    pub const BG_BLUE: Self = Self(0x10);
    pub const BG_GREEN: Self = Self(0x20);
    pub const BG_RED: Self = Self(0x40);
    pub const BG_INTENSITY: Self = Self(0x80);

    /// White glyphs on a black background
    pub const FG_WHITE: Self = Self(0x07);
    /// Black glyphs on a white background
    pub const BG_WHITE: Self = Self(0x70);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits & 0xff)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn foreground(self) -> Channels {
        Channels::from_nibble(self.0 as u8 & 0x0f)
    }

    pub fn background(self) -> Channels {
        Channels::from_nibble((self.0 >> 4) as u8 & 0x0f)
    }
}

impl BitOr for ColorAttr {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ColorAttr {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for ColorAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ColorAttr({:#04x})", self.0)
    }
}

/// One half (foreground or background) of a [`ColorAttr`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channels {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
    pub intense: bool,
}

impl Channels {
    fn from_nibble(n: u8) -> Self {
        Self {
            blue: n & 0x1 != 0,
            green: n & 0x2 != 0,
            red: n & 0x4 != 0,
            intense: n & 0x8 != 0,
        }
    }
}

/// Named flag, as written in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorFlag {
    ForegroundBlue,
    ForegroundGreen,
    ForegroundRed,
    ForegroundIntensity,
    BackgroundBlue,
    BackgroundGreen,
    BackgroundRed,
    BackgroundIntensity,
}

impl From<ColorFlag> for ColorAttr {
    fn from(flag: ColorFlag) -> Self {
        match flag {
            ColorFlag::ForegroundBlue => ColorAttr::FG_BLUE,
            ColorFlag::ForegroundGreen => ColorAttr::FG_GREEN,
            ColorFlag::ForegroundRed => ColorAttr::FG_RED,
            ColorFlag::ForegroundIntensity => ColorAttr::FG_INTENSITY,
            ColorFlag::BackgroundBlue => ColorAttr::BG_BLUE,
            ColorFlag::BackgroundGreen => ColorAttr::BG_GREEN,
            ColorFlag::BackgroundRed => ColorAttr::BG_RED,
            ColorFlag::BackgroundIntensity => ColorAttr::BG_INTENSITY,
        }
    }
}

impl FromIterator<ColorFlag> for ColorAttr {
    fn from_iter<I: IntoIterator<Item = ColorFlag>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ColorAttr::empty(), |acc, flag| acc | ColorAttr::from(flag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_flags() {
        let c = ColorAttr::BG_RED | ColorAttr::BG_BLUE;
        assert!(c.contains(ColorAttr::BG_RED));
        assert!(c.contains(ColorAttr::BG_BLUE));
        assert!(!c.contains(ColorAttr::BG_GREEN));
        assert_eq!(c.bits(), 0x50);
    }

    #[test]
    fn test_white_aliases() {
        assert_eq!(
            ColorAttr::FG_WHITE,
            ColorAttr::FG_RED | ColorAttr::FG_GREEN | ColorAttr::FG_BLUE
        );
        assert_eq!(
            ColorAttr::BG_WHITE,
            ColorAttr::BG_RED | ColorAttr::BG_GREEN | ColorAttr::BG_BLUE
        );
    }

    #[test]
    fn test_split_channels() {
        let c = ColorAttr::FG_GREEN | ColorAttr::BG_RED | ColorAttr::BG_INTENSITY;
        let fg = c.foreground();
        let bg = c.background();
        assert!(fg.green && !fg.red && !fg.blue && !fg.intense);
        assert!(bg.red && bg.intense && !bg.green && !bg.blue);
    }

    #[test]
    fn test_from_flags() {
        let c: ColorAttr = [ColorFlag::BackgroundGreen, ColorFlag::ForegroundIntensity]
            .into_iter()
            .collect();
        assert_eq!(c, ColorAttr::BG_GREEN | ColorAttr::FG_INTENSITY);
        assert!(std::iter::empty::<ColorFlag>().collect::<ColorAttr>().is_empty());
    }

    #[test]
    fn test_from_bits_masks_high_byte() {
        assert_eq!(ColorAttr::from_bits(0x1f0).bits(), 0xf0);
    }
}
