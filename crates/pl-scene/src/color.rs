//! RGBA colors.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        match digits.len() {
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?).with_alpha(byte(6)?)),
            _ => None,
        }
    }

    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    // Vectors
    pub const RED: Color = Color::rgb(0xef, 0x44, 0x44);
    pub const BLUE: Color = Color::rgb(0x3b, 0x82, 0xf6);
    pub const GREEN: Color = Color::rgb(0x10, 0xb9, 0x81);
    pub const AMBER: Color = Color::rgb(0xf5, 0x9e, 0x0b);
    pub const PURPLE: Color = Color::rgb(0x8b, 0x5c, 0xf6);
    pub const CYAN: Color = Color::rgb(0x06, 0xb6, 0xd4);
    pub const ORANGE: Color = Color::rgb(0xf9, 0x73, 0x16);

    // Scenery
    pub const INK: Color = Color::rgb(0x33, 0x41, 0x55);
    pub const INK_DARK: Color = Color::rgb(0x0f, 0x17, 0x2a);
    pub const WHEEL: Color = Color::rgb(0x1e, 0x29, 0x3b);
    pub const TRACK: Color = Color::rgb(0xcb, 0xd5, 0xe1);
    pub const GROUND: Color = Color::rgb(0x94, 0xa3, 0xb8);
    pub const GRID: Color = Color::rgb(0xe2, 0xe8, 0xf0);
    pub const GRID_DARK: Color = Color::rgb(0x33, 0x41, 0x55);
    pub const TEXT_LIGHT: Color = Color::rgb(0xe2, 0xe8, 0xf0);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).ok_or_else(|| format!("invalid color: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        assert_eq!(Color::from_hex("#ef4444"), Some(Color::RED));
        assert_eq!(Color::RED.to_string(), "#ef4444");
        let translucent = Color::BLUE.with_alpha(0x80);
        assert_eq!(translucent.to_string().parse::<Color>(), Ok(translucent));
    }

    #[test]
    fn bad_hex() {
        assert_eq!(Color::from_hex("ef4444"), None);
        assert_eq!(Color::from_hex("#ef44"), None);
        assert_eq!(Color::from_hex("#zz4444"), None);
    }
}
