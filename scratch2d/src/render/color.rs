use std::str::FromStr;

use image::Rgba;

use crate::error::Error;

/// Opaque RGB colour used for stage backgrounds and text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Look up one of the common colour names beginners use.
    pub fn from_name(name: &str) -> Option<Self> {
        let color = match name.trim().to_ascii_lowercase().as_str() {
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::rgb(255, 0, 0),
            "green" => Self::rgb(0, 255, 0),
            "blue" => Self::rgb(0, 0, 255),
            "yellow" => Self::rgb(255, 255, 0),
            "orange" => Self::rgb(255, 165, 0),
            "purple" => Self::rgb(160, 32, 240),
            "gray" | "grey" => Self::rgb(190, 190, 190),
            "cyan" => Self::rgb(0, 255, 255),
            "magenta" => Self::rgb(255, 0, 255),
            "pink" => Self::rgb(255, 192, 203),
            "brown" => Self::rgb(165, 42, 42),
            _ => return None,
        };
        Some(color)
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::rgb(r, g, b)
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Accepts a colour name or a `#rrggbb` hex string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(hex) = s.trim().strip_prefix('#') {
            let channel = |range: std::ops::Range<usize>| {
                hex.get(range)
                    .and_then(|digits| u8::from_str_radix(digits, 16).ok())
            };
            if hex.len() == 6 {
                if let (Some(r), Some(g), Some(b)) = (channel(0..2), channel(2..4), channel(4..6))
                {
                    return Ok(Self::rgb(r, g, b));
                }
            }
            return Err(Error::InvalidColor(s.to_string()));
        }
        Self::from_name(s).ok_or_else(|| Error::InvalidColor(s.to_string()))
    }
}

impl TryFrom<&str> for Color {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_hex() {
        assert_eq!("White".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!("#ff8000".parse::<Color>().unwrap(), Color::rgb(255, 128, 0));
        assert_eq!(Color::try_from("black").unwrap(), Color::BLACK);
    }

    #[test]
    fn rejects_unknown_colours() {
        assert!(matches!("#12".parse::<Color>(), Err(Error::InvalidColor(_))));
        assert!(matches!("sparkly".parse::<Color>(), Err(Error::InvalidColor(_))));
    }
}
