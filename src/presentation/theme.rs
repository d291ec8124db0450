//! Colour themes
//!
//! A theme is a plain value handed to whatever renders the timers; nothing
//! here is global.

use std::fmt;

use clap::ValueEnum;
use crossterm::style::Color;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl From<Rgb> for Color {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        Color::Rgb { r, g, b }
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub bg: Rgb,
    pub text: Rgb,
    pub canvas_bg: Rgb,
    pub canvas_fill: Rgb,
    pub arc_fill: Rgb,
    pub button_bg: Rgb,
    pub button_fg: Rgb,
    pub button_active_bg: Rgb,
    /// Completion flash colour
    pub accent: Rgb,
}

const ACCENT: Rgb = Rgb(0x10, 0xa3, 0x7f);

pub static LIGHT: Palette = Palette {
    bg: Rgb(0xff, 0xff, 0xff),
    text: Rgb(0x00, 0x00, 0x00),
    canvas_bg: Rgb(0xff, 0xff, 0xff),
    canvas_fill: Rgb(0x22, 0x22, 0x22),
    arc_fill: Rgb(0xff, 0xff, 0xff),
    button_bg: Rgb(0xf0, 0xf0, 0xf0),
    button_fg: Rgb(0x00, 0x00, 0x00),
    button_active_bg: Rgb(0xdd, 0xdd, 0xdd),
    accent: ACCENT,
};

pub static DARK: Palette = Palette {
    bg: Rgb(0x0a, 0x0a, 0x0a),
    text: Rgb(0xd3, 0xd3, 0xd3),
    canvas_bg: Rgb(0x0a, 0x0a, 0x0a),
    canvas_fill: Rgb(0x26, 0x26, 0x26),
    arc_fill: ACCENT,
    button_bg: Rgb(0x26, 0x26, 0x26),
    button_fg: Rgb(0xd3, 0xd3, 0xd3),
    button_active_bg: Rgb(0x3a, 0x3a, 0x3a),
    accent: ACCENT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn palette(&self) -> &'static Palette {
        match self {
            Theme::Light => &LIGHT,
            Theme::Dark => &DARK,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_and_serialization() {
        assert_eq!(ACCENT.hex(), "#10a37f");
        let json = serde_json::to_value(DARK).unwrap();
        assert_eq!(json["arc_fill"], "#10a37f");
        assert_eq!(json["canvas_fill"], "#262626");
    }

    #[test]
    fn test_terminal_colour() {
        assert_eq!(
            Color::from(ACCENT),
            Color::Rgb {
                r: 0x10,
                g: 0xa3,
                b: 0x7f
            }
        );
    }

    #[test]
    fn test_toggle() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().palette(), &LIGHT);
    }
}
