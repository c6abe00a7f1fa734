use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::components::SpriteId;

// Display settings for the terminal front end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub show_grid: bool,
    pub frame_interval_ms: u64,
    // One colour per block sprite, indexed by sprite id
    pub palette: Vec<PaletteColor>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_grid: false,
            frame_interval_ms: 33,
            palette: vec![
                PaletteColor::Red,
                PaletteColor::Yellow,
                PaletteColor::Green,
                PaletteColor::Cyan,
                PaletteColor::Blue,
                PaletteColor::Magenta,
                PaletteColor::LightRed,
            ],
        }
    }
}

impl DisplayConfig {
    /// Colour for a block; ids past the end of the palette wrap around.
    #[must_use]
    pub fn sprite_color(&self, sprite: SpriteId) -> Color {
        if self.palette.is_empty() {
            return Color::White;
        }
        self.palette[usize::from(sprite.id()) % self.palette.len()].to_color()
    }
}

// Supported colors for serialization/deserialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaletteColor {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
    LightRed,
    LightGreen,
    LightYellow,
    LightBlue,
    LightMagenta,
    LightCyan,
    Custom(u8, u8, u8),
}

impl PaletteColor {
    #[must_use]
    pub fn to_color(self) -> Color {
        match self {
            PaletteColor::Red => Color::Red,
            PaletteColor::Green => Color::Green,
            PaletteColor::Yellow => Color::Yellow,
            PaletteColor::Blue => Color::Blue,
            PaletteColor::Magenta => Color::Magenta,
            PaletteColor::Cyan => Color::Cyan,
            PaletteColor::White => Color::White,
            PaletteColor::Gray => Color::Gray,
            PaletteColor::LightRed => Color::LightRed,
            PaletteColor::LightGreen => Color::LightGreen,
            PaletteColor::LightYellow => Color::LightYellow,
            PaletteColor::LightBlue => Color::LightBlue,
            PaletteColor::LightMagenta => Color::LightMagenta,
            PaletteColor::LightCyan => Color::LightCyan,
            PaletteColor::Custom(r, g, b) => Color::Rgb(r, g, b),
        }
    }
}
