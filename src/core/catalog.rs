//! Tile style catalog
//!
//! Maps a tile value to its display descriptor. The engine only reads the
//! value; colors ride along untouched for the presentation layer. A value
//! with no configured style is a fatal configuration error, never a
//! silent default.

use thiserror::Error;

/// Raised when a spawned or merged value has no configured style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no tile style configured for value {0}")]
pub struct MissingStyle(pub u32);

/// Static descriptor for one tile value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileStyle {
    pub value: u32,
    /// Text color, RGB
    pub fg: [u8; 3],
    /// Tile background color, RGB
    pub bg: [u8; 3],
}

/// Read-only value -> style lookup table
#[derive(Debug, Clone)]
pub struct Catalog {
    styles: Vec<TileStyle>,
}

impl Catalog {
    pub fn new(styles: Vec<TileStyle>) -> Self {
        Self { styles }
    }

    /// The classic palette, covering values 2 through 8192
    pub fn standard() -> Self {
        const DARK: [u8; 3] = [119, 110, 101];
        const LIGHT: [u8; 3] = [249, 246, 242];
        Self::new(vec![
            TileStyle { value: 2, fg: DARK, bg: [238, 228, 218] },
            TileStyle { value: 4, fg: DARK, bg: [237, 224, 200] },
            TileStyle { value: 8, fg: LIGHT, bg: [242, 177, 121] },
            TileStyle { value: 16, fg: LIGHT, bg: [245, 149, 99] },
            TileStyle { value: 32, fg: LIGHT, bg: [246, 124, 95] },
            TileStyle { value: 64, fg: LIGHT, bg: [246, 94, 59] },
            TileStyle { value: 128, fg: LIGHT, bg: [237, 207, 114] },
            TileStyle { value: 256, fg: LIGHT, bg: [237, 204, 97] },
            TileStyle { value: 512, fg: LIGHT, bg: [237, 200, 80] },
            TileStyle { value: 1024, fg: LIGHT, bg: [237, 197, 63] },
            TileStyle { value: 2048, fg: LIGHT, bg: [237, 194, 46] },
            TileStyle { value: 4096, fg: LIGHT, bg: [60, 58, 50] },
            TileStyle { value: 8192, fg: LIGHT, bg: [60, 58, 50] },
        ])
    }

    /// Look up the style for `value`
    pub fn style_for(&self, value: u32) -> Result<TileStyle, MissingStyle> {
        self.styles
            .iter()
            .find(|style| style.value == value)
            .copied()
            .ok_or(MissingStyle(value))
    }
}
