//! GameView: maps a board snapshot into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{BoardSnapshot, Catalog, RoundState, TileStyle};
use crate::term::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// Terminal viewport dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Board renderer with configurable cell footprint
pub struct GameView {
    /// Board cell width in terminal columns
    cell_w: u16,
    /// Board cell height in terminal rows
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 7x3 leaves room for five-digit values with a little breathing
        // space and roughly squares the cell on common terminal fonts.
        Self {
            cell_w: 7,
            cell_h: 3,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render the snapshot into a framebuffer sized to the viewport
    pub fn render(&self, snapshot: &BoardSnapshot, catalog: &Catalog, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let board_px_w = snapshot.width as u16 * self.cell_w;
        let board_px_h = snapshot.height as u16 * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let border = CellStyle {
            fg: Rgb::new(187, 173, 160),
            bg: Rgb::new(0, 0, 0),
            bold: false,
        };
        let empty = CellStyle {
            fg: Rgb::new(110, 100, 92),
            bg: Rgb::new(45, 42, 38),
            bold: false,
        };

        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);

        for y in 0..snapshot.height as i8 {
            for x in 0..snapshot.width as i8 {
                let value = snapshot
                    .value_at(crate::core::Pos::new(x, y))
                    .unwrap_or(0);
                let cx = start_x + 1 + x as u16 * self.cell_w;
                let cy = start_y + 1 + y as u16 * self.cell_h;
                if value == 0 {
                    fb.fill_rect(cx, cy, self.cell_w, self.cell_h, ' ', empty);
                    fb.set(
                        cx + self.cell_w / 2,
                        cy + self.cell_h / 2,
                        Cell { ch: '·', style: empty },
                    );
                } else {
                    let style = tile_cell_style(catalog, value);
                    fb.fill_rect(cx, cy, self.cell_w, self.cell_h, ' ', style);
                    let text = value.to_string();
                    let tx = cx + (self.cell_w.saturating_sub(text.len() as u16)) / 2;
                    fb.put_str(tx, cy + self.cell_h / 2, &text, style);
                }
            }
        }

        // Header and footer lines.
        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
        };
        let header = format!("2048  ·  round {}", snapshot.round);
        fb.put_str(start_x, start_y.saturating_sub(1), &header, label);

        if let Some(banner) = state_banner(snapshot.state) {
            let bx = start_x + frame_w.saturating_sub(banner.len() as u16) / 2;
            fb.put_str(bx, start_y + frame_h, banner, label);
        } else {
            let hint = "arrows move · r restart · q quit";
            fb.put_str(start_x, start_y + frame_h, hint, CellStyle::default());
        }

        fb
    }

    fn draw_border(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        style: CellStyle,
    ) {
        if w < 2 || h < 2 {
            return;
        }
        for dx in 1..w - 1 {
            fb.set(x + dx, y, Cell { ch: '─', style });
            fb.set(x + dx, y + h - 1, Cell { ch: '─', style });
        }
        for dy in 1..h - 1 {
            fb.set(x, y + dy, Cell { ch: '│', style });
            fb.set(x + w - 1, y + dy, Cell { ch: '│', style });
        }
        fb.set(x, y, Cell { ch: '┌', style });
        fb.set(x + w - 1, y, Cell { ch: '┐', style });
        fb.set(x, y + h - 1, Cell { ch: '└', style });
        fb.set(x + w - 1, y + h - 1, Cell { ch: '┘', style });
    }
}

/// Cell style for a tile value, with a dark fallback for values past the
/// configured palette
fn tile_cell_style(catalog: &Catalog, value: u32) -> CellStyle {
    let style = catalog.style_for(value).unwrap_or(TileStyle {
        value,
        fg: [249, 246, 242],
        bg: [60, 58, 50],
    });
    CellStyle {
        fg: style.fg.into(),
        bg: style.bg.into(),
        bold: value >= 128,
    }
}

fn state_banner(state: RoundState) -> Option<&'static str> {
    match state {
        RoundState::Win => Some(" you win! press r to play again "),
        RoundState::Lose => Some(" game over, press r to try again "),
        _ => None,
    }
}
