//! Terminal rendering module.
//!
//! Renders into a simple styled-character framebuffer that is flushed to
//! the terminal as a whole frame. The view itself is pure: it consumes a
//! board snapshot and the style catalog, never the live session.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
