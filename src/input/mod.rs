//! Input module - crossterm key events to game actions

pub mod handler;

pub use handler::{handle_key_event, should_quit};
