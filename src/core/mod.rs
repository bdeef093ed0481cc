//! Core module - pure game logic with no terminal dependencies
//!
//! Everything under here is deterministic and synchronous, from grid and
//! tile bookkeeping up to the round state machine. Rendering and input
//! live elsewhere and only consume this module's types.

pub mod catalog;
pub mod config;
pub mod grid;
pub mod rng;
pub mod round;
pub mod shift;
pub mod snapshot;
pub mod tile;

// Re-export commonly used types
pub use catalog::{Catalog, MissingStyle, TileStyle};
pub use config::{ConfigError, GameConfig};
pub use grid::{Grid, Pos};
pub use rng::SimpleRng;
pub use round::{EngineError, RoundEvent, RoundState, Session, ShiftOutcome};
pub use shift::{resolve, PlannedMove, ShiftPlan};
pub use snapshot::BoardSnapshot;
pub use tile::{Tile, TileArena, TileId};
