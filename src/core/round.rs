//! Round controller - the state machine driving a game session
//!
//! Sequences grid generation, spawning, input wait, shift resolution and
//! terminal detection. All board mutation is owned and ordered here; the
//! presentation layer consumes the event queue and signals when its
//! animation has completed.

use thiserror::Error;

use crate::core::catalog::{Catalog, MissingStyle, TileStyle};
use crate::core::config::{ConfigError, GameConfig};
use crate::core::grid::{Grid, Pos};
use crate::core::rng::SimpleRng;
use crate::core::shift::{self, ShiftPlan};
use crate::core::snapshot::BoardSnapshot;
use crate::core::tile::{Tile, TileArena, TileId};
use crate::types::Direction;

use arrayvec::ArrayVec;

/// Session-fatal errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Style(#[from] MissingStyle),
    #[error("layout places a tile off the board or on an occupied cell")]
    BadLayout,
}

/// Current phase of the round state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundState {
    GenerateLevel,
    SpawningBlocks,
    WaitingInput,
    Moving,
    Win,
    Lose,
}

impl RoundState {
    /// Terminal states accept no further commands
    pub fn is_terminal(&self) -> bool {
        matches!(self, RoundState::Win | RoundState::Lose)
    }
}

/// How the controller disposed of a shift command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftOutcome {
    /// Not waiting for input; the command was dropped
    Ignored,
    /// Nothing could slide or merge; no round is consumed
    Unmoved,
    /// The slide was applied; the session is in `Moving` until
    /// [`Session::complete_move`]
    Accepted,
}

/// Notifications for the presentation sink, drained via
/// [`Session::take_events`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoundEvent {
    TileCreated {
        tile: TileId,
        cell: Pos,
        style: TileStyle,
    },
    TileMoved {
        tile: TileId,
        from: Pos,
        to: Pos,
    },
    TileRemoved {
        tile: TileId,
        cell: Pos,
    },
}

/// One game session: grid, tile set, RNG stream and round state
#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    catalog: Catalog,
    grid: Grid,
    tiles: TileArena,
    rng: SimpleRng,
    state: RoundState,
    round: u32,
    pending: Option<ShiftPlan>,
    events: Vec<RoundEvent>,
}

impl Session {
    /// Create a session. The configuration is validated here, before any
    /// game state exists.
    pub fn new(config: GameConfig, catalog: Catalog, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            grid: Grid::new(config.width, config.height),
            tiles: TileArena::new(),
            rng: SimpleRng::new(seed),
            state: RoundState::GenerateLevel,
            round: 0,
            pending: None,
            events: Vec::new(),
            config,
            catalog,
        })
    }

    /// Build a session from an exact starting layout instead of the random
    /// opening spawn. The session begins in `WaitingInput` with the round
    /// counter past the opening, so the next spawn step places one tile.
    pub fn from_layout(
        config: GameConfig,
        catalog: Catalog,
        seed: u32,
        layout: &[(Pos, u32)],
    ) -> Result<Self, EngineError> {
        let mut session = Self::new(config, catalog, seed)?;
        for &(pos, value) in layout {
            session.place_tile(pos, value)?;
        }
        session.state = RoundState::WaitingInput;
        session.round = 1;
        session.debug_validate();
        Ok(session)
    }

    /// Generate the level and run the opening spawn step (two tiles)
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.state != RoundState::GenerateLevel {
            return Ok(());
        }
        self.grid = Grid::new(self.config.width, self.config.height);
        self.tiles = TileArena::new();
        self.round = 0;
        self.spawn_step()
    }

    /// Tear the board down and start over on the same configuration,
    /// continuing the RNG stream
    pub fn restart(&mut self) -> Result<(), EngineError> {
        self.state = RoundState::GenerateLevel;
        self.pending = None;
        self.events.clear();
        self.start()
    }

    /// Preview the resolution of a shift without committing anything
    pub fn resolve(&self, dir: Direction) -> ShiftPlan {
        shift::resolve(&self.grid, &self.tiles, dir)
    }

    /// Handle a directional command.
    ///
    /// Input outside `WaitingInput` is silently dropped. A direction in
    /// which nothing can slide or merge is reported as `Unmoved` and does
    /// not consume a round: no state change, no spawn. Otherwise the slide
    /// is applied immediately and the session stays in `Moving` until the
    /// presentation layer calls [`Self::complete_move`].
    pub fn command(&mut self, dir: Direction) -> ShiftOutcome {
        if self.state != RoundState::WaitingInput {
            return ShiftOutcome::Ignored;
        }

        let plan = shift::resolve(&self.grid, &self.tiles, dir);
        if plan.is_noop() {
            return ShiftOutcome::Unmoved;
        }

        self.state = RoundState::Moving;
        shift::apply_moves(&plan, &mut self.grid, &mut self.tiles, &mut self.events);
        self.pending = Some(plan);
        ShiftOutcome::Accepted
    }

    /// The presentation layer's completion signal: run merge application
    /// on the pending plan, then the next spawn step.
    ///
    /// Returns false (and does nothing) outside `Moving`.
    pub fn complete_move(&mut self) -> Result<bool, EngineError> {
        if self.state != RoundState::Moving {
            return Ok(false);
        }
        let plan = self
            .pending
            .take()
            .expect("Moving state always holds a pending plan");
        shift::apply_merges(
            &plan,
            &mut self.grid,
            &mut self.tiles,
            &self.catalog,
            &mut self.events,
        )?;
        self.debug_validate();
        self.spawn_step()?;
        Ok(true)
    }

    /// Spawn step: place this round's tiles, then evaluate terminal
    /// conditions.
    ///
    /// The lose check tests the free-cell count as it stood before this
    /// step's tiles were placed: a board whose last free cell is consumed
    /// right here is lost. The lose check runs before the win check, so it
    /// wins ties.
    fn spawn_step(&mut self) -> Result<(), EngineError> {
        self.state = RoundState::SpawningBlocks;
        let amount = if self.round == 0 { 2 } else { 1 };
        self.round += 1;

        let mut free = self.grid.free_cells();
        self.rng.shuffle(&mut free);
        for &pos in free.iter().take(amount) {
            let value = self.rng.spawn_value(self.config.four_chance_pct);
            self.place_tile(pos, value)?;
        }
        self.debug_validate();

        if free.len() == 1 {
            self.state = RoundState::Lose;
            return Ok(());
        }
        let won = self
            .tiles
            .iter()
            .any(|(_, tile)| tile.value == self.config.win_value);
        self.state = if won {
            RoundState::Win
        } else {
            RoundState::WaitingInput
        };
        Ok(())
    }

    /// Place one tile on a free cell, emitting its creation event
    fn place_tile(&mut self, pos: Pos, value: u32) -> Result<TileId, EngineError> {
        let style = self.catalog.style_for(value)?;
        if !self.grid.is_free(pos) {
            return Err(EngineError::BadLayout);
        }
        let id = self.tiles.insert(Tile::new(value, pos));
        self.grid.set(pos, Some(id));
        self.events.push(RoundEvent::TileCreated {
            tile: id,
            cell: pos,
            style,
        });
        Ok(id)
    }

    /// Directions in which a shift would change the board
    pub fn available_moves(&self) -> ArrayVec<Direction, 4> {
        let mut moves = ArrayVec::new();
        if self.state != RoundState::WaitingInput {
            return moves;
        }
        for dir in Direction::ALL {
            if !self.resolve(dir).is_noop() {
                moves.push(dir);
            }
        }
        moves
    }

    /// Drain queued presentation events
    pub fn take_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    /// Rounds played so far (each spawn step counts one)
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Iterate live tiles with their ids
    pub fn tiles(&self) -> impl Iterator<Item = (TileId, &Tile)> {
        self.tiles.iter()
    }

    /// Number of live tiles
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Face value of the tile occupying `pos`, if any
    pub fn value_at(&self, pos: Pos) -> Option<u32> {
        let id = self.grid.occupant(pos)?;
        self.tiles.get(id).map(|tile| tile.value)
    }

    /// Write the current board into a reusable snapshot
    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        out.reset(self.grid.width(), self.grid.height());
        out.state = self.state;
        out.round = self.round;

        // Committed tiles first, then mid-merge movers into whatever cells
        // are still blank, mirroring how a merge pair overlaps on screen.
        for (_, tile) in self.tiles.iter() {
            if tile.merge_into.is_none() {
                out.put(tile.pos, tile.value);
            }
        }
        for (_, tile) in self.tiles.iter() {
            if tile.merge_into.is_some() && out.value_at(tile.pos) == Some(0) {
                out.put(tile.pos, tile.value);
            }
        }
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut snapshot = BoardSnapshot::empty(self.grid.width(), self.grid.height());
        self.snapshot_into(&mut snapshot);
        snapshot
    }

    /// Occupancy invariants: every occupied cell points at a live tile
    /// sitting on that cell, and every committed tile is backed by exactly
    /// its own cell. Violations are programming defects.
    fn debug_validate(&self) {
        if !cfg!(debug_assertions) {
            return;
        }
        let mut occupied = 0;
        for pos in self.grid.positions() {
            if let Some(id) = self.grid.occupant(pos) {
                occupied += 1;
                let tile = self.tiles.get(id);
                debug_assert!(
                    tile.map(|t| t.pos) == Some(pos),
                    "cell {:?} points at a tile that is not on it",
                    pos
                );
            }
        }
        let committed = self
            .tiles
            .iter()
            .filter(|(_, t)| t.merge_into.is_none())
            .count();
        debug_assert_eq!(occupied, committed, "occupancy count out of sync");
        for (id, tile) in self.tiles.iter() {
            if tile.merge_into.is_none() {
                debug_assert_eq!(
                    self.grid.occupant(tile.pos),
                    Some(id),
                    "tile {:?} lost its cell",
                    id
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(GameConfig::default(), Catalog::standard(), 12345).unwrap()
    }

    #[test]
    fn test_new_session_awaits_generation() {
        let session = session();
        assert_eq!(session.state(), RoundState::GenerateLevel);
        assert_eq!(session.round(), 0);
        assert_eq!(session.tile_count(), 0);
    }

    #[test]
    fn test_start_spawns_two_tiles() {
        let mut session = session();
        session.start().unwrap();

        assert_eq!(session.state(), RoundState::WaitingInput);
        assert_eq!(session.round(), 1);
        assert_eq!(session.tile_count(), 2);
        for (_, tile) in session.tiles() {
            assert!(tile.value == 2 || tile.value == 4);
        }
    }

    #[test]
    fn test_start_twice_is_a_noop() {
        let mut session = session();
        session.start().unwrap();
        let snapshot = session.snapshot();
        session.start().unwrap();
        assert_eq!(session.snapshot(), snapshot);
    }

    #[test]
    fn test_restart_rebuilds_the_board() {
        let mut session = session();
        session.start().unwrap();
        if session.command(Direction::Left) == ShiftOutcome::Accepted {
            session.complete_move().unwrap();
        }

        session.restart().unwrap();
        assert_eq!(session.state(), RoundState::WaitingInput);
        assert_eq!(session.round(), 1);
        assert_eq!(session.tile_count(), 2);
    }

    #[test]
    fn test_command_outside_waiting_input_is_ignored() {
        let mut session = session();
        assert_eq!(session.command(Direction::Left), ShiftOutcome::Ignored);
    }

    #[test]
    fn test_bad_config_is_fatal_at_construction() {
        let config = GameConfig {
            width: 1,
            ..GameConfig::default()
        };
        assert!(Session::new(config, Catalog::standard(), 1).is_err());
    }

    #[test]
    fn test_from_layout_places_exact_tiles() {
        let layout = [(Pos::new(0, 0), 2), (Pos::new(3, 3), 64)];
        let session =
            Session::from_layout(GameConfig::default(), Catalog::standard(), 1, &layout).unwrap();

        assert_eq!(session.state(), RoundState::WaitingInput);
        assert_eq!(session.tile_count(), 2);
        assert_eq!(session.value_at(Pos::new(0, 0)), Some(2));
        assert_eq!(session.value_at(Pos::new(3, 3)), Some(64));
    }

    #[test]
    fn test_from_layout_rejects_occupied_cell() {
        let layout = [(Pos::new(0, 0), 2), (Pos::new(0, 0), 4)];
        let err = Session::from_layout(GameConfig::default(), Catalog::standard(), 1, &layout)
            .unwrap_err();
        assert_eq!(err, EngineError::BadLayout);
    }

    #[test]
    fn test_from_layout_rejects_unstyled_value() {
        let layout = [(Pos::new(0, 0), 3)];
        let err = Session::from_layout(GameConfig::default(), Catalog::standard(), 1, &layout)
            .unwrap_err();
        assert_eq!(err, EngineError::Style(MissingStyle(3)));
    }

    #[test]
    fn test_available_moves_empty_when_not_waiting() {
        let session = session();
        assert!(session.available_moves().is_empty());
    }
}
