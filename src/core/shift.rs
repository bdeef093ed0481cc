//! Shift resolver - slide and merge resolution for one directional command
//!
//! [`resolve`] computes, for every live tile, its resting cell and optional
//! merge partner without touching real state. The round controller then
//! replays the plan in two phases: [`apply_moves`] before the presentation
//! layer animates, [`apply_merges`] once it signals completion.

use crate::core::catalog::{Catalog, MissingStyle};
use crate::core::grid::{Grid, Pos};
use crate::core::round::RoundEvent;
use crate::core::tile::{Tile, TileArena, TileId};
use crate::types::Direction;

/// One tile's resolved outcome for the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedMove {
    pub tile: TileId,
    pub from: Pos,
    /// Resting cell. For a merging tile this is where it stops sliding,
    /// one cell short of its target.
    pub to: Pos,
    /// Tile this one merges into, if any
    pub merge_into: Option<TileId>,
}

/// Every live tile's outcome, in sweep order
#[derive(Debug, Clone, Default)]
pub struct ShiftPlan {
    pub moves: Vec<PlannedMove>,
}

impl ShiftPlan {
    /// True when the shift would change nothing: no tile slides and none
    /// merge. The controller treats such a command as unconsumed.
    pub fn is_noop(&self) -> bool {
        self.moves
            .iter()
            .all(|m| m.from == m.to && m.merge_into.is_none())
    }

    /// Number of merge pairs designated by this plan
    pub fn merge_count(&self) -> usize {
        self.moves.iter().filter(|m| m.merge_into.is_some()).count()
    }
}

/// Resolve a shift without mutating real state.
///
/// Tiles are processed farthest-in-direction-of-travel first: ascending
/// (x, y) order, reversed when the direction points toward increasing
/// coordinates. That way a tile can never overtake one ahead of it in the
/// same sweep. Each tile advances one cell at a time until it hits the
/// board edge, a mergeable neighbor (merge designated, advance ends), or a
/// non-mergeable occupant.
pub fn resolve(grid: &Grid, tiles: &TileArena, dir: Direction) -> ShiftPlan {
    // The sweep runs its bind/vacate choreography on scratch copies, so the
    // caller's state is untouched.
    let mut g = grid.clone();
    let mut t = tiles.clone();

    let mut order: Vec<TileId> = t.iter().map(|(id, _)| id).collect();
    order.sort_by_key(|&id| {
        let pos = t.tile(id).pos;
        (pos.x, pos.y)
    });
    if dir.is_positive() {
        order.reverse();
    }

    for &id in &order {
        loop {
            let pos = t.tile(id).pos;
            let Some(next) = g.neighbor(pos, dir) else {
                // Board edge.
                break;
            };
            match g.occupant(next) {
                Some(other) => {
                    if t.tile(other).can_merge_with(t.tile(id).value) {
                        t.designate_merge(&mut g, id, other);
                    }
                    break;
                }
                None => t.bind(&mut g, id, next),
            }
        }
    }

    let moves = order
        .iter()
        .map(|&id| {
            let resolved = t.tile(id);
            PlannedMove {
                tile: id,
                from: tiles.tile(id).pos,
                to: resolved.pos,
                merge_into: resolved.merge_into,
            }
        })
        .collect();

    ShiftPlan { moves }
}

/// Replay the slide phase of a plan onto real state, in plan order.
///
/// Non-merging tiles re-bind to their resting cells. Merging tiles vacate
/// their old cell, take their resting coordinate, and occupy nothing: the
/// pair is consumed by [`apply_merges`].
pub(crate) fn apply_moves(
    plan: &ShiftPlan,
    grid: &mut Grid,
    tiles: &mut TileArena,
    events: &mut Vec<RoundEvent>,
) {
    for m in &plan.moves {
        match m.merge_into {
            Some(target) => {
                // Vacate while the tile still sits on its old cell, then
                // take the resting coordinate.
                tiles.designate_merge(grid, m.tile, target);
                tiles.tile_mut(m.tile).pos = m.to;
            }
            None => {
                if m.to != m.from {
                    tiles.bind(grid, m.tile, m.to);
                }
            }
        }
        if m.to != m.from {
            events.push(RoundEvent::TileMoved {
                tile: m.tile,
                from: m.from,
                to: m.to,
            });
        }
    }
}

/// Merge application: consume every designated pair, spawning one tile of
/// doubled value on the target's cell.
///
/// Pairs are disjoint (a tile participates in at most one merge per
/// round), so iteration order does not matter. A doubled value with no
/// catalog entry is a fatal configuration error.
pub(crate) fn apply_merges(
    plan: &ShiftPlan,
    grid: &mut Grid,
    tiles: &mut TileArena,
    catalog: &Catalog,
    events: &mut Vec<RoundEvent>,
) -> Result<(), MissingStyle> {
    for m in &plan.moves {
        let Some(target) = m.merge_into else {
            continue;
        };

        let merged_value = tiles.tile(target).value * 2;
        let style = catalog.style_for(merged_value)?;

        let target_tile = tiles
            .remove(target)
            .expect("merge target removed before application");
        let mover = tiles
            .remove(m.tile)
            .expect("merging tile removed before application");
        grid.set(target_tile.pos, None);
        events.push(RoundEvent::TileRemoved {
            tile: target,
            cell: target_tile.pos,
        });
        events.push(RoundEvent::TileRemoved {
            tile: m.tile,
            cell: mover.pos,
        });

        let id = tiles.insert(Tile::new(merged_value, target_tile.pos));
        grid.set(target_tile.pos, Some(id));
        events.push(RoundEvent::TileCreated {
            tile: id,
            cell: target_tile.pos,
            style,
        });
    }
    Ok(())
}
