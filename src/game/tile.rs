//! Tile Definitions
//!
//! The occupant of one grid cell. Each variant answers the same set of
//! capability queries; reactions dispatch on the variant with an
//! exhaustive match.

use serde::{Serialize, Deserialize};

use crate::core::coord::{Coord, Offset};
use crate::game::grid::Grid;
use crate::game::key::KeyClass;

// =============================================================================
// FALLING STATE
// =============================================================================

/// Gravity classification of a Stone or Box.
///
/// Re-derived every tick from the tile below; never driven externally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FallingState {
    /// Will drop one row on its next tick.
    Falling,
    /// Supported; may be pushed sideways.
    #[default]
    Resting,
}

impl FallingState {
    /// Check if falling.
    #[inline]
    pub fn is_falling(self) -> bool {
        matches!(self, FallingState::Falling)
    }

    /// Horizontal reaction of a Stone/Box in this state.
    ///
    /// Resting objects attempt a push; falling ones block.
    pub fn react_horizontal(self, grid: &mut Grid, dx: i32) {
        match self {
            FallingState::Resting => grid.push_horizontal(dx),
            FallingState::Falling => grid.block_move(Offset::horizontal(dx)),
        }
    }

    /// Drop the object at `at` if falling.
    pub fn drop(self, grid: &mut Grid, at: Coord) {
        if self.is_falling() {
            grid.drop_tile(at);
        }
    }
}

// =============================================================================
// TILE
// =============================================================================

/// Occupant of one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tile {
    /// Empty space
    #[default]
    Air,
    /// Walkable decoration
    Flux,
    /// Wall
    Unbreakable,
    /// Cell holding the player
    PlayerMarker,
    /// Gravity-affected, pushable
    Stone(FallingState),
    /// Gravity-affected, pushable
    Box(FallingState),
    /// Clears all locks of its class when entered
    Key(KeyClass),
    /// Blocks movement until its key is taken
    Lock(KeyClass),
}

impl Tile {
    /// True only for Air.
    #[inline]
    pub fn is_air(&self) -> bool {
        matches!(self, Tile::Air)
    }

    /// True only for a Lock of `class`.
    #[inline]
    pub fn is_lock_of_class(&self, class: KeyClass) -> bool {
        matches!(self, Tile::Lock(c) if *c == class)
    }

    /// Falling state carried by Stone/Box, `None` for everything else.
    #[inline]
    pub fn falling_state(&self) -> Option<FallingState> {
        match self {
            Tile::Stone(state) | Tile::Box(state) => Some(*state),
            _ => None,
        }
    }

    /// Same tile with its falling state replaced.
    ///
    /// Tiles without a falling state are returned unchanged.
    #[inline]
    pub fn with_falling_state(self, state: FallingState) -> Tile {
        match self {
            Tile::Stone(_) => Tile::Stone(state),
            Tile::Box(_) => Tile::Box(state),
            other => other,
        }
    }

    /// State a tile directly above this one should adopt.
    ///
    /// Air and falling objects let the tile above keep falling;
    /// everything else supports it.
    pub fn on_top_falling_state(&self) -> FallingState {
        match self {
            Tile::Air => FallingState::Falling,
            Tile::Stone(state) | Tile::Box(state) => *state,
            Tile::Flux
            | Tile::Unbreakable
            | Tile::PlayerMarker
            | Tile::Key(_)
            | Tile::Lock(_) => FallingState::Resting,
        }
    }

    /// Reaction when the player tries to enter this tile by `(dx, 0)`.
    pub fn react_horizontal(&self, grid: &mut Grid, dx: i32) {
        let offset = Offset::horizontal(dx);
        match self {
            Tile::Air | Tile::Flux => grid.move_player(offset),
            Tile::Unbreakable | Tile::Lock(_) | Tile::PlayerMarker => grid.block_move(offset),
            Tile::Stone(state) | Tile::Box(state) => state.react_horizontal(grid, dx),
            Tile::Key(class) => {
                class.configuration().remove_locks(grid);
                grid.move_player(offset);
            }
        }
    }

    /// Reaction when the player tries to enter this tile by `(0, dy)`.
    ///
    /// Objects cannot be pushed vertically.
    pub fn react_vertical(&self, grid: &mut Grid, dy: i32) {
        let offset = Offset::vertical(dy);
        match self {
            Tile::Air | Tile::Flux => grid.move_player(offset),
            Tile::Unbreakable
            | Tile::Lock(_)
            | Tile::PlayerMarker
            | Tile::Stone(_)
            | Tile::Box(_) => grid.block_move(offset),
            Tile::Key(class) => {
                class.configuration().remove_locks(grid);
                grid.move_player(offset);
            }
        }
    }

    /// Per-tick update for the tile at `at`.
    ///
    /// Only Stone and Box do anything: re-derive the falling state from
    /// the cell below, store it, then drop if falling.
    pub fn tick(&self, grid: &mut Grid, at: Coord) {
        match self {
            Tile::Stone(_) | Tile::Box(_) => {
                let state = grid.tile(at.below()).on_top_falling_state();
                grid.set_tile(at, self.with_falling_state(state));
                state.drop(grid, at);
            }
            Tile::Air
            | Tile::Flux
            | Tile::Unbreakable
            | Tile::PlayerMarker
            | Tile::Key(_)
            | Tile::Lock(_) => {}
        }
    }

    /// Display colour for renderers, if the tile is drawn.
    pub fn color(&self) -> Option<&'static str> {
        match self {
            Tile::Air | Tile::PlayerMarker => None,
            Tile::Flux => Some("#ccffcc"),
            Tile::Unbreakable => Some("#999999"),
            Tile::Stone(_) => Some("#0000cc"),
            Tile::Box(_) => Some("#8b4513"),
            Tile::Key(class) | Tile::Lock(class) => Some(class.configuration().color()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TILES: [Tile; 12] = [
        Tile::Air,
        Tile::Flux,
        Tile::Unbreakable,
        Tile::PlayerMarker,
        Tile::Stone(FallingState::Resting),
        Tile::Stone(FallingState::Falling),
        Tile::Box(FallingState::Resting),
        Tile::Box(FallingState::Falling),
        Tile::Key(KeyClass::Yellow),
        Tile::Lock(KeyClass::Yellow),
        Tile::Key(KeyClass::Cyan),
        Tile::Lock(KeyClass::Cyan),
    ];

    #[test]
    fn test_only_air_is_air() {
        let airs: Vec<_> = ALL_TILES.iter().filter(|t| t.is_air()).collect();
        assert_eq!(airs, vec![&Tile::Air]);
    }

    #[test]
    fn test_lock_class_query() {
        assert!(Tile::Lock(KeyClass::Yellow).is_lock_of_class(KeyClass::Yellow));
        assert!(!Tile::Lock(KeyClass::Yellow).is_lock_of_class(KeyClass::Cyan));
        assert!(Tile::Lock(KeyClass::Cyan).is_lock_of_class(KeyClass::Cyan));
        assert!(!Tile::Key(KeyClass::Cyan).is_lock_of_class(KeyClass::Cyan));
        assert!(!Tile::Air.is_lock_of_class(KeyClass::Yellow));
    }

    #[test]
    fn test_on_top_falling_state_table() {
        for tile in ALL_TILES {
            let expected = match tile {
                Tile::Air
                | Tile::Stone(FallingState::Falling)
                | Tile::Box(FallingState::Falling) => FallingState::Falling,
                _ => FallingState::Resting,
            };
            assert_eq!(tile.on_top_falling_state(), expected, "{:?}", tile);
        }
    }

    #[test]
    fn test_with_falling_state_only_touches_objects() {
        assert_eq!(
            Tile::Stone(FallingState::Resting).with_falling_state(FallingState::Falling),
            Tile::Stone(FallingState::Falling)
        );
        assert_eq!(
            Tile::Box(FallingState::Falling).with_falling_state(FallingState::Resting),
            Tile::Box(FallingState::Resting)
        );
        assert_eq!(Tile::Flux.with_falling_state(FallingState::Falling), Tile::Flux);
        assert_eq!(Tile::Air.falling_state(), None);
    }

    #[test]
    fn test_colors() {
        assert_eq!(Tile::Air.color(), None);
        assert_eq!(Tile::PlayerMarker.color(), None);
        assert_eq!(Tile::Key(KeyClass::Yellow).color(), Some("#ffcc00"));
        assert_eq!(Tile::Lock(KeyClass::Cyan).color(), Some("#00ccff"));
    }
}
