//! Player
//!
//! Tracked player position and translation of directional intents into
//! grid operations. The position only changes through grid moves, which
//! keep the PlayerMarker cell in step.

use serde::{Serialize, Deserialize};

use crate::core::coord::Coord;
use crate::game::grid::Grid;
use crate::game::input::Direction;

/// Tracked player position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    position: Coord,
}

impl Player {
    /// Player standing at `position`.
    pub fn new(position: Coord) -> Self {
        Self { position }
    }

    /// Current cell.
    #[inline]
    pub fn position(&self) -> Coord {
        self.position
    }

    /// Only the grid moves the player, together with its marker cell.
    #[inline]
    pub(crate) fn set_position(&mut self, position: Coord) {
        self.position = position;
    }
}

/// Apply one intent: the tile in the destination cell decides what happens.
pub fn handle_intent(grid: &mut Grid, direction: Direction) {
    let offset = direction.offset();
    if offset.dy == 0 {
        grid.move_horizontal(offset.dx);
    } else {
        grid.move_vertical(offset.dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::level::Level;
    use crate::game::tile::Tile;

    fn grid(rows: &[&str]) -> Grid {
        Grid::new(&Level::from_text(&rows.join("\n")).unwrap())
    }

    #[test]
    fn test_intents_move_player_through_free_space() {
        let mut g = grid(&["#####", "#P :#", "#  :#", "#####"]);

        handle_intent(&mut g, Direction::Right);
        assert_eq!(g.player().position(), Coord::new(2, 1));

        handle_intent(&mut g, Direction::Right);
        assert_eq!(g.player().position(), Coord::new(3, 1));

        handle_intent(&mut g, Direction::Down);
        assert_eq!(g.player().position(), Coord::new(3, 2));
        assert_eq!(g.tile(Coord::new(3, 1)), Tile::Air);

        handle_intent(&mut g, Direction::Left);
        handle_intent(&mut g, Direction::Up);
        assert_eq!(g.player().position(), Coord::new(2, 1));
    }

    #[test]
    fn test_walls_block_all_directions() {
        let mut g = grid(&["###", "#P#", "###"]);

        for direction in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            handle_intent(&mut g, direction);
            assert_eq!(g.player().position(), Coord::new(1, 1));
            assert_eq!(g.tile(Coord::new(1, 1)), Tile::PlayerMarker);
        }
    }
}
