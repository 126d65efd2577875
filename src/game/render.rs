//! Read-Only Views
//!
//! What a renderer needs after each tick: every cell with its variant
//! and display attributes, plus the player position. Nothing here
//! mutates the grid.

use serde::Serialize;

use crate::core::coord::Coord;
use crate::game::grid::Grid;
use crate::game::level::RawTile;
use crate::game::tile::Tile;

/// Player display colour.
pub const PLAYER_COLOR: &str = "#ff0000";

/// One cell as seen by a renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CellView {
    /// Cell position
    pub at: Coord,
    /// Occupant
    pub tile: Tile,
    /// Text glyph
    pub glyph: char,
    /// Fill colour, `None` when nothing is drawn
    pub color: Option<&'static str>,
}

/// Snapshot of the whole grid for one frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Frame {
    /// Tick the frame was taken after
    pub tick: u32,
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Row-major cells
    pub cells: Vec<CellView>,
    /// Player position
    pub player: Coord,
    /// Player fill colour
    pub player_color: &'static str,
}

/// Glyph for a tile (same table the text level parser uses).
#[inline]
pub fn glyph(tile: Tile) -> char {
    RawTile::from(tile).glyph()
}

/// Build a frame from the current grid.
pub fn frame(grid: &Grid, tick: u32) -> Frame {
    let cells = grid
        .cells()
        .map(|(at, tile)| CellView {
            at,
            tile,
            glyph: glyph(tile),
            color: tile.color(),
        })
        .collect();

    Frame {
        tick,
        width: grid.width(),
        height: grid.height(),
        cells,
        player: grid.player().position(),
        player_color: PLAYER_COLOR,
    }
}

/// Render the grid as text, one line per row.
pub fn to_text(grid: &Grid) -> String {
    let mut out = String::with_capacity((grid.width() + 1) * grid.height());
    for (at, tile) in grid.cells() {
        if at.x == 0 && at.y > 0 {
            out.push('\n');
        }
        out.push(glyph(tile));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::level::Level;

    #[test]
    fn test_text_roundtrips_through_level() {
        let text = "######\n#P:oK#\n#bBlL#\n######";
        let grid = Grid::new(&Level::from_text(text).unwrap());

        assert_eq!(to_text(&grid), text);
    }

    #[test]
    fn test_frame_exposes_player_and_colors() {
        let grid = Grid::new(&Level::from_text("###\n#P#\n#k#\n###").unwrap());
        let f = frame(&grid, 7);

        assert_eq!(f.tick, 7);
        assert_eq!(f.cells.len(), 12);
        assert_eq!(f.player, Coord::new(1, 1));
        assert_eq!(f.cells[4].tile, Tile::PlayerMarker);
        assert_eq!(f.cells[4].color, None);
        assert_eq!(f.cells[7].color, Some("#ffcc00"));
        assert_eq!(f.cells[0].glyph, '#');
    }
}
