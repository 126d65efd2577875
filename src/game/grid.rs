//! Tile Grid
//!
//! Rectangular container of tiles. Owns the player so that the
//! PlayerMarker cell and the tracked position are only ever changed
//! together, and implements the cell-level mechanics tiles delegate to:
//! player moves, pushes, drops and lock removal.
//!
//! ## Bounds
//!
//! Cells outside the grid are never checked for during play; levels are
//! expected to be walled in. Looking one up anyway panics.

use tracing::{debug, trace};

use crate::core::coord::{Coord, Offset};
use crate::core::hash::{compute_state_hash, StateHash};
use crate::game::events::GameEventData;
use crate::game::key::RemoveStrategy;
use crate::game::level::{Level, RawTile};
use crate::game::player::Player;
use crate::game::tile::Tile;

/// The simulation grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Row-major cells
    cells: Vec<Tile>,
    player: Player,
    /// Events generated since the last drain
    pending_events: Vec<GameEventData>,
}

impl Grid {
    /// Build a grid from validated level data.
    pub fn new(level: &Level) -> Self {
        let cells = level.tiles().iter().map(|raw| raw.to_tile()).collect();
        Self {
            width: level.width(),
            height: level.height(),
            cells,
            player: Player::new(level.player_start()),
            pending_events: Vec::new(),
        }
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The player.
    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Check if `at` lies on the grid.
    #[inline]
    pub fn contains(&self, at: Coord) -> bool {
        at.x >= 0 && at.y >= 0 && (at.x as usize) < self.width && (at.y as usize) < self.height
    }

    /// # Panics
    ///
    /// Panics if `at` is outside the grid.
    fn index(&self, at: Coord) -> usize {
        assert!(
            self.contains(at),
            "cell {} outside {}x{} grid",
            at,
            self.width,
            self.height
        );
        at.y as usize * self.width + at.x as usize
    }

    /// Tile at `at`.
    ///
    /// # Panics
    ///
    /// Panics if `at` is outside the grid.
    #[inline]
    pub fn tile(&self, at: Coord) -> Tile {
        self.cells[self.index(at)]
    }

    /// Replace the tile at `at`.
    ///
    /// Placing or clearing a PlayerMarker here would break the player
    /// invariant; use the move operations for that.
    pub(crate) fn set_tile(&mut self, at: Coord, tile: Tile) {
        let i = self.index(at);
        self.cells[i] = tile;
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, Tile)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(i, tile)| {
            (Coord::new((i % width) as i32, (i / width) as i32), *tile)
        })
    }

    /// Take events generated since the last call.
    pub fn take_events(&mut self) -> Vec<GameEventData> {
        std::mem::take(&mut self.pending_events)
    }

    fn push_event(&mut self, event: GameEventData) {
        self.pending_events.push(event);
    }

    // =========================================================================
    // PLAYER MOVEMENT
    // =========================================================================

    /// Attempt to move the player by `(dx, 0)`.
    pub fn move_horizontal(&mut self, dx: i32) {
        let target = self.player.position() + Offset::horizontal(dx);
        let tile = self.tile(target);
        tile.react_horizontal(self, dx);
    }

    /// Attempt to move the player by `(0, dy)`.
    pub fn move_vertical(&mut self, dy: i32) {
        let target = self.player.position() + Offset::vertical(dy);
        let tile = self.tile(target);
        tile.react_vertical(self, dy);
    }

    /// Move the player by `offset` unconditionally.
    pub(crate) fn move_player(&mut self, offset: Offset) {
        let to = self.player.position() + offset;
        self.move_player_to(to);
    }

    /// Relocate the player and its marker in one step.
    fn move_player_to(&mut self, to: Coord) {
        let from = self.player.position();
        self.set_tile(from, Tile::Air);
        self.set_tile(to, Tile::PlayerMarker);
        self.player.set_position(to);

        debug!("player moved {} -> {}", from, to);
        self.push_event(GameEventData::PlayerMoved { from, to });
    }

    /// Record a refused move.
    pub(crate) fn block_move(&mut self, toward: Offset) {
        let at = self.player.position();
        trace!("move from {} toward {:?} blocked", at, toward);
        self.push_event(GameEventData::MoveBlocked { at, toward });
    }

    /// Push the object next to the player one column further.
    ///
    /// Requires Air two cells away and a non-Air cell beneath the pushed
    /// object's current position. Otherwise nothing moves, the player
    /// included.
    pub(crate) fn push_horizontal(&mut self, dx: i32) {
        let player = self.player.position();
        let object_at = player + Offset::horizontal(dx);
        let landing = player + Offset::horizontal(dx).scale(2);
        let toward = Offset::horizontal(dx);

        if !(self.tile(landing).is_air() && !self.tile(object_at.below()).is_air()) {
            trace!("push of {} toward {:?} refused", object_at, toward);
            self.push_event(GameEventData::PushRefused { at: object_at, toward });
            return;
        }

        let object = self.tile(object_at);
        self.set_tile(landing, object);
        debug!("pushed {:?} {} -> {}", object, object_at, landing);
        self.push_event(GameEventData::BlockPushed {
            tile: object,
            from: object_at,
            to: landing,
        });

        self.move_player_to(object_at);
    }

    // =========================================================================
    // GRAVITY AND LOCKS
    // =========================================================================

    /// Move the occupant of `at` one row down, leaving Air behind.
    pub(crate) fn drop_tile(&mut self, at: Coord) {
        let tile = self.tile(at);
        self.set_tile(at.below(), tile);
        self.set_tile(at, Tile::Air);

        debug!("{:?} dropped {} -> {}", tile, at, at.below());
        self.push_event(GameEventData::BlockDropped { tile, from: at });
    }

    /// Replace every tile selected by `strategy` with Air.
    ///
    /// Returns the number of tiles removed.
    pub(crate) fn remove_locks(&mut self, strategy: RemoveStrategy) -> usize {
        let class = strategy.class();
        let mut count = 0;
        for cell in self.cells.iter_mut() {
            if strategy.check(cell) {
                *cell = Tile::Air;
                count += 1;
            }
        }

        debug!("removed {} locks of class {}", count, class.index());
        self.push_event(GameEventData::LocksRemoved { class, count });
        count
    }

    /// Run the gravity pass.
    ///
    /// Rows are scanned bottom to top, each row left to right, so a tile
    /// that just dropped is not visited again this pass and a cell
    /// vacated above a cascade is seen as Air.
    pub fn update(&mut self) {
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let at = Coord::new(x as i32, y as i32);
                let tile = self.tile(at);
                tile.tick(self, at);
            }
        }
    }

    // =========================================================================
    // INSPECTION
    // =========================================================================

    /// Coordinates of every PlayerMarker cell.
    pub fn player_markers(&self) -> Vec<Coord> {
        self.cells()
            .filter(|(_, tile)| *tile == Tile::PlayerMarker)
            .map(|(at, _)| at)
            .collect()
    }

    /// Check that exactly one PlayerMarker exists and it is under the player.
    pub fn player_invariant_holds(&self) -> bool {
        self.player_markers() == vec![self.player.position()]
    }

    /// Count tiles matching a predicate.
    pub fn count(&self, pred: impl Fn(&Tile) -> bool) -> usize {
        self.cells.iter().filter(|t| pred(t)).count()
    }

    /// Compute deterministic state hash at `tick`.
    pub fn compute_hash(&self, tick: u32) -> StateHash {
        compute_state_hash(tick, |hasher| {
            hasher.update_u32(self.width as u32);
            hasher.update_u32(self.height as u32);
            for tile in &self.cells {
                hasher.update_u8(RawTile::from(*tile).code());
            }
            hasher.update_coord(self.player.position());
        })
    }
}
