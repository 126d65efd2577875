//! Level Data
//!
//! Raw tile codes as handed over by a level loader, validated into a
//! rectangular [`Level`] with exactly one player start.

use serde::{Serialize, Deserialize};

use crate::core::coord::Coord;
use crate::error::LevelError;
use crate::game::key::KeyClass;
use crate::game::tile::{FallingState, Tile};

// =============================================================================
// RAW TILE CODES
// =============================================================================

/// Raw tile code found in level data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum RawTile {
    /// Empty space
    Air = 0,
    /// Walkable decoration
    Flux = 1,
    /// Wall
    Unbreakable = 2,
    /// Player start
    Player = 3,
    /// Resting stone
    Stone = 4,
    /// Stone that starts falling
    FallingStone = 5,
    /// Resting box
    Box = 6,
    /// Box that starts falling
    FallingBox = 7,
    /// Key of class 1
    Key1 = 8,
    /// Lock of class 1
    Lock1 = 9,
    /// Key of class 2
    Key2 = 10,
    /// Lock of class 2
    Lock2 = 11,
}

impl RawTile {
    /// Decode a numeric code.
    pub fn from_code(code: u8) -> Option<RawTile> {
        let raw = match code {
            0 => RawTile::Air,
            1 => RawTile::Flux,
            2 => RawTile::Unbreakable,
            3 => RawTile::Player,
            4 => RawTile::Stone,
            5 => RawTile::FallingStone,
            6 => RawTile::Box,
            7 => RawTile::FallingBox,
            8 => RawTile::Key1,
            9 => RawTile::Lock1,
            10 => RawTile::Key2,
            11 => RawTile::Lock2,
            _ => return None,
        };
        Some(raw)
    }

    /// Numeric code.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// One-character text form.
    pub fn glyph(self) -> char {
        match self {
            RawTile::Air => ' ',
            RawTile::Flux => ':',
            RawTile::Unbreakable => '#',
            RawTile::Player => 'P',
            RawTile::Stone => 'o',
            RawTile::FallingStone => 'O',
            RawTile::Box => 'b',
            RawTile::FallingBox => 'B',
            RawTile::Key1 => 'k',
            RawTile::Lock1 => 'l',
            RawTile::Key2 => 'K',
            RawTile::Lock2 => 'L',
        }
    }

    /// Decode a text glyph.
    pub fn from_glyph(glyph: char) -> Option<RawTile> {
        let raw = match glyph {
            ' ' => RawTile::Air,
            ':' => RawTile::Flux,
            '#' => RawTile::Unbreakable,
            'P' => RawTile::Player,
            'o' => RawTile::Stone,
            'O' => RawTile::FallingStone,
            'b' => RawTile::Box,
            'B' => RawTile::FallingBox,
            'k' => RawTile::Key1,
            'l' => RawTile::Lock1,
            'K' => RawTile::Key2,
            'L' => RawTile::Lock2,
            _ => return None,
        };
        Some(raw)
    }

    /// Build the tile this code stands for.
    pub fn to_tile(self) -> Tile {
        match self {
            RawTile::Air => Tile::Air,
            RawTile::Flux => Tile::Flux,
            RawTile::Unbreakable => Tile::Unbreakable,
            RawTile::Player => Tile::PlayerMarker,
            RawTile::Stone => Tile::Stone(FallingState::Resting),
            RawTile::FallingStone => Tile::Stone(FallingState::Falling),
            RawTile::Box => Tile::Box(FallingState::Resting),
            RawTile::FallingBox => Tile::Box(FallingState::Falling),
            RawTile::Key1 => Tile::Key(KeyClass::Yellow),
            RawTile::Lock1 => Tile::Lock(KeyClass::Yellow),
            RawTile::Key2 => Tile::Key(KeyClass::Cyan),
            RawTile::Lock2 => Tile::Lock(KeyClass::Cyan),
        }
    }
}

impl From<Tile> for RawTile {
    fn from(tile: Tile) -> Self {
        match tile {
            Tile::Air => RawTile::Air,
            Tile::Flux => RawTile::Flux,
            Tile::Unbreakable => RawTile::Unbreakable,
            Tile::PlayerMarker => RawTile::Player,
            Tile::Stone(FallingState::Resting) => RawTile::Stone,
            Tile::Stone(FallingState::Falling) => RawTile::FallingStone,
            Tile::Box(FallingState::Resting) => RawTile::Box,
            Tile::Box(FallingState::Falling) => RawTile::FallingBox,
            Tile::Key(KeyClass::Yellow) => RawTile::Key1,
            Tile::Lock(KeyClass::Yellow) => RawTile::Lock1,
            Tile::Key(KeyClass::Cyan) => RawTile::Key2,
            Tile::Lock(KeyClass::Cyan) => RawTile::Lock2,
        }
    }
}

// =============================================================================
// LEVEL
// =============================================================================

/// Layout the game ships with.
pub const DEFAULT_LEVEL: [[u8; 8]; 6] = [
    [2, 2, 2, 2, 2, 2, 2, 2],
    [2, 3, 0, 1, 1, 2, 0, 2],
    [2, 4, 2, 6, 1, 2, 0, 2],
    [2, 8, 4, 1, 1, 2, 0, 2],
    [2, 4, 1, 1, 1, 9, 0, 2],
    [2, 2, 2, 2, 2, 2, 2, 2],
];

/// Validated, rectangular level data.
///
/// Serializes as an array of code rows and deserializes only through the
/// same checks as [`Level::from_codes`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Level {
    width: usize,
    height: usize,
    /// Row-major tiles
    tiles: Vec<RawTile>,
    player_start: Coord,
}

impl Level {
    /// Validate rows of numeric codes.
    pub fn from_codes<R: AsRef<[u8]>>(rows: &[R]) -> Result<Level, LevelError> {
        Self::build(rows, |code, row, col| {
            RawTile::from_code(code).ok_or(LevelError::UnknownTileCode { code, row, col })
        })
    }

    /// Validate a JSON array of code rows.
    pub fn from_json(json: &str) -> Result<Level, LevelError> {
        let rows: Vec<Vec<u8>> = serde_json::from_str(json)?;
        Self::from_codes(&rows)
    }

    /// Validate a text layout, one glyph per cell (see [`RawTile::glyph`]).
    ///
    /// Empty lines are skipped.
    pub fn from_text(text: &str) -> Result<Level, LevelError> {
        let rows: Vec<Vec<char>> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().collect())
            .collect();
        Self::build(&rows, |glyph, row, col| {
            RawTile::from_glyph(glyph).ok_or(LevelError::UnknownTileGlyph { glyph, row, col })
        })
    }

    /// The built-in level.
    pub fn default_level() -> Level {
        match Self::from_codes(&DEFAULT_LEVEL) {
            Ok(level) => level,
            Err(e) => unreachable!("built-in level is valid: {e}"),
        }
    }

    fn build<T, R, F>(rows: &[R], decode: F) -> Result<Level, LevelError>
    where
        T: Copy,
        R: AsRef<[T]>,
        F: Fn(T, usize, usize) -> Result<RawTile, LevelError>,
    {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(LevelError::Empty);
        }

        let mut tiles = Vec::with_capacity(width * height);
        let mut player_start: Option<Coord> = None;

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(LevelError::RaggedRow {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }

            for (x, value) in row.iter().enumerate() {
                let raw = decode(*value, y, x)?;
                if raw == RawTile::Player {
                    let here = Coord::new(x as i32, y as i32);
                    if let Some(first) = player_start {
                        return Err(LevelError::MultiplePlayerStarts { first, second: here });
                    }
                    player_start = Some(here);
                }
                tiles.push(raw);
            }
        }

        let player_start = player_start.ok_or(LevelError::MissingPlayerStart)?;

        Ok(Level {
            width,
            height,
            tiles,
            player_start,
        })
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

    /// Position of the player-start code.
    #[inline]
    pub fn player_start(&self) -> Coord {
        self.player_start
    }

    /// Row-major raw tiles.
    #[inline]
    pub fn tiles(&self) -> &[RawTile] {
        &self.tiles
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::default_level()
    }
}

impl TryFrom<Vec<Vec<u8>>> for Level {
    type Error = LevelError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Level::from_codes(&rows)
    }
}

impl From<Level> for Vec<Vec<u8>> {
    fn from(level: Level) -> Self {
        level
            .tiles
            .chunks(level.width)
            .map(|row| row.iter().map(|raw| raw.code()).collect())
            .collect()
    }
}
