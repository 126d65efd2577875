//! Integer Grid Coordinates
//!
//! Cell positions and offsets on the tile grid.
//! `x` grows to the right (column), `y` grows downward (row).

use std::fmt;
use std::ops::Add;
use serde::{Serialize, Deserialize};

/// Position of a cell on the grid.
///
/// Signed so that offsets past the left/top edge can be expressed;
/// the grid rejects them on lookup.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Coord {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl Coord {
    /// Create a coordinate.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinate shifted by an offset.
    #[inline]
    pub const fn offset(self, delta: Offset) -> Self {
        Self {
            x: self.x + delta.dx,
            y: self.y + delta.dy,
        }
    }

    /// The cell directly below.
    #[inline]
    pub const fn below(self) -> Self {
        self.offset(Offset::DOWN)
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Relative movement on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Offset {
    /// Column delta
    pub dx: i32,
    /// Row delta
    pub dy: i32,
}

impl Offset {
    /// One column right
    pub const RIGHT: Self = Self { dx: 1, dy: 0 };

    /// One column left
    pub const LEFT: Self = Self { dx: -1, dy: 0 };

    /// One row up (toward row 0)
    pub const UP: Self = Self { dx: 0, dy: -1 };

    /// One row down
    pub const DOWN: Self = Self { dx: 0, dy: 1 };

    /// Create an offset.
    #[inline]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Horizontal offset of `dx` columns.
    #[inline]
    pub const fn horizontal(dx: i32) -> Self {
        Self { dx, dy: 0 }
    }

    /// Vertical offset of `dy` rows.
    #[inline]
    pub const fn vertical(dy: i32) -> Self {
        Self { dx: 0, dy }
    }

    /// Scale by an integer.
    #[inline]
    pub const fn scale(self, factor: i32) -> Self {
        Self {
            dx: self.dx * factor,
            dy: self.dy * factor,
        }
    }
}

impl Add<Offset> for Coord {
    type Output = Coord;

    #[inline]
    fn add(self, rhs: Offset) -> Coord {
        self.offset(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_moves_coord() {
        let c = Coord::new(3, 2);
        assert_eq!(c + Offset::RIGHT, Coord::new(4, 2));
        assert_eq!(c + Offset::LEFT.scale(2), Coord::new(1, 2));
        assert_eq!(c.below(), Coord::new(3, 3));
        assert_eq!(c + Offset::UP, Coord::new(3, 1));
    }

    #[test]
    fn test_axis_offsets() {
        assert_eq!(Offset::horizontal(-1), Offset::LEFT);
        assert_eq!(Offset::vertical(1), Offset::DOWN);
        assert_eq!(Offset::RIGHT.scale(-1), Offset::LEFT);
    }

    #[test]
    fn test_coord_ordering_compares_x_first() {
        assert!(Coord::new(0, 5) < Coord::new(1, 0));
        assert!(Coord::new(1, 0) < Coord::new(1, 1));
    }
}
