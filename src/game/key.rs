//! Key / Lock Configuration
//!
//! Binds a Key tile to the Lock tiles it opens. Configurations are
//! process-wide statics and never mutated; tiles refer to them by class.

use serde::{Serialize, Deserialize};

use crate::game::grid::Grid;
use crate::game::tile::Tile;

// =============================================================================
// KEY CLASS
// =============================================================================

/// Identity of one key/lock pairing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum KeyClass {
    /// Class 1 (yellow)
    Yellow = 1,
    /// Class 2 (cyan)
    Cyan = 2,
}

impl KeyClass {
    /// All classes, in index order.
    pub const ALL: [KeyClass; 2] = [KeyClass::Yellow, KeyClass::Cyan];

    /// Numeric class (1-based).
    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Class from its 1-based index.
    pub fn from_index(index: u8) -> Option<KeyClass> {
        match index {
            1 => Some(KeyClass::Yellow),
            2 => Some(KeyClass::Cyan),
            _ => None,
        }
    }

    /// The shared configuration for this class.
    pub fn configuration(self) -> &'static KeyConfiguration {
        match self {
            KeyClass::Yellow => &YELLOW_KEY,
            KeyClass::Cyan => &CYAN_KEY,
        }
    }
}

// =============================================================================
// REMOVE STRATEGY
// =============================================================================

/// Predicate selecting which tiles a key clears.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RemoveStrategy {
    class: KeyClass,
}

impl RemoveStrategy {
    /// Strategy clearing locks of `class`.
    pub const fn locks_of(class: KeyClass) -> Self {
        Self { class }
    }

    /// Class whose locks this strategy clears.
    #[inline]
    pub fn class(&self) -> KeyClass {
        self.class
    }

    /// Whether `tile` should be replaced with Air.
    #[inline]
    pub fn check(&self, tile: &Tile) -> bool {
        tile.is_lock_of_class(self.class)
    }
}

// =============================================================================
// KEY CONFIGURATION
// =============================================================================

/// Shared identity and policy for one key class.
#[derive(Debug, PartialEq, Eq)]
pub struct KeyConfiguration {
    class: KeyClass,
    color: &'static str,
    remove_strategy: RemoveStrategy,
}

/// Class 1 configuration.
pub static YELLOW_KEY: KeyConfiguration = KeyConfiguration {
    class: KeyClass::Yellow,
    color: "#ffcc00",
    remove_strategy: RemoveStrategy::locks_of(KeyClass::Yellow),
};

/// Class 2 configuration.
pub static CYAN_KEY: KeyConfiguration = KeyConfiguration {
    class: KeyClass::Cyan,
    color: "#00ccff",
    remove_strategy: RemoveStrategy::locks_of(KeyClass::Cyan),
};

impl KeyConfiguration {
    /// Class this configuration belongs to.
    #[inline]
    pub fn class(&self) -> KeyClass {
        self.class
    }

    /// Display colour for renderers.
    #[inline]
    pub fn color(&self) -> &'static str {
        self.color
    }

    /// Matching predicate.
    #[inline]
    pub fn remove_strategy(&self) -> RemoveStrategy {
        self.remove_strategy
    }

    /// Replace every matching lock on the grid with Air.
    ///
    /// Returns the number of locks removed.
    pub fn remove_locks(&self, grid: &mut Grid) -> usize {
        grid.remove_locks(self.remove_strategy)
    }
}
