//! Game Events
//!
//! What happened during a tick, for shells, logs and tests. Events are
//! informational; the authoritative state is always the grid.

use serde::{Serialize, Deserialize};

use crate::core::coord::{Coord, Offset};
use crate::game::key::KeyClass;
use crate::game::tile::Tile;

/// Game event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventData {
    /// Player entered a new cell
    PlayerMoved {
        from: Coord,
        to: Coord,
    },

    /// Destination tile refused the player
    MoveBlocked {
        at: Coord,
        toward: Offset,
    },

    /// Resting object pushed one column
    BlockPushed {
        tile: Tile,
        from: Coord,
        to: Coord,
    },

    /// Push precondition failed; nothing moved
    PushRefused {
        at: Coord,
        toward: Offset,
    },

    /// Falling object dropped one row
    BlockDropped {
        tile: Tile,
        from: Coord,
    },

    /// Key taken; matching locks cleared
    LocksRemoved {
        class: KeyClass,
        count: usize,
    },
}

/// A game event stamped with its tick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when event occurred
    pub tick: u32,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(tick: u32, data: GameEventData) -> Self {
        Self { tick, data }
    }

    /// Check if this event changed the grid.
    pub fn is_mutation(&self) -> bool {
        match &self.data {
            GameEventData::PlayerMoved { .. }
            | GameEventData::BlockPushed { .. }
            | GameEventData::BlockDropped { .. } => true,
            GameEventData::LocksRemoved { count, .. } => *count > 0,
            GameEventData::MoveBlocked { .. } | GameEventData::PushRefused { .. } => false,
        }
    }
}
